//! Parsing ports (interfaces)

mod parser;

pub use parser::{ParseError, ParseResult, Parser};
