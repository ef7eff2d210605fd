//! Parsing infrastructure (grammar adapters)

mod yang_parser;

pub use yang_parser::YangStatementParser;
