//! Parsing Feature
//!
//! Turns schema files into statement trees.
//!
//! ## Structure
//! - `domain/` - Statement, StatementTree models
//! - `ports/` - Parser trait
//! - `infrastructure/` - YangStatementParser (default grammar adapter)

pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports
pub use domain::{Statement, StatementTree};
pub use infrastructure::YangStatementParser;
pub use ports::{ParseError, ParseResult, Parser};
