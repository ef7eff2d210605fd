//! Parser port (interface)
//!
//! Defines the contract for turning a schema file into a statement tree. The
//! grammar implementation behind it is swappable.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::features::parsing::domain::StatementTree;

/// Why a file could not be turned into a statement tree
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        ParseError::Syntax {
            line,
            message: message.into(),
        }
    }
}

pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Parser trait - abstraction over the grammar implementation
pub trait Parser: Send + Sync {
    /// Parse source text into a statement tree
    fn parse(&self, source: &str, file_path: &Path) -> ParseResult<StatementTree>;

    /// Read and parse a file
    fn parse_file(&self, path: &Path) -> ParseResult<StatementTree> {
        let bytes = fs::read(path)?;
        let source = String::from_utf8_lossy(&bytes);
        self.parse(&source, path)
    }

    /// Short name for logs
    fn name(&self) -> &'static str;
}
