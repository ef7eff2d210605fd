//! Source-control errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScmError {
    #[error("Not a git repository: {0}")]
    NotARepository(String),

    #[error("Unknown reference '{reference}': {message}")]
    UnknownReference { reference: String, message: String },

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScmResult<T> = std::result::Result<T, ScmError>;
