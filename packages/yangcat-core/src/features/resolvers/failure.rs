//! Resolver outcome types

use thiserror::Error;

/// Why a resolver could not produce its value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveFailure {
    /// The expected statement is absent
    #[error("statement not found")]
    NotFound,

    /// The statement exists but its argument is unusable
    #[error("malformed value: {0}")]
    Malformed(String),

    /// Submodule property whose parent module could not be loaded
    #[error("parent module unavailable: {0}")]
    ParentUnavailable(String),
}

pub type Resolution<T> = std::result::Result<T, ResolveFailure>;
