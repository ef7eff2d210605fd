//! Error types for yangcat-core
//!
//! Per-file conditions (`Unparsable`, `SourceNotFound`, `MalformedDocument`,
//! `Collaborator`) are caught by the groupings; only cache corruption and a
//! missing root input abort a pass.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::features::cache::CacheError;
use crate::features::scm::ScmError;

/// Main error type for catalog construction
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML document could not be read
    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// Grammar parser rejected the file
    #[error("Unparsable file {}: {reason}", path.display())]
    Unparsable { path: PathBuf, reason: String },

    /// Vendor-declared module absent from every search root
    #[error("Source not found: {name}@{}", revision.as_deref().unwrap_or("*"))]
    SourceNotFound {
        name: String,
        revision: Option<String>,
    },

    /// Source document unusable after the self-heal attempt
    #[error("Malformed source document {}: {reason}", path.display())]
    MalformedDocument { path: PathBuf, reason: String },

    /// Source-control or catalog lookup failure
    #[error("Collaborator failure: {0}")]
    Collaborator(String),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CatalogError {
    pub fn unparsable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        CatalogError::Unparsable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        CatalogError::MalformedDocument {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn source_not_found(name: impl Into<String>, revision: Option<String>) -> Self {
        CatalogError::SourceNotFound {
            name: name.into(),
            revision,
        }
    }

    /// Conditions that must abort the whole pass
    pub fn is_fatal(&self) -> bool {
        matches!(self, CatalogError::Cache(CacheError::Corrupted(_)))
    }
}

impl From<ScmError> for CatalogError {
    fn from(err: ScmError) -> Self {
        CatalogError::Collaborator(err.to_string())
    }
}

/// Result type alias for catalog operations
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
