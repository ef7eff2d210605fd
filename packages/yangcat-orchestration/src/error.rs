use std::path::PathBuf;

use thiserror::Error;
use yangcat_core::config::ConfigError;
use yangcat_core::features::cache::CacheError;
use yangcat_core::CatalogError;

pub type Result<T> = std::result::Result<T, OrchestratorError>;

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Catalog error: {0}")]
    Core(#[from] CatalogError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input root does not exist: {}", .0.display())]
    RootMissing(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OrchestratorError {
    pub fn other<E: std::fmt::Display>(e: E) -> Self {
        Self::Other(anyhow::anyhow!("{}", e))
    }

    /// Conditions that end the whole pass rather than one source
    pub fn is_fatal(&self) -> bool {
        match self {
            OrchestratorError::RootMissing(_) | OrchestratorError::Cache(_) => true,
            OrchestratorError::Core(err) => err.is_fatal(),
            _ => false,
        }
    }
}
