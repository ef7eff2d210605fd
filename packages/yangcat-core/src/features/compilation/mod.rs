//! Compilation-status lookup
//!
//! Compilation status is computed elsewhere; the builder only copies a known
//! status onto the record.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::errors::CatalogResult;
use crate::features::catalog::ModuleCatalogDocument;
use crate::shared::models::ModuleKey;

pub trait CompilationStatusLookup: Send + Sync {
    fn get_existing_compilation_status(&self, key: &ModuleKey) -> Option<String>;
}

/// Knows nothing
pub struct NoCompilationStatus;

impl CompilationStatusLookup for NoCompilationStatus {
    fn get_existing_compilation_status(&self, _key: &ModuleKey) -> Option<String> {
        None
    }
}

/// Statuses read from a previously written module catalog
#[derive(Debug, Default)]
pub struct PreviousCatalogStatus {
    statuses: HashMap<ModuleKey, String>,
}

impl PreviousCatalogStatus {
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let document: ModuleCatalogDocument = serde_json::from_slice(&fs::read(path)?)?;
        let statuses: HashMap<ModuleKey, String> = document
            .module
            .into_iter()
            .filter_map(|record| {
                let key = record.key();
                record.compilation_status.map(|status| (key, status))
            })
            .collect();
        debug!(path = %path.display(), known = statuses.len(), "Loaded previous compilation statuses");
        Ok(Self { statuses })
    }
}

impl CompilationStatusLookup for PreviousCatalogStatus {
    fn get_existing_compilation_status(&self, key: &ModuleKey) -> Option<String> {
        self.statuses.get(key).cloned()
    }
}
