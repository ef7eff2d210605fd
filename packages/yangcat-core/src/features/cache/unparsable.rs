//! Persistent registry of known-unparsable schema files
//!
//! Stored as a JSON list of file basenames. Listed files are skipped unless
//! parsing is forced; a later successful parse removes the entry.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::manager::write_atomic;
use super::CacheResult;
use crate::shared::paths::basename;

#[derive(Debug, Default)]
pub struct UnparsableRegistry {
    path: Option<PathBuf>,
    entries: Mutex<BTreeSet<String>>,
}

impl UnparsableRegistry {
    /// Registry that is never persisted
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load from `path`; a missing or unreadable file starts empty
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<Vec<String>>(&bytes) {
                Ok(list) => list.into_iter().collect(),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "Ignoring unreadable unparsable-file registry");
                    BTreeSet::new()
                }
            },
            Err(_) => BTreeSet::new(),
        };
        debug!(path = %path.display(), count = entries.len(), "Loaded unparsable-file registry");
        Self {
            path: Some(path),
            entries: Mutex::new(entries),
        }
    }

    pub fn contains(&self, file: &Path) -> bool {
        self.entries.lock().contains(&basename(file))
    }

    pub fn add(&self, file: &Path) {
        self.entries.lock().insert(basename(file));
    }

    pub fn remove(&self, file: &Path) -> bool {
        self.entries.lock().remove(&basename(file))
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().iter().cloned().collect()
    }

    pub fn persist(&self) -> CacheResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let list = self.entries();
        let bytes = serde_json::to_vec_pretty(&list)
            .map_err(|e| super::CacheError::Serialization(e.to_string()))?;
        write_atomic(path, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_add_persist_reload_remove() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("unparsable.json");

        let registry = UnparsableRegistry::load(&path);
        registry.add(Path::new("/src/broken@2020-01-01.yang"));
        registry.persist().unwrap();

        let reloaded = UnparsableRegistry::load(&path);
        assert!(reloaded.contains(Path::new("/other/dir/broken@2020-01-01.yang")));
        assert!(reloaded.remove(Path::new("broken@2020-01-01.yang")));
        assert!(reloaded.entries().is_empty());
    }

    #[test]
    fn test_in_memory_persist_is_noop() {
        let registry = UnparsableRegistry::in_memory();
        registry.add(Path::new("x.yang"));
        registry.persist().unwrap();
        assert_eq!(registry.entries(), vec!["x.yang".to_string()]);
    }
}
