//! Hash cache manager
//!
//! Owns the on-disk cache file for one pass. The snapshot loaded at start is
//! the only thing decisions consult; updates accumulate in a separate map and
//! are merged into the file once, under a single lock, by
//! [`HashCacheManager::merge_and_persist`].

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, info};

use super::{CacheEntries, CacheError, CacheResult, ContentHash, FileHasher};

pub struct HashCacheManager {
    path: PathBuf,
    enabled: bool,
    hasher: FileHasher,
    snapshot: CacheEntries,
    updates: Mutex<CacheEntries>,
}

impl HashCacheManager {
    /// Load the cache file; a missing file starts empty, an unreadable one is `Corrupted`.
    ///
    /// A disabled cache still records updates but never skips a file.
    pub fn load(path: impl Into<PathBuf>, hasher: FileHasher, enabled: bool) -> CacheResult<Self> {
        let path = path.into();
        let snapshot = if enabled {
            read_entries(&path)?
        } else {
            CacheEntries::new()
        };
        debug!(
            path = %path.display(),
            files = snapshot.len(),
            enabled,
            "Loaded hash cache"
        );
        Ok(Self {
            path,
            enabled,
            hasher,
            snapshot,
            updates: Mutex::new(CacheEntries::new()),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn hash_file(&self, path: &Path) -> ContentHash {
        self.hasher.hash_file(path)
    }

    /// SDO/IANA rule: process iff the hash is not recorded for the path
    pub fn should_parse_plain(&self, path: &Path, hash: &ContentHash) -> bool {
        if !self.enabled || hash.is_missing() {
            return true;
        }
        !self.hash_exists(path, hash)
    }

    /// Vendor rule: `!(hash_exists && no_new_implementation_ids)`
    pub fn should_parse_vendor(
        &self,
        path: &Path,
        hash: &ContentHash,
        implementation_ids: &[String],
    ) -> bool {
        if !self.enabled || hash.is_missing() {
            return true;
        }
        let recorded = match self.snapshot.get(&path_key(path)).and_then(|e| e.get(hash)) {
            Some(recorded) => recorded,
            None => return true,
        };
        let no_new_ids = implementation_ids.iter().all(|id| recorded.contains(id));
        !no_new_ids
    }

    fn hash_exists(&self, path: &Path, hash: &ContentHash) -> bool {
        self.snapshot
            .get(&path_key(path))
            .map(|entry| entry.contains_key(hash))
            .unwrap_or(false)
    }

    /// Record a processed SDO/IANA file (empty implementation list)
    pub fn record_plain(&self, path: &Path, hash: &ContentHash) {
        self.record_vendor(path, hash, &[]);
    }

    /// Record a processed vendor file together with its implementation ids
    pub fn record_vendor(&self, path: &Path, hash: &ContentHash, implementation_ids: &[String]) {
        if hash.is_missing() {
            return;
        }
        let mut updates = self.updates.lock();
        let ids = updates
            .entry(path_key(path))
            .or_default()
            .entry(hash.clone())
            .or_default();
        for id in implementation_ids {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
    }

    /// Implementation ids known for `(path, hash)` in the snapshot and pending updates
    pub fn recorded_ids(&self, path: &Path, hash: &ContentHash) -> Vec<String> {
        let key = path_key(path);
        let mut ids: Vec<String> = self
            .snapshot
            .get(&key)
            .and_then(|e| e.get(hash))
            .cloned()
            .unwrap_or_default();
        if let Some(pending) = self.updates.lock().get(&key).and_then(|e| e.get(hash)) {
            for id in pending {
                if !ids.contains(id) {
                    ids.push(id.clone());
                }
            }
        }
        ids
    }

    pub fn pending_updates(&self) -> usize {
        self.updates.lock().len()
    }

    /// Merge pending updates into the file on disk and write it atomically.
    ///
    /// The file is re-read under the lock so that entries written by an
    /// earlier pass are unioned rather than overwritten. Returns the number of
    /// paths merged.
    pub fn merge_and_persist(&self) -> CacheResult<usize> {
        let mut updates = self.updates.lock();
        if updates.is_empty() {
            return Ok(0);
        }

        let mut on_disk = read_entries(&self.path)?;
        let merged = updates.len();
        merge_entries(&mut on_disk, &updates);

        let bytes = serde_json::to_vec_pretty(&on_disk)
            .map_err(|e| CacheError::Serialization(e.to_string()))?;
        write_atomic(&self.path, &bytes)?;
        updates.clear();

        info!(path = %self.path.display(), merged, "Persisted hash cache");
        Ok(merged)
    }
}

/// Union per path, per hash
pub fn merge_entries(target: &mut CacheEntries, updates: &CacheEntries) {
    for (path, hashes) in updates {
        let entry = target.entry(path.clone()).or_default();
        for (hash, ids) in hashes {
            let recorded = entry.entry(hash.clone()).or_default();
            for id in ids {
                if !recorded.contains(id) {
                    recorded.push(id.clone());
                }
            }
        }
    }
}

fn path_key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn read_entries(path: &Path) -> CacheResult<CacheEntries> {
    if !path.exists() {
        return Ok(CacheEntries::new());
    }
    let bytes = fs::read(path)?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(CacheEntries::new());
    }
    serde_json::from_slice(&bytes)
        .map_err(|e| CacheError::Corrupted(format!("{}: {}", path.display(), e)))
}

pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> CacheResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, bytes)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::TempDir;

    fn setup() -> (TempDir, PathBuf, PathBuf) {
        let dir = TempDir::new().unwrap();
        let cache_path = dir.path().join("cache").join("hashes.json");
        let schema = dir.path().join("a.yang");
        fs::write(&schema, "module a { }").unwrap();
        (dir, cache_path, schema)
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_plain_rule_skips_recorded_hash() {
        let (_dir, cache_path, schema) = setup();

        let first = HashCacheManager::load(&cache_path, FileHasher::new("1"), true).unwrap();
        let hash = first.hash_file(&schema);
        assert!(first.should_parse_plain(&schema, &hash));
        first.record_plain(&schema, &hash);
        assert_eq!(first.merge_and_persist().unwrap(), 1);

        let second = HashCacheManager::load(&cache_path, FileHasher::new("1"), true).unwrap();
        assert!(!second.should_parse_plain(&schema, &second.hash_file(&schema)));
    }

    #[test]
    fn test_plain_rule_reprocesses_changed_bytes() {
        let (_dir, cache_path, schema) = setup();

        let first = HashCacheManager::load(&cache_path, FileHasher::new("1"), true).unwrap();
        first.record_plain(&schema, &first.hash_file(&schema));
        first.merge_and_persist().unwrap();

        fs::OpenOptions::new()
            .append(true)
            .open(&schema)
            .unwrap()
            .write_all(b" ")
            .unwrap();

        let second = HashCacheManager::load(&cache_path, FileHasher::new("1"), true).unwrap();
        assert!(second.should_parse_plain(&schema, &second.hash_file(&schema)));
    }

    #[test]
    fn test_tool_version_invalidates() {
        let (_dir, cache_path, schema) = setup();

        let first = HashCacheManager::load(&cache_path, FileHasher::new("1"), true).unwrap();
        first.record_plain(&schema, &first.hash_file(&schema));
        first.merge_and_persist().unwrap();

        let upgraded = HashCacheManager::load(&cache_path, FileHasher::new("2"), true).unwrap();
        assert!(upgraded.should_parse_plain(&schema, &upgraded.hash_file(&schema)));
    }

    #[test]
    fn test_vendor_rule_new_implementation_reprocesses() {
        let (_dir, cache_path, schema) = setup();

        let first = HashCacheManager::load(&cache_path, FileHasher::new("1"), true).unwrap();
        let hash = first.hash_file(&schema);
        first.record_vendor(&schema, &hash, &ids(&["platA/1.0"]));
        first.merge_and_persist().unwrap();

        let second = HashCacheManager::load(&cache_path, FileHasher::new("1"), true).unwrap();
        assert!(!second.should_parse_vendor(&schema, &hash, &ids(&["platA/1.0"])));
        let both = ids(&["platA/1.0", "platB/1.0"]);
        assert!(second.should_parse_vendor(&schema, &hash, &both));
        second.record_vendor(&schema, &hash, &both);
        second.merge_and_persist().unwrap();

        let third = HashCacheManager::load(&cache_path, FileHasher::new("1"), true).unwrap();
        assert_eq!(third.recorded_ids(&schema, &hash), both);
        assert!(!third.should_parse_vendor(&schema, &hash, &both));
    }

    #[test]
    fn test_disabled_cache_always_processes() {
        let (_dir, cache_path, schema) = setup();

        let first = HashCacheManager::load(&cache_path, FileHasher::new("1"), true).unwrap();
        let hash = first.hash_file(&schema);
        first.record_vendor(&schema, &hash, &ids(&["p/1"]));
        first.merge_and_persist().unwrap();

        let disabled = HashCacheManager::load(&cache_path, FileHasher::new("1"), false).unwrap();
        assert!(disabled.should_parse_plain(&schema, &hash));
        assert!(disabled.should_parse_vendor(&schema, &hash, &ids(&["p/1"])));
    }

    #[test]
    fn test_merge_unions_concurrent_writers() {
        let (_dir, cache_path, schema) = setup();
        let a = HashCacheManager::load(&cache_path, FileHasher::new("1"), true).unwrap();
        let b = HashCacheManager::load(&cache_path, FileHasher::new("1"), true).unwrap();
        let hash = a.hash_file(&schema);

        a.record_vendor(&schema, &hash, &ids(&["platA/1"]));
        b.record_vendor(&schema, &hash, &ids(&["platB/1"]));
        a.merge_and_persist().unwrap();
        b.merge_and_persist().unwrap();

        let reloaded = HashCacheManager::load(&cache_path, FileHasher::new("1"), true).unwrap();
        assert_eq!(reloaded.recorded_ids(&schema, &hash), ids(&["platA/1", "platB/1"]));
    }

    #[test]
    fn test_missing_hash_never_recorded() {
        let (_dir, cache_path, _schema) = setup();
        let manager = HashCacheManager::load(&cache_path, FileHasher::new("1"), true).unwrap();
        manager.record_plain(Path::new("gone.yang"), &ContentHash::missing());
        assert_eq!(manager.pending_updates(), 0);
    }

    #[test]
    fn test_corrupted_file_is_reported() {
        let (_dir, cache_path, _schema) = setup();
        fs::create_dir_all(cache_path.parent().unwrap()).unwrap();
        fs::write(&cache_path, "{ not json").unwrap();
        let result = HashCacheManager::load(&cache_path, FileHasher::new("1"), true);
        assert!(matches!(result, Err(CacheError::Corrupted(_))));
    }
}
