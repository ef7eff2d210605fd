//! Schema file lookup by module name and optional revision
//!
//! Built once per grouping from its root plus the configured search roots.
//! A pinned revision must match exactly; otherwise the highest revision on
//! disk wins. Files in the directory of the referencing file are preferred
//! on ties.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::shared::models::DEFAULT_REVISION;
use crate::shared::paths::{is_yang_file, split_file_name};

static REVISION_STATEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*revision\s+["']?(\d{4}-\d{2}-\d{2})["']?"#).expect("valid regex")
});

/// One schema file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaCandidate {
    pub path: PathBuf,
    pub name: String,
    /// From the file name, else the first `revision` statement
    pub revision: Option<String>,
}

impl SchemaCandidate {
    fn effective_revision(&self) -> &str {
        self.revision.as_deref().unwrap_or(DEFAULT_REVISION)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SchemaIndex {
    by_name: HashMap<String, Vec<SchemaCandidate>>,
}

impl SchemaIndex {
    /// Index every `*.yang` file under `roots`; hidden directories are skipped
    pub fn build<P: AsRef<Path>>(roots: &[P]) -> Self {
        let mut index = Self::default();
        for root in roots {
            let root = root.as_ref();
            if !root.exists() {
                warn!(root = %root.display(), "Search root does not exist");
                continue;
            }
            for entry in WalkDir::new(root)
                .follow_links(false)
                .into_iter()
                .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
                .filter_map(Result::ok)
            {
                if entry.file_type().is_file() && is_yang_file(entry.path()) {
                    index.insert(entry.path());
                }
            }
        }
        debug!(modules = index.by_name.len(), "Built schema index");
        index
    }

    /// Add one file; ignored if it does not look like a schema file name
    pub fn insert(&mut self, path: &Path) {
        let Some((name, revision)) = split_file_name(path) else {
            return;
        };
        let revision = revision.or_else(|| sniff_revision(path));
        let candidates = self.by_name.entry(name.clone()).or_default();
        if candidates.iter().any(|c| c.path == path) {
            return;
        }
        candidates.push(SchemaCandidate {
            path: path.to_path_buf(),
            name,
            revision,
        });
    }

    pub fn candidates(&self, name: &str) -> &[SchemaCandidate] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.by_name.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Best file for `name` (and `revision` when pinned), preferring `near_dir`
    pub fn locate(
        &self,
        name: &str,
        revision: Option<&str>,
        near_dir: Option<&Path>,
    ) -> Option<&SchemaCandidate> {
        let is_near = |c: &SchemaCandidate| {
            near_dir
                .map(|dir| c.path.parent() == Some(dir))
                .unwrap_or(false)
        };
        let candidates = self.candidates(name).iter();

        match revision {
            Some(pinned) => candidates
                .filter(|c| c.revision.as_deref() == Some(pinned))
                .max_by(|a, b| {
                    is_near(a)
                        .cmp(&is_near(b))
                        .then_with(|| b.path.cmp(&a.path))
                }),
            None => candidates.max_by(|a, b| {
                a.effective_revision()
                    .cmp(b.effective_revision())
                    .then_with(|| is_near(a).cmp(&is_near(b)))
                    .then_with(|| b.path.cmp(&a.path))
            }),
        }
    }
}

/// First `revision` statement of a file, read line by line
pub fn sniff_revision(path: &Path) -> Option<String> {
    let file = File::open(path).ok()?;
    BufReader::new(file)
        .lines()
        .map_while(Result::ok)
        .find_map(|line| {
            REVISION_STATEMENT
                .captures(&line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })
}
