//! Parsed schema document

use std::path::{Path, PathBuf};

use super::statement::Statement;

/// Statement tree of one schema file
#[derive(Debug, Clone)]
pub struct StatementTree {
    /// `module` or `submodule` statement (or whatever keyword the file starts with)
    pub root: Statement,

    /// File the tree was parsed from (for messages and relative lookups)
    pub file_path: PathBuf,
}

impl StatementTree {
    pub fn new(root: Statement, file_path: impl Into<PathBuf>) -> Self {
        Self {
            root,
            file_path: file_path.into(),
        }
    }

    pub fn keyword(&self) -> &str {
        &self.root.keyword
    }

    /// Module name declared by the root statement
    pub fn module_name(&self) -> Option<&str> {
        self.root.arg()
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}
