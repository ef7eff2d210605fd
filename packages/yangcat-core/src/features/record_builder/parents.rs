//! Parent-module loading for submodule namespace/prefix resolution

use std::path::{Path, PathBuf};

use dashmap::DashMap;
use tracing::debug;

use crate::features::locator::SchemaIndex;
use crate::features::parsing::{Parser, StatementTree};
use crate::features::resolvers::ParentModuleSource;

/// Parsed parent trees keyed by file, shared by all workers of a pass
pub type ParentTreeCache = DashMap<PathBuf, StatementTree>;

/// Locates the parent through the schema index and parses it once
pub struct IndexedParents<'a> {
    parser: &'a dyn Parser,
    index: &'a SchemaIndex,
    near_dir: Option<&'a Path>,
    trees: &'a ParentTreeCache,
}

impl<'a> IndexedParents<'a> {
    pub fn new(
        parser: &'a dyn Parser,
        index: &'a SchemaIndex,
        near_dir: Option<&'a Path>,
        trees: &'a ParentTreeCache,
    ) -> Self {
        Self {
            parser,
            index,
            near_dir,
            trees,
        }
    }
}

impl ParentModuleSource for IndexedParents<'_> {
    fn load_parent(&self, name: &str) -> Option<StatementTree> {
        let candidate = self.index.locate(name, None, self.near_dir)?;
        if let Some(tree) = self.trees.get(&candidate.path) {
            return Some(tree.clone());
        }
        match self.parser.parse_file(&candidate.path) {
            Ok(tree) => {
                self.trees.insert(candidate.path.clone(), tree.clone());
                Some(tree)
            }
            Err(err) => {
                debug!(parent = name, error = %err, "Parent module failed to parse");
                None
            }
        }
    }
}
