//! `import` and `include` statements

use crate::features::parsing::Statement;
use crate::shared::models::{Dependency, Submodule};

/// Imports in document order, with pinned `revision-date` if present
pub fn resolve_imports(root: &Statement) -> Vec<Dependency> {
    root.find_children("import")
        .into_iter()
        .filter_map(|import| {
            let name = import.arg()?;
            Some(Dependency::new(name, pinned_revision(import)))
        })
        .collect()
}

/// Includes in document order, with pinned `revision-date` if present
pub fn resolve_includes(root: &Statement) -> Vec<Submodule> {
    root.find_children("include")
        .into_iter()
        .filter_map(|include| {
            let name = include.arg()?;
            Some(Submodule::new(name, pinned_revision(include)))
        })
        .collect()
}

fn pinned_revision(statement: &Statement) -> Option<String> {
    statement
        .child_arg("revision-date")
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
}
