//! Namespace and prefix resolution
//!
//! Submodules declare neither; both are read from the module named by
//! `belongs-to`, which has to be located and parsed.

use super::failure::{Resolution, ResolveFailure};
use super::identity::resolve_module_type;
use crate::features::parsing::{Statement, StatementTree};
use crate::shared::models::ModuleType;

/// Loads the parent module of a submodule
pub trait ParentModuleSource {
    fn load_parent(&self, name: &str) -> Option<StatementTree>;
}

/// No parent is ever available
pub struct NoParents;

impl ParentModuleSource for NoParents {
    fn load_parent(&self, _name: &str) -> Option<StatementTree> {
        None
    }
}

pub fn resolve_namespace(root: &Statement, parents: &dyn ParentModuleSource) -> Resolution<String> {
    resolve_header_field(root, "namespace", parents)
}

pub fn resolve_prefix(root: &Statement, parents: &dyn ParentModuleSource) -> Resolution<String> {
    resolve_header_field(root, "prefix", parents)
}

fn resolve_header_field(
    root: &Statement,
    keyword: &str,
    parents: &dyn ParentModuleSource,
) -> Resolution<String> {
    match resolve_module_type(root) {
        ModuleType::Module => root
            .child_arg(keyword)
            .map(str::to_string)
            .ok_or(ResolveFailure::NotFound),
        ModuleType::Submodule => {
            let parent_name = root
                .child_arg("belongs-to")
                .ok_or_else(|| ResolveFailure::ParentUnavailable("no belongs-to".to_string()))?;
            let parent = parents
                .load_parent(parent_name)
                .ok_or_else(|| ResolveFailure::ParentUnavailable(parent_name.to_string()))?;
            parent
                .root
                .child_arg(keyword)
                .map(str::to_string)
                .ok_or_else(|| ResolveFailure::ParentUnavailable(parent_name.to_string()))
        }
        ModuleType::Unknown => Err(ResolveFailure::NotFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OneParent(StatementTree);

    impl ParentModuleSource for OneParent {
        fn load_parent(&self, name: &str) -> Option<StatementTree> {
            (self.0.module_name() == Some(name)).then(|| self.0.clone())
        }
    }

    fn submodule() -> Statement {
        Statement::new("submodule", 1)
            .with_argument("child")
            .with_children(vec![Statement::new("belongs-to", 2)
                .with_argument("parent-module")
                .with_children(vec![Statement::new("prefix", 3).with_argument("pm")])])
    }

    #[test]
    fn test_module_reads_own_header() {
        let root = Statement::new("module", 1).with_children(vec![
            Statement::new("namespace", 2).with_argument("urn:x"),
            Statement::new("prefix", 3).with_argument("x"),
        ]);
        assert_eq!(resolve_namespace(&root, &NoParents), Ok("urn:x".to_string()));
        assert_eq!(resolve_prefix(&root, &NoParents), Ok("x".to_string()));
    }

    #[test]
    fn test_submodule_reads_parent_header() {
        let parent = StatementTree::new(
            Statement::new("module", 1)
                .with_argument("parent-module")
                .with_children(vec![
                    Statement::new("namespace", 2).with_argument("urn:parent"),
                    Statement::new("prefix", 3).with_argument("par"),
                ]),
            "parent-module.yang",
        );
        let parents = OneParent(parent);
        assert_eq!(
            resolve_namespace(&submodule(), &parents),
            Ok("urn:parent".to_string())
        );
        assert_eq!(resolve_prefix(&submodule(), &parents), Ok("par".to_string()));
    }

    #[test]
    fn test_submodule_without_parent() {
        assert_eq!(
            resolve_namespace(&submodule(), &NoParents),
            Err(ResolveFailure::ParentUnavailable("parent-module".to_string()))
        );
        assert!(resolve_prefix(&submodule(), &NoParents).is_err());
    }
}
