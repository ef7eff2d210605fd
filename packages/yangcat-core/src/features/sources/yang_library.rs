//! ietf-yang-library documents
//!
//! Both the legacy `modules-state/module` layout and the `module-set` layout
//! (`module` plus `import-only-module`) are read.

use std::fs;
use std::path::Path;

use roxmltree::Node;

use super::declared::{DeclaredDeviation, DeclaredModule};
use crate::errors::{CatalogError, CatalogResult};
use crate::shared::models::ConformanceType;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YangLibraryDocument {
    pub modules: Vec<DeclaredModule>,
}

fn child_text<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.children()
        .find(|c| c.has_tag_name(name))
        .and_then(|c| c.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn read_module(node: Node<'_, '_>, default_conformance: ConformanceType) -> Option<DeclaredModule> {
    let name = child_text(node, "name")?.to_string();
    let revision = child_text(node, "revision").map(str::to_string);
    let features = node
        .children()
        .filter(|c| c.has_tag_name("feature"))
        .filter_map(|c| c.text())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    let deviations = node
        .children()
        .filter(|c| c.has_tag_name("deviation"))
        .filter_map(|c| match child_text(c, "name") {
            Some(name) => Some(DeclaredDeviation {
                name: name.to_string(),
                revision: child_text(c, "revision").map(str::to_string),
            }),
            None => c
                .text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(DeclaredDeviation::named),
        })
        .collect();
    let conformance_type = child_text(node, "conformance-type")
        .and_then(ConformanceType::parse)
        .or(Some(default_conformance));

    Some(DeclaredModule {
        name,
        revision,
        namespace: child_text(node, "namespace").map(str::to_string),
        features,
        deviations,
        conformance_type,
    })
}

impl YangLibraryDocument {
    pub fn parse(text: &str) -> Result<Self, roxmltree::Error> {
        let xml = roxmltree::Document::parse(text)?;
        let modules = xml
            .descendants()
            .filter_map(|node| {
                let parent = node.parent_element()?;
                let in_list = parent.has_tag_name("modules-state") || parent.has_tag_name("module-set");
                if !in_list {
                    return None;
                }
                if node.has_tag_name("module") {
                    read_module(node, ConformanceType::Implement)
                } else if node.has_tag_name("import-only-module") {
                    read_module(node, ConformanceType::Import)
                } else {
                    None
                }
            })
            .collect();
        Ok(Self { modules })
    }

    pub fn load(path: &Path) -> CatalogResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text).map_err(|e| CatalogError::malformed(path, e.to_string()))
    }
}
