//! NETCONF hello / capabilities documents
//!
//! Each `capability` element is one of: a base protocol version
//! (`urn:ietf:params:netconf:base:X`), a module capability carrying
//! `module=..&revision=..&features=..&deviations=..`, or another
//! `urn:ietf:params:netconf:capability:` URI.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::declared::{DeclaredDeviation, DeclaredModule};
use crate::errors::{CatalogError, CatalogResult};
use crate::shared::models::ConformanceType;

const NETCONF_BASE: &str = "urn:ietf:params:netconf:base:";
const NETCONF_CAPABILITY: &str = "urn:ietf:params:netconf:capability:";

/// Classified capability URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityRecord {
    NetconfBase(String),
    Module(DeclaredModule),
    Capability(String),
    Other(String),
}

impl CapabilityRecord {
    pub fn classify(uri: &str) -> Self {
        let uri = uri.trim();
        if uri.starts_with(NETCONF_BASE) {
            return CapabilityRecord::NetconfBase(uri.to_string());
        }
        if let Some(module) = parse_module_capability(uri) {
            return CapabilityRecord::Module(module);
        }
        if uri.starts_with(NETCONF_CAPABILITY) {
            return CapabilityRecord::Capability(uri.to_string());
        }
        CapabilityRecord::Other(uri.to_string())
    }
}

/// Module declaration from `<ns>?module=..&revision=..` or a bare `module=..` fragment
///
/// Features and deviations are only taken when a revision is pinned.
pub fn parse_module_capability(uri: &str) -> Option<DeclaredModule> {
    let (namespace, query) = match uri.split_once('?') {
        Some((namespace, query)) => (Some(namespace), query),
        None if uri.starts_with("module=") => (None, uri),
        None => return None,
    };

    let mut module = DeclaredModule {
        namespace: namespace.filter(|ns| !ns.is_empty()).map(str::to_string),
        conformance_type: Some(ConformanceType::Implement),
        ..Default::default()
    };

    for pair in query.replace("&amp;", "&").split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "module" => module.name = value.to_string(),
            "revision" if !value.is_empty() => module.revision = Some(value.to_string()),
            "features" => module.features = split_list(value),
            "deviations" => {
                module.deviations = split_list(value)
                    .into_iter()
                    .map(DeclaredDeviation::named)
                    .collect()
            }
            _ => {}
        }
    }

    if module.revision.is_none() && !(module.features.is_empty() && module.deviations.is_empty()) {
        debug!(module = %module.name, "No pinned revision, ignoring features and deviations");
        module.features.clear();
        module.deviations.clear();
    }

    (!module.name.is_empty()).then_some(module)
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parsed hello document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilityDocument {
    pub netconf_versions: Vec<String>,
    pub capabilities: Vec<String>,
    pub modules: Vec<DeclaredModule>,
}

impl CapabilityDocument {
    pub fn from_uris<'a>(uris: impl IntoIterator<Item = &'a str>) -> Self {
        let mut document = Self::default();
        for uri in uris {
            match CapabilityRecord::classify(uri) {
                CapabilityRecord::NetconfBase(version) => document.netconf_versions.push(version),
                CapabilityRecord::Module(module) => document.modules.push(module),
                CapabilityRecord::Capability(capability) => document.capabilities.push(capability),
                CapabilityRecord::Other(other) => debug!(uri = %other, "Ignoring capability"),
            }
        }
        document
    }

    pub fn parse(text: &str) -> Result<Self, roxmltree::Error> {
        let xml = roxmltree::Document::parse(text)?;
        let uris: Vec<&str> = xml
            .descendants()
            .filter(|n| n.has_tag_name("capability"))
            .filter_map(|n| n.text())
            .collect();
        Ok(Self::from_uris(uris))
    }

    /// Read `path`; on an XML error caused by bare `&`, escape them, rewrite
    /// the file and parse once more
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let text = fs::read_to_string(path)?;
        match Self::parse(&text) {
            Ok(document) => Ok(document),
            Err(first) => {
                let healed = escape_bare_ampersands(&text);
                if healed == text {
                    return Err(CatalogError::malformed(path, first.to_string()));
                }
                warn!(path = %path.display(), error = %first, "Escaping bare '&' and retrying");
                fs::write(path, &healed)?;
                Self::parse(&healed).map_err(|e| CatalogError::malformed(path, e.to_string()))
            }
        }
    }
}

/// Replace `&` not starting an entity reference with `&amp;`
pub fn escape_bare_ampersands(text: &str) -> String {
    const ENTITIES: &[&str] = &["amp;", "lt;", "gt;", "quot;", "apos;", "#"];
    let mut out = String::with_capacity(text.len());
    for (i, ch) in text.char_indices() {
        if ch == '&' {
            let rest = &text[i + 1..];
            if ENTITIES.iter().any(|e| rest.starts_with(e)) {
                out.push('&');
            } else {
                out.push_str("&amp;");
            }
        } else {
            out.push(ch);
        }
    }
    out
}
