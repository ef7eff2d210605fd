//! In-document semantic version extensions
//!
//! Two patterns are recognized:
//! - `<p>:module-version "X.Y.Z"` inside the first `revision`, where `p` is the
//!   prefix under which `cisco-semver` is imported
//! - `<p>:openconfig-version "X.Y.Z"` at module level, where `p` is the prefix
//!   of `openconfig-extensions`

use once_cell::sync::Lazy;
use regex::Regex;

use super::failure::{Resolution, ResolveFailure};
use crate::features::parsing::Statement;

static SEMVER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\.\d+\.\d+").expect("valid regex"));

const CISCO_SEMVER_MODULE: &str = "cisco-semver";
const OPENCONFIG_EXTENSIONS_MODULE: &str = "openconfig-extensions";

pub fn resolve_semantic_version(root: &Statement) -> Resolution<String> {
    if let Some(prefix) = extension_prefix(root, CISCO_SEMVER_MODULE) {
        let keyword = format!("{}:module-version", prefix);
        if let Some(value) = root
            .find_child("revision")
            .and_then(|revision| revision.child_arg(&keyword))
        {
            return extract_semver(value);
        }
    }

    if let Some(prefix) = extension_prefix(root, OPENCONFIG_EXTENSIONS_MODULE) {
        let keyword = format!("{}:openconfig-version", prefix);
        if let Some(value) = root.child_arg(&keyword) {
            return extract_semver(value);
        }
    }

    Err(ResolveFailure::NotFound)
}

/// Prefix under which `module` is imported, or the module's own prefix if it is `module`
fn extension_prefix<'a>(root: &'a Statement, module: &str) -> Option<&'a str> {
    if root.arg() == Some(module) {
        return root.child_arg("prefix");
    }
    root.find_children("import")
        .into_iter()
        .find(|import| import.arg() == Some(module))
        .and_then(|import| import.child_arg("prefix"))
}

fn extract_semver(value: &str) -> Resolution<String> {
    SEMVER
        .find(value)
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ResolveFailure::Malformed(value.to_string()))
}
