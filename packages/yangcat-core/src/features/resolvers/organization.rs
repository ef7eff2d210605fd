//! Organization resolution
//!
//! Order: explicit override, `organization` text, known namespace prefixes,
//! first URN segment.

use super::failure::{Resolution, ResolveFailure};
use crate::features::parsing::Statement;

/// Namespace prefix → organization
const NAMESPACE_ORGANIZATIONS: &[(&str, &str)] = &[
    ("http://cisco.com/", "cisco"),
    ("http://tail-f.com/", "cisco"),
    ("http://www.huawei.com/netconf", "huawei"),
    ("http://openconfig.net/yang", "openconfig"),
    ("http://yang.juniper.net/", "juniper"),
    ("http://xml.juniper.net/", "juniper"),
    ("http://www.ciena.com/", "ciena"),
    ("http://fujitsu.com/", "fujitsu"),
    ("http://www.nokia.com/", "nokia"),
    ("urn:nokia.com", "nokia"),
    ("http://netconfcentral.org/", "yumaworks"),
];

/// Substrings of the `organization` statement that identify the organization outright
const ORGANIZATION_MARKERS: &[&str] = &["cisco", "ietf"];

pub fn resolve_organization(
    root: &Statement,
    namespace: Option<&str>,
    override_value: Option<&str>,
) -> Resolution<String> {
    if let Some(value) = override_value.map(str::trim).filter(|v| !v.is_empty()) {
        return Ok(value.to_lowercase());
    }

    if let Some(text) = root.child_arg("organization") {
        let lowered = text.to_lowercase();
        if let Some(marker) = ORGANIZATION_MARKERS.iter().find(|m| lowered.contains(*m)) {
            return Ok(marker.to_string());
        }
    }

    let namespace = namespace.ok_or(ResolveFailure::NotFound)?;
    organization_from_namespace(namespace).ok_or(ResolveFailure::NotFound)
}

/// Known prefix table first, then the segment after `urn:`
pub fn organization_from_namespace(namespace: &str) -> Option<String> {
    if let Some((_, organization)) = NAMESPACE_ORGANIZATIONS
        .iter()
        .find(|(prefix, _)| namespace.starts_with(prefix))
    {
        return Some(organization.to_string());
    }

    let (_, after_urn) = namespace.split_once("urn:")?;
    after_urn
        .split(':')
        .next()
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_lowercase)
}
