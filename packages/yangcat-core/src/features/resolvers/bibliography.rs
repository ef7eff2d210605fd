//! Bibliographic fields: author email, document name, maturity level, working group
//!
//! Values come from caller-supplied overrides first, then from the
//! [`DocumentIndex`] side-index of RFC and draft publication records.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::failure::{Resolution, ResolveFailure};
use crate::errors::CatalogResult;

/// One published document that carries a module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PublicationRecord {
    /// `name` or `name@revision`
    pub module: String,
    pub document_name: String,
    #[serde(default)]
    pub author_email: Option<String>,
    #[serde(default)]
    pub working_group: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
}

/// Side-index of publication records keyed by `name@revision` and `name`
#[derive(Debug, Clone, Default)]
pub struct DocumentIndex {
    by_module: HashMap<String, PublicationRecord>,
}

impl DocumentIndex {
    pub fn new(records: Vec<PublicationRecord>) -> Self {
        let by_module = records
            .into_iter()
            .map(|record| (record.module.trim_end_matches(".yang").to_string(), record))
            .collect();
        Self { by_module }
    }

    /// Load a JSON list of publication records
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let bytes = fs::read(path)?;
        let records: Vec<PublicationRecord> = serde_json::from_slice(&bytes)?;
        debug!(count = records.len(), path = %path.display(), "Loaded document index");
        Ok(Self::new(records))
    }

    /// Exact `name@revision` match first, then bare name
    pub fn lookup(&self, name: &str, revision: &str) -> Option<&PublicationRecord> {
        self.by_module
            .get(&format!("{}@{}", name, revision))
            .or_else(|| self.by_module.get(name))
    }

    pub fn len(&self) -> usize {
        self.by_module.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_module.is_empty()
    }
}

/// Out-of-band values supplied by the caller (registry or submission)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BibliographicOverrides {
    pub organization: Option<String>,
    pub author_email: Option<String>,
    pub document_name: Option<String>,
    pub maturity_level: Option<String>,
    pub working_group: Option<String>,
    pub reference: Option<String>,
}

fn first_of(override_value: Option<&str>, indexed: Option<&str>) -> Resolution<String> {
    override_value
        .or(indexed)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(ResolveFailure::NotFound)
}

pub fn resolve_author_email(
    override_value: Option<&str>,
    publication: Option<&PublicationRecord>,
) -> Resolution<String> {
    first_of(
        override_value,
        publication.and_then(|p| p.author_email.as_deref()),
    )
}

pub fn resolve_document_name(
    override_value: Option<&str>,
    publication: Option<&PublicationRecord>,
) -> Resolution<String> {
    first_of(override_value, publication.map(|p| p.document_name.as_str()))
}

/// `rfc*` → ratified, `draft-ietf-*` → adopted, other drafts → initial
pub fn resolve_maturity_level(
    override_value: Option<&str>,
    publication: Option<&PublicationRecord>,
) -> Resolution<String> {
    if let Some(value) = override_value.map(str::trim).filter(|v| !v.is_empty()) {
        return Ok(value.to_string());
    }
    let document = publication
        .map(|p| p.document_name.to_lowercase())
        .ok_or(ResolveFailure::NotFound)?;
    maturity_from_document(&document)
}

/// Maturity implied by a (lowercase) document name
pub fn maturity_from_document(document: &str) -> Resolution<String> {
    if document.starts_with("rfc") {
        Ok("ratified".to_string())
    } else if document.starts_with("draft-ietf-") {
        Ok("adopted".to_string())
    } else if document.starts_with("draft-") {
        Ok("initial".to_string())
    } else {
        Err(ResolveFailure::Malformed(document.to_string()))
    }
}

/// Override, indexed working group, then the `<wg>` of `draft-ietf-<wg>-...`
pub fn resolve_working_group(
    override_value: Option<&str>,
    publication: Option<&PublicationRecord>,
) -> Resolution<String> {
    if let Ok(value) = first_of(
        override_value,
        publication.and_then(|p| p.working_group.as_deref()),
    ) {
        return Ok(value);
    }
    let document = publication
        .map(|p| p.document_name.to_lowercase())
        .ok_or(ResolveFailure::NotFound)?;
    document
        .strip_prefix("draft-ietf-")
        .and_then(|rest| rest.split('-').next())
        .filter(|wg| !wg.is_empty())
        .map(str::to_string)
        .ok_or(ResolveFailure::NotFound)
}
