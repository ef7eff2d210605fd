//! IANA YANG parameters registry
//!
//! `record` elements name a module file and cross-reference the RFC or draft
//! that published it. Only records with `iana` = `Y` are processed.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::errors::{CatalogError, CatalogResult};
use crate::features::resolvers::BibliographicOverrides;

const DATATRACKER: &str = "https://datatracker.ietf.org/doc";

static DRAFT_VERSION_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"-\d{2}$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XrefKind {
    Rfc,
    Draft,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xref {
    pub kind: XrefKind,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IanaRecord {
    pub name: String,
    pub file: Option<String>,
    pub namespace: Option<String>,
    pub iana_maintained: bool,
    pub xrefs: Vec<Xref>,
}

impl IanaRecord {
    /// Document name of the first RFC or draft cross-reference
    pub fn document_name(&self) -> Option<String> {
        self.xrefs.iter().find_map(|xref| match xref.kind {
            XrefKind::Rfc => Some(xref.data.to_lowercase()),
            XrefKind::Draft => Some(draft_document_name(&xref.data)),
            XrefKind::Other(_) => None,
        })
    }

    /// Registry-derived bibliographic values
    pub fn overrides(&self) -> BibliographicOverrides {
        let document_name = self.document_name();
        BibliographicOverrides {
            reference: document_name
                .as_ref()
                .map(|name| format!("{}/{}", DATATRACKER, name)),
            document_name,
            ..Default::default()
        }
    }
}

/// `RFC-ietf-netmod-foo-05` → `draft-ietf-netmod-foo`
pub fn draft_document_name(data: &str) -> String {
    let trimmed = data.trim();
    let renamed = match trimmed.get(..3) {
        Some(head) if head.eq_ignore_ascii_case("rfc") => format!("draft{}", &trimmed[3..]),
        _ => trimmed.to_string(),
    };
    DRAFT_VERSION_SUFFIX
        .replace(&renamed, "")
        .to_lowercase()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IanaRegistry {
    pub records: Vec<IanaRecord>,
}

impl IanaRegistry {
    pub fn parse(text: &str) -> Result<Self, roxmltree::Error> {
        let xml = roxmltree::Document::parse(text)?;
        let records = xml
            .descendants()
            .filter(|n| n.has_tag_name("record"))
            .filter_map(|record| {
                let text_of = |tag: &str| {
                    record
                        .children()
                        .find(|c| c.has_tag_name(tag))
                        .and_then(|c| c.text())
                        .map(|t| t.trim().to_string())
                        .filter(|t| !t.is_empty())
                };
                let name = text_of("name")?;
                let xrefs = record
                    .children()
                    .filter(|c| c.has_tag_name("xref"))
                    .filter_map(|xref| {
                        let data = xref.attribute("data")?.to_string();
                        let kind = match xref.attribute("type").unwrap_or_default() {
                            "rfc" => XrefKind::Rfc,
                            "draft" => XrefKind::Draft,
                            other => XrefKind::Other(other.to_string()),
                        };
                        Some(Xref { kind, data })
                    })
                    .collect();
                Some(IanaRecord {
                    iana_maintained: text_of("iana").as_deref() == Some("Y"),
                    file: text_of("file"),
                    namespace: text_of("namespace"),
                    name,
                    xrefs,
                })
            })
            .collect();
        Ok(Self { records })
    }

    pub fn load(path: &Path) -> CatalogResult<Self> {
        let text = fs::read_to_string(path)?;
        let registry = Self::parse(&text).map_err(|e| CatalogError::malformed(path, e.to_string()))?;
        debug!(path = %path.display(), records = registry.records.len(), "Loaded IANA registry");
        Ok(registry)
    }
}

/// Module names excluded from IANA processing; one per line, `#` starts a comment
pub fn load_exceptions(path: &Path) -> CatalogResult<HashSet<String>> {
    let text = fs::read_to_string(path)?;
    Ok(parse_exceptions(&text))
}

pub fn parse_exceptions(text: &str) -> HashSet<String> {
    text.lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
