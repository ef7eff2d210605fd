//! Configuration file schema (YAML v1)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1); optional here so that absence is reported explicitly
    #[serde(default)]
    pub version: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<PathsSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_roots: Option<Vec<PathBuf>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_parsing: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_url_base: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unparsable_registry: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iana_exceptions: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_index: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_file_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}
