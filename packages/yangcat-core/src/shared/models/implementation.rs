//! Vendor implementation entries attached to module records

use serde::{Deserialize, Serialize};

/// Whether a platform implements a module or only imports it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConformanceType {
    Implement,
    Import,
}

impl ConformanceType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "implement" => Some(ConformanceType::Implement),
            "import" => Some(ConformanceType::Import),
            _ => None,
        }
    }
}

/// Vendor-declared exception to a module's behavior
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Deviation {
    pub name: String,
    pub revision: String,
}

/// One platform's implementation of a module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Implementation {
    pub vendor: String,
    pub platform: String,
    pub software_version: String,
    pub software_flavor: String,
    pub os_version: String,
    pub feature_set: String,
    pub os_type: String,
    #[serde(rename = "feature", default)]
    pub features: Vec<String>,
    #[serde(rename = "deviation", default)]
    pub deviations: Vec<Deviation>,
    #[serde(default)]
    pub conformance_type: Option<ConformanceType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub netconf_versions: Vec<String>,
}

impl Implementation {
    /// Identifier recorded in the hash cache for vendor files
    pub fn cache_id(&self) -> String {
        implementation_cache_id(&self.platform, &self.software_version)
    }

    /// Same vendor, platform, software version and flavor
    pub fn same_platform(&self, other: &Implementation) -> bool {
        self.vendor == other.vendor
            && self.platform == other.platform
            && self.software_version == other.software_version
            && self.software_flavor == other.software_flavor
    }
}

/// `{platform}/{software-version}`
pub fn implementation_cache_id(platform: &str, software_version: &str) -> String {
    format!("{}/{}", platform, software_version)
}
