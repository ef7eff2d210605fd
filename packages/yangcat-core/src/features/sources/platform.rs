//! Platform identity for vendor sources
//!
//! Taken from `platform-metadata.json` next to the source document when
//! present, otherwise inferred from the document's position under a
//! `vendor/` directory.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::CatalogResult;
use crate::shared::models::{implementation_cache_id, ConformanceType, Deviation, Implementation};
use crate::shared::paths::basename;

pub const PLATFORM_METADATA_FILE: &str = "platform-metadata.json";
const DEFAULT_FLAVOR: &str = "ALL";

static CAPABILITY_FILE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^capabilit(?:y|ies)-(.+)\.xml$").expect("valid regex")
});

/// Everything an implementation entry needs except module-specific values
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlatformContext {
    pub vendor: String,
    pub platform: String,
    pub software_version: String,
    pub software_flavor: String,
    pub os_version: String,
    pub feature_set: String,
    pub os_type: String,
    pub capabilities: Vec<String>,
    pub netconf_versions: Vec<String>,
}

impl PlatformContext {
    /// `{platform}/{software-version}` as recorded in the hash cache
    pub fn cache_id(&self) -> String {
        implementation_cache_id(&self.platform, &self.software_version)
    }

    pub fn implementation(
        &self,
        features: Vec<String>,
        deviations: Vec<Deviation>,
        conformance_type: Option<ConformanceType>,
    ) -> Implementation {
        Implementation {
            vendor: self.vendor.clone(),
            platform: self.platform.clone(),
            software_version: self.software_version.clone(),
            software_flavor: self.software_flavor.clone(),
            os_version: self.os_version.clone(),
            feature_set: self.feature_set.clone(),
            os_type: self.os_type.clone(),
            features,
            deviations,
            conformance_type,
            capabilities: self.capabilities.clone(),
            netconf_versions: self.netconf_versions.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformMetadata {
    pub platforms: PlatformSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformSection {
    #[serde(default)]
    pub platform: Vec<PlatformEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlatformEntry {
    pub name: String,
    pub vendor: String,
    pub software_version: String,
    #[serde(default)]
    pub software_flavor: Option<String>,
    #[serde(default)]
    pub os_version: Option<String>,
    #[serde(default)]
    pub feature_set: Option<String>,
    pub os_type: String,
    #[serde(default)]
    pub module_list_file: Option<ModuleListFile>,
    #[serde(default)]
    pub netconf_capabilities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleListFile {
    pub path: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
}

impl PlatformEntry {
    pub fn context(&self) -> PlatformContext {
        PlatformContext {
            vendor: self.vendor.clone(),
            platform: self.name.clone(),
            software_version: self.software_version.clone(),
            software_flavor: self
                .software_flavor
                .clone()
                .unwrap_or_else(|| DEFAULT_FLAVOR.to_string()),
            os_version: self
                .os_version
                .clone()
                .unwrap_or_else(|| self.software_version.clone()),
            feature_set: self
                .feature_set
                .clone()
                .unwrap_or_else(|| DEFAULT_FLAVOR.to_string()),
            os_type: self.os_type.clone(),
            capabilities: Vec::new(),
            netconf_versions: self.netconf_capabilities.clone(),
        }
    }
}

impl PlatformMetadata {
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let metadata: Self = serde_json::from_slice(&fs::read(path)?)?;
        debug!(path = %path.display(), platforms = metadata.platforms.platform.len(), "Loaded platform metadata");
        Ok(metadata)
    }

    /// Metadata file in the same directory as `document`, if any
    pub fn beside(document: &Path) -> Option<PathBuf> {
        let candidate = document.parent()?.join(PLATFORM_METADATA_FILE);
        candidate.is_file().then_some(candidate)
    }

    /// Platforms whose module-list file is `document`; every platform when none names a file
    pub fn platforms_for(&self, document: &Path) -> Vec<PlatformContext> {
        let file_name = basename(document);
        let named: Vec<&PlatformEntry> = self
            .platforms
            .platform
            .iter()
            .filter(|p| p.module_list_file.is_some())
            .collect();

        if named.is_empty() {
            return self.platforms.platform.iter().map(PlatformEntry::context).collect();
        }
        named
            .into_iter()
            .filter(|p| {
                p.module_list_file
                    .as_ref()
                    .map(|f| basename(Path::new(&f.path)) == file_name)
                    .unwrap_or(false)
            })
            .map(PlatformEntry::context)
            .collect()
    }
}

/// Platform from `.../vendor/<vendor>/<...>/<version>/<file>`.
///
/// Cisco trees are `vendor/cisco/{xr,xe,nx}/<version>/capabilities-<platform>.xml`.
pub fn infer_platform(document: &Path) -> Option<PlatformContext> {
    let parts: Vec<String> = document
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    let vendor_pos = parts.iter().rposition(|p| p == "vendor")?;
    let rest = &parts[vendor_pos + 1..];
    // vendor, at least one directory, file
    if rest.len() < 3 {
        return None;
    }
    let vendor = rest[0].clone();
    let file_name = rest[rest.len() - 1].clone();
    let software_version = rest[rest.len() - 2].clone();
    let from_file = CAPABILITY_FILE
        .captures(&file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    let (os_type, platform) = if vendor == "cisco" && rest.len() >= 4 {
        let os = rest[1].as_str();
        let os_type = match os {
            "xr" => "IOS-XR",
            "xe" => "IOS-XE",
            "nx" => "NX-OS",
            other => other,
        }
        .to_string();
        let platform = if os == "nx" {
            "Nexus 9000".to_string()
        } else {
            from_file.unwrap_or_else(|| "Unknown".to_string())
        };
        (os_type, platform)
    } else {
        let os_type = if rest.len() >= 4 {
            rest[1].clone()
        } else {
            vendor.clone()
        };
        (os_type, from_file.unwrap_or_else(|| rest[rest.len() - 2].clone()))
    };

    Some(PlatformContext {
        vendor,
        platform,
        os_version: software_version.clone(),
        software_version,
        software_flavor: DEFAULT_FLAVOR.to_string(),
        feature_set: DEFAULT_FLAVOR.to_string(),
        os_type,
        capabilities: Vec::new(),
        netconf_versions: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_infer_cisco_xr() {
        let context =
            infer_platform(Path::new("/repo/vendor/cisco/xr/701/capabilities-ncs5k.xml")).unwrap();
        assert_eq!(context.vendor, "cisco");
        assert_eq!(context.os_type, "IOS-XR");
        assert_eq!(context.platform, "ncs5k");
        assert_eq!(context.software_version, "701");
        assert_eq!(context.cache_id(), "ncs5k/701");
    }

    #[test]
    fn test_infer_cisco_nx() {
        let context =
            infer_platform(Path::new("/repo/vendor/cisco/nx/9.2-1/netconf-capabilities.xml")).unwrap();
        assert_eq!(context.platform, "Nexus 9000");
        assert_eq!(context.os_type, "NX-OS");
    }

    #[test]
    fn test_infer_outside_vendor_tree() {
        assert!(infer_platform(Path::new("/repo/standard/ietf/capabilities.xml")).is_none());
    }

    #[test]
    fn test_platforms_for_document() {
        let json = r#"{"platforms": {"platform": [
            {"name": "ASR9K", "vendor": "cisco", "software-version": "7.0.1", "os-type": "IOS-XR",
             "module-list-file": {"path": "vendor/cisco/xr/701/capabilities-asr9k.xml"},
             "netconf-capabilities": ["urn:ietf:params:netconf:base:1.1"]},
            {"name": "NCS5500", "vendor": "cisco", "software-version": "7.0.1", "os-type": "IOS-XR",
             "software-flavor": "full",
             "module-list-file": {"path": "vendor/cisco/xr/701/capabilities-ncs5500.xml"}}
        ]}}"#;
        let metadata: PlatformMetadata = serde_json::from_str(json).unwrap();

        let asr = metadata.platforms_for(Path::new("/x/capabilities-asr9k.xml"));
        assert_eq!(asr.len(), 1);
        assert_eq!(asr[0].software_flavor, "ALL");
        assert_eq!(asr[0].os_version, "7.0.1");
        assert_eq!(asr[0].netconf_versions.len(), 1);

        let ncs = metadata.platforms_for(Path::new("/x/capabilities-ncs5500.xml"));
        assert_eq!(ncs[0].software_flavor, "full");
        assert!(metadata.platforms_for(Path::new("/x/other.xml")).is_empty());
    }
}
