//! Catalog configuration
//!
//! Loaded from a versioned YAML file, then adjusted by environment overrides:
//! - `YANGCAT_CACHE_PATH`
//! - `YANGCAT_OUTPUT_DIR`
//! - `YANGCAT_FORCE_PARSING` (`1`/`true` forces reprocessing and disables the cache)

pub mod error;
pub mod io;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use error::{ConfigError, ConfigResult};
use io::ConfigFileV1;

pub const SUPPORTED_VERSIONS: &[u32] = &[1];
pub const DEFAULT_TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DEFAULT_RAW_URL_BASE: &str = "https://raw.githubusercontent.com";

pub const ENV_CACHE_PATH: &str = "YANGCAT_CACHE_PATH";
pub const ENV_OUTPUT_DIR: &str = "YANGCAT_OUTPUT_DIR";
pub const ENV_FORCE_PARSING: &str = "YANGCAT_FORCE_PARSING";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// JSON file holding path → {hash → implementation ids}
    pub path: PathBuf,
    /// Disabled means every file is processed
    pub enabled: bool,
    /// Mixed into every content hash
    pub tool_version: String,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("cache/hash-cache.json"),
            enabled: true,
            tool_version: DEFAULT_TOOL_VERSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSettings {
    pub unparsable_registry: Option<PathBuf>,
    pub iana_exceptions: Option<PathBuf>,
    pub document_index: Option<PathBuf>,
    /// Archive of processed schemas as `name@revision.yang`
    pub save_file_dir: Option<PathBuf>,
    pub output_dir: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            unparsable_registry: None,
            iana_exceptions: None,
            document_index: None,
            save_file_dir: None,
            output_dir: PathBuf::from("out"),
        }
    }
}

/// Everything a parse pass needs besides its input roots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub cache: CacheSettings,
    pub paths: PathSettings,
    /// Extra roots searched when locating dependencies
    pub search_roots: Vec<PathBuf>,
    /// Process top-level files of a plain directory in parallel
    pub parallel: bool,
    /// Reprocess everything, including files in the unparsable registry
    pub force_parsing: bool,
    pub raw_url_base: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            cache: CacheSettings::default(),
            paths: PathSettings::default(),
            search_roots: Vec::new(),
            parallel: false,
            force_parsing: false,
            raw_url_base: DEFAULT_RAW_URL_BASE.to_string(),
        }
    }
}

impl CatalogConfig {
    /// Load a YAML v1 configuration file
    pub fn from_yaml(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;

        match file.version {
            None => return Err(ConfigError::MissingVersion),
            Some(found) if !SUPPORTED_VERSIONS.contains(&found) => {
                return Err(ConfigError::UnsupportedVersion {
                    found,
                    supported: SUPPORTED_VERSIONS.to_vec(),
                })
            }
            Some(_) => {}
        }

        let mut config = Self::default();
        if let Some(cache) = file.cache {
            if let Some(path) = cache.path {
                config.cache.path = path;
            }
            if let Some(enabled) = cache.enabled {
                config.cache.enabled = enabled;
            }
            if let Some(tool_version) = cache.tool_version {
                config.cache.tool_version = tool_version;
            }
        }
        if let Some(paths) = file.paths {
            config.paths.unparsable_registry = paths.unparsable_registry;
            config.paths.iana_exceptions = paths.iana_exceptions;
            config.paths.document_index = paths.document_index;
            config.paths.save_file_dir = paths.save_file_dir;
            if let Some(output_dir) = paths.output_dir {
                config.paths.output_dir = output_dir;
            }
        }
        if let Some(roots) = file.search_roots {
            config.search_roots = roots;
        }
        if let Some(parallel) = file.parallel {
            config.parallel = parallel;
        }
        if let Some(force) = file.force_parsing {
            config.force_parsing = force;
        }
        if let Some(base) = file.raw_url_base {
            config.raw_url_base = base;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(1),
            cache: Some(io::CacheSection {
                path: Some(self.cache.path.clone()),
                enabled: Some(self.cache.enabled),
                tool_version: Some(self.cache.tool_version.clone()),
            }),
            paths: Some(io::PathsSection {
                unparsable_registry: self.paths.unparsable_registry.clone(),
                iana_exceptions: self.paths.iana_exceptions.clone(),
                document_index: self.paths.document_index.clone(),
                save_file_dir: self.paths.save_file_dir.clone(),
                output_dir: Some(self.paths.output_dir.clone()),
            }),
            search_roots: Some(self.search_roots.clone()),
            parallel: Some(self.parallel),
            force_parsing: Some(self.force_parsing),
            raw_url_base: Some(self.raw_url_base.clone()),
        };
        Ok(serde_yaml::to_string(&file)?)
    }

    /// Apply `YANGCAT_*` variables from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(ENV_CACHE_PATH).filter(|v| !v.is_empty()) {
            debug!(%path, "Cache path overridden from environment");
            self.cache.path = PathBuf::from(path);
        }
        if let Some(dir) = lookup(ENV_OUTPUT_DIR).filter(|v| !v.is_empty()) {
            debug!(%dir, "Output directory overridden from environment");
            self.paths.output_dir = PathBuf::from(dir);
        }
        if let Some(flag) = lookup(ENV_FORCE_PARSING) {
            if matches!(flag.to_lowercase().as_str(), "1" | "true" | "yes") {
                self.set_force_parsing(true);
            }
        }
    }

    /// Forcing implies the hash cache is bypassed
    pub fn set_force_parsing(&mut self, force: bool) {
        self.force_parsing = force;
        if force {
            self.cache.enabled = false;
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.cache.tool_version.trim().is_empty() {
            return Err(ConfigError::validation(
                "cache.tool_version",
                "must not be empty",
            ));
        }
        if self.cache.path.file_name().is_none() {
            return Err(ConfigError::validation(
                "cache.path",
                "must name a file",
            ));
        }
        if !(self.raw_url_base.starts_with("http://") || self.raw_url_base.starts_with("https://")) {
            return Err(ConfigError::validation(
                "raw_url_base",
                format!("'{}' is not an http(s) URL", self.raw_url_base),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_yaml_loading() {
        let yaml = r#"
version: 1
cache:
  path: /tmp/cache.json
  tool_version: "2.0"
paths:
  save_file_dir: /tmp/all_modules
search_roots:
  - /tmp/extra
parallel: true
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = CatalogConfig::from_yaml(file.path()).unwrap();
        assert_eq!(config.cache.path, PathBuf::from("/tmp/cache.json"));
        assert_eq!(config.cache.tool_version, "2.0");
        assert!(config.cache.enabled);
        assert_eq!(config.paths.save_file_dir, Some(PathBuf::from("/tmp/all_modules")));
        assert_eq!(config.paths.output_dir, PathBuf::from("out"));
        assert_eq!(config.search_roots, vec![PathBuf::from("/tmp/extra")]);
        assert!(config.parallel);
    }

    #[test]
    fn test_yaml_missing_version() {
        let result = CatalogConfig::from_yaml_str("parallel: true\n");
        assert!(matches!(result, Err(ConfigError::MissingVersion)));
    }

    #[test]
    fn test_yaml_unsupported_version() {
        let result = CatalogConfig::from_yaml_str("version: 2\n");
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedVersion { found: 2, .. })
        ));
    }

    #[test]
    fn test_yaml_unknown_field_rejected() {
        let result = CatalogConfig::from_yaml_str("version: 1\nbogus: 3\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_validation_rejects_bad_url_base() {
        let result = CatalogConfig::from_yaml_str("version: 1\nraw_url_base: ftp://x\n");
        assert!(matches!(result, Err(ConfigError::Validation { .. })));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let mut config = CatalogConfig::default();
        config.search_roots.push(PathBuf::from("/srv/yang"));
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("version: 1"));
        assert_eq!(CatalogConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_CACHE_PATH, "/var/cache/yang.json"),
            (ENV_OUTPUT_DIR, "/var/out"),
            (ENV_FORCE_PARSING, "true"),
        ]
        .into_iter()
        .collect();

        let mut config = CatalogConfig::default();
        config.apply_overrides_from(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.cache.path, PathBuf::from("/var/cache/yang.json"));
        assert_eq!(config.paths.output_dir, PathBuf::from("/var/out"));
        assert!(config.force_parsing);
        assert!(!config.cache.enabled);
    }
}
