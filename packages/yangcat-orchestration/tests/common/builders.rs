//! Temporary workspace and pass builders

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use yangcat_core::{CatalogConfig, ModuleRecord};
use yangcat_orchestration::{CatalogOrchestrator, PassContext, PassInputs, PassReport};

/// A temporary directory with its own cache, registry and output locations
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("tempdir"),
        }
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Write `content` to `rel`, creating parents
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path(rel);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(&path, content).expect("write");
        path
    }

    pub fn config(&self) -> CatalogConfig {
        let mut config = CatalogConfig::default();
        config.cache.path = self.path("cache/hash-cache.json");
        config.cache.tool_version = "test-1".to_string();
        config.paths.unparsable_registry = Some(self.path("cache/unparsable.json"));
        config.paths.output_dir = self.path("out");
        config
    }

    /// Run one pass with the default configuration
    pub fn run(&self, inputs: &PassInputs) -> PassOutcome {
        self.run_with(self.config(), inputs)
    }

    pub fn run_with(&self, config: CatalogConfig, inputs: &PassInputs) -> PassOutcome {
        let ctx = PassContext::new(config).expect("pass context");
        let orchestrator = CatalogOrchestrator::new(ctx);
        let report = orchestrator.run(inputs).expect("pass");
        let records = orchestrator.context().catalog().records();
        PassOutcome { report, records }
    }
}

pub struct PassOutcome {
    pub report: PassReport,
    pub records: Vec<ModuleRecord>,
}

impl PassOutcome {
    pub fn named(&self, name: &str) -> Vec<&ModuleRecord> {
        self.records.iter().filter(|r| r.name == name).collect()
    }

    pub fn only(&self, name: &str) -> &ModuleRecord {
        let found = self.named(name);
        assert_eq!(found.len(), 1, "expected exactly one record for {name}");
        found[0]
    }
}

pub fn sdo_inputs(dir: &Path) -> PassInputs {
    PassInputs {
        sdo_dirs: vec![dir.to_path_buf()],
        ..Default::default()
    }
}

pub fn vendor_inputs(dir: &Path) -> PassInputs {
    PassInputs {
        vendor_dirs: vec![dir.to_path_buf()],
        ..Default::default()
    }
}
