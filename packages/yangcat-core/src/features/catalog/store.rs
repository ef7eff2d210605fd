//! Keyed module store
//!
//! One record per (name, revision, organization). A recurring key only
//! appends implementations to the stored record.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::diagnostics::Diagnostics;
use super::vendor_tree::VendorTree;
use crate::errors::CatalogResult;
use crate::shared::models::{ModuleKey, ModuleRecord};

/// What folding a record did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldOutcome {
    Inserted,
    Merged,
}

/// `{"module": [...]}` document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleCatalogDocument {
    #[serde(default)]
    pub module: Vec<ModuleRecord>,
}

#[derive(Debug, Default)]
pub struct Catalog {
    modules: Mutex<BTreeMap<ModuleKey, ModuleRecord>>,
    diagnostics: Diagnostics,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Insert a record, or append its implementations to the stored one
    pub fn fold(&self, record: ModuleRecord) -> FoldOutcome {
        let key = record.key();
        let mut modules = self.modules.lock();
        match modules.get_mut(&key) {
            Some(existing) => {
                debug!(%key, added = record.implementations.len(), "Merging module record");
                existing.merge_implementations(record.implementations);
                FoldOutcome::Merged
            }
            None => {
                modules.insert(key, record);
                FoldOutcome::Inserted
            }
        }
    }

    pub fn get(&self, key: &ModuleKey) -> Option<ModuleRecord> {
        self.modules.lock().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.modules.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.lock().is_empty()
    }

    /// All records in key order
    pub fn records(&self) -> Vec<ModuleRecord> {
        self.modules.lock().values().cloned().collect()
    }

    pub fn to_document(&self) -> ModuleCatalogDocument {
        ModuleCatalogDocument {
            module: self.records(),
        }
    }

    pub fn vendor_tree(&self) -> VendorTree {
        VendorTree::from_records(&self.records())
    }

    /// Write `modules.json`, `vendors.json` and `diagnostics.json` into `dir`
    pub fn write_outputs(&self, dir: &Path) -> CatalogResult<()> {
        fs::create_dir_all(dir)?;
        let modules = self.to_document();
        fs::write(dir.join("modules.json"), serde_json::to_vec_pretty(&modules)?)?;
        fs::write(
            dir.join("vendors.json"),
            serde_json::to_vec_pretty(&self.vendor_tree())?,
        )?;
        fs::write(
            dir.join("diagnostics.json"),
            serde_json::to_vec_pretty(&self.diagnostics.snapshot())?,
        )?;
        info!(dir = %dir.display(), modules = modules.module.len(), "Wrote catalog outputs");
        Ok(())
    }
}
