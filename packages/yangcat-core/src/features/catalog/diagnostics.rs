//! Diagnostic channels collected during a pass

use std::collections::BTreeSet;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Snapshot of every channel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DiagnosticSets {
    /// `name` of modules without a usable `revision`
    pub missing_revision: BTreeSet<String>,
    /// `name@revision` of modules whose namespace could not be resolved
    pub missing_namespace: BTreeSet<String>,
    /// Basenames rejected by the grammar parser
    pub unparsable: BTreeSet<String>,
}

#[derive(Debug, Default)]
pub struct Diagnostics {
    sets: Mutex<DiagnosticSets>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_missing_revision(&self, name: &str) {
        self.sets.lock().missing_revision.insert(name.to_string());
    }

    pub fn record_missing_namespace(&self, name: &str, revision: &str) {
        self.sets
            .lock()
            .missing_namespace
            .insert(format!("{}@{}", name, revision));
    }

    pub fn record_unparsable(&self, file_name: &str) {
        self.sets.lock().unparsable.insert(file_name.to_string());
    }

    pub fn snapshot(&self) -> DiagnosticSets {
        self.sets.lock().clone()
    }
}
