//! Modules as declared by a vendor source document

use crate::shared::models::ConformanceType;

/// Deviation module named by a declaration; revision resolved later if absent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredDeviation {
    pub name: String,
    pub revision: Option<String>,
}

impl DeclaredDeviation {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            revision: None,
        }
    }
}

/// One module entry of a capability or yang-library document
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeclaredModule {
    pub name: String,
    pub revision: Option<String>,
    pub namespace: Option<String>,
    pub features: Vec<String>,
    pub deviations: Vec<DeclaredDeviation>,
    pub conformance_type: Option<ConformanceType>,
}

impl DeclaredModule {
    pub fn new(name: impl Into<String>, revision: Option<String>) -> Self {
        Self {
            name: name.into(),
            revision,
            ..Default::default()
        }
    }
}
