//! Catalog record for one schema document
//!
//! Field names follow the public module-catalog schema (kebab-case JSON).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::implementation::Implementation;

/// Revision used when a module has no (valid) `revision` statement
pub const DEFAULT_REVISION: &str = "1970-01-01";

/// Organization used when nothing else matches
pub const DEFAULT_ORGANIZATION: &str = "independent";

/// Namespace sentinel for submodules whose parent cannot be located
pub const MISSING_NAMESPACE: &str = "missing element";

/// Default `yang-version`
pub const DEFAULT_YANG_VERSION: &str = "1.0";

/// Grammar keyword of the document root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleType {
    Module,
    Submodule,
    Unknown,
}

impl ModuleType {
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "module" => ModuleType::Module,
            "submodule" => ModuleType::Submodule,
            _ => ModuleType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleType::Module => "module",
            ModuleType::Submodule => "submodule",
            ModuleType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the module text came to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeneratedFrom {
    Mib,
    Native,
    NotApplicable,
}

impl GeneratedFrom {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratedFrom::Mib => "mib",
            GeneratedFrom::Native => "native",
            GeneratedFrom::NotApplicable => "not-applicable",
        }
    }
}

/// `import` target of a module
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    /// `None` when the target file could not be located
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
}

impl Dependency {
    pub fn new(name: impl Into<String>, revision: Option<String>) -> Self {
        Self {
            name: name.into(),
            revision,
            schema: None,
        }
    }
}

/// `include` target of a module
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Submodule {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
}

impl Submodule {
    pub fn new(name: impl Into<String>, revision: Option<String>) -> Self {
        Self {
            name: name.into(),
            revision,
            schema: None,
        }
    }
}

/// Unique catalog key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleKey {
    pub name: String,
    pub revision: String,
    pub organization: String,
}

impl ModuleKey {
    pub fn new(
        name: impl Into<String>,
        revision: impl Into<String>,
        organization: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            revision: revision.into(),
            organization: organization.into(),
        }
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}/{}", self.name, self.revision, self.organization)
    }
}

/// Resolved identity and metadata of one schema document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModuleRecord {
    pub name: String,
    pub revision: String,
    pub organization: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    pub yang_version: String,
    pub module_type: ModuleType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub belongs_to: Option<String>,
    pub generated_from: GeneratedFrom,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maturity_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    #[serde(rename = "ietf-wg", default, skip_serializing_if = "Option::is_none")]
    pub working_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compilation_status: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    #[serde(rename = "submodule", default)]
    pub submodules: Vec<Submodule>,
    #[serde(default, with = "implementation_list")]
    pub implementations: Vec<Implementation>,
}

impl ModuleRecord {
    /// Bare record with every optional field unset
    pub fn new(name: impl Into<String>, module_type: ModuleType) -> Self {
        Self {
            name: name.into(),
            revision: DEFAULT_REVISION.to_string(),
            organization: DEFAULT_ORGANIZATION.to_string(),
            namespace: None,
            prefix: None,
            yang_version: DEFAULT_YANG_VERSION.to_string(),
            module_type,
            belongs_to: None,
            generated_from: GeneratedFrom::NotApplicable,
            maturity_level: None,
            document_name: None,
            author_email: None,
            working_group: None,
            reference: None,
            description: None,
            contact: None,
            schema: None,
            semantic_version: None,
            compilation_status: None,
            dependencies: Vec::new(),
            submodules: Vec::new(),
            implementations: Vec::new(),
        }
    }

    pub fn key(&self) -> ModuleKey {
        ModuleKey::new(&self.name, &self.revision, &self.organization)
    }

    /// `name@revision.yang`
    pub fn file_name(&self) -> String {
        format!("{}@{}.yang", self.name, self.revision)
    }

    /// Append implementations from another record of the same key.
    ///
    /// An implementation whose vendor/platform/software identity is already
    /// present is not appended twice.
    pub fn merge_implementations(&mut self, other: Vec<Implementation>) {
        for implementation in other {
            let duplicate = self
                .implementations
                .iter()
                .any(|existing| existing.same_platform(&implementation));
            if !duplicate {
                self.implementations.push(implementation);
            }
        }
    }
}

/// Serializes `Vec<Implementation>` as `{"implementation": [...]}`.
mod implementation_list {
    use super::Implementation;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize, Default)]
    struct Wrapper {
        #[serde(default)]
        implementation: Vec<Implementation>,
    }

    pub fn serialize<S>(value: &[Implementation], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        struct WrapperRef<'a> {
            implementation: &'a [Implementation],
        }
        WrapperRef {
            implementation: value,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Implementation>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Wrapper::deserialize(deserializer)?.implementation)
    }
}
