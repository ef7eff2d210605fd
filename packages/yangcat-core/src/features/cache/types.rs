//! Core cache types

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Hex-encoded digest of file bytes plus the tool-version marker.
///
/// The empty value is the sentinel for a missing or unreadable file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// Sentinel for a file that could not be read
    pub fn missing() -> Self {
        Self(String::new())
    }

    pub fn is_missing(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_missing() {
            f.write_str("<missing>")
        } else {
            f.write_str(&self.0)
        }
    }
}

/// Implementation ids recorded under each hash of one file
pub type HashEntry = BTreeMap<ContentHash, Vec<String>>;

/// On-disk layout: file path → hash → implementation ids
pub type CacheEntries = BTreeMap<String, HashEntry>;
