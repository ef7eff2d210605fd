//! Content hashing with Blake3

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use super::ContentHash;

/// Hashes file bytes followed by the tool-version marker, so that a tool
/// upgrade invalidates every cached entry
#[derive(Debug, Clone)]
pub struct FileHasher {
    tool_version: String,
}

impl FileHasher {
    pub fn new(tool_version: impl Into<String>) -> Self {
        Self {
            tool_version: tool_version.into(),
        }
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }

    pub fn hash_bytes(&self, content: &[u8]) -> ContentHash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(content);
        hasher.update(self.tool_version.as_bytes());
        ContentHash::from_hex(hasher.finalize().to_hex().to_string())
    }

    /// Hash a file; unreadable files yield [`ContentHash::missing`]
    pub fn hash_file(&self, path: &Path) -> ContentHash {
        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "Cannot hash file");
                return ContentHash::missing();
            }
        };

        let mut hasher = blake3::Hasher::new();
        let mut buffer = [0u8; 8192];
        loop {
            match file.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => {
                    hasher.update(&buffer[..n]);
                }
                Err(err) => {
                    debug!(path = %path.display(), error = %err, "Read failed while hashing");
                    return ContentHash::missing();
                }
            }
        }
        hasher.update(self.tool_version.as_bytes());
        ContentHash::from_hex(hasher.finalize().to_hex().to_string())
    }
}
