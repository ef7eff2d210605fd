//! Content-addressed incremental-parse cache
//!
//! - [`FileHasher`]: Blake3 over file bytes plus tool-version marker
//! - [`HashCacheManager`]: path → {hash → implementation ids}, plain and vendor decision rules
//! - [`UnparsableRegistry`]: basenames of files the grammar parser rejected

mod error;
mod fingerprint;
mod manager;
mod types;
mod unparsable;

pub use error::*;
pub use fingerprint::FileHasher;
pub use manager::{merge_entries, HashCacheManager};
pub use types::*;
pub use unparsable::UnparsableRegistry;
