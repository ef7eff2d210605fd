/*
 * yangcat-core - YANG module catalog builder
 *
 * Feature-First Architecture:
 * - shared/      : Catalog data model (ModuleRecord, Implementation) and path helpers
 * - features/    : parsing → resolvers → record_builder → dependency_walker → catalog
 * - config/      : Versioned YAML configuration with env overrides
 * - errors       : Crate-level error type
 *
 * Incremental runs:
 * - Content hashes (blake3) gate re-parsing per file
 * - Vendor files are re-parsed only for unseen platform/software ids
 */

#![allow(clippy::too_many_arguments)] // Vendor builders carry platform context
#![allow(clippy::type_complexity)] // Nested BTreeMaps in cache entries
#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

/// Catalog data model and path helpers
pub mod shared;

/// Feature modules
pub mod features;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::CatalogConfig;
pub use errors::{CatalogError, CatalogResult};
pub use features::cache::{FileHasher, HashCacheManager, UnparsableRegistry};
pub use features::catalog::{Catalog, Diagnostics, FoldOutcome};
pub use features::dependency_walker::{DependencyWalker, WalkMode, WalkOutcome};
pub use features::locator::SchemaIndex;
pub use features::parsing::{Parser, YangStatementParser};
pub use features::record_builder::{ModuleRecordBuilder, SdoRequest};
pub use shared::models::{ModuleKey, ModuleRecord};
