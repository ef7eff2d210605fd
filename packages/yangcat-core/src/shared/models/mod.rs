//! Catalog data model

mod implementation;
mod module_record;

pub use implementation::{implementation_cache_id, ConformanceType, Deviation, Implementation};
pub use module_record::{
    Dependency, GeneratedFrom, ModuleKey, ModuleRecord, ModuleType, Submodule,
    DEFAULT_ORGANIZATION, DEFAULT_REVISION, DEFAULT_YANG_VERSION, MISSING_NAMESPACE,
};
