//! In-memory catalog and its serialized forms

mod diagnostics;
mod store;
pub mod vendor_tree;

pub use diagnostics::{DiagnosticSets, Diagnostics};
pub use store::{Catalog, FoldOutcome, ModuleCatalogDocument};
pub use vendor_tree::VendorTree;
