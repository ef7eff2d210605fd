//! Common test utilities for yangcat-orchestration
//!
//! Fixtures write schema and source documents into a temporary workspace;
//! builders assemble a configured pass over it.

mod builders;
mod fixtures;

pub use builders::*;
pub use fixtures::*;
