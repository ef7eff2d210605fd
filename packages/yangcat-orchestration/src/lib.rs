/*
 * yangcat-orchestration - catalog pass driver
 *
 * Runs the source groupings of one pass over a shared PassContext:
 * - groupings/sdo    : plain directories of schema files
 * - groupings/iana   : IANA yang-parameters registry
 * - groupings/vendor : NETCONF capability and yang-library documents
 *
 * Outputs: modules.json, vendors.json, diagnostics.json, pass-report.json
 */

// Public modules
pub mod error;
pub mod groupings;
pub mod orchestrator;
pub mod pass;

// Re-exports
pub use error::{OrchestratorError, Result};
pub use groupings::IANA_REGISTRY_FILE;
pub use orchestrator::{CatalogOrchestrator, PassInputs};
pub use pass::{GroupingStats, PassContext, PassReport, PASS_REPORT_FILE};
