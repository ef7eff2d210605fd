//! Source groupings
//!
//! Every grouping enumerates its inputs, hash-checks each file, builds
//! records, walks their includes/imports and folds the results into the
//! pass catalog. A failure inside one source is logged and counted; only a
//! missing root ends the pass.

pub mod iana;
pub mod sdo;
pub mod vendor;

use std::collections::HashSet;
use std::path::Path;

use tracing::warn;
use yangcat_core::shared::paths::basename;
use yangcat_core::{CatalogError, CatalogResult, ModuleRecord, WalkMode};

use crate::error::{OrchestratorError, Result};
use crate::pass::{GroupingStats, PassContext};

pub use iana::{run_iana, IANA_REGISTRY_FILE};
pub use sdo::{collect_schema_files, run_sdo};
pub use vendor::{classify_source, run_vendor};

pub(crate) fn ensure_root(root: &Path) -> Result<()> {
    if root.exists() {
        Ok(())
    } else {
        Err(OrchestratorError::RootMissing(root.to_path_buf()))
    }
}

/// Whether a top-level file is skipped by the unparsable registry
pub(crate) fn known_unparsable(ctx: &PassContext, path: &Path, stats: &mut GroupingStats) -> bool {
    if !ctx.force_parsing() && ctx.unparsable().contains(path) {
        stats.skipped += 1;
        return true;
    }
    false
}

/// Walk a freshly built top-level record and fold everything into the catalog
pub(crate) fn walk_and_fold(
    ctx: &PassContext,
    walker: &yangcat_core::DependencyWalker<'_>,
    mut record: ModuleRecord,
    source: &Path,
    mode: WalkMode<'_>,
    stats: &mut GroupingStats,
) {
    ctx.unparsable().remove(source);
    let mut visited = HashSet::new();
    visited.insert(record.name.clone());
    let outcome = walker.walk(&mut record, source, mode, &mut visited);
    stats.parsed += 1;
    stats.absorb_walk(&outcome);
    ctx.fold_all(record, outcome);
}

/// Log and count a per-file build failure
pub(crate) fn record_failure(
    ctx: &PassContext,
    built: CatalogResult<()>,
    stats: &mut GroupingStats,
) {
    match built {
        Ok(()) => {}
        Err(CatalogError::Unparsable { path, reason }) => {
            warn!(file = %path.display(), %reason, "Unparsable schema file");
            ctx.unparsable().add(&path);
            ctx.catalog().diagnostics().record_unparsable(&basename(&path));
            stats.failed += 1;
        }
        Err(err) => {
            warn!(source = %stats.source.display(), error = %err, "Failed to build module record");
            stats.failed += 1;
        }
    }
}
