//! Plain-directory grouping

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};
use yangcat_core::shared::paths::is_yang_file;
use yangcat_core::{CatalogResult, DependencyWalker, ModuleRecordBuilder, SdoRequest, WalkMode};

use super::{ensure_root, known_unparsable, record_failure, walk_and_fold};
use crate::error::{OrchestratorError, Result};
use crate::pass::{GroupingStats, PassContext};

pub const GROUPING: &str = "sdo";

/// Subtrees holding vendor sources are left to the vendor grouping
pub const VENDOR_DIR: &str = "vendor";

fn is_excluded(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name == VENDOR_DIR
}

/// `*.yang` files under `root`, sorted, excluding hidden and vendor subtrees
pub fn collect_schema_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !is_excluded(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_yang_file(e.path()))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

pub fn run_sdo(ctx: &PassContext, root: &Path) -> Result<GroupingStats> {
    ensure_root(root)?;
    let files = collect_schema_files(root);
    info!(root = %root.display(), files = files.len(), "Plain-directory grouping");

    let index = ctx.schema_index(root);
    let builder = ctx.builder(&index);
    let walker = ctx.walker(&builder);

    let mut stats = GroupingStats::new(GROUPING, root);
    let per_file = if ctx.config().parallel {
        let threads = std::cmp::max(1, (num_cpus::get() * 3) / 4);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(OrchestratorError::other)?;
        debug!(threads, "Processing plain files in parallel");
        pool.install(|| {
            files
                .par_iter()
                .map(|path| process_file(ctx, &builder, &walker, path))
                .collect::<Vec<_>>()
        })
    } else {
        files
            .iter()
            .map(|path| process_file(ctx, &builder, &walker, path))
            .collect()
    };
    for file_stats in &per_file {
        stats.absorb(file_stats);
    }
    ctx.record_stats(stats.clone());
    Ok(stats)
}

fn process_file(
    ctx: &PassContext,
    builder: &ModuleRecordBuilder<'_>,
    walker: &DependencyWalker<'_>,
    path: &Path,
) -> GroupingStats {
    let mut stats = GroupingStats::new(GROUPING, path);
    if known_unparsable(ctx, path, &mut stats) {
        debug!(file = %path.display(), "Skipping known-unparsable file");
        return stats;
    }

    let hash = ctx.cache().hash_file(path);
    if !ctx.cache().should_parse_plain(path, &hash) {
        debug!(file = %path.display(), "Unchanged, skipping");
        stats.skipped += 1;
        return stats;
    }

    let built: CatalogResult<()> = builder.build_sdo(&SdoRequest::new(path)).map(|record| {
        ctx.cache().record_plain(path, &hash);
        walk_and_fold(ctx, walker, record, path, WalkMode::Plain, &mut stats);
    });
    record_failure(ctx, built, &mut stats);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collect_skips_vendor_and_hidden() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        for sub in ["standard/ietf", "vendor/cisco/xr/701", ".git"] {
            fs::create_dir_all(root.join(sub)).unwrap();
        }
        fs::write(root.join("standard/ietf/a.yang"), "").unwrap();
        fs::write(root.join("standard/ietf/notes.txt"), "").unwrap();
        fs::write(root.join("vendor/cisco/xr/701/b.yang"), "").unwrap();
        fs::write(root.join(".git/c.yang"), "").unwrap();

        let files = collect_schema_files(root);
        assert_eq!(files, vec![root.join("standard/ietf/a.yang")]);
    }
}
