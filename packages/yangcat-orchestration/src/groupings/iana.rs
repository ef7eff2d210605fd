//! IANA-registry grouping

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use yangcat_core::features::sources::{load_exceptions, IanaRecord, IanaRegistry};
use yangcat_core::{CatalogResult, SchemaIndex, SdoRequest, WalkMode};

use super::{ensure_root, known_unparsable, record_failure, walk_and_fold};
use crate::error::Result;
use crate::pass::{GroupingStats, PassContext};

pub const GROUPING: &str = "iana";
pub const IANA_REGISTRY_FILE: &str = "yang-parameters.xml";

/// Process the IANA-maintained records of `dir/yang-parameters.xml`
pub fn run_iana(ctx: &PassContext, dir: &Path) -> Result<GroupingStats> {
    ensure_root(dir)?;
    let registry_path = dir.join(IANA_REGISTRY_FILE);
    let registry = match IanaRegistry::load(&registry_path) {
        Ok(registry) => registry,
        Err(err) => {
            warn!(path = %registry_path.display(), error = %err, "Skipping IANA registry");
            let stats = GroupingStats::abandoned(GROUPING, &registry_path, err);
            ctx.record_stats(stats.clone());
            return Ok(stats);
        }
    };
    let exceptions = exceptions(ctx);

    let index = ctx.schema_index(dir);
    let builder = ctx.builder(&index);
    let walker = ctx.walker(&builder);
    let mut stats = GroupingStats::new(GROUPING, &registry_path);

    let selected: Vec<&IanaRecord> = registry
        .records
        .iter()
        .filter(|record| record.iana_maintained)
        .filter(|record| {
            let excluded = exceptions.contains(&record.name);
            if excluded {
                debug!(module = %record.name, "Listed in IANA exceptions");
            }
            !excluded
        })
        .collect();
    info!(records = registry.records.len(), selected = selected.len(), "IANA registry grouping");

    for record in selected {
        let Some(path) = record_file(dir, &index, record) else {
            warn!(module = %record.name, "IANA module file not found");
            stats.failed += 1;
            continue;
        };
        if known_unparsable(ctx, &path, &mut stats) {
            continue;
        }
        let hash = ctx.cache().hash_file(&path);
        if !ctx.cache().should_parse_plain(&path, &hash) {
            stats.skipped += 1;
            continue;
        }

        let mut request = SdoRequest::new(&path);
        request.name_hint = Some(&record.name);
        request.overrides = record.overrides();
        let built: CatalogResult<()> = builder.build_sdo(&request).map(|module| {
            ctx.cache().record_plain(&path, &hash);
            walk_and_fold(ctx, &walker, module, &path, WalkMode::Plain, &mut stats);
        });
        record_failure(ctx, built, &mut stats);
    }

    ctx.record_stats(stats.clone());
    Ok(stats)
}

fn exceptions(ctx: &PassContext) -> HashSet<String> {
    let Some(path) = ctx.config().paths.iana_exceptions.as_deref() else {
        return HashSet::new();
    };
    load_exceptions(path).unwrap_or_else(|err| {
        warn!(path = %path.display(), error = %err, "IANA exceptions list unavailable");
        HashSet::new()
    })
}

/// The registry's `file` next to the registry, else any indexed revision of the module
fn record_file(dir: &Path, index: &SchemaIndex, record: &IanaRecord) -> Option<PathBuf> {
    record
        .file
        .as_ref()
        .map(|file| dir.join(file))
        .filter(|path| path.is_file())
        .or_else(|| {
            index
                .locate(&record.name, None, Some(dir))
                .map(|candidate| candidate.path.clone())
        })
}
