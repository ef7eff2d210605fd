//! Vendor groupings: capability documents and yang-library documents
//!
//! Both shapes share one path. The document kind is chosen once per source
//! from its file name; platform identity comes from `platform-metadata.json`
//! beside the document when present, else from the directory layout.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;
use yangcat_core::features::sources::{
    infer_platform, PlatformContext, PlatformMetadata, VendorDocument, VendorDocumentKind,
};
use yangcat_core::{CatalogError, CatalogResult, DependencyWalker, ModuleRecordBuilder, WalkMode};

use super::{ensure_root, known_unparsable, record_failure, walk_and_fold};
use crate::error::Result;
use crate::pass::{GroupingStats, PassContext};

pub fn grouping_name(kind: VendorDocumentKind) -> &'static str {
    match kind {
        VendorDocumentKind::Capabilities => "vendor-capabilities",
        VendorDocumentKind::YangLibrary => "vendor-yang-library",
    }
}

/// Document kind from the file name, `None` for anything else
pub fn classify_source(path: &Path) -> Option<VendorDocumentKind> {
    let name = path.file_name()?.to_string_lossy().to_lowercase();
    if !name.ends_with(".xml") {
        return None;
    }
    if name.contains("yang-library") {
        Some(VendorDocumentKind::YangLibrary)
    } else if name.contains("capabilit") || name.contains("hello") {
        Some(VendorDocumentKind::Capabilities)
    } else {
        None
    }
}

/// Every vendor document under `root`
pub fn collect_sources(root: &Path) -> Vec<(PathBuf, VendorDocumentKind)> {
    let mut sources: Vec<(PathBuf, VendorDocumentKind)> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| classify_source(e.path()).map(|kind| (e.into_path(), kind)))
        .collect();
    sources.sort_by(|a, b| a.0.cmp(&b.0));
    sources
}

/// Process every capability or yang-library document under `root`
pub fn run_vendor(ctx: &PassContext, root: &Path) -> Result<Vec<GroupingStats>> {
    ensure_root(root)?;
    let sources = collect_sources(root);
    info!(root = %root.display(), sources = sources.len(), "Vendor grouping");

    let index = ctx.schema_index(root);
    let builder = ctx.builder(&index);
    let walker = ctx.walker(&builder);

    let mut all = Vec::with_capacity(sources.len());
    for (path, kind) in sources {
        let stats = match process_source(ctx, &builder, &walker, &path, kind) {
            Ok(stats) => stats,
            Err(err) => {
                warn!(source = %path.display(), error = %err, "Skipping vendor source");
                GroupingStats::abandoned(grouping_name(kind), &path, err)
            }
        };
        ctx.record_stats(stats.clone());
        all.push(stats);
    }
    Ok(all)
}

/// Platforms described by metadata beside `document`, else inferred from its path
pub fn platforms_for(document: &Path) -> CatalogResult<Vec<PlatformContext>> {
    if let Some(metadata_path) = PlatformMetadata::beside(document) {
        let platforms = PlatformMetadata::load(&metadata_path)?.platforms_for(document);
        if !platforms.is_empty() {
            return Ok(platforms);
        }
        debug!(document = %document.display(), "Metadata names no platform for document");
    }
    infer_platform(document).map(|p| vec![p]).ok_or_else(|| {
        CatalogError::malformed(document, "no platform metadata and no recognizable vendor path")
    })
}

fn process_source(
    ctx: &PassContext,
    builder: &ModuleRecordBuilder<'_>,
    walker: &DependencyWalker<'_>,
    path: &Path,
    kind: VendorDocumentKind,
) -> CatalogResult<GroupingStats> {
    let mut platforms = platforms_for(path)?;
    let document = VendorDocument::load(kind, path)?;

    let (netconf_versions, capabilities) = document.protocol_capabilities();
    for platform in &mut platforms {
        if platform.netconf_versions.is_empty() {
            platform.netconf_versions = netconf_versions.to_vec();
        }
        platform.capabilities = capabilities.to_vec();
    }
    let ids: Vec<String> = platforms.iter().map(PlatformContext::cache_id).collect();
    let declared: HashSet<String> = document.modules().iter().map(|m| m.name.clone()).collect();
    let near_dir = path.parent();
    debug!(
        source = %path.display(),
        modules = declared.len(),
        platforms = ?ids,
        "Vendor document loaded"
    );

    let mut stats = GroupingStats::new(grouping_name(kind), path);
    for module in document.modules() {
        let file = match builder.locate_declared(module, near_dir) {
            Ok(file) => file,
            Err(err) => {
                warn!(source = %path.display(), error = %err, "Declared module skipped");
                stats.failed += 1;
                continue;
            }
        };
        if known_unparsable(ctx, &file, &mut stats) {
            continue;
        }
        let hash = ctx.cache().hash_file(&file);
        if !ctx.cache().should_parse_vendor(&file, &hash, &ids) {
            stats.skipped += 1;
            continue;
        }

        let mode = WalkMode::Vendor {
            platforms: &platforms,
            declared: &declared,
        };
        let built: CatalogResult<()> = builder.build_vendor(module, &platforms, near_dir).map(|built| {
            ctx.cache().record_vendor(&built.path, &hash, &ids);
            walk_and_fold(ctx, walker, built.record, &built.path, mode, &mut stats);
        });
        record_failure(ctx, built, &mut stats);
    }
    Ok(stats)
}
