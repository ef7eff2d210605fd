//! One catalog pass: shared state, per-source statistics and final persistence

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use yangcat_core::features::compilation::{CompilationStatusLookup, NoCompilationStatus};
use yangcat_core::features::dependency_walker::WalkOutcome;
use yangcat_core::features::resolvers::DocumentIndex;
use yangcat_core::features::scm::{NoSourceControl, SourceControl};
use yangcat_core::{
    Catalog, CatalogConfig, DependencyWalker, FileHasher, FoldOutcome, HashCacheManager, ModuleRecord,
    ModuleRecordBuilder, Parser, SchemaIndex, UnparsableRegistry, YangStatementParser,
};

use crate::error::Result;

pub const PASS_REPORT_FILE: &str = "pass-report.json";

/// Counters for one source (a directory, a registry or a vendor document)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GroupingStats {
    pub grouping: String,
    pub source: PathBuf,
    pub parsed: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Set when the whole source was abandoned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GroupingStats {
    pub fn new(grouping: &str, source: &Path) -> Self {
        Self {
            grouping: grouping.to_string(),
            source: source.to_path_buf(),
            ..Default::default()
        }
    }

    pub fn abandoned(grouping: &str, source: &Path, error: impl ToString) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::new(grouping, source)
        }
    }

    pub fn absorb(&mut self, other: &GroupingStats) {
        self.parsed += other.parsed;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }

    pub fn absorb_walk(&mut self, outcome: &WalkOutcome) {
        self.parsed += outcome.records.len();
        self.skipped += outcome.skipped;
        self.failed += outcome.failed;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PassReport {
    pub started_at: String,
    pub finished_at: Option<String>,
    pub groupings: Vec<GroupingStats>,
    pub modules: usize,
    /// Records folded under a new key
    pub inserted: usize,
    /// Records folded into an existing key
    pub merged: usize,
    /// Files whose cache entry changed in this pass
    pub cache_files_written: usize,
}

impl PassReport {
    pub fn parsed(&self) -> usize {
        self.groupings.iter().map(|g| g.parsed).sum()
    }

    pub fn skipped(&self) -> usize {
        self.groupings.iter().map(|g| g.skipped).sum()
    }

    pub fn failed(&self) -> usize {
        self.groupings.iter().map(|g| g.failed).sum()
    }

    pub fn abandoned_sources(&self) -> Vec<&GroupingStats> {
        self.groupings.iter().filter(|g| g.error.is_some()).collect()
    }
}

/// Everything shared by the groupings of one pass
pub struct PassContext {
    config: CatalogConfig,
    parser: Box<dyn Parser>,
    cache: HashCacheManager,
    unparsable: UnparsableRegistry,
    catalog: Catalog,
    documents: Option<DocumentIndex>,
    source_control: Box<dyn SourceControl>,
    compilation: Box<dyn CompilationStatusLookup>,
    report: Mutex<PassReport>,
}

impl PassContext {
    /// Load the cache and side files named by `config`; a corrupt cache is fatal
    pub fn new(config: CatalogConfig) -> Result<Self> {
        config.validate()?;
        let cache = HashCacheManager::load(
            config.cache.path.clone(),
            FileHasher::new(config.cache.tool_version.clone()),
            config.cache.enabled,
        )?;
        let unparsable = match &config.paths.unparsable_registry {
            Some(path) => UnparsableRegistry::load(path.clone()),
            None => UnparsableRegistry::in_memory(),
        };
        let documents = config
            .paths
            .document_index
            .as_deref()
            .and_then(|path| match DocumentIndex::load(path) {
                Ok(index) => Some(index),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "Document index unavailable");
                    None
                }
            });

        Ok(Self {
            config,
            parser: Box::new(YangStatementParser::new()),
            cache,
            unparsable,
            catalog: Catalog::new(),
            documents,
            source_control: Box::new(NoSourceControl),
            compilation: Box::new(NoCompilationStatus),
            report: Mutex::new(PassReport {
                started_at: Utc::now().to_rfc3339(),
                ..Default::default()
            }),
        })
    }

    pub fn with_parser(mut self, parser: Box<dyn Parser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_source_control(mut self, source_control: Box<dyn SourceControl>) -> Self {
        self.source_control = source_control;
        self
    }

    pub fn with_compilation_status(mut self, lookup: Box<dyn CompilationStatusLookup>) -> Self {
        self.compilation = lookup;
        self
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn cache(&self) -> &HashCacheManager {
        &self.cache
    }

    pub fn unparsable(&self) -> &UnparsableRegistry {
        &self.unparsable
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn force_parsing(&self) -> bool {
        self.config.force_parsing
    }

    /// `primary` followed by the configured search roots
    pub fn schema_index(&self, primary: &Path) -> SchemaIndex {
        let mut roots = vec![primary.to_path_buf()];
        roots.extend(self.config.search_roots.iter().cloned());
        SchemaIndex::build(&roots)
    }

    pub fn builder<'a>(&'a self, index: &'a SchemaIndex) -> ModuleRecordBuilder<'a> {
        let builder = ModuleRecordBuilder::new(self.parser.as_ref(), index, self.catalog.diagnostics())
            .with_source_control(self.source_control.as_ref())
            .with_compilation_status(self.compilation.as_ref())
            .with_raw_url_base(&self.config.raw_url_base)
            .with_archive_dir(self.config.paths.save_file_dir.as_deref());
        match &self.documents {
            Some(documents) => builder.with_documents(documents),
            None => builder,
        }
    }

    pub fn walker<'w>(&'w self, builder: &'w ModuleRecordBuilder<'w>) -> DependencyWalker<'w> {
        DependencyWalker::new(builder, &self.cache, &self.unparsable, self.config.force_parsing)
    }

    /// Fold a top-level record and everything its walk reached
    pub fn fold_all(&self, record: ModuleRecord, outcome: WalkOutcome) {
        let (mut inserted, mut merged) = (0, 0);
        for record in std::iter::once(record).chain(outcome.records) {
            match self.catalog.fold(record) {
                FoldOutcome::Inserted => inserted += 1,
                FoldOutcome::Merged => merged += 1,
            }
        }
        let mut report = self.report.lock();
        report.inserted += inserted;
        report.merged += merged;
    }

    pub fn record_stats(&self, stats: GroupingStats) {
        info!(
            grouping = %stats.grouping,
            source = %stats.source.display(),
            parsed = stats.parsed,
            skipped = stats.skipped,
            failed = stats.failed,
            "Source finished"
        );
        self.report.lock().groupings.push(stats);
    }

    pub fn report(&self) -> PassReport {
        self.report.lock().clone()
    }

    /// Merge cache updates, persist the unparsable registry, write the catalog
    /// outputs and the pass report
    pub fn finish(&self) -> Result<PassReport> {
        let written = self.cache.merge_and_persist()?;
        self.unparsable.persist()?;

        let output_dir = &self.config.paths.output_dir;
        self.catalog.write_outputs(output_dir)?;

        let report = {
            let mut report = self.report.lock();
            report.finished_at = Some(Utc::now().to_rfc3339());
            report.modules = self.catalog.len();
            report.cache_files_written = written;
            report.clone()
        };
        let bytes = serde_json::to_vec_pretty(&report).map_err(yangcat_core::CatalogError::from)?;
        fs::write(output_dir.join(PASS_REPORT_FILE), bytes)?;

        info!(
            modules = report.modules,
            inserted = report.inserted,
            merged = report.merged,
            parsed = report.parsed(),
            skipped = report.skipped(),
            failed = report.failed(),
            "Pass finished"
        );
        Ok(report)
    }
}
