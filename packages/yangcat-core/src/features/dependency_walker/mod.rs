//! Include/import closure of one top-level module
//!
//! The `visited` set is owned by the caller and scoped to one top-level
//! module: a name already in it short-circuits, which bounds the recursion and
//! terminates cycles. The same dependency reached from another top-level
//! module is walked again and merged by the catalog.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, warn};

use crate::errors::CatalogError;
use crate::features::cache::{HashCacheManager, UnparsableRegistry};
use crate::features::record_builder::{ModuleRecordBuilder, SdoRequest};
use crate::features::sources::PlatformContext;
use crate::shared::models::{ConformanceType, ModuleRecord};
use crate::shared::paths::basename;

/// How reached modules are built and hash-checked
#[derive(Debug, Clone, Copy)]
pub enum WalkMode<'w> {
    /// Plain rule, SDO records
    Plain,
    /// Vendor rule with the platforms' implementation ids; modules named in
    /// `declared` are built by their own declaration, not by the walk
    Vendor {
        platforms: &'w [PlatformContext],
        declared: &'w HashSet<String>,
    },
}

/// Records reached by one walk
#[derive(Debug, Default)]
pub struct WalkOutcome {
    pub records: Vec<ModuleRecord>,
    /// Reached files skipped by the cache or the unparsable registry
    pub skipped: usize,
    /// References with no file on disk (kept with a null schema)
    pub unresolved: usize,
    pub failed: usize,
}

pub struct DependencyWalker<'w> {
    builder: &'w ModuleRecordBuilder<'w>,
    cache: &'w HashCacheManager,
    unparsable: &'w UnparsableRegistry,
    force: bool,
}

#[derive(Clone, Copy)]
enum Link {
    Include(usize),
    Import(usize),
}

impl<'w> DependencyWalker<'w> {
    pub fn new(
        builder: &'w ModuleRecordBuilder<'w>,
        cache: &'w HashCacheManager,
        unparsable: &'w UnparsableRegistry,
        force: bool,
    ) -> Self {
        Self {
            builder,
            cache,
            unparsable,
            force,
        }
    }

    /// Fill schema URLs of `record`'s includes/imports and build every
    /// reachable module not yet in `visited`
    pub fn walk(
        &self,
        record: &mut ModuleRecord,
        source: &Path,
        mode: WalkMode<'_>,
        visited: &mut HashSet<String>,
    ) -> WalkOutcome {
        let mut outcome = WalkOutcome::default();
        self.expand(record, source, mode, visited, &mut outcome);
        outcome
    }

    fn expand(
        &self,
        record: &mut ModuleRecord,
        source: &Path,
        mode: WalkMode<'_>,
        visited: &mut HashSet<String>,
        outcome: &mut WalkOutcome,
    ) {
        visited.insert(record.name.clone());
        let near_dir = source.parent();

        let links: Vec<Link> = (0..record.submodules.len())
            .map(Link::Include)
            .chain((0..record.dependencies.len()).map(Link::Import))
            .collect();

        for link in links {
            let (name, pinned) = match link {
                Link::Include(i) => (record.submodules[i].name.clone(), record.submodules[i].revision.clone()),
                Link::Import(i) => (record.dependencies[i].name.clone(), record.dependencies[i].revision.clone()),
            };

            let Some(candidate) = self.builder.index().locate(&name, pinned.as_deref(), near_dir) else {
                debug!(module = %record.name, dependency = %name, "Dependency not found, keeping reference");
                outcome.unresolved += 1;
                continue;
            };
            let target = candidate.path.clone();
            let target_revision = candidate.revision.clone();
            let schema = match self
                .builder
                .dependency_schema_url(source, record.schema.as_deref(), &target)
            {
                Ok(schema) => schema,
                Err(err) => {
                    warn!(module = %record.name, dependency = %name, error = %err, "Cannot resolve dependency schema URL");
                    outcome.failed += 1;
                    continue;
                }
            };

            match link {
                Link::Include(i) => {
                    let submodule = &mut record.submodules[i];
                    submodule.schema = schema.clone();
                    if submodule.revision.is_none() {
                        submodule.revision = target_revision;
                    }
                }
                Link::Import(i) => record.dependencies[i].schema = schema.clone(),
            }

            self.visit(&name, &target, schema, mode, visited, outcome);
        }
    }

    fn visit(
        &self,
        name: &str,
        target: &Path,
        schema: Option<String>,
        mode: WalkMode<'_>,
        visited: &mut HashSet<String>,
        outcome: &mut WalkOutcome,
    ) {
        if visited.contains(name) {
            return;
        }
        if let WalkMode::Vendor { declared, .. } = mode {
            if declared.contains(name) {
                return;
            }
        }
        visited.insert(name.to_string());

        if !self.force && self.unparsable.contains(target) {
            debug!(file = %target.display(), "Skipping known-unparsable dependency");
            outcome.skipped += 1;
            return;
        }

        let hash = self.cache.hash_file(target);
        let built = match mode {
            WalkMode::Plain => {
                if !self.cache.should_parse_plain(target, &hash) {
                    outcome.skipped += 1;
                    return;
                }
                let mut request = SdoRequest::new(target);
                request.name_hint = Some(name);
                request.schema_url = schema.as_deref();
                self.builder.build_sdo(&request)
            }
            WalkMode::Vendor { platforms, .. } => {
                let ids: Vec<String> = platforms.iter().map(PlatformContext::cache_id).collect();
                if !self.cache.should_parse_vendor(target, &hash, &ids) {
                    outcome.skipped += 1;
                    return;
                }
                self.builder.build_vendor_file(
                    target,
                    Some(name),
                    schema.clone(),
                    &[],
                    &[],
                    Some(ConformanceType::Import),
                    platforms,
                )
            }
        };

        match built {
            Ok(mut child) => {
                match mode {
                    WalkMode::Plain => self.cache.record_plain(target, &hash),
                    WalkMode::Vendor { platforms, .. } => {
                        let ids: Vec<String> = platforms.iter().map(PlatformContext::cache_id).collect();
                        self.cache.record_vendor(target, &hash, &ids);
                    }
                }
                self.unparsable.remove(target);
                self.expand(&mut child, target, mode, visited, outcome);
                outcome.records.push(child);
            }
            Err(CatalogError::Unparsable { path, reason }) => {
                warn!(file = %path.display(), %reason, "Dependency is unparsable");
                self.unparsable.add(&path);
                self.builder.diagnostics().record_unparsable(&basename(&path));
                outcome.failed += 1;
            }
            Err(err) => {
                warn!(file = %target.display(), error = %err, "Failed to build dependency");
                outcome.failed += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::cache::FileHasher;
    use crate::features::catalog::Diagnostics;
    use crate::features::locator::SchemaIndex;
    use crate::features::parsing::YangStatementParser;
    use crate::features::scm::{RepoLocation, ScmError, ScmResult, SourceControl};
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Checkout under `root` that cannot be read
    struct BrokenCheckout {
        root: PathBuf,
    }

    impl SourceControl for BrokenCheckout {
        fn location_for(&self, path: &Path) -> ScmResult<Option<RepoLocation>> {
            if path.starts_with(&self.root) {
                Err(ScmError::NotARepository(self.root.display().to_string()))
            } else {
                Ok(None)
            }
        }
    }

    fn module(name: &str, imports: &[&str]) -> String {
        let imports: String = imports
            .iter()
            .map(|i| format!("  import {} {{ prefix {}; }}\n", i, i))
            .collect();
        format!(
            "module {name} {{\n  namespace \"urn:example:{name}\";\n  prefix {name};\n{imports}  revision 2020-01-01;\n}}\n"
        )
    }

    struct Fixture {
        dir: TempDir,
        parser: YangStatementParser,
        diagnostics: Diagnostics,
        cache: HashCacheManager,
        unparsable: UnparsableRegistry,
    }

    impl Fixture {
        fn new(files: &[(&str, String)]) -> Self {
            let dir = TempDir::new().unwrap();
            for (name, content) in files {
                fs::write(dir.path().join(name), content).unwrap();
            }
            let cache = HashCacheManager::load(
                dir.path().join("cache.json"),
                FileHasher::new("test"),
                true,
            )
            .unwrap();
            Self {
                dir,
                parser: YangStatementParser::new(),
                diagnostics: Diagnostics::new(),
                cache,
                unparsable: UnparsableRegistry::in_memory(),
            }
        }
    }

    #[test]
    fn test_cycle_terminates_and_each_module_once() {
        let fixture = Fixture::new(&[
            ("a.yang", module("a", &["b"])),
            ("b.yang", module("b", &["a"])),
        ]);
        let index = SchemaIndex::build(&[fixture.dir.path()]);
        let builder = ModuleRecordBuilder::new(&fixture.parser, &index, &fixture.diagnostics);
        let walker = DependencyWalker::new(&builder, &fixture.cache, &fixture.unparsable, false);

        let a_path = fixture.dir.path().join("a.yang");
        let mut a = builder.build_sdo(&SdoRequest::new(&a_path)).unwrap();
        let mut visited = HashSet::new();
        let outcome = walker.walk(&mut a, &a_path, WalkMode::Plain, &mut visited);

        let names: Vec<&str> = outcome.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["b"]);
        assert_eq!(visited.len(), 2);
        assert_eq!(outcome.records[0].dependencies[0].name, "a");
    }

    #[test]
    fn test_missing_dependency_kept_with_null_schema() {
        let fixture = Fixture::new(&[("a.yang", module("a", &["ghost"]))]);
        let index = SchemaIndex::build(&[fixture.dir.path()]);
        let builder = ModuleRecordBuilder::new(&fixture.parser, &index, &fixture.diagnostics);
        let walker = DependencyWalker::new(&builder, &fixture.cache, &fixture.unparsable, false);

        let a_path = fixture.dir.path().join("a.yang");
        let mut a = builder.build_sdo(&SdoRequest::new(&a_path)).unwrap();
        let outcome = walker.walk(&mut a, &a_path, WalkMode::Plain, &mut HashSet::new());

        assert_eq!(outcome.unresolved, 1);
        assert_eq!(a.dependencies.len(), 1);
        assert_eq!(a.dependencies[0].name, "ghost");
        assert_eq!(a.dependencies[0].schema, None);
    }

    #[test]
    fn test_sibling_schema_url() {
        let fixture = Fixture::new(&[
            ("a.yang", module("a", &["b"])),
            ("b.yang", module("b", &[])),
        ]);
        let index = SchemaIndex::build(&[fixture.dir.path()]);
        let builder = ModuleRecordBuilder::new(&fixture.parser, &index, &fixture.diagnostics);
        let walker = DependencyWalker::new(&builder, &fixture.cache, &fixture.unparsable, false);

        let a_path = fixture.dir.path().join("a.yang");
        let mut request = SdoRequest::new(&a_path);
        request.schema_url = Some("https://example.com/models/a.yang");
        let mut a = builder.build_sdo(&request).unwrap();
        let outcome = walker.walk(&mut a, &a_path, WalkMode::Plain, &mut HashSet::new());

        assert_eq!(
            a.dependencies[0].schema.as_deref(),
            Some("https://example.com/models/b.yang")
        );
        assert_eq!(
            outcome.records[0].schema.as_deref(),
            Some("https://example.com/models/b.yang")
        );
    }

    #[test]
    fn test_submodule_revision_filled_from_disk() {
        let fixture = Fixture::new(&[
            (
                "p.yang",
                "module p {\n  namespace \"urn:p\";\n  prefix p;\n  include p-sub;\n}\n".to_string(),
            ),
            (
                "p-sub@2021-02-02.yang",
                "submodule p-sub {\n  belongs-to p { prefix p; }\n  revision 2021-02-02;\n}\n".to_string(),
            ),
        ]);
        let index = SchemaIndex::build(&[fixture.dir.path()]);
        let builder = ModuleRecordBuilder::new(&fixture.parser, &index, &fixture.diagnostics);
        let walker = DependencyWalker::new(&builder, &fixture.cache, &fixture.unparsable, false);

        let p_path = fixture.dir.path().join("p.yang");
        let mut p = builder.build_sdo(&SdoRequest::new(&p_path)).unwrap();
        let outcome = walker.walk(&mut p, &p_path, WalkMode::Plain, &mut HashSet::new());

        assert_eq!(p.submodules[0].revision.as_deref(), Some("2021-02-02"));
        assert_eq!(outcome.records[0].namespace.as_deref(), Some("urn:p"));
    }

    #[test]
    fn test_vendor_walk_skips_declared_and_marks_import() {
        let fixture = Fixture::new(&[
            ("a.yang", module("a", &["b", "c"])),
            ("b.yang", module("b", &[])),
            ("c.yang", module("c", &[])),
        ]);
        let index = SchemaIndex::build(&[fixture.dir.path()]);
        let builder = ModuleRecordBuilder::new(&fixture.parser, &index, &fixture.diagnostics);
        let walker = DependencyWalker::new(&builder, &fixture.cache, &fixture.unparsable, false);

        let platforms = vec![PlatformContext {
            vendor: "acme".to_string(),
            platform: "box".to_string(),
            software_version: "1".to_string(),
            ..Default::default()
        }];
        let declared: HashSet<String> = ["a".to_string(), "c".to_string()].into_iter().collect();

        let a_path = fixture.dir.path().join("a.yang");
        let mut a = builder.build_sdo(&SdoRequest::new(&a_path)).unwrap();
        let outcome = walker.walk(
            &mut a,
            &a_path,
            WalkMode::Vendor {
                platforms: &platforms,
                declared: &declared,
            },
            &mut HashSet::new(),
        );

        assert_eq!(outcome.records.len(), 1);
        let b = &outcome.records[0];
        assert_eq!(b.name, "b");
        assert_eq!(b.implementations.len(), 1);
        assert_eq!(b.implementations[0].conformance_type, Some(ConformanceType::Import));
    }

    #[test]
    fn test_source_control_failure_fails_only_that_dependency() {
        let fixture = Fixture::new(&[
            ("a.yang", module("a", &["b", "c"])),
            ("c.yang", module("c", &[])),
        ]);
        let broken = fixture.dir.path().join("broken");
        fs::create_dir_all(&broken).unwrap();
        fs::write(broken.join("b.yang"), module("b", &[])).unwrap();

        let index = SchemaIndex::build(&[fixture.dir.path()]);
        let checkout = BrokenCheckout { root: broken };
        let builder = ModuleRecordBuilder::new(&fixture.parser, &index, &fixture.diagnostics)
            .with_source_control(&checkout);
        let walker = DependencyWalker::new(&builder, &fixture.cache, &fixture.unparsable, false);

        let a_path = fixture.dir.path().join("a.yang");
        let mut a = builder.build_sdo(&SdoRequest::new(&a_path)).unwrap();
        let outcome = walker.walk(&mut a, &a_path, WalkMode::Plain, &mut HashSet::new());

        assert_eq!(outcome.failed, 1);
        let names: Vec<&str> = outcome.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["c"]);
        assert_eq!(a.dependencies[0].name, "b");
        assert_eq!(a.dependencies[0].schema, None);
    }
}
