//! Plain-directory passes: incremental behavior, cycles and diagnostics

mod common;

use std::fs;
use std::path::{Path, PathBuf};

use common::*;
use pretty_assertions::assert_eq;
use yangcat_core::features::catalog::DiagnosticSets;
use yangcat_core::features::scm::{RepoLocation, ScmError, ScmResult, SourceControl};
use yangcat_orchestration::{CatalogOrchestrator, OrchestratorError, PassContext, PASS_REPORT_FILE};

#[test]
fn test_second_pass_parses_nothing() {
    let ws = Workspace::new();
    ws.write("yang/a.yang", &fixture_module("a", Some("2020-01-01"), &["b"]));
    ws.write("yang/b.yang", &fixture_module("b", Some("2020-01-01"), &[]));
    let inputs = sdo_inputs(&ws.path("yang"));

    let first = ws.run(&inputs);
    assert!(first.report.parsed() > 0);
    assert_eq!(first.records.len(), 2);

    let second = ws.run(&inputs);
    assert_eq!(second.report.parsed(), 0);
    assert_eq!(second.report.skipped(), 2);
    assert!(second.records.is_empty());
}

#[test]
fn test_import_cycle_terminates() {
    let ws = Workspace::new();
    ws.write("yang/a.yang", &fixture_module("a", Some("2020-01-01"), &["b"]));
    ws.write("yang/b.yang", &fixture_module("b", Some("2020-01-01"), &["a"]));

    let outcome = ws.run(&sdo_inputs(&ws.path("yang")));
    assert_eq!(outcome.named("a").len(), 1);
    assert_eq!(outcome.named("b").len(), 1);
    assert_eq!(outcome.only("a").dependencies[0].name, "b");
    assert_eq!(outcome.only("b").dependencies[0].name, "a");
}

#[test]
fn test_missing_revision_defaults_and_is_reported() {
    let ws = Workspace::new();
    ws.write("yang/norev.yang", &fixture_module("norev", None, &[]));

    let outcome = ws.run(&sdo_inputs(&ws.path("yang")));
    assert_eq!(outcome.only("norev").revision, "1970-01-01");

    let diagnostics: DiagnosticSets =
        serde_json::from_slice(&fs::read(ws.path("out/diagnostics.json")).unwrap()).unwrap();
    assert!(diagnostics.missing_revision.contains("norev"));
}

#[test]
fn test_single_byte_change_reprocesses_only_that_file() {
    let ws = Workspace::new();
    ws.write("yang/a.yang", &fixture_module("a", Some("2020-01-01"), &[]));
    let b = ws.write("yang/b.yang", &fixture_module("b", Some("2020-01-01"), &[]));
    let inputs = sdo_inputs(&ws.path("yang"));

    ws.run(&inputs);
    assert_eq!(ws.run(&inputs).report.parsed(), 0);

    let mut content = fs::read_to_string(&b).unwrap();
    content.push('\n');
    fs::write(&b, content).unwrap();

    let third = ws.run(&inputs);
    assert_eq!(third.report.parsed(), 1);
    assert_eq!(third.report.skipped(), 1);
    assert_eq!(third.only("b").name, "b");
}

#[test]
fn test_tool_version_change_reprocesses_everything() {
    let ws = Workspace::new();
    ws.write("yang/a.yang", &fixture_module("a", Some("2020-01-01"), &[]));
    let inputs = sdo_inputs(&ws.path("yang"));
    ws.run(&inputs);

    let mut config = ws.config();
    config.cache.tool_version = "test-2".to_string();
    let outcome = ws.run_with(config, &inputs);
    assert_eq!(outcome.report.parsed(), 1);
}

#[test]
fn test_unparsable_file_is_registered_and_skipped() {
    let ws = Workspace::new();
    ws.write("yang/good.yang", &fixture_module("good", Some("2020-01-01"), &[]));
    ws.write("yang/broken.yang", "module broken {\n  namespace \"urn:x\";\n");
    let inputs = sdo_inputs(&ws.path("yang"));

    let first = ws.run(&inputs);
    assert_eq!(first.report.failed(), 1);
    assert_eq!(first.records.len(), 1);
    let registry: Vec<String> =
        serde_json::from_slice(&fs::read(ws.path("cache/unparsable.json")).unwrap()).unwrap();
    assert_eq!(registry, vec!["broken.yang".to_string()]);

    let second = ws.run(&inputs);
    assert_eq!(second.report.failed(), 0);
    assert_eq!(second.report.skipped(), 2);

    let mut forced = ws.config();
    forced.set_force_parsing(true);
    let third = ws.run_with(forced, &inputs);
    assert_eq!(third.report.failed(), 1);
    assert_eq!(third.report.parsed(), 1);
}

#[test]
fn test_vendor_subtree_is_left_out() {
    let ws = Workspace::new();
    ws.write("yang/standard/a.yang", &fixture_module("a", Some("2020-01-01"), &[]));
    ws.write("yang/vendor/cisco/xr/701/v.yang", &fixture_module("v", Some("2020-01-01"), &[]));

    let outcome = ws.run(&sdo_inputs(&ws.path("yang")));
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].name, "a");
}

#[test]
fn test_parallel_pass_matches_sequential() {
    let ws = Workspace::new();
    for name in ["a", "b", "c"] {
        ws.write(&format!("yang/{name}.yang"), &fixture_module(name, Some("2020-01-01"), &["d"]));
    }
    ws.write("yang/d.yang", &fixture_module("d", Some("2020-01-01"), &[]));
    let mut config = ws.config();
    config.parallel = true;
    let outcome = ws.run_with(config, &sdo_inputs(&ws.path("yang")));
    let mut names: Vec<&str> = outcome.records.iter().map(|r| r.name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["a", "b", "c", "d"]);
}

#[test]
fn test_outputs_written() {
    let ws = Workspace::new();
    ws.write("yang/a.yang", &fixture_module("a", Some("2020-01-01"), &[]));
    let outcome = ws.run(&sdo_inputs(&ws.path("yang")));

    assert_eq!(outcome.report.modules, 1);
    let modules: serde_json::Value =
        serde_json::from_slice(&fs::read(ws.path("out/modules.json")).unwrap()).unwrap();
    assert_eq!(modules["module"][0]["name"], "a");
    assert!(ws.path("out").join(PASS_REPORT_FILE).is_file());
}

#[test]
fn test_missing_root_is_fatal() {
    let ws = Workspace::new();
    let ctx = PassContext::new(ws.config()).unwrap();
    let err = CatalogOrchestrator::new(ctx)
        .run(&sdo_inputs(&ws.path("does-not-exist")))
        .unwrap_err();
    assert!(matches!(err, OrchestratorError::RootMissing(_)));
    assert!(!ws.path("out/modules.json").exists());
}

/// Source control that cannot read the checkout owning `path`
struct UnreadableCheckout {
    path: PathBuf,
}

impl SourceControl for UnreadableCheckout {
    fn location_for(&self, path: &Path) -> ScmResult<Option<RepoLocation>> {
        if path == self.path {
            Err(ScmError::NotARepository(path.display().to_string()))
        } else {
            Ok(None)
        }
    }
}

#[test]
fn test_source_control_failure_skips_only_that_record() {
    let ws = Workspace::new();
    let broken = ws.write("yang/a.yang", &fixture_module("a", Some("2020-01-01"), &[]));
    ws.write("yang/b.yang", &fixture_module("b", Some("2020-01-01"), &[]));
    let inputs = sdo_inputs(&ws.path("yang"));

    let ctx = PassContext::new(ws.config())
        .unwrap()
        .with_source_control(Box::new(UnreadableCheckout { path: broken }));
    let orchestrator = CatalogOrchestrator::new(ctx);
    let report = orchestrator.run(&inputs).unwrap();

    assert_eq!(report.failed(), 1);
    assert_eq!(report.parsed(), 1);
    let records = orchestrator.context().catalog().records();
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["b"]);

    // Not recorded in the hash cache, so the next pass retries it
    let retry = ws.run(&inputs);
    assert_eq!(retry.report.parsed(), 1);
    assert_eq!(retry.only("a").schema, None);
}
