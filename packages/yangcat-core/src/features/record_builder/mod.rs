//! Module record builder
//!
//! Runs the property resolvers over one parsed file and maps every resolver
//! failure onto its field default. Two entry points share the pipeline:
//! - [`ModuleRecordBuilder::build_sdo`] for plain and registry files
//! - [`ModuleRecordBuilder::build_vendor`] for modules declared by a vendor document

mod archive;
mod parents;
mod schema_url;
mod sdo;
mod vendor;

use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};

pub use archive::archive_schema;
pub use parents::{IndexedParents, ParentTreeCache};
pub use schema_url::sibling_url;
pub use sdo::SdoRequest;
pub use vendor::BuiltModule;

use crate::errors::{CatalogError, CatalogResult};
use crate::features::catalog::Diagnostics;
use crate::features::compilation::{CompilationStatusLookup, NoCompilationStatus};
use crate::features::locator::SchemaIndex;
use crate::features::parsing::{ParseError, Parser, StatementTree};
use crate::features::resolvers::{self, BibliographicOverrides, DocumentIndex};
use crate::features::scm::{NoSourceControl, SourceControl};
use crate::shared::models::{
    ModuleKey, ModuleRecord, DEFAULT_ORGANIZATION, DEFAULT_REVISION, DEFAULT_YANG_VERSION,
    MISSING_NAMESPACE,
};
use crate::shared::paths::split_file_name;

static NO_SOURCE_CONTROL: NoSourceControl = NoSourceControl;
static NO_COMPILATION_STATUS: NoCompilationStatus = NoCompilationStatus;

/// Collaborators shared by every record built in one pass
pub struct ModuleRecordBuilder<'a> {
    parser: &'a dyn Parser,
    index: &'a SchemaIndex,
    diagnostics: &'a Diagnostics,
    source_control: &'a dyn SourceControl,
    compilation: &'a dyn CompilationStatusLookup,
    documents: Option<&'a DocumentIndex>,
    raw_url_base: &'a str,
    archive_dir: Option<&'a Path>,
    parent_trees: ParentTreeCache,
}

impl<'a> ModuleRecordBuilder<'a> {
    pub fn new(parser: &'a dyn Parser, index: &'a SchemaIndex, diagnostics: &'a Diagnostics) -> Self {
        Self {
            parser,
            index,
            diagnostics,
            source_control: &NO_SOURCE_CONTROL,
            compilation: &NO_COMPILATION_STATUS,
            documents: None,
            raw_url_base: crate::config::DEFAULT_RAW_URL_BASE,
            archive_dir: None,
            parent_trees: ParentTreeCache::new(),
        }
    }

    pub fn with_source_control(mut self, source_control: &'a dyn SourceControl) -> Self {
        self.source_control = source_control;
        self
    }

    pub fn with_compilation_status(mut self, lookup: &'a dyn CompilationStatusLookup) -> Self {
        self.compilation = lookup;
        self
    }

    pub fn with_documents(mut self, documents: &'a DocumentIndex) -> Self {
        self.documents = Some(documents);
        self
    }

    pub fn with_raw_url_base(mut self, raw_url_base: &'a str) -> Self {
        self.raw_url_base = raw_url_base;
        self
    }

    pub fn with_archive_dir(mut self, dir: Option<&'a Path>) -> Self {
        self.archive_dir = dir;
        self
    }

    pub fn index(&self) -> &SchemaIndex {
        self.index
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        self.diagnostics
    }

    /// Parse a file; grammar errors become [`CatalogError::Unparsable`]
    pub fn parse_file(&self, path: &Path) -> CatalogResult<StatementTree> {
        self.parser.parse_file(path).map_err(|err| match err {
            ParseError::Syntax { line, message } => {
                CatalogError::unparsable(path, format!("line {}: {}", line, message))
            }
            ParseError::Io(io) if io.kind() == ErrorKind::NotFound => {
                let (name, revision) = split_file_name(path).unwrap_or_default();
                CatalogError::source_not_found(name, revision)
            }
            ParseError::Io(io) => CatalogError::Io(io),
        })
    }

    /// Resolver pipeline; everything except `schema` and `implementations`
    pub fn resolve(
        &self,
        tree: &StatementTree,
        name_hint: Option<&str>,
        overrides: &BibliographicOverrides,
    ) -> ModuleRecord {
        let root = &tree.root;
        let name = tree
            .module_name()
            .map(str::to_string)
            .or_else(|| name_hint.map(str::to_string))
            .or_else(|| split_file_name(tree.file_path()).map(|(name, _)| name))
            .unwrap_or_default();

        let mut record = ModuleRecord::new(name, resolvers::resolve_module_type(root));

        record.revision = match resolvers::resolve_revision(root) {
            Ok(revision) => revision,
            Err(reason) => {
                debug!(module = %record.name, %reason, "Revision unresolved, using default");
                self.diagnostics.record_missing_revision(&record.name);
                DEFAULT_REVISION.to_string()
            }
        };

        let parents = IndexedParents::new(
            self.parser,
            self.index,
            tree.file_path().parent(),
            &self.parent_trees,
        );
        let namespace = match resolvers::resolve_namespace(root, &parents) {
            Ok(namespace) => Some(namespace),
            Err(reason) => {
                debug!(module = %record.name, %reason, "Namespace unresolved");
                self.diagnostics
                    .record_missing_namespace(&record.name, &record.revision);
                None
            }
        };
        record.prefix = resolvers::resolve_prefix(root, &parents).ok();
        record.organization = resolvers::resolve_organization(
            root,
            namespace.as_deref(),
            overrides.organization.as_deref(),
        )
        .unwrap_or_else(|_| DEFAULT_ORGANIZATION.to_string());
        record.generated_from = resolvers::resolve_generated_from(&record.name, namespace.as_deref());
        record.namespace = Some(namespace.unwrap_or_else(|| MISSING_NAMESPACE.to_string()));

        record.yang_version =
            resolvers::resolve_yang_version(root).unwrap_or_else(|_| DEFAULT_YANG_VERSION.to_string());
        record.belongs_to = resolvers::resolve_belongs_to(root).ok();
        record.semantic_version = resolvers::resolve_semantic_version(root).ok();

        let publication = self
            .documents
            .and_then(|documents| documents.lookup(&record.name, &record.revision));
        record.author_email =
            resolvers::resolve_author_email(overrides.author_email.as_deref(), publication).ok();
        record.document_name =
            resolvers::resolve_document_name(overrides.document_name.as_deref(), publication).ok();
        record.maturity_level =
            resolvers::resolve_maturity_level(overrides.maturity_level.as_deref(), publication)
                .ok()
                .or_else(|| {
                    let document = record.document_name.as_deref()?.to_lowercase();
                    resolvers::maturity_from_document(&document).ok()
                });
        record.working_group =
            resolvers::resolve_working_group(overrides.working_group.as_deref(), publication).ok();
        record.reference = overrides
            .reference
            .clone()
            .or_else(|| resolvers::resolve_text(root, "reference").ok())
            .or_else(|| publication.and_then(|p| p.reference.clone()));
        record.description = resolvers::resolve_text(root, "description").ok();
        record.contact = resolvers::resolve_text(root, "contact").ok();

        record.dependencies = resolvers::resolve_imports(root);
        record.submodules = resolvers::resolve_includes(root);

        record.compilation_status = self
            .compilation
            .get_existing_compilation_status(&ModuleKey::new(
                &record.name,
                &record.revision,
                &record.organization,
            ));

        record
    }

    fn archive(&self, record: &ModuleRecord, source: &Path) {
        let Some(dir) = self.archive_dir else {
            return;
        };
        if let Err(err) = archive_schema(dir, record, source) {
            warn!(module = %record.name, error = %err, "Failed to archive schema");
        }
    }
}
