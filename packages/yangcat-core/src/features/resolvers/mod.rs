//! Property resolvers
//!
//! Each resolver derives one metadata field from a statement tree (plus an
//! optional side-channel lookup) and reports a named [`ResolveFailure`] when it
//! cannot. Callers map failures onto the documented field defaults.

pub mod bibliography;
pub mod failure;
pub mod identity;
pub mod linkage;
pub mod namespace;
pub mod organization;
pub mod semver;

pub use bibliography::{
    maturity_from_document, resolve_author_email, resolve_document_name, resolve_maturity_level,
    resolve_working_group, BibliographicOverrides, DocumentIndex, PublicationRecord,
};
pub use failure::{Resolution, ResolveFailure};
pub use identity::{
    normalize_revision, resolve_belongs_to, resolve_generated_from, resolve_module_type,
    resolve_revision, resolve_text, resolve_yang_version,
};
pub use linkage::{resolve_imports, resolve_includes};
pub use namespace::{resolve_namespace, resolve_prefix, NoParents, ParentModuleSource};
pub use organization::{organization_from_namespace, resolve_organization};
pub use semver::resolve_semantic_version;
