//! Source-document readers
//!
//! Each source shape has its own typed reader. Vendor documents are one of
//! two variants of [`VendorDocument`], chosen once per source by the grouping.

pub mod capability;
pub mod declared;
pub mod iana;
pub mod platform;
pub mod yang_library;

use std::path::Path;

pub use capability::{parse_module_capability, CapabilityDocument, CapabilityRecord};
pub use declared::{DeclaredDeviation, DeclaredModule};
pub use iana::{load_exceptions, IanaRecord, IanaRegistry};
pub use platform::{infer_platform, PlatformContext, PlatformMetadata};
pub use yang_library::YangLibraryDocument;

use crate::errors::CatalogResult;

/// Which vendor document shape a source is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorDocumentKind {
    Capabilities,
    YangLibrary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VendorDocument {
    Capabilities(CapabilityDocument),
    YangLibrary(YangLibraryDocument),
}

impl VendorDocument {
    pub fn load(kind: VendorDocumentKind, path: &Path) -> CatalogResult<Self> {
        Ok(match kind {
            VendorDocumentKind::Capabilities => {
                VendorDocument::Capabilities(CapabilityDocument::load(path)?)
            }
            VendorDocumentKind::YangLibrary => {
                VendorDocument::YangLibrary(YangLibraryDocument::load(path)?)
            }
        })
    }

    pub fn modules(&self) -> &[DeclaredModule] {
        match self {
            VendorDocument::Capabilities(document) => &document.modules,
            VendorDocument::YangLibrary(document) => &document.modules,
        }
    }

    /// Protocol capabilities to attach to every implementation
    pub fn protocol_capabilities(&self) -> (&[String], &[String]) {
        match self {
            VendorDocument::Capabilities(document) => {
                (&document.netconf_versions, &document.capabilities)
            }
            VendorDocument::YangLibrary(_) => (&[] as &[String], &[] as &[String]),
        }
    }
}
