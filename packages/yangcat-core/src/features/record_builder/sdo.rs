//! Plain-file flavor (standards directories and the IANA registry)

use std::path::Path;

use super::ModuleRecordBuilder;
use crate::errors::CatalogResult;
use crate::features::resolvers::BibliographicOverrides;
use crate::shared::models::ModuleRecord;

/// One plain schema file to build
#[derive(Debug, Clone)]
pub struct SdoRequest<'r> {
    pub path: &'r Path,
    /// Used when the file does not name itself
    pub name_hint: Option<&'r str>,
    /// Absolute URL supplied by the caller; otherwise derived from source control
    pub schema_url: Option<&'r str>,
    pub overrides: BibliographicOverrides,
}

impl<'r> SdoRequest<'r> {
    pub fn new(path: &'r Path) -> Self {
        Self {
            path,
            name_hint: None,
            schema_url: None,
            overrides: BibliographicOverrides::default(),
        }
    }
}

impl ModuleRecordBuilder<'_> {
    pub fn build_sdo(&self, request: &SdoRequest<'_>) -> CatalogResult<ModuleRecord> {
        let tree = self.parse_file(request.path)?;
        let mut record = self.resolve(&tree, request.name_hint, &request.overrides);
        record.schema = match request.schema_url {
            Some(url) => Some(url.to_string()),
            None => self.schema_url_for(request.path)?,
        };
        self.archive(&record, request.path);
        Ok(record)
    }
}
