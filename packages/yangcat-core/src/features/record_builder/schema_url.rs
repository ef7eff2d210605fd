//! Schema URLs

use std::path::Path;

use super::ModuleRecordBuilder;
use crate::errors::CatalogResult;
use crate::shared::paths::basename;

/// Replace the last path segment of `referencing_url`
pub fn sibling_url(referencing_url: &str, file_name: &str) -> Option<String> {
    let (base, _) = referencing_url.rsplit_once('/')?;
    Some(format!("{}/{}", base, file_name))
}

impl ModuleRecordBuilder<'_> {
    /// Raw URL of `path` inside its owning checkout; an unreadable checkout
    /// is a collaborator failure for the record being built
    pub fn schema_url_for(&self, path: &Path) -> CatalogResult<Option<String>> {
        Ok(self
            .source_control
            .location_for(path)?
            .and_then(|location| location.raw_url(self.raw_url_base, path)))
    }

    /// Same directory as the referencing file: sibling of its URL; otherwise
    /// rebased onto the target's own checkout
    pub fn dependency_schema_url(
        &self,
        referencing_path: &Path,
        referencing_url: Option<&str>,
        target: &Path,
    ) -> CatalogResult<Option<String>> {
        if referencing_path.parent() == target.parent() {
            if let Some(url) = referencing_url.and_then(|url| sibling_url(url, &basename(target))) {
                return Ok(Some(url));
            }
        }
        self.schema_url_for(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibling_url() {
        assert_eq!(
            sibling_url("https://raw.example.com/o/r/abc/standard/a.yang", "b@2020-01-01.yang"),
            Some("https://raw.example.com/o/r/abc/standard/b@2020-01-01.yang".to_string())
        );
        assert_eq!(sibling_url("no-slash", "b.yang"), None);
    }
}
