//! Vendor flavor: modules declared by capability or yang-library documents

use std::path::{Path, PathBuf};

use tracing::debug;

use super::ModuleRecordBuilder;
use crate::errors::{CatalogError, CatalogResult};
use crate::features::resolvers::BibliographicOverrides;
use crate::features::sources::{DeclaredDeviation, DeclaredModule, PlatformContext};
use crate::shared::models::{ConformanceType, Deviation, ModuleRecord, DEFAULT_REVISION};

/// A built record and the file it came from
#[derive(Debug, Clone)]
pub struct BuiltModule {
    pub record: ModuleRecord,
    pub path: PathBuf,
}

impl ModuleRecordBuilder<'_> {
    /// File for a declared module; a miss is [`CatalogError::SourceNotFound`]
    pub fn locate_declared(
        &self,
        declared: &DeclaredModule,
        near_dir: Option<&Path>,
    ) -> CatalogResult<PathBuf> {
        self.index
            .locate(&declared.name, declared.revision.as_deref(), near_dir)
            .map(|candidate| candidate.path.clone())
            .ok_or_else(|| CatalogError::source_not_found(&declared.name, declared.revision.clone()))
    }

    /// Locate, parse and resolve a declared module, adding one implementation per platform
    pub fn build_vendor(
        &self,
        declared: &DeclaredModule,
        platforms: &[PlatformContext],
        near_dir: Option<&Path>,
    ) -> CatalogResult<BuiltModule> {
        let path = self.locate_declared(declared, near_dir)?;
        let record = self.build_vendor_file(
            &path,
            Some(&declared.name),
            None,
            &declared.features,
            &declared.deviations,
            declared.conformance_type.or(Some(ConformanceType::Implement)),
            platforms,
        )?;
        Ok(BuiltModule { record, path })
    }

    /// Vendor record for an already located file
    #[allow(clippy::too_many_arguments)]
    pub fn build_vendor_file(
        &self,
        path: &Path,
        name_hint: Option<&str>,
        schema_url: Option<String>,
        features: &[String],
        deviations: &[DeclaredDeviation],
        conformance_type: Option<ConformanceType>,
        platforms: &[PlatformContext],
    ) -> CatalogResult<ModuleRecord> {
        let tree = self.parse_file(path)?;
        let mut record = self.resolve(&tree, name_hint, &BibliographicOverrides::default());
        record.schema = match schema_url {
            Some(url) => Some(url),
            None => self.schema_url_for(path)?,
        };

        let deviations: Vec<Deviation> = deviations
            .iter()
            .map(|deviation| self.resolve_deviation(deviation))
            .collect();
        let implementations = platforms
            .iter()
            .map(|platform| platform.implementation(features.to_vec(), deviations.clone(), conformance_type))
            .collect();
        record.merge_implementations(implementations);

        self.archive(&record, path);
        Ok(record)
    }

    /// Deviation revision: declared, else the revision of the deviation module on disk
    fn resolve_deviation(&self, deviation: &DeclaredDeviation) -> Deviation {
        let revision = deviation
            .revision
            .clone()
            .or_else(|| {
                self.index
                    .locate(&deviation.name, None, None)
                    .and_then(|candidate| candidate.revision.clone())
            })
            .unwrap_or_else(|| {
                debug!(deviation = %deviation.name, "Deviation module revision unknown");
                DEFAULT_REVISION.to_string()
            });
        Deviation {
            name: deviation.name.clone(),
            revision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::catalog::Diagnostics;
    use crate::features::locator::SchemaIndex;
    use crate::features::parsing::YangStatementParser;
    use crate::features::sources::parse_module_capability;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn platform(name: &str) -> PlatformContext {
        PlatformContext {
            vendor: "cisco".to_string(),
            platform: name.to_string(),
            software_version: "7.0.1".to_string(),
            software_flavor: "ALL".to_string(),
            os_version: "7.0.1".to_string(),
            feature_set: "ALL".to_string(),
            os_type: "IOS-XR".to_string(),
            capabilities: vec![],
            netconf_versions: vec![],
        }
    }

    #[test]
    fn test_capability_fragment_scenario() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("foo@2020-01-01.yang"),
            "module foo {\n  namespace \"http://cisco.com/ns/foo\";\n  prefix foo;\n  revision 2020-01-01;\n}\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("foo-dev@2020-03-03.yang"),
            "module foo-dev {\n  namespace \"http://cisco.com/ns/foo-dev\";\n  prefix fd;\n  revision 2020-03-03;\n}\n",
        )
        .unwrap();

        let parser = YangStatementParser::new();
        let index = SchemaIndex::build(&[dir.path()]);
        let diagnostics = Diagnostics::new();
        let builder = ModuleRecordBuilder::new(&parser, &index, &diagnostics);

        let declared =
            parse_module_capability("module=foo&revision=2020-01-01&deviations=foo-dev").unwrap();
        let built = builder
            .build_vendor(&declared, &[platform("ASR9K")], Some(dir.path()))
            .unwrap();

        let record = built.record;
        assert_eq!(record.name, "foo");
        assert_eq!(record.revision, "2020-01-01");
        assert_eq!(record.organization, "cisco");
        assert!(record.dependencies.is_empty());
        assert_eq!(record.implementations.len(), 1);
        assert_eq!(
            record.implementations[0].deviations,
            vec![Deviation {
                name: "foo-dev".to_string(),
                revision: "2020-03-03".to_string()
            }]
        );
        assert_eq!(
            record.implementations[0].conformance_type,
            Some(ConformanceType::Implement)
        );
    }

    #[test]
    fn test_declared_module_not_found() {
        let parser = YangStatementParser::new();
        let index = SchemaIndex::default();
        let diagnostics = Diagnostics::new();
        let builder = ModuleRecordBuilder::new(&parser, &index, &diagnostics);

        let declared = DeclaredModule::new("absent", Some("2020-01-01".to_string()));
        assert!(matches!(
            builder.build_vendor(&declared, &[platform("ASR9K")], None),
            Err(CatalogError::SourceNotFound { .. })
        ));
    }
}
