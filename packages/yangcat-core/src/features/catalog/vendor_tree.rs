//! Vendor → platform → software-version → software-flavor tree

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::shared::models::{ConformanceType, Deviation, ModuleRecord};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VendorTree {
    pub vendors: VendorList,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VendorList {
    pub vendor: Vec<VendorNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorNode {
    pub name: String,
    pub platforms: PlatformList,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformList {
    pub platform: Vec<PlatformNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformNode {
    pub name: String,
    #[serde(rename = "software-versions")]
    pub software_versions: SoftwareVersionList,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoftwareVersionList {
    #[serde(rename = "software-version")]
    pub software_version: Vec<SoftwareVersionNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoftwareVersionNode {
    pub name: String,
    #[serde(rename = "software-flavors")]
    pub software_flavors: SoftwareFlavorList,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoftwareFlavorList {
    #[serde(rename = "software-flavor")]
    pub software_flavor: Vec<SoftwareFlavorNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoftwareFlavorNode {
    pub name: String,
    pub protocols: ProtocolList,
    pub modules: ModuleList,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProtocolList {
    pub protocol: Vec<Protocol>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Protocol {
    pub name: String,
    pub protocol_version: Vec<String>,
    pub capabilities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleList {
    pub module: Vec<VendorModule>,
}

/// One module as implemented on one software flavor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VendorModule {
    pub name: String,
    pub revision: String,
    pub organization: String,
    pub os_version: String,
    pub feature_set: String,
    pub os_type: String,
    #[serde(rename = "feature", default)]
    pub features: Vec<String>,
    #[serde(rename = "deviation", default)]
    pub deviations: Vec<Deviation>,
    #[serde(default)]
    pub conformance_type: Option<ConformanceType>,
}

#[derive(Default)]
struct FlavorAccumulator {
    netconf_versions: Vec<String>,
    capabilities: Vec<String>,
    modules: Vec<VendorModule>,
}

type Nested = BTreeMap<String, BTreeMap<String, BTreeMap<String, BTreeMap<String, FlavorAccumulator>>>>;

fn push_unique(target: &mut Vec<String>, values: &[String]) {
    for value in values {
        if !target.contains(value) {
            target.push(value.clone());
        }
    }
}

impl VendorTree {
    pub fn from_records(records: &[ModuleRecord]) -> Self {
        let mut nested: Nested = BTreeMap::new();

        for record in records {
            for implementation in &record.implementations {
                let flavor = nested
                    .entry(implementation.vendor.clone())
                    .or_default()
                    .entry(implementation.platform.clone())
                    .or_default()
                    .entry(implementation.software_version.clone())
                    .or_default()
                    .entry(implementation.software_flavor.clone())
                    .or_default();

                push_unique(&mut flavor.netconf_versions, &implementation.netconf_versions);
                push_unique(&mut flavor.capabilities, &implementation.capabilities);
                flavor.modules.push(VendorModule {
                    name: record.name.clone(),
                    revision: record.revision.clone(),
                    organization: record.organization.clone(),
                    os_version: implementation.os_version.clone(),
                    feature_set: implementation.feature_set.clone(),
                    os_type: implementation.os_type.clone(),
                    features: implementation.features.clone(),
                    deviations: implementation.deviations.clone(),
                    conformance_type: implementation.conformance_type,
                });
            }
        }

        let vendor = nested
            .into_iter()
            .map(|(vendor, platforms)| VendorNode {
                name: vendor,
                platforms: PlatformList {
                    platform: platforms
                        .into_iter()
                        .map(|(platform, versions)| PlatformNode {
                            name: platform,
                            software_versions: SoftwareVersionList {
                                software_version: versions
                                    .into_iter()
                                    .map(|(version, flavors)| SoftwareVersionNode {
                                        name: version,
                                        software_flavors: SoftwareFlavorList {
                                            software_flavor: flavors
                                                .into_iter()
                                                .map(|(flavor, acc)| flavor_node(flavor, acc))
                                                .collect(),
                                        },
                                    })
                                    .collect(),
                            },
                        })
                        .collect(),
                },
            })
            .collect();

        VendorTree {
            vendors: VendorList { vendor },
        }
    }

    /// Total module entries across all flavors
    pub fn module_count(&self) -> usize {
        self.vendors
            .vendor
            .iter()
            .flat_map(|v| &v.platforms.platform)
            .flat_map(|p| &p.software_versions.software_version)
            .flat_map(|s| &s.software_flavors.software_flavor)
            .map(|f| f.modules.module.len())
            .sum()
    }
}

fn flavor_node(name: String, acc: FlavorAccumulator) -> SoftwareFlavorNode {
    let protocol = if acc.netconf_versions.is_empty() && acc.capabilities.is_empty() {
        Vec::new()
    } else {
        vec![Protocol {
            name: "netconf".to_string(),
            protocol_version: acc.netconf_versions,
            capabilities: acc.capabilities,
        }]
    };
    SoftwareFlavorNode {
        name,
        protocols: ProtocolList { protocol },
        modules: ModuleList {
            module: acc.modules,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{Implementation, ModuleType};
    use pretty_assertions::assert_eq;

    fn implementation(vendor: &str, platform: &str, version: &str) -> Implementation {
        Implementation {
            vendor: vendor.to_string(),
            platform: platform.to_string(),
            software_version: version.to_string(),
            software_flavor: "ALL".to_string(),
            os_version: version.to_string(),
            feature_set: "ALL".to_string(),
            os_type: "IOS-XR".to_string(),
            features: vec!["f1".to_string()],
            deviations: vec![],
            conformance_type: Some(ConformanceType::Implement),
            capabilities: vec!["urn:ietf:params:netconf:capability:candidate:1.0".to_string()],
            netconf_versions: vec!["urn:ietf:params:netconf:base:1.1".to_string()],
        }
    }

    #[test]
    fn test_tree_nesting() {
        let mut a = ModuleRecord::new("a", ModuleType::Module);
        a.implementations = vec![
            implementation("cisco", "ASR9K", "7.0.1"),
            implementation("cisco", "NCS5500", "7.0.1"),
        ];
        let mut b = ModuleRecord::new("b", ModuleType::Module);
        b.implementations = vec![implementation("cisco", "ASR9K", "7.0.1")];
        let sdo_only = ModuleRecord::new("c", ModuleType::Module);

        let tree = VendorTree::from_records(&[a, b, sdo_only]);
        assert_eq!(tree.vendors.vendor.len(), 1);
        let platforms = &tree.vendors.vendor[0].platforms.platform;
        assert_eq!(
            platforms.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            vec!["ASR9K", "NCS5500"]
        );
        let flavor = &platforms[0].software_versions.software_version[0]
            .software_flavors
            .software_flavor[0];
        assert_eq!(flavor.modules.module.len(), 2);
        assert_eq!(flavor.protocols.protocol[0].protocol_version.len(), 1);
        assert_eq!(tree.module_count(), 3);
    }
}
