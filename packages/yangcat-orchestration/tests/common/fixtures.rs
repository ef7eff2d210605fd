//! Schema and source document generators

/// Module with namespace, prefix, optional revision and imports
pub fn fixture_module(name: &str, revision: Option<&str>, imports: &[&str]) -> String {
    let imports: String = imports
        .iter()
        .map(|i| format!("  import {i} {{ prefix {i}; }}\n"))
        .collect();
    let revision = revision
        .map(|r| format!("  revision {r} {{ description \"initial\"; }}\n"))
        .unwrap_or_default();
    format!(
        "module {name} {{\n  yang-version 1.1;\n  namespace \"urn:ietf:params:xml:ns:yang:{name}\";\n  prefix {name};\n{imports}  organization \"IETF NETMOD Working Group\";\n{revision}}}\n"
    )
}

/// NETCONF hello carrying base 1.1 and the given capability URIs
pub fn fixture_hello(capabilities: &[&str]) -> String {
    let body: String = capabilities
        .iter()
        .map(|c| format!("    <capability>{c}</capability>\n"))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<hello xmlns=\"urn:ietf:params:xml:ns:netconf:base:1.0\">\n  <capabilities>\n    <capability>urn:ietf:params:netconf:base:1.1</capability>\n{body}  </capabilities>\n</hello>\n"
    )
}

/// `platform-metadata.json` listing platforms that share every document in the directory
pub fn fixture_platform_metadata(platforms: &[&str]) -> String {
    let entries: Vec<String> = platforms
        .iter()
        .map(|p| {
            format!(
                r#"{{"name": "{p}", "vendor": "cisco", "software-version": "7.0.1", "os-type": "IOS-XR"}}"#
            )
        })
        .collect();
    format!(r#"{{"platforms": {{"platform": [{}]}}}}"#, entries.join(", "))
}

/// IANA registry with one IANA-maintained record per `(name, file)`
pub fn fixture_iana_registry(records: &[(&str, &str, &str)]) -> String {
    let body: String = records
        .iter()
        .map(|(name, file, rfc)| {
            format!(
                "    <record>\n      <name>{name}</name>\n      <file>{file}</file>\n      <iana>Y</iana>\n      <xref type=\"rfc\" data=\"{rfc}\"/>\n    </record>\n"
            )
        })
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<registry xmlns=\"http://www.iana.org/assignments\" id=\"yang-parameters\">\n  <registry id=\"yang-parameters-1\">\n{body}  </registry>\n</registry>\n"
    )
}
