//! File-name helpers for schema files

use std::path::Path;

/// Extension of modeling-language source files
pub const YANG_EXTENSION: &str = "yang";

/// True for `*.yang` files
pub fn is_yang_file(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(YANG_EXTENSION)
}

/// Split `name@revision.yang` into `(name, Some(revision))`; `name.yang` gives `(name, None)`.
pub fn split_file_name(path: &Path) -> Option<(String, Option<String>)> {
    let stem = path.file_stem()?.to_str()?;
    match stem.split_once('@') {
        Some((name, revision)) if !name.is_empty() => {
            Some((name.to_string(), Some(revision.to_string())))
        }
        Some(_) => None,
        None => Some((stem.to_string(), None)),
    }
}

/// Final path component as an owned string
pub fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_file_name() {
        assert_eq!(
            split_file_name(Path::new("/x/ietf-yang-types@2013-07-15.yang")),
            Some(("ietf-yang-types".to_string(), Some("2013-07-15".to_string())))
        );
        assert_eq!(
            split_file_name(Path::new("foo.yang")),
            Some(("foo".to_string(), None))
        );
        assert_eq!(split_file_name(Path::new("@2020-01-01.yang")), None);
    }

    #[test]
    fn test_is_yang_file() {
        assert!(is_yang_file(Path::new("a/b.yang")));
        assert!(!is_yang_file(Path::new("a/b.xml")));
    }
}
