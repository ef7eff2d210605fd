//! Copy of every processed schema as `name@revision.yang`

use std::fs;
use std::io;
use std::path::Path;

use crate::shared::models::ModuleRecord;

/// Returns `true` when a copy was written, `false` if one already existed
pub fn archive_schema(dir: &Path, record: &ModuleRecord, source: &Path) -> io::Result<bool> {
    let target = dir.join(record.file_name());
    if target.exists() {
        return Ok(false);
    }
    fs::create_dir_all(dir)?;
    fs::copy(source, &target)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::ModuleType;

    #[test]
    fn test_archive_once() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = dir.path().join("a.yang");
        fs::write(&source, "module a {}").unwrap();
        let mut record = ModuleRecord::new("a", ModuleType::Module);
        record.revision = "2020-01-01".to_string();

        let archive = dir.path().join("all");
        assert!(archive_schema(&archive, &record, &source).unwrap());
        assert!(!archive_schema(&archive, &record, &source).unwrap());
        assert!(archive.join("a@2020-01-01.yang").exists());
    }
}
