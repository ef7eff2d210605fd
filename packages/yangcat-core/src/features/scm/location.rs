//! Repository locations and raw-content URLs

use std::path::{Path, PathBuf};

use super::ScmResult;

/// Checkout that owns a file: working directory, origin URL and commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocation {
    pub root: PathBuf,
    pub remote_url: String,
    pub commit: String,
}

impl RepoLocation {
    pub fn new(root: impl Into<PathBuf>, remote_url: impl Into<String>, commit: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            remote_url: remote_url.into(),
            commit: commit.into(),
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.root)
    }

    /// `{raw_base}/{owner}/{repo}/{commit}/{relative path}`
    pub fn raw_url(&self, raw_base: &str, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let (owner, repo) = owner_and_repo(&self.remote_url)?;
        let relative: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(format!(
            "{}/{}/{}/{}/{}",
            raw_base.trim_end_matches('/'),
            owner,
            repo,
            self.commit,
            relative.join("/")
        ))
    }
}

/// `owner` and `repo` of `https://host/owner/repo(.git)` or `git@host:owner/repo(.git)`
pub fn owner_and_repo(remote_url: &str) -> Option<(String, String)> {
    let trimmed = remote_url.trim().trim_end_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);
    let mut segments = trimmed.rsplit(|c| c == '/' || c == ':');
    let repo = segments.next().filter(|s| !s.is_empty())?;
    let owner = segments.next().filter(|s| !s.is_empty())?;
    Some((owner.to_string(), repo.to_string()))
}

/// Answers which checkout owns a path
///
/// `Ok(None)` means the path is outside every known checkout; an error means
/// the owning checkout exists but could not be read.
pub trait SourceControl: Send + Sync {
    fn location_for(&self, path: &Path) -> ScmResult<Option<RepoLocation>>;
}

/// No repository information is available
pub struct NoSourceControl;

impl SourceControl for NoSourceControl {
    fn location_for(&self, _path: &Path) -> ScmResult<Option<RepoLocation>> {
        Ok(None)
    }
}

/// Fixed set of known locations; the deepest root containing the path wins
#[derive(Debug, Clone, Default)]
pub struct StaticLocations(pub Vec<RepoLocation>);

impl SourceControl for StaticLocations {
    fn location_for(&self, path: &Path) -> ScmResult<Option<RepoLocation>> {
        Ok(self
            .0
            .iter()
            .filter(|location| location.contains(path))
            .max_by_key(|location| location.root.components().count())
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_and_repo() {
        assert_eq!(
            owner_and_repo("https://github.com/YangModels/yang.git"),
            Some(("YangModels".to_string(), "yang".to_string()))
        );
        assert_eq!(
            owner_and_repo("git@github.com:openconfig/public"),
            Some(("openconfig".to_string(), "public".to_string()))
        );
        assert_eq!(owner_and_repo("yang"), None);
    }

    #[test]
    fn test_raw_url() {
        let location = RepoLocation::new("/repos/yang", "https://github.com/YangModels/yang.git", "abc123");
        assert_eq!(
            location.raw_url(
                "https://raw.githubusercontent.com/",
                Path::new("/repos/yang/standard/ietf/RFC/ietf-a.yang")
            ),
            Some("https://raw.githubusercontent.com/YangModels/yang/abc123/standard/ietf/RFC/ietf-a.yang".to_string())
        );
        assert_eq!(location.raw_url("https://x", Path::new("/elsewhere/a.yang")), None);
    }

    #[test]
    fn test_static_locations_prefers_deepest_root() {
        let locations = StaticLocations(vec![
            RepoLocation::new("/repos/yang", "https://github.com/YangModels/yang", "parent"),
            RepoLocation::new("/repos/yang/experimental/openconfig", "https://github.com/openconfig/public", "sub"),
        ]);
        let found = locations
            .location_for(Path::new("/repos/yang/experimental/openconfig/release/a.yang"))
            .unwrap()
            .unwrap();
        assert_eq!(found.commit, "sub");
        assert!(locations.location_for(Path::new("/tmp/a.yang")).unwrap().is_none());
    }
}
