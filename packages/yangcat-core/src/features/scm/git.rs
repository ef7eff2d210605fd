//! git2-backed source-control adapter
//!
//! Only the minimal contract is covered: open (or clone) a checkout, read a
//! commit identifier, remove the checkout, and say which checkout (the
//! repository itself or one of its submodules) owns a path.

use std::fs;
use std::path::{Path, PathBuf};

use git2::Repository;
use parking_lot::Mutex;
use tracing::{debug, info};

use super::location::{RepoLocation, SourceControl};
use super::{ScmError, ScmResult};

pub struct GitProvider;

impl GitProvider {
    /// Open the checkout at `root`, cloning `url` into it when absent
    pub fn load_or_clone(root: &Path, url: Option<&str>) -> ScmResult<GitRepo> {
        match Repository::open(root) {
            Ok(repo) => {
                debug!(root = %root.display(), "Opened repository");
                Ok(GitRepo::from_repository(repo, root))
            }
            Err(open_err) => match url {
                Some(url) => {
                    info!(%url, root = %root.display(), "Cloning repository");
                    let repo = Repository::clone(url, root)?;
                    Ok(GitRepo::from_repository(repo, root))
                }
                None => Err(ScmError::NotARepository(format!(
                    "{}: {}",
                    root.display(),
                    open_err.message()
                ))),
            },
        }
    }
}

pub struct GitRepo {
    root: PathBuf,
    repo: Mutex<Repository>,
}

impl GitRepo {
    fn from_repository(repo: Repository, root: &Path) -> Self {
        let root = repo
            .workdir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.to_path_buf());
        Self {
            root,
            repo: Mutex::new(repo),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Commit of `reference` (default `HEAD`), or the checked-out commit of the
    /// submodule at `path` when one is given
    pub fn get_commit_hash(&self, path: Option<&Path>, reference: Option<&str>) -> ScmResult<String> {
        let repo = self.repo.lock();
        if let Some(path) = path {
            let relative = path.strip_prefix(&self.root).unwrap_or(path);
            let submodule = repo.find_submodule(&relative.to_string_lossy())?;
            return submodule
                .workdir_id()
                .or_else(|| submodule.head_id())
                .map(|oid| oid.to_string())
                .ok_or_else(|| ScmError::UnknownReference {
                    reference: relative.display().to_string(),
                    message: "submodule has no checked-out commit".to_string(),
                });
        }

        let reference = reference.unwrap_or("HEAD");
        let object = repo
            .revparse_single(reference)
            .map_err(|e| ScmError::UnknownReference {
                reference: reference.to_string(),
                message: e.message().to_string(),
            })?;
        let commit = object.peel_to_commit()?;
        Ok(commit.id().to_string())
    }

    /// Delete the working directory
    pub fn remove(self) -> ScmResult<()> {
        let root = self.root.clone();
        drop(self);
        fs::remove_dir_all(&root)?;
        info!(root = %root.display(), "Removed repository checkout");
        Ok(())
    }

    fn origin_url(repo: &Repository) -> Option<String> {
        repo.find_remote("origin")
            .ok()
            .and_then(|remote| remote.url().map(str::to_string))
    }

    fn locate(&self, path: &Path) -> ScmResult<Option<RepoLocation>> {
        if !path.starts_with(&self.root) {
            return Ok(None);
        }
        let repo = self.repo.lock();

        for submodule in repo.submodules()? {
            let sub_root = self.root.join(submodule.path());
            if !path.starts_with(&sub_root) {
                continue;
            }
            let url = submodule.url().map(str::to_string);
            let commit = submodule.workdir_id().or_else(|| submodule.head_id());
            return Ok(match (url, commit) {
                (Some(url), Some(commit)) => Some(RepoLocation::new(sub_root, url, commit.to_string())),
                _ => None,
            });
        }

        let Some(url) = Self::origin_url(&repo) else {
            return Ok(None);
        };
        let commit = repo.head()?.peel_to_commit()?.id().to_string();
        Ok(Some(RepoLocation::new(self.root.clone(), url, commit)))
    }
}

impl SourceControl for GitRepo {
    fn location_for(&self, path: &Path) -> ScmResult<Option<RepoLocation>> {
        self.locate(path)
    }
}

/// Several checkouts searched in order
pub struct GitRepos(pub Vec<GitRepo>);

impl SourceControl for GitRepos {
    fn location_for(&self, path: &Path) -> ScmResult<Option<RepoLocation>> {
        for repo in &self.0 {
            if let Some(location) = repo.location_for(path)? {
                return Ok(Some(location));
            }
        }
        Ok(None)
    }
}
