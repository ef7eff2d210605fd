//! Source-control port and git adapter

mod error;
mod git;
mod location;

pub use error::{ScmError, ScmResult};
pub use git::{GitProvider, GitRepo, GitRepos};
pub use location::{owner_and_repo, NoSourceControl, RepoLocation, SourceControl, StaticLocations};
