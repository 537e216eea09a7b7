//! Version-control interface consumed by the extension manager

use std::path::Path;

use chrono::{DateTime, Utc};
use ext_fs::ExtPath;

use crate::Result;

/// Remote consulted by single-remote operations.
pub const DEFAULT_REMOTE: &str = "origin";

/// The commit HEAD currently points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadCommit {
    /// Full hex object id
    pub hash: String,
    /// Commit timestamp
    pub date: DateTime<Utc>,
}

/// What a fetch did, or would do, to one remote-tracking ref.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefUpdate {
    /// Remote the ref belongs to
    pub remote: String,
    /// Local tracking ref, e.g. `refs/remotes/origin/main`
    pub refname: String,
    /// Previous target, `None` for a ref that does not exist locally yet
    pub old: Option<String>,
    /// Target on the remote
    pub new: String,
    /// Whether the local ref already matches the remote
    pub up_to_date: bool,
}

/// An opened working copy.
pub trait ExtensionRepo {
    /// URLs of configured remotes, `origin` first when present.
    fn remote_urls(&self) -> Result<Vec<String>>;

    fn head_commit(&self) -> Result<HeadCommit>;

    /// Current branch name, `None` when HEAD is detached.
    fn current_branch(&self) -> Result<Option<String>>;

    /// Fetch from the tracked remote, or from every remote with `all_remotes`.
    ///
    /// With `dry_run` nothing local changes; the result reports one entry per
    /// remote branch, flagged up to date or not. Without `dry_run` the result
    /// lists the refs that moved.
    fn fetch(&self, dry_run: bool, all_remotes: bool) -> Result<Vec<RefUpdate>>;

    /// Resolve a revision (`origin`, a branch, a hash) to a commit id.
    fn resolve(&self, spec: &str) -> Result<String>;

    /// Point HEAD at `spec` and overwrite index and working tree.
    ///
    /// Local modifications to tracked files are lost.
    fn reset_hard(&self, spec: &str) -> Result<()>;
}

/// Opens working copies. Shared across threads.
pub trait RepoOpener: Send + Sync {
    fn open(&self, path: &Path) -> Result<Box<dyn ExtensionRepo>>;
}

/// Whether `path` contains a `.git` entry.
pub fn has_git_dir(path: &Path) -> bool {
    path.join(ExtPath::GitDir.as_str()).exists()
}
