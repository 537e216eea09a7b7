//! Update checks and force-resync against remotes.
//!
//! Both operations block on network I/O and have no timeout of their own.

use std::sync::Arc;

use ext_git::{DEFAULT_REMOTE, ExtensionRepo, RepoOpener, has_git_dir};

use crate::error::{Error, Result};
use crate::extension::{Extension, UpdateStatus};

/// Reference a force-resync resets to when none is given.
pub const DEFAULT_SYNC_REF: &str = DEFAULT_REMOTE;

pub struct UpdateChecker {
    opener: Arc<dyn RepoOpener>,
}

impl UpdateChecker {
    pub fn new(opener: Arc<dyn RepoOpener>) -> Self {
        Self { opener }
    }

    /// Classify `extension` against its tracked remote.
    ///
    /// Always overwrites the extension's status and `can_update`. Errors are
    /// logged and reported as [`UpdateStatus::RemoteError`].
    pub fn check_updates(&self, extension: &Extension) -> UpdateStatus {
        let (status, can_update) = match self.opener.open(extension.path()) {
            Ok(repo) => classify(extension, repo.as_ref()),
            Err(e) => {
                tracing::warn!(extension = %extension.name(), error = %e, "Cannot open repository for update check");
                (UpdateStatus::RemoteError, false)
            }
        };
        tracing::debug!(extension = %extension.name(), %status, can_update, "Update check finished");
        extension.set_update_status(status, can_update);
        status
    }

    /// Fetch every remote and hard-reset the working copy to `reference`.
    ///
    /// Local modifications are discarded. On success the extension's
    /// repository info is marked for re-reading. Any failure is returned and
    /// the working copy may or may not have been touched.
    pub fn sync_to_commit(&self, extension: &Extension, reference: &str) -> Result<()> {
        if extension.is_builtin() {
            return Err(Error::BuiltinNotVersioned(extension.name().to_string()));
        }
        if !has_git_dir(extension.path()) {
            return Err(Error::NotARepository {
                name: extension.name().to_string(),
                path: extension.path().to_path_buf(),
            });
        }

        let repo = self.opener.open(extension.path())?;
        let moved = repo.fetch(false, true)?;
        tracing::debug!(extension = %extension.name(), refs = moved.len(), "Fetched all remotes");
        repo.reset_hard(reference)?;
        extension.mark_resynced();
        tracing::info!(extension = %extension.name(), reference, "Extension synchronized");
        Ok(())
    }
}

fn classify(extension: &Extension, repo: &dyn ExtensionRepo) -> (UpdateStatus, bool) {
    match repo.fetch(true, false) {
        Ok(updates) if updates.iter().any(|u| !u.up_to_date) => {
            return (UpdateStatus::NewCommits, true);
        }
        Ok(_) => {}
        Err(e) => {
            tracing::warn!(extension = %extension.name(), error = %e, "Dry-run fetch failed");
            return (UpdateStatus::RemoteError, false);
        }
    }

    let origin = match repo.resolve(DEFAULT_REMOTE) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::warn!(extension = %extension.name(), error = %e, "Cannot resolve {DEFAULT_REMOTE}");
            return (UpdateStatus::RemoteError, false);
        }
    };

    match repo.head_commit() {
        Ok(head) if head.hash != origin => (UpdateStatus::BehindHead, true),
        Ok(_) => (UpdateStatus::Latest, false),
        Err(e) => {
            tracing::warn!(extension = %extension.name(), error = %e, "Cannot read HEAD");
            (UpdateStatus::RemoteError, false)
        }
    }
}
