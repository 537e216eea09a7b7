//! Lazy, cached reads of repository info.

use std::sync::Arc;

use ext_fs::{ExtPath, FileCache};
use ext_git::{ExtensionRepo, RepoOpener, has_git_dir};

use crate::extension::{Extension, RepoInfo, UpdateStatus};

/// File cache category holding [`RepoInfo`] values, keyed by directory name.
pub const CACHE_CATEGORY: &str = "extension-repo-info";

/// Fills an extension's repository fields at most once.
///
/// Values are memoized in a [`FileCache`] keyed on the extension's `.git`
/// directory, so a later process reuses them until the working copy changes.
pub struct GitInfoCache {
    cache: Arc<FileCache>,
    opener: Arc<dyn RepoOpener>,
}

impl GitInfoCache {
    pub fn new(cache: Arc<FileCache>, opener: Arc<dyn RepoOpener>) -> Self {
        Self { cache, opener }
    }

    /// Populate `extension`'s repository fields if not done yet.
    ///
    /// Builtin extensions are skipped. Failures are logged and leave the
    /// fields empty; the extension is still marked as read.
    pub fn read_info(&self, extension: &Extension) {
        if extension.is_builtin() || extension.have_info_from_repo() {
            return;
        }

        let _guard = extension.read_guard();
        if extension.have_info_from_repo() {
            return;
        }

        let stale = std::mem::take(&mut extension.state().write().stale);
        if stale {
            self.cache.invalidate(CACHE_CATEGORY, extension.name());
        }

        let git_dir = extension.path().join(ExtPath::GitDir.as_str());
        let result = self.cache.get_or_compute(CACHE_CATEGORY, extension.name(), &git_dir, || {
            self.read_from_repo(extension)
        });

        let mut state = extension.state().write();
        match result {
            Ok(info) => state.info = info,
            Err(e) if e.is_missing_entry() => {}
            Err(e) => {
                tracing::warn!(extension = %extension.name(), error = %e, "Repository info cache failed");
            }
        }
        state.have_info_from_repo = true;
        if state.status.is_none() {
            state.status = Some(UpdateStatus::Unknown);
        }
    }

    /// Read info for every extension in order.
    pub fn read_all<'a>(&self, extensions: impl IntoIterator<Item = &'a Arc<Extension>>) {
        for extension in extensions {
            self.read_info(extension);
        }
    }

    fn read_from_repo(&self, extension: &Extension) -> RepoInfo {
        if !has_git_dir(extension.path()) {
            return RepoInfo::default();
        }

        let repo = match self.opener.open(extension.path()) {
            Ok(repo) => repo,
            Err(e) => {
                tracing::error!(
                    extension = %extension.name(),
                    path = %extension.path().display(),
                    error = %e,
                    "Error reading git repository info"
                );
                return RepoInfo::default();
            }
        };

        describe(repo.as_ref()).unwrap_or_else(|e| {
            tracing::error!(
                extension = %extension.name(),
                error = %e,
                "Failed reading extension data from git repository"
            );
            RepoInfo::default()
        })
    }
}

fn describe(repo: &dyn ExtensionRepo) -> ext_git::Result<RepoInfo> {
    let remote = repo.remote_urls()?.into_iter().next();
    let head = repo.head_commit()?;
    let branch = repo.current_branch()?;
    Ok(RepoInfo::from_head(remote, branch, head))
}
