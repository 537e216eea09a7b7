//! libgit2-backed working copies

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use git2::build::CheckoutBuilder;
use git2::{Direction, ObjectType, RemoteCallbacks, Repository, ResetType};

use crate::repository::{DEFAULT_REMOTE, ExtensionRepo, HeadCommit, RefUpdate, RepoOpener};
use crate::{Error, Result};

/// Opens working copies with libgit2.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitOpener;

impl RepoOpener for GitOpener {
    fn open(&self, path: &Path) -> Result<Box<dyn ExtensionRepo>> {
        Ok(Box::new(GitRepository::open(path)?))
    }
}

/// A non-bare git working copy.
pub struct GitRepository {
    repo: Repository,
    path: PathBuf,
}

impl GitRepository {
    /// Open the repository rooted at `path`.
    ///
    /// Bare repositories are rejected since there is no working copy to
    /// describe or reset.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::open(path)?;
        if repo.is_bare() {
            return Err(Error::BareRepository {
                path: path.to_path_buf(),
            });
        }
        Ok(Self {
            repo,
            path: path.to_path_buf(),
        })
    }

    fn remote_names(&self) -> Result<Vec<String>> {
        let names = self.repo.remotes()?;
        let mut names: Vec<String> = names.iter().flatten().map(str::to_string).collect();
        if let Some(idx) = names.iter().position(|n| n == DEFAULT_REMOTE) {
            let origin = names.remove(idx);
            names.insert(0, origin);
        }
        Ok(names)
    }

    /// `origin` if configured, otherwise the first remote.
    fn tracked_remote(&self) -> Result<String> {
        self.remote_names()?
            .into_iter()
            .next()
            .ok_or_else(|| Error::NoRemotes {
                path: self.path.clone(),
            })
    }

    fn find_remote(&self, name: &str) -> Result<git2::Remote<'_>> {
        self.repo.find_remote(name).map_err(|_| Error::RemoteNotFound {
            name: name.to_string(),
        })
    }

    /// Compare the remote's advertised branches with local tracking refs.
    fn probe_remote(&self, name: &str) -> Result<Vec<RefUpdate>> {
        let mut remote = self.find_remote(name)?;
        remote.connect(Direction::Fetch)?;
        let heads: Vec<(String, git2::Oid)> = remote
            .list()?
            .iter()
            .map(|head| (head.name().to_string(), head.oid()))
            .collect();
        remote.disconnect()?;

        let updates = heads
            .into_iter()
            .filter_map(|(refname, oid)| {
                let branch = refname.strip_prefix("refs/heads/")?;
                let tracking = format!("refs/remotes/{name}/{branch}");
                let local = self.repo.refname_to_id(&tracking).ok();
                Some(RefUpdate {
                    remote: name.to_string(),
                    refname: tracking,
                    old: local.map(|o| o.to_string()),
                    new: oid.to_string(),
                    up_to_date: local == Some(oid),
                })
            })
            .collect();
        Ok(updates)
    }

    /// Fetch with the remote's configured refspecs, collecting moved refs.
    fn fetch_remote(&self, name: &str) -> Result<Vec<RefUpdate>> {
        let mut remote = self.find_remote(name)?;
        let moved = RefCell::new(Vec::new());
        {
            let mut callbacks = RemoteCallbacks::new();
            callbacks.update_tips(|refname, old, new| {
                moved.borrow_mut().push(RefUpdate {
                    remote: name.to_string(),
                    refname: refname.to_string(),
                    old: (!old.is_zero()).then(|| old.to_string()),
                    new: new.to_string(),
                    up_to_date: false,
                });
                true
            });
            let mut options = git2::FetchOptions::new();
            options.remote_callbacks(callbacks);
            remote.fetch(&[] as &[&str], Some(&mut options), None)?;
        }
        Ok(moved.into_inner())
    }
}

impl ExtensionRepo for GitRepository {
    fn remote_urls(&self) -> Result<Vec<String>> {
        let mut urls = Vec::new();
        for name in self.remote_names()? {
            let remote = self.find_remote(&name)?;
            if let Some(url) = remote.url() {
                urls.push(url.to_string());
            }
        }
        Ok(urls)
    }

    fn head_commit(&self) -> Result<HeadCommit> {
        let commit = self.repo.head()?.peel_to_commit()?;
        let date: DateTime<Utc> = Utc
            .timestamp_opt(commit.time().seconds(), 0)
            .single()
            .unwrap_or_default();
        Ok(HeadCommit {
            hash: commit.id().to_string(),
            date,
        })
    }

    fn current_branch(&self) -> Result<Option<String>> {
        get_current_branch(&self.repo)
    }

    fn fetch(&self, dry_run: bool, all_remotes: bool) -> Result<Vec<RefUpdate>> {
        let remotes = if all_remotes {
            self.remote_names()?
        } else {
            vec![self.tracked_remote()?]
        };

        let mut updates = Vec::new();
        for name in remotes {
            tracing::debug!(path = %self.path.display(), remote = %name, dry_run, "Fetching");
            let mut batch = if dry_run {
                self.probe_remote(&name)?
            } else {
                self.fetch_remote(&name)?
            };
            updates.append(&mut batch);
        }
        Ok(updates)
    }

    fn resolve(&self, spec: &str) -> Result<String> {
        let commit = self.repo.revparse_single(spec)?.peel_to_commit()?;
        Ok(commit.id().to_string())
    }

    fn reset_hard(&self, spec: &str) -> Result<()> {
        let target = self.repo.revparse_single(spec)?.peel(ObjectType::Commit)?;
        let mut checkout = CheckoutBuilder::new();
        checkout.force();
        self.repo
            .reset(&target, ResetType::Hard, Some(&mut checkout))?;
        tracing::info!(path = %self.path.display(), target = %target.id(), "Working copy reset");
        Ok(())
    }
}

/// Get the current branch name from a repository.
///
/// Returns the branch name if HEAD points to a branch, or `None` if HEAD is detached.
pub fn get_current_branch(repo: &Repository) -> Result<Option<String>> {
    let head = repo.head()?;

    if head.is_branch() {
        Ok(head.shorthand().map(str::to_string))
    } else {
        Ok(None)
    }
}
