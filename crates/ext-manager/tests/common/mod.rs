//! Scripted stand-ins for the version-control collaborator.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{TimeZone, Utc};
use ext_git::{Error, ExtensionRepo, HeadCommit, RefUpdate, RepoOpener, Result};
use ext_manager::{Extension, ExtensionMetadata};
use parking_lot::Mutex;

pub const HEAD_HASH: &str = "1111111122222222333333334444444455555555";
pub const OTHER_HASH: &str = "aaaaaaaabbbbbbbbccccccccddddddddeeeeeeee";

/// What a fake repository reports.
#[derive(Debug, Clone)]
pub struct Script {
    pub remotes: Vec<String>,
    pub head: String,
    pub branch: Option<String>,
    /// `None` makes fetches fail
    pub updates: Option<Vec<RefUpdate>>,
    /// `None` makes resolving `origin` fail
    pub origin: Option<String>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            remotes: vec!["https://example.com/ext.git".into()],
            head: HEAD_HASH.into(),
            branch: Some("main".into()),
            updates: Some(vec![ref_update(true)]),
            origin: Some(HEAD_HASH.into()),
        }
    }
}

pub fn ref_update(up_to_date: bool) -> RefUpdate {
    RefUpdate {
        remote: "origin".into(),
        refname: "refs/remotes/origin/main".into(),
        old: Some(HEAD_HASH.into()),
        new: if up_to_date { HEAD_HASH } else { OTHER_HASH }.into(),
        up_to_date,
    }
}

/// Counts repository reads and records destructive calls.
#[derive(Debug, Default)]
pub struct Calls {
    pub opens: AtomicUsize,
    pub head_reads: AtomicUsize,
    pub fetches: Mutex<Vec<(bool, bool)>>,
    pub resets: Mutex<Vec<String>>,
}

impl Calls {
    pub fn head_reads(&self) -> usize {
        self.head_reads.load(Ordering::SeqCst)
    }

    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Default)]
pub struct FakeOpener {
    pub script: Mutex<Script>,
    pub calls: Arc<Calls>,
    pub fail_open: bool,
    /// Slows down head reads so racing callers overlap
    pub read_delay: Duration,
}

impl FakeOpener {
    pub fn new(script: Script) -> Self {
        Self {
            script: Mutex::new(script),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_open: true,
            ..Self::default()
        }
    }
}

impl RepoOpener for FakeOpener {
    fn open(&self, path: &Path) -> Result<Box<dyn ExtensionRepo>> {
        self.calls.opens.fetch_add(1, Ordering::SeqCst);
        if self.fail_open {
            return Err(Error::NoRemotes {
                path: path.to_path_buf(),
            });
        }
        Ok(Box::new(FakeRepo {
            script: self.script.lock().clone(),
            calls: Arc::clone(&self.calls),
            read_delay: self.read_delay,
        }))
    }
}

struct FakeRepo {
    script: Script,
    calls: Arc<Calls>,
    read_delay: Duration,
}

impl ExtensionRepo for FakeRepo {
    fn remote_urls(&self) -> Result<Vec<String>> {
        Ok(self.script.remotes.clone())
    }

    fn head_commit(&self) -> Result<HeadCommit> {
        self.calls.head_reads.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.read_delay);
        Ok(HeadCommit {
            hash: self.script.head.clone(),
            date: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        })
    }

    fn current_branch(&self) -> Result<Option<String>> {
        Ok(self.script.branch.clone())
    }

    fn fetch(&self, dry_run: bool, all_remotes: bool) -> Result<Vec<RefUpdate>> {
        self.calls.fetches.lock().push((dry_run, all_remotes));
        self.script.updates.clone().ok_or_else(|| Error::RemoteNotFound {
            name: "origin".into(),
        })
    }

    fn resolve(&self, spec: &str) -> Result<String> {
        self.script.origin.clone().ok_or_else(|| Error::RemoteNotFound {
            name: spec.to_string(),
        })
    }

    fn reset_hard(&self, spec: &str) -> Result<()> {
        self.calls.resets.lock().push(spec.to_string());
        Ok(())
    }
}

/// A user extension at `path` with no declarations.
pub fn user_extension(name: &str, path: impl Into<PathBuf>) -> Extension {
    Extension::new(name, path, true, false, ExtensionMetadata::empty(name))
}
