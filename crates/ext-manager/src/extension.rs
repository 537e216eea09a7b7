//! The [`Extension`] entity and its version-control state.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use ext_git::HeadCommit;
use parking_lot::{Mutex, MutexGuard, RwLock};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::metadata::ExtensionMetadata;

/// Length of the abbreviated commit hash shown as an extension's version.
pub const VERSION_LEN: usize = 8;

/// First [`VERSION_LEN`] characters of a commit hash.
pub fn short_hash(hash: &str) -> String {
    hash.chars().take(VERSION_LEN).collect()
}

/// Result of the last update check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpdateStatus {
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "new commits")]
    NewCommits,
    #[serde(rename = "behind HEAD")]
    BehindHead,
    #[serde(rename = "latest")]
    Latest,
    #[serde(rename = "unknown (remote error)")]
    RemoteError,
}

impl UpdateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::NewCommits => "new commits",
            Self::BehindHead => "behind HEAD",
            Self::Latest => "latest",
            Self::RemoteError => "unknown (remote error)",
        }
    }
}

impl fmt::Display for UpdateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields derived from an extension's git working copy.
///
/// This is the value stored in the file cache, so it must stay serializable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoInfo {
    pub remote: Option<String>,
    pub commit_date: Option<DateTime<Utc>>,
    pub branch: Option<String>,
    pub commit_hash: String,
    pub version: String,
}

impl RepoInfo {
    pub fn from_head(remote: Option<String>, branch: Option<String>, head: HeadCommit) -> Self {
        Self {
            remote,
            commit_date: Some(head.date),
            branch,
            version: short_hash(&head.hash),
            commit_hash: head.hash,
        }
    }
}

/// A file shipped inside an extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptFile {
    /// The extension directory
    pub basedir: PathBuf,
    pub filename: String,
    pub path: PathBuf,
}

#[derive(Debug, Default)]
pub(crate) struct ExtensionState {
    pub(crate) info: RepoInfo,
    pub(crate) status: Option<UpdateStatus>,
    pub(crate) can_update: bool,
    pub(crate) have_info_from_repo: bool,
    /// Set by a force-resync: the cached repo info must be recomputed.
    pub(crate) stale: bool,
}

/// One installed extension.
///
/// Identity and activation are fixed at scan time. Version-control state is
/// filled lazily and may be read from several threads at once.
#[derive(Debug)]
pub struct Extension {
    name: String,
    path: PathBuf,
    is_builtin: bool,
    enabled: bool,
    metadata: ExtensionMetadata,
    state: RwLock<ExtensionState>,
    read_lock: Mutex<()>,
}

impl Extension {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        enabled: bool,
        is_builtin: bool,
        metadata: ExtensionMetadata,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_builtin,
            enabled,
            metadata,
            state: RwLock::new(ExtensionState::default()),
            read_lock: Mutex::new(()),
        }
    }

    /// Directory name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn canonical_name(&self) -> &str {
        &self.metadata.canonical_name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_builtin(&self) -> bool {
        self.is_builtin
    }

    /// Whether the extension is not listed in the disabled set.
    ///
    /// Global overrides are applied by [`Registry::active`](crate::Registry::active),
    /// not here.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn metadata(&self) -> &ExtensionMetadata {
        &self.metadata
    }

    pub fn requires(&self) -> &[String] {
        &self.metadata.requires
    }

    /// `None` until repository info has been read or an update check ran.
    pub fn status(&self) -> Option<UpdateStatus> {
        self.state.read().status
    }

    pub fn can_update(&self) -> bool {
        self.state.read().can_update
    }

    pub fn have_info_from_repo(&self) -> bool {
        self.state.read().have_info_from_repo
    }

    pub fn info(&self) -> RepoInfo {
        self.state.read().info.clone()
    }

    pub fn remote(&self) -> Option<String> {
        self.state.read().info.remote.clone()
    }

    pub fn commit_hash(&self) -> String {
        self.state.read().info.commit_hash.clone()
    }

    pub fn version(&self) -> String {
        self.state.read().info.version.clone()
    }

    pub fn branch(&self) -> Option<String> {
        self.state.read().info.branch.clone()
    }

    pub fn commit_date(&self) -> Option<DateTime<Utc>> {
        self.state.read().info.commit_date
    }

    /// Regular files in `<path>/<subdir>` whose extension matches
    /// `extension` (with the dot, case-insensitive), sorted by name.
    pub fn list_files(&self, subdir: &str, extension: &str) -> Result<Vec<ScriptFile>> {
        let dir = self.path.join(subdir);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let wanted = extension.to_lowercase();
        let mut files = Vec::new();
        for entry in std::fs::read_dir(&dir).map_err(|e| Error::io(&dir, e))? {
            let entry = entry.map_err(|e| Error::io(&dir, e))?;
            let path = entry.path();
            let matches = path
                .extension()
                .map(|ext| format!(".{}", ext.to_string_lossy()).to_lowercase() == wanted)
                .unwrap_or(false);
            if matches && path.is_file() {
                files.push(ScriptFile {
                    basedir: self.path.clone(),
                    filename: entry.file_name().to_string_lossy().into_owned(),
                    path,
                });
            }
        }
        files.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(files)
    }

    /// Serializable view of the current state.
    pub fn snapshot(&self) -> ExtensionSnapshot {
        let state = self.state.read();
        ExtensionSnapshot {
            name: self.name.clone(),
            canonical_name: self.canonical_name().to_string(),
            path: self.path.clone(),
            builtin: self.is_builtin,
            enabled: self.enabled,
            status: state.status.unwrap_or(UpdateStatus::Unknown),
            can_update: state.can_update,
            requires: self.metadata.requires.clone(),
            info: state.info.clone(),
        }
    }

    pub(crate) fn read_guard(&self) -> MutexGuard<'_, ()> {
        self.read_lock.lock()
    }

    pub(crate) fn state(&self) -> &RwLock<ExtensionState> {
        &self.state
    }

    pub(crate) fn set_update_status(&self, status: UpdateStatus, can_update: bool) {
        let mut state = self.state.write();
        state.status = Some(status);
        state.can_update = can_update;
    }

    /// Forget repository info so the next read recomputes it.
    pub(crate) fn mark_resynced(&self) {
        let mut state = self.state.write();
        state.have_info_from_repo = false;
        state.stale = true;
    }
}

/// Point-in-time copy of an extension, for display and JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionSnapshot {
    pub name: String,
    pub canonical_name: String,
    pub path: PathBuf,
    pub builtin: bool,
    pub enabled: bool,
    pub status: UpdateStatus,
    pub can_update: bool,
    pub requires: Vec<String>,
    #[serde(flatten)]
    pub info: RepoInfo,
}
