//! Error types for ext-git

use std::path::PathBuf;

/// Result type for ext-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in ext-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Remote '{name}' not found")]
    RemoteNotFound { name: String },

    #[error("Repository at {path} has no remotes configured")]
    NoRemotes { path: PathBuf },

    #[error("Repository at {path} is bare and has no working copy")]
    BareRepository { path: PathBuf },
}
