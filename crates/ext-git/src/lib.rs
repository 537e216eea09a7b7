//! Git access for extension working copies
//!
//! The extension manager only talks to [`RepoOpener`] and [`ExtensionRepo`];
//! [`GitOpener`] is the libgit2-backed implementation used outside tests.

pub mod error;
pub mod local;
pub mod repository;

pub use error::{Error, Result};
pub use local::{GitOpener, GitRepository, get_current_branch};
pub use repository::{DEFAULT_REMOTE, ExtensionRepo, HeadCommit, RefUpdate, RepoOpener, has_git_dir};
