//! Extension management.
//!
//! Discovers extensions under a builtin and a user root, reads their
//! `metadata.ini` declarations, checks declared requirements, and tracks
//! version-control state per extension.
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use ext_fs::FileCache;
//! use ext_git::GitOpener;
//! use ext_manager::{GitInfoCache, HardOverride, ManagerConfig, Registry, dependency};
//!
//! let root = Path::new(".");
//! let config = ManagerConfig::load(root)?;
//! let activation = config.activation(HardOverride::default());
//! let registry = Registry::scan(&config.roots(root), &activation)?;
//! dependency::validate(&registry);
//!
//! let info = GitInfoCache::new(Arc::new(FileCache::in_memory()), Arc::new(GitOpener));
//! for extension in registry.active_for(&activation) {
//!     info.read_info(&extension);
//! }
//! # Ok::<(), ext_manager::Error>(())
//! ```

pub mod config;
pub mod dependency;
pub mod error;
pub mod extension;
pub mod ini;
pub mod metadata;
pub mod policy;
pub mod registry;
pub mod repo_info;
pub mod update;

pub use config::ManagerConfig;
pub use dependency::{DependencyIssue, validate};
pub use error::{Error, Result};
pub use extension::{Extension, ExtensionSnapshot, RepoInfo, ScriptFile, UpdateStatus, short_hash};
pub use metadata::{ExtensionMetadata, parse_list};
pub use policy::{ActivationConfig, DisablePolicy, HardOverride};
pub use registry::{Conflict, ExtensionRoot, Registry, SharedRegistry};
pub use repo_info::GitInfoCache;
pub use update::{DEFAULT_SYNC_REF, UpdateChecker};
