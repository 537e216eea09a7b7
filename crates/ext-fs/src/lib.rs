//! Filesystem layer for the extension manager
//!
//! Provides normalized paths, atomic I/O, format-agnostic config loading and
//! the keyed [`FileCache`] used to memoize values derived from files on disk.

pub mod cache;
pub mod checksum;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use cache::{FileCache, path_signature};
pub use config::ConfigStore;
pub use constants::ExtPath;
pub use error::{Error, Result};
pub use path::NormalizedPath;
