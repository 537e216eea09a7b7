//! Keyed cache of values derived from files on disk.
//!
//! Entries live under a `(category, key)` pair and remember the signature of
//! the path they were derived from. A lookup recomputes only when the watched
//! path's signature changed since the value was stored.
//!
//! ```
//! use ext_fs::FileCache;
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("HEAD"), "ref: refs/heads/main\n").unwrap();
//!
//! let cache = FileCache::in_memory();
//! let first: String = cache
//!     .get_or_compute("demo", "head", &dir.path().join("HEAD"), || "computed".to_string())
//!     .unwrap();
//! let second: String = cache
//!     .get_or_compute("demo", "head", &dir.path().join("HEAD"), || unreachable!())
//!     .unwrap();
//! assert_eq!(first, second);
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;

use parking_lot::{Mutex, RwLock};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{Error, NormalizedPath, Result, checksum, io};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    signature: String,
    value: serde_json::Value,
}

type Category = BTreeMap<String, CacheEntry>;

/// Process-wide store for derived values, optionally persisted as JSON.
///
/// Safe to share behind an `Arc`. The internal lock is never held while a
/// compute function runs, so unrelated keys are computed independently.
/// Two callers racing on the same key may both compute; callers needing
/// at-most-once semantics serialize per key themselves.
#[derive(Debug, Default)]
pub struct FileCache {
    path: Option<NormalizedPath>,
    data: RwLock<BTreeMap<String, Category>>,
    persist_lock: Mutex<()>,
}

impl FileCache {
    /// A cache that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a cache backed by a JSON file.
    ///
    /// A missing file starts an empty cache. An unreadable or corrupt file is
    /// reported and also starts empty; it is overwritten on the next store.
    pub fn open(path: impl Into<NormalizedPath>) -> Self {
        let path = path.into();
        let data = if path.is_file() {
            match io::read_text(&path)
                .and_then(|raw| {
                    serde_json::from_str(&raw).map_err(|e| Error::ConfigParse {
                        path: path.to_native(),
                        format: "JSON".into(),
                        message: e.to_string(),
                    })
                }) {
                Ok(data) => data,
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "Discarding unreadable cache file");
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Self {
            path: Some(path),
            data: RwLock::new(data),
            persist_lock: Mutex::new(()),
        }
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&NormalizedPath> {
        self.path.as_ref()
    }

    /// Return the stored value for `(category, key)` or compute a fresh one.
    ///
    /// `compute` runs only when no entry exists or the signature of `watched`
    /// differs from the stored one.
    ///
    /// # Errors
    ///
    /// [`Error::CacheEntryMissing`] when `watched` does not exist; `compute`
    /// is not invoked in that case. Callers can tell this apart from a value
    /// that was computed empty.
    pub fn get_or_compute<T, F>(
        &self,
        category: &str,
        key: &str,
        watched: &Path,
        compute: F,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> T,
    {
        let signature = path_signature(watched)?;

        if let Some(stored) = self.lookup(category, key, &signature) {
            match serde_json::from_value::<T>(stored) {
                Ok(value) => {
                    tracing::trace!(category, key, "Cache hit");
                    return Ok(value);
                }
                Err(e) => {
                    tracing::debug!(category, key, error = %e, "Cached value has a stale shape, recomputing");
                }
            }
        }

        tracing::debug!(category, key, watched = %watched.display(), "Cache miss, computing");
        let value = compute();
        let encoded = serde_json::to_value(&value).map_err(|e| Error::CacheEncode {
            category: category.to_string(),
            key: key.to_string(),
            message: e.to_string(),
        })?;

        self.data
            .write()
            .entry(category.to_string())
            .or_default()
            .insert(
                key.to_string(),
                CacheEntry {
                    signature,
                    value: encoded,
                },
            );

        if let Err(e) = self.save() {
            tracing::warn!(error = %e, "Failed to persist cache");
        }

        Ok(value)
    }

    /// Drop one entry. Returns whether an entry existed.
    pub fn invalidate(&self, category: &str, key: &str) -> bool {
        let removed = self
            .data
            .write()
            .get_mut(category)
            .and_then(|entries| entries.remove(key))
            .is_some();
        if removed && let Err(e) = self.save() {
            tracing::warn!(error = %e, "Failed to persist cache");
        }
        removed
    }

    /// Whether an entry is stored for `(category, key)`, regardless of freshness.
    pub fn contains(&self, category: &str, key: &str) -> bool {
        self.data
            .read()
            .get(category)
            .is_some_and(|entries| entries.contains_key(key))
    }

    /// Number of stored entries across all categories.
    pub fn len(&self) -> usize {
        self.data.read().values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write the cache to its backing file. No-op for in-memory caches.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let _guard = self.persist_lock.lock();
        let content = {
            let data = self.data.read();
            serde_json::to_string_pretty(&*data).map_err(|e| Error::ConfigSerialize {
                path: path.to_native(),
                format: "JSON".into(),
                message: e.to_string(),
            })?
        };
        io::write_text(path, &content)
    }

    fn lookup(&self, category: &str, key: &str, signature: &str) -> Option<serde_json::Value> {
        let data = self.data.read();
        let entry = data.get(category)?.get(key)?;
        (entry.signature == signature).then(|| entry.value.clone())
    }
}

/// Compute the signature of a watched path.
///
/// - file: SHA-256 of its contents
/// - directory: latest modification time among the directory and its
///   immediate children, plus the child count
///
/// # Errors
///
/// [`Error::CacheEntryMissing`] if the path does not exist.
pub fn path_signature(path: &Path) -> Result<String> {
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::CacheEntryMissing {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(Error::io(path, e)),
    };

    if metadata.is_file() {
        return checksum::compute_file_checksum(path).map_err(|e| Error::io(path, e));
    }

    let mut latest = metadata.modified().ok();
    let mut children = 0usize;
    let entries = fs::read_dir(path).map_err(|e| Error::io(path, e))?;
    for entry in entries.flatten() {
        children += 1;
        let modified = entry.metadata().ok().and_then(|m| m.modified().ok());
        if modified > latest {
            latest = modified;
        }
    }

    let stamp = latest
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .unwrap_or_default();
    Ok(format!(
        "mtime:{}.{:09};entries:{}",
        stamp.as_secs(),
        stamp.subsec_nanos(),
        children
    ))
}

