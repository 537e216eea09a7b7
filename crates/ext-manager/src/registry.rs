//! Extension discovery and the active set.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::error::{Error, Result};
use crate::extension::Extension;
use crate::metadata::ExtensionMetadata;
use crate::policy::{self, Activation, ActivationConfig, DisablePolicy, HardOverride};

/// A directory holding one subdirectory per extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionRoot {
    pub path: PathBuf,
    pub builtin: bool,
}

impl ExtensionRoot {
    pub fn builtin(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            builtin: true,
        }
    }

    pub fn user(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            builtin: false,
        }
    }
}

/// A directory skipped because its canonical name was already taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub canonical_name: String,
    /// Directory name of the discarded extension
    pub discarded: String,
    pub discarded_path: PathBuf,
    /// Directory name of the extension that was kept
    pub kept: String,
}

impl std::fmt::Display for Conflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "duplicate canonical name \"{}\" found in extensions \"{}\" and \"{}\", the former was discarded",
            self.canonical_name, self.discarded, self.kept
        )
    }
}

/// Extensions found by one scan, in scan order.
#[derive(Debug, Default)]
pub struct Registry {
    extensions: Vec<Arc<Extension>>,
    by_name: HashMap<String, usize>,
    conflicts: Vec<Conflict>,
}

impl Registry {
    /// Scan `roots` in order and build a registry.
    ///
    /// Missing roots are skipped. Within a root, subdirectories are visited
    /// in lexicographic order and plain files are ignored. When two
    /// directories share a canonical name the first one wins.
    pub fn scan(roots: &[ExtensionRoot], activation: &ActivationConfig) -> Result<Self> {
        policy::announce(activation.hard, activation.soft);

        let mut registry = Self::default();
        for root in roots {
            if !root.path.is_dir() {
                tracing::debug!(root = %root.path.display(), "Extension root does not exist, skipping");
                continue;
            }

            for (dir_name, path) in subdirectories(&root.path)? {
                let metadata = ExtensionMetadata::load(&path, &dir_name);
                let enabled = !activation.is_disabled(&dir_name);
                let extension = Extension::new(dir_name, path, enabled, root.builtin, metadata);
                registry.insert(extension);
            }
        }

        tracing::debug!(
            count = registry.len(),
            conflicts = registry.conflicts.len(),
            "Extension scan complete"
        );
        Ok(registry)
    }

    /// Build a registry from already constructed extensions, applying the
    /// same first-wins rule as [`Registry::scan`].
    pub fn from_extensions(extensions: impl IntoIterator<Item = Extension>) -> Self {
        let mut registry = Self::default();
        for extension in extensions {
            registry.insert(extension);
        }
        registry
    }

    fn insert(&mut self, extension: Extension) {
        let canonical = extension.canonical_name().to_string();
        if let Some(&idx) = self.by_name.get(&canonical) {
            let conflict = Conflict {
                canonical_name: canonical,
                discarded: extension.name().to_string(),
                discarded_path: extension.path().to_path_buf(),
                kept: self.extensions[idx].name().to_string(),
            };
            tracing::error!(
                extension = %conflict.discarded,
                kept = %conflict.kept,
                "{conflict}"
            );
            self.conflicts.push(conflict);
            return;
        }

        self.by_name.insert(canonical, self.extensions.len());
        self.extensions.push(Arc::new(extension));
    }

    /// All extensions, builtin ones first.
    pub fn all(&self) -> &[Arc<Extension>] {
        &self.extensions
    }

    /// Look up by canonical name.
    pub fn get(&self, canonical_name: &str) -> Option<&Arc<Extension>> {
        self.by_name
            .get(canonical_name)
            .map(|&idx| &self.extensions[idx])
    }

    /// Look up by canonical name, then by directory name.
    pub fn find(&self, name: &str) -> Result<&Arc<Extension>> {
        self.get(&name.trim().to_lowercase())
            .or_else(|| self.extensions.iter().find(|ext| ext.name() == name))
            .ok_or_else(|| Error::UnknownExtension(name.to_string()))
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Extensions active under the given overrides, in scan order.
    pub fn active(&self, hard: HardOverride, soft: DisablePolicy) -> Vec<Arc<Extension>> {
        let keep: fn(&Extension) -> bool = match Activation::resolve(hard, soft) {
            Activation::Nothing => return Vec::new(),
            Activation::BuiltinOnly => |ext: &Extension| ext.enabled() && ext.is_builtin(),
            Activation::Enabled => |ext: &Extension| ext.enabled(),
        };
        self.extensions
            .iter()
            .filter(|ext| keep(ext))
            .cloned()
            .collect()
    }

    /// [`Registry::active`] with the overrides from `activation`.
    pub fn active_for(&self, activation: &ActivationConfig) -> Vec<Arc<Extension>> {
        self.active(activation.hard, activation.soft)
    }
}

fn subdirectories(root: &Path) -> Result<Vec<(String, PathBuf)>> {
    let entries = std::fs::read_dir(root).map_err(|e| Error::io(root, e))?;
    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(root, e))?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push((entry.file_name().to_string_lossy().into_owned(), path));
        }
    }
    dirs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(dirs)
}

/// A registry handle shared between threads.
///
/// Readers get an `Arc` to a complete registry. A rescan builds the new
/// registry without blocking readers and then swaps it in; concurrent
/// rescans are serialized.
#[derive(Debug, Default)]
pub struct SharedRegistry {
    current: RwLock<Arc<Registry>>,
    writer: Mutex<()>,
}

impl SharedRegistry {
    pub fn new(registry: Registry) -> Self {
        Self {
            current: RwLock::new(Arc::new(registry)),
            writer: Mutex::new(()),
        }
    }

    /// The registry as of the last completed scan.
    pub fn snapshot(&self) -> Arc<Registry> {
        Arc::clone(&self.current.read())
    }

    /// Replace the current registry wholesale.
    pub fn replace(&self, registry: Registry) -> Arc<Registry> {
        let _writer = self.writer.lock();
        let registry = Arc::new(registry);
        *self.current.write() = Arc::clone(&registry);
        registry
    }

    /// Scan again and swap the result in.
    ///
    /// On error the previous registry stays in place.
    pub fn rescan(&self, roots: &[ExtensionRoot], activation: &ActivationConfig) -> Result<Arc<Registry>> {
        let _writer = self.writer.lock();
        let registry = Arc::new(Registry::scan(roots, activation)?);
        *self.current.write() = Arc::clone(&registry);
        Ok(registry)
    }
}
