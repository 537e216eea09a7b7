//! [`ExtensionTree`] builder for scan scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary working root with a builtin and a user extension root.
///
/// # Example
///
/// ```rust
/// use ext_test_utils::tree::ExtensionTree;
///
/// let tree = ExtensionTree::new();
/// let foo = tree.add_user("foo");
/// tree.write_metadata(&foo, "[Extension]\nRequires = bar\n");
/// assert!(foo.join("metadata.ini").is_file());
/// ```
pub struct ExtensionTree {
    temp_dir: TempDir,
}

impl Default for ExtensionTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtensionTree {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// The working root holding both extension roots.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn builtin_root(&self) -> PathBuf {
        self.root().join("extensions-builtin")
    }

    pub fn user_root(&self) -> PathBuf {
        self.root().join("extensions")
    }

    /// Create `name` under the builtin root and return its path.
    pub fn add_builtin(&self, name: &str) -> PathBuf {
        Self::make_dir(self.builtin_root().join(name))
    }

    /// Create `name` under the user root and return its path.
    pub fn add_user(&self, name: &str) -> PathBuf {
        Self::make_dir(self.user_root().join(name))
    }

    /// Write `metadata.ini` into an extension directory.
    pub fn write_metadata(&self, extension_dir: &Path, content: &str) {
        fs::write(extension_dir.join("metadata.ini"), content).unwrap();
    }

    /// Write a file relative to the working root.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn make_dir(path: PathBuf) -> PathBuf {
        fs::create_dir_all(&path)
            .unwrap_or_else(|e| panic!("failed to create {}: {e}", path.display()));
        path
    }
}
