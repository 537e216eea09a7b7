//! Well-known file and directory names.

use std::path::Path;

/// Names the extension manager looks for on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtPath {
    /// The `.git` directory inside a version-controlled extension
    GitDir,
    /// The per-extension declaration file
    MetadataFile,
    /// The manager configuration file in the working root
    ConfigFile,
    /// The persisted cache file
    CacheFile,
    /// Default root for builtin extensions
    BuiltinDir,
    /// Default root for user-installed extensions
    ExtensionsDir,
}

impl ExtPath {
    /// Get the string representation of the path.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GitDir => ".git",
            Self::MetadataFile => "metadata.ini",
            Self::ConfigFile => "extensions.toml",
            Self::CacheFile => "cache.json",
            Self::BuiltinDir => "extensions-builtin",
            Self::ExtensionsDir => "extensions",
        }
    }
}

impl AsRef<Path> for ExtPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for ExtPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ExtPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
