use std::path::PathBuf;

/// Errors that can occur in the extension manager.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed declaration file.
    #[error("line {line}: {reason}")]
    Ini { line: usize, reason: String },

    /// Failed to read a declaration file or list an extension root.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Filesystem layer error.
    #[error(transparent)]
    Fs(#[from] ext_fs::Error),

    /// Version-control error.
    #[error(transparent)]
    Git(#[from] ext_git::Error),

    /// Extension not found in registry.
    #[error("unknown extension: {0}")]
    UnknownExtension(String),

    /// Builtin extensions ship with the host and are never synchronized.
    #[error("extension '{0}' is builtin and not version-controlled")]
    BuiltinNotVersioned(String),

    /// The extension directory has no `.git` to synchronize.
    #[error("extension '{name}' at {path} is not a git working copy")]
    NotARepository { name: String, path: PathBuf },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn ini(line: usize, reason: impl Into<String>) -> Self {
        Self::Ini {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
