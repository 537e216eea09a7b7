//! Manager configuration from `extensions.toml`.

use std::path::{Path, PathBuf};

use ext_fs::checksum::compute_content_checksum;
use ext_fs::{ConfigStore, ExtPath, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::policy::{ActivationConfig, DisablePolicy, HardOverride};
use crate::registry::ExtensionRoot;

const ROOT_DIGEST_LEN: usize = 16;

/// Settings read from the working root.
///
/// Relative directories resolve against the working root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    pub builtin_dir: PathBuf,
    pub extensions_dir: PathBuf,
    /// Directory names of individually disabled extensions.
    pub disabled_extensions: Vec<String>,
    /// Soft override, changeable between runs.
    pub disable_all_extensions: DisablePolicy,
    /// Where repository info is cached. See [`ManagerConfig::cache_path`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_file: Option<PathBuf>,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            builtin_dir: PathBuf::from(ExtPath::BuiltinDir.as_str()),
            extensions_dir: PathBuf::from(ExtPath::ExtensionsDir.as_str()),
            disabled_extensions: Vec::new(),
            disable_all_extensions: DisablePolicy::None,
            cache_file: None,
        }
    }
}

impl ManagerConfig {
    /// Load `extensions.toml` from `root`, or defaults when it does not exist.
    pub fn load(root: &Path) -> Result<Self> {
        let path = NormalizedPath::new(root.join(ExtPath::ConfigFile.as_str()));
        Ok(ConfigStore::new().load_or_default(&path)?)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = NormalizedPath::new(root.join(ExtPath::ConfigFile.as_str()));
        Ok(ConfigStore::new().save(&path, self)?)
    }

    /// Builtin root first, then the user root.
    pub fn roots(&self, root: &Path) -> Vec<ExtensionRoot> {
        vec![
            ExtensionRoot::builtin(root.join(&self.builtin_dir)),
            ExtensionRoot::user(root.join(&self.extensions_dir)),
        ]
    }

    pub fn user_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.extensions_dir)
    }

    pub fn activation(&self, hard: HardOverride) -> ActivationConfig {
        ActivationConfig {
            disabled: self.disabled_extensions.iter().cloned().collect(),
            hard,
            soft: self.disable_all_extensions,
        }
    }

    /// Cache file location.
    ///
    /// The configured file (relative to `root`), else a file under
    /// `<cache_dir>/extension-manager/` named after a digest of `root`, else
    /// `<root>/cache.json`. Entries are keyed by directory name, so each
    /// working root gets its own file.
    pub fn cache_path(&self, root: &Path, cache_dir: Option<&Path>) -> PathBuf {
        if let Some(file) = &self.cache_file {
            return root.join(file);
        }
        match cache_dir {
            Some(dir) => dir
                .join("extension-manager")
                .join(format!("{}.json", root_digest(root))),
            None => root.join(ExtPath::CacheFile.as_str()),
        }
    }
}

/// Short hex digest identifying a working root.
fn root_digest(root: &Path) -> String {
    let root = NormalizedPath::new(root);
    let checksum = compute_content_checksum(root.as_str().trim_end_matches('/'));
    let hex = checksum.rsplit(':').next().unwrap_or(&checksum);
    hex.chars().take(ROOT_DIGEST_LEN).collect()
}
