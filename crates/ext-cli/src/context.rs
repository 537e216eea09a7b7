//! Everything a command needs, built once per invocation.

use std::path::Path;
use std::sync::Arc;

use ext_fs::FileCache;
use ext_git::{GitOpener, RepoOpener};
use ext_manager::{
    ActivationConfig, Extension, GitInfoCache, HardOverride, ManagerConfig, Registry,
    UpdateChecker, validate,
};

use crate::error::Result;

pub struct Context {
    pub activation: ActivationConfig,
    pub registry: Registry,
    pub info: GitInfoCache,
    pub updates: UpdateChecker,
}

impl Context {
    /// Load configuration from `root`, make sure the user extension root
    /// exists, and scan both roots.
    ///
    /// Unmet requirements are logged here; `extmgr check` prints them.
    pub fn load(root: &Path, hard: HardOverride) -> Result<Self> {
        let config = ManagerConfig::load(root)?;

        let user_dir = config.user_dir(root);
        std::fs::create_dir_all(&user_dir)?;
        let root = root.canonicalize()?;
        let root = root.as_path();

        let cache_path = config.cache_path(root, dirs::cache_dir().as_deref());
        tracing::debug!(cache = %cache_path.display(), "Opening repository info cache");
        let cache = Arc::new(FileCache::open(cache_path));
        let opener: Arc<dyn RepoOpener> = Arc::new(GitOpener);

        let activation = config.activation(hard);
        let registry = Registry::scan(&config.roots(root), &activation)?;
        validate(&registry);

        Ok(Self {
            info: GitInfoCache::new(cache, Arc::clone(&opener)),
            updates: UpdateChecker::new(opener),
            activation,
            registry,
        })
    }

    /// Extensions active under the configured overrides.
    pub fn active(&self) -> Vec<Arc<Extension>> {
        self.registry.active_for(&self.activation)
    }

    /// Look up an extension by canonical or directory name.
    pub fn find(&self, name: &str) -> Result<&Arc<Extension>> {
        Ok(self.registry.find(name)?)
    }
}
