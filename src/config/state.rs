// Application state module
// Holds the configuration and the resolved document root shared by every request

use std::path::{Path, PathBuf};

use super::types::Config;

/// Application state
pub struct AppState {
    pub config: Config,
    root: PathBuf,
}

impl AppState {
    /// Create `AppState`, resolving `server.root` against the working directory
    pub fn new(config: Config) -> std::io::Result<Self> {
        let root = std::env::current_dir()?.join(&config.server.root);
        Ok(Self::with_root(config, root))
    }

    /// Create `AppState` serving an explicit document root
    pub const fn with_root(config: Config, root: PathBuf) -> Self {
        Self { config, root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether access logging is enabled
    pub const fn access_log(&self) -> bool {
        self.config.logging.access_log
    }
}
