use std::path::PathBuf;

use activate_types::env_utils::env_string;

/// Environment variable overriding the base directory.
pub const HOME_ENV: &str = "BUNDLE_ACTIVATE_HOME";

#[derive(Debug, Clone)]
pub struct ActivatePaths {
    base: PathBuf,
}

impl ActivatePaths {
    pub fn from_base(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base_dir(&self) -> PathBuf {
        self.base.clone()
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.base.join("logs").join("activate")
    }

    /// Load-path root used when no explicit load path is given.
    pub fn modules_dir(&self) -> PathBuf {
        self.base.join("modules")
    }
}

pub fn default_paths() -> ActivatePaths {
    let base = env_string(HOME_ENV).map(PathBuf::from).unwrap_or_else(|| {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".bundle-activate")
    });
    ActivatePaths::from_base(base)
}
