//! Activation settings gathered from the environment.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `BUNDLE_ACTIVATE_HOME` | base directory for logs and modules | `~/.bundle-activate` |
//! | `BUNDLE_ACTIVATE_GROUPS` | comma-separated groups to activate | default group only |
//! | `BUNDLE_ACTIVATE_PLATFORM` | platform packages are matched against | host OS |
//! | `BUNDLE_ACTIVATE_LOG` | write the JSONL run log | on |
//! | `BUNDLE_ACTIVATE_EXTENSIONS` | comma-separated module file extensions | `module.json` |

use std::path::PathBuf;

use activate_types::env_utils::{env_bool_or, env_list, env_string};
use activate_types::GroupSelection;

use crate::loader::{SearchPathSource, DEFAULT_MODULE_EXTENSION};
use crate::logging::LogConfig;
use crate::orchestrator::current_platform;
use crate::paths::{default_paths, ActivatePaths};

pub const GROUPS_ENV: &str = "BUNDLE_ACTIVATE_GROUPS";
pub const PLATFORM_ENV: &str = "BUNDLE_ACTIVATE_PLATFORM";
pub const LOG_ENV: &str = "BUNDLE_ACTIVATE_LOG";
pub const EXTENSIONS_ENV: &str = "BUNDLE_ACTIVATE_EXTENSIONS";

#[derive(Debug, Clone)]
pub struct ActivateConfig {
    pub paths: ActivatePaths,
    pub groups: Vec<String>,
    pub platform: String,
    pub log_enabled: bool,
    pub extensions: Vec<String>,
}

impl Default for ActivateConfig {
    fn default() -> Self {
        Self {
            paths: default_paths(),
            groups: Vec::new(),
            platform: current_platform(),
            log_enabled: true,
            extensions: vec![DEFAULT_MODULE_EXTENSION.to_string()],
        }
    }
}

impl ActivateConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let extensions = env_list(EXTENSIONS_ENV);
        Self {
            paths: defaults.paths,
            groups: env_list(GROUPS_ENV),
            platform: env_string(PLATFORM_ENV).unwrap_or(defaults.platform),
            log_enabled: env_bool_or(LOG_ENV, defaults.log_enabled),
            extensions: if extensions.is_empty() {
                defaults.extensions
            } else {
                extensions
            },
        }
    }

    pub fn group_selection(&self) -> GroupSelection {
        GroupSelection::from_request(self.groups.iter().cloned())
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            enabled: self.log_enabled,
            path: self.paths.logs_dir(),
            rotation_mb: 50,
        }
    }

    /// Module source over `load_paths`, or the home modules directory when empty.
    pub fn search_path(&self, load_paths: Vec<PathBuf>) -> SearchPathSource {
        let roots = if load_paths.is_empty() {
            vec![self.paths.modules_dir()]
        } else {
            load_paths
        };
        SearchPathSource::new(roots).with_extensions(self.extensions.clone())
    }
}
