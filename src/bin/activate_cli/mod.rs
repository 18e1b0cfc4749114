//! CLI subcommand implementations for bundle-activate

pub mod output;
pub mod plan;
pub mod require;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use activate_core::{ActivateConfig, RequireOrchestrator};
use activate_types::{GroupSelection, ResolvedSet};

/// Arguments shared by every subcommand that reads a resolved set.
#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Resolved package set (JSON: {"packages": [...]})
    #[arg(long, value_name = "PATH")]
    pub resolved: PathBuf,

    /// Group to activate. Repeatable. Defaults to BUNDLE_ACTIVATE_GROUPS, then "default".
    #[arg(long = "group", short = 'g', value_name = "GROUP")]
    pub groups: Vec<String>,

    /// Platform to match pinned packages against (default: host OS)
    #[arg(long)]
    pub platform: Option<String>,
}

impl SelectionArgs {
    pub fn group_selection(&self, config: &ActivateConfig) -> GroupSelection {
        if self.groups.is_empty() {
            config.group_selection()
        } else {
            GroupSelection::from_request(self.groups.iter().cloned())
        }
    }

    pub fn orchestrator(&self, config: &ActivateConfig) -> RequireOrchestrator {
        let platform = self
            .platform
            .clone()
            .unwrap_or_else(|| config.platform.clone());
        RequireOrchestrator::new().with_platform(platform)
    }

    pub fn load_resolved_set(&self) -> Result<ResolvedSet> {
        read_resolved_set(&self.resolved)
    }
}

pub fn read_resolved_set(path: &Path) -> Result<ResolvedSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading resolved set {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("parsing resolved set {}", path.display()))
}
