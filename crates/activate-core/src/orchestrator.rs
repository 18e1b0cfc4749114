//! Require orchestration across a resolved set.
//!
//! Filters the resolver's package list by group (and platform), then activates
//! the remaining packages strictly in resolver order. Filtering is a predicate
//! only: packages are never re-sorted or batched by group, so a package can
//! rely on its dependencies having been loaded first.
//!
//! Callers holding a plain group list and a "default included" flag use
//! [`activate_groups`]. Naming no groups selects the default group only;
//! naming groups selects exactly those, plus `default` when the flag is set.

use serde::Serialize;
use tracing::{debug, info};

use activate_types::{GroupSelection, Package, ResolvedSet};

use crate::activator::{PackageActivator, PackageOutcome};
use crate::candidates::{self, CandidatePlan};
use crate::error::ActivationFailure;
use crate::loader::ModuleLoader;

/// What to do once a package fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Stop at the first failing package.
    #[default]
    FailFast,
    /// Keep going and report every failing package.
    Collect,
}

/// Why a package was left out of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    GroupMismatch,
    PlatformMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPackage {
    pub name: String,
    pub reason: SkipReason,
}

/// A selected package and the candidates that will be tried for it.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedPackage<'a> {
    pub package: &'a Package,
    pub candidates: CandidatePlan,
}

/// The filtered, ordered work list for one run.
#[derive(Debug, Clone, Serialize)]
pub struct ActivationPlan<'a> {
    pub selected: Vec<PlannedPackage<'a>>,
    pub skipped: Vec<SkippedPackage>,
}

impl ActivationPlan<'_> {
    /// Selected package names, in activation order.
    pub fn package_names(&self) -> Vec<&str> {
        self.selected.iter().map(|p| p.package.name()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivatedPackage {
    pub name: String,
    pub outcome: PackageOutcome,
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivationReport {
    pub groups: Vec<String>,
    pub platform: String,
    /// Activated packages, in activation order.
    pub activated: Vec<ActivatedPackage>,
    pub skipped: Vec<SkippedPackage>,
}

impl ActivationReport {
    /// Every module path loaded during the run, in order.
    pub fn loaded_paths(&self) -> Vec<&str> {
        self.activated
            .iter()
            .flat_map(|p| p.outcome.loaded_paths())
            .map(String::as_str)
            .collect()
    }

    pub fn outcome(&self, package: &str) -> Option<&PackageOutcome> {
        self.activated
            .iter()
            .find(|p| p.name == package)
            .map(|p| &p.outcome)
    }
}

/// The platform packages are matched against by default.
pub fn current_platform() -> String {
    std::env::consts::OS.to_string()
}

/// Filters a resolved set and activates it in order.
///
/// Holds no load state: the "already loaded" registry belongs to the
/// [`ModuleLoader`], so one orchestrator can be run repeatedly with different
/// group selections against the same loader.
#[derive(Debug, Clone)]
pub struct RequireOrchestrator {
    platform: String,
    failure_mode: FailureMode,
}

impl Default for RequireOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl RequireOrchestrator {
    pub fn new() -> Self {
        Self {
            platform: current_platform(),
            failure_mode: FailureMode::FailFast,
        }
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    pub fn with_failure_mode(mut self, mode: FailureMode) -> Self {
        self.failure_mode = mode;
        self
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn failure_mode(&self) -> FailureMode {
        self.failure_mode
    }

    /// Filter `set` by `groups` and platform without loading anything.
    pub fn plan<'a>(&self, set: &'a ResolvedSet, groups: &GroupSelection) -> ActivationPlan<'a> {
        let mut selected = Vec::new();
        let mut skipped = Vec::new();

        for package in set {
            let reason = if !groups.intersects(package.groups()) {
                Some(SkipReason::GroupMismatch)
            } else if !package.supports_platform(&self.platform) {
                Some(SkipReason::PlatformMismatch)
            } else {
                None
            };

            match reason {
                Some(reason) => {
                    debug!(package = package.name(), ?reason, "skipping package");
                    skipped.push(SkippedPackage {
                        name: package.name().to_string(),
                        reason,
                    });
                }
                None => selected.push(PlannedPackage {
                    package,
                    candidates: candidates::generate(package),
                }),
            }
        }

        ActivationPlan { selected, skipped }
    }

    /// Activate every selected package, in resolver order.
    pub fn activate(
        &self,
        set: &ResolvedSet,
        groups: &GroupSelection,
        loader: &mut dyn ModuleLoader,
    ) -> Result<ActivationReport, ActivationFailure> {
        let plan = self.plan(set, groups);
        info!(
            groups = %groups,
            selected = plan.selected.len(),
            skipped = plan.skipped.len(),
            "activating packages"
        );

        let mut activated = Vec::with_capacity(plan.selected.len());
        let mut failures = Vec::new();

        for planned in &plan.selected {
            let name = planned.package.name();
            match PackageActivator::activate_plan(name, &planned.candidates, loader) {
                Ok(outcome) => {
                    debug!(package = name, ?outcome, "package activated");
                    activated.push(ActivatedPackage {
                        name: name.to_string(),
                        outcome,
                    });
                }
                Err(failure) => match self.failure_mode {
                    FailureMode::FailFast => return Err(failure),
                    FailureMode::Collect => failures.push(failure),
                },
            }
        }

        if !failures.is_empty() {
            return Err(ActivationFailure::Multiple { failures });
        }

        Ok(ActivationReport {
            groups: groups.iter().map(str::to_string).collect(),
            platform: self.platform.clone(),
            activated,
            skipped: plan.skipped,
        })
    }
}

/// Activate `set` for `groups` with default settings (current platform, fail-fast).
pub fn activate(
    set: &ResolvedSet,
    groups: &GroupSelection,
    loader: &mut dyn ModuleLoader,
) -> Result<ActivationReport, ActivationFailure> {
    RequireOrchestrator::new().activate(set, groups, loader)
}

/// Activate `set` for the named `groups`, adding the default group when
/// `default_included` is set.
pub fn activate_groups<I, S>(
    set: &ResolvedSet,
    groups: I,
    default_included: bool,
    loader: &mut dyn ModuleLoader,
) -> Result<ActivationReport, ActivationFailure>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut selection = GroupSelection::from_request(groups);
    if default_included {
        selection = selection.with_default();
    }
    activate(set, &selection, loader)
}
