//! Per-package activation.
//!
//! Drives the candidate plan for one package against a [`ModuleLoader`]:
//!
//! - inferred candidates are alternatives: the first that loads wins, a miss
//!   moves on to the next, and missing every one is a silent no-op;
//! - explicit paths must all load, in order; any failure is terminal;
//! - a failure inside a candidate stops the package immediately.

use serde::Serialize;
use tracing::{debug, trace, warn};

use activate_types::Package;

use crate::candidates::{self, CandidatePlan, CandidateSource};
use crate::classifier::{classify, LoadOutcome};
use crate::error::ActivationFailure;
use crate::loader::ModuleLoader;

/// Result of activating one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PackageOutcome {
    /// These module paths were loaded.
    Loaded { paths: Vec<String> },
    /// No inferred candidate exists; nothing was loaded.
    NoDefaultModule { tried: Vec<String> },
    /// The package opts out of auto-loading.
    Disabled,
}

impl PackageOutcome {
    pub fn loaded_paths(&self) -> &[String] {
        match self {
            PackageOutcome::Loaded { paths } => paths,
            _ => &[],
        }
    }
}

/// Activates single packages.
#[derive(Debug, Default, Clone, Copy)]
pub struct PackageActivator;

impl PackageActivator {
    /// Activate `package` through `loader`.
    pub fn activate(
        package: &Package,
        loader: &mut dyn ModuleLoader,
    ) -> Result<PackageOutcome, ActivationFailure> {
        let plan = candidates::generate(package);
        Self::activate_plan(package.name(), &plan, loader)
    }

    /// Activate an already generated plan on behalf of `package`.
    pub fn activate_plan(
        package: &str,
        plan: &CandidatePlan,
        loader: &mut dyn ModuleLoader,
    ) -> Result<PackageOutcome, ActivationFailure> {
        match plan.source {
            CandidateSource::Disabled => {
                debug!(package, "auto-require disabled");
                Ok(PackageOutcome::Disabled)
            }
            CandidateSource::Explicit => load_all(package, &plan.paths, loader),
            CandidateSource::Inferred => load_first(package, &plan.paths, loader),
        }
    }
}

fn load_all(
    package: &str,
    paths: &[String],
    loader: &mut dyn ModuleLoader,
) -> Result<PackageOutcome, ActivationFailure> {
    for path in paths {
        trace!(package, path = path.as_str(), "loading explicit module");
        if let Err(failure) = loader.load(path) {
            let message = failure.message().to_string();
            warn!(package, path = path.as_str(), %message, "explicit require failed");
            return Err(match classify(path, &message) {
                LoadOutcome::SelfMiss => ActivationFailure::MissingExplicitModule {
                    package: package.to_string(),
                    path: path.clone(),
                    message,
                },
                LoadOutcome::NestedFailure => ActivationFailure::NestedLoadFailure {
                    package: package.to_string(),
                    candidate: path.clone(),
                    message,
                },
            });
        }
    }

    Ok(PackageOutcome::Loaded {
        paths: paths.to_vec(),
    })
}

fn load_first(
    package: &str,
    candidates: &[String],
    loader: &mut dyn ModuleLoader,
) -> Result<PackageOutcome, ActivationFailure> {
    for candidate in candidates {
        trace!(package, candidate = candidate.as_str(), "trying inferred module");
        let failure = match loader.load(candidate) {
            Ok(()) => {
                return Ok(PackageOutcome::Loaded {
                    paths: vec![candidate.clone()],
                })
            }
            Err(failure) => failure,
        };

        match classify(candidate, failure.message()) {
            LoadOutcome::SelfMiss => {
                trace!(package, candidate = candidate.as_str(), "candidate not found");
            }
            LoadOutcome::NestedFailure => {
                warn!(
                    package,
                    candidate = candidate.as_str(),
                    message = failure.message(),
                    "module failed while loading"
                );
                return Err(ActivationFailure::NestedLoadFailure {
                    package: package.to_string(),
                    candidate: candidate.clone(),
                    message: failure.message().to_string(),
                });
            }
        }
    }

    debug!(package, "no default module found");
    Ok(PackageOutcome::NoDefaultModule {
        tried: candidates.to_vec(),
    })
}
