//! Activation core for resolved package sets.
//!
//! Given the resolver's ordered package list and a group selection, loads each
//! selected package's entry modules in resolver order.
//!
//! This crate provides:
//! - [`candidates`]: which module paths to try for a package
//! - [`classifier`]: whether a load failure is a miss of the attempted path
//! - [`activator`]: per-package activation against a [`ModuleLoader`](loader::ModuleLoader)
//! - [`orchestrator`]: group/platform filtering and ordered, fail-fast activation
//! - [`loader`]: the loader trait and a load-once module runtime
//!
//! # Example
//!
//! ```
//! use activate_core::loader::{MemorySource, ModuleRuntime, ModuleScript};
//! use activate_core::RequireOrchestrator;
//! use activate_types::{GroupSelection, Package, RequireOverride, ResolvedSet};
//!
//! let set = ResolvedSet::new(vec![
//!     Package::new("one").in_groups(["bar"]).with_require(RequireOverride::from_paths(["baz", "qux"])),
//!     Package::new("two"),
//! ]).unwrap();
//!
//! let source = MemorySource::new()
//!     .with_module("baz", ModuleScript::new().prints("baz"))
//!     .with_module("qux", ModuleScript::new().prints("qux"))
//!     .with_module("two", ModuleScript::new().prints("two"));
//! let mut runtime = ModuleRuntime::new(source);
//!
//! let groups = GroupSelection::from_request(["default", "bar"]);
//! RequireOrchestrator::new().activate(&set, &groups, &mut runtime).unwrap();
//! assert_eq!(runtime.transcript(), &["baz", "qux", "two"]);
//! ```

pub mod activator;
pub mod candidates;
pub mod classifier;
pub mod config;
pub mod error;
pub mod error_context;
pub mod loader;
pub mod logging;
pub mod orchestrator;
pub mod paths;

pub use activator::{PackageActivator, PackageOutcome};
pub use candidates::{CandidatePlan, CandidateSource};
pub use classifier::{classify, LoadOutcome};
pub use config::ActivateConfig;
pub use error::{ActivationFailure, LoadFailure};
pub use error_context::ActivationContext;
pub use loader::{MemorySource, ModuleLoader, ModuleRuntime, ModuleScript, SearchPathSource};
pub use logging::{read_runs, ActivationLogger, LogConfig, RunRecord};
pub use orchestrator::{
    activate, activate_groups, ActivationPlan, ActivationReport, FailureMode, RequireOrchestrator,
    SkipReason,
};
