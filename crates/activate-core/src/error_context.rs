//! Failure context for activation diagnostics.
//!
//! Reports what the run had done when a package failed: which packages were
//! activated before it, which candidates it had, and which groups were
//! selected. Facts only; the loader's message is never rewritten.
//!
//! # Example
//!
//! ```
//! use activate_core::error_context::ActivationContext;
//!
//! let ctx = ActivationContext::new("two")
//!     .with_groups(["default"])
//!     .with_candidates(["fail"])
//!     .after_packages(["seven", "three"]);
//!
//! assert_eq!(ctx.activated_before.len(), 2);
//! assert!(ctx.to_string().contains("Package: two"));
//! ```

use std::fmt;

use crate::error::ActivationFailure;
use crate::orchestrator::ActivationPlan;

/// Context attached to an activation failure for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivationContext {
    /// The failing package
    pub package: String,

    /// Module path whose load failed
    pub failing_path: Option<String>,

    /// Candidate paths planned for the package
    pub candidates: Vec<String>,

    /// Packages activated before the failure, in order
    pub activated_before: Vec<String>,

    /// Selected groups
    pub groups: Vec<String>,

    pub notes: Vec<String>,
}

impl ActivationContext {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Self::default()
        }
    }

    /// Build context for `failure` from the plan that produced it.
    ///
    /// Returns one context per failing package (several in collect mode).
    pub fn for_failure(plan: &ActivationPlan<'_>, failure: &ActivationFailure) -> Vec<Self> {
        let failed: Vec<&str> = failure.failures().iter().filter_map(|f| f.package()).collect();

        failure
            .failures()
            .into_iter()
            .filter_map(|single| {
                let package = single.package()?;
                let position = plan
                    .selected
                    .iter()
                    .position(|p| p.package.name() == package)?;
                let planned = &plan.selected[position];

                let mut ctx = ActivationContext::new(package)
                    .with_candidates(planned.candidates.paths.iter().cloned())
                    .after_packages(
                        plan.selected[..position]
                            .iter()
                            .map(|p| p.package.name())
                            .filter(|name| !failed.contains(name)),
                    );
                ctx.failing_path = single.path().map(str::to_string);
                if planned.candidates.paths.len() > 1 {
                    ctx = ctx.with_note(format!(
                        "{} candidate paths were planned",
                        planned.candidates.paths.len()
                    ));
                }
                Some(ctx)
            })
            .collect()
    }

    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = groups.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_candidates<I, S>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.candidates = candidates.into_iter().map(Into::into).collect();
        self
    }

    pub fn after_packages<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.activated_before = packages.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl fmt::Display for ActivationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Activation context:")?;
        writeln!(f, "  Package: {}", self.package)?;

        if let Some(ref path) = self.failing_path {
            writeln!(f, "  Failing path: {}", path)?;
        }

        if !self.groups.is_empty() {
            writeln!(f, "  Groups: {}", self.groups.join(", "))?;
        }

        if !self.candidates.is_empty() {
            writeln!(f, "  Candidates: {}", self.candidates.join(", "))?;
        }

        if !self.activated_before.is_empty() {
            writeln!(f, "  Activated before:")?;
            for pkg in &self.activated_before {
                writeln!(f, "    - {}", pkg)?;
            }
        }

        for note in &self.notes {
            writeln!(f, "  Note: {}", note)?;
        }

        Ok(())
    }
}
