//! Candidate generation: which module paths to try for a package.
//!
//! Explicit overrides are used verbatim. Without one, candidates are inferred
//! from the package name: the bare name first, then each hyphen read as a
//! path separator, left to right, so `x-y-z` yields `x-y-z`, `x/y-z`, `x/y/z`.

use activate_types::{Package, RequireOverride};
use serde::Serialize;

/// Where a candidate list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    /// Derived from the package name; candidates are alternatives.
    Inferred,
    /// Given by the package's require override; every path must load.
    Explicit,
    /// Auto-loading is disabled; nothing to try.
    Disabled,
}

/// Ordered module paths to attempt for one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidatePlan {
    pub source: CandidateSource,
    pub paths: Vec<String>,
}

impl CandidatePlan {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Build the candidate plan for `package`.
pub fn generate(package: &Package) -> CandidatePlan {
    match package.require() {
        RequireOverride::Disabled => CandidatePlan {
            source: CandidateSource::Disabled,
            paths: Vec::new(),
        },
        RequireOverride::Single(path) => CandidatePlan {
            source: CandidateSource::Explicit,
            paths: vec![path.clone()],
        },
        RequireOverride::List(paths) => CandidatePlan {
            source: CandidateSource::Explicit,
            paths: paths.clone(),
        },
        RequireOverride::Inferred => CandidatePlan {
            source: CandidateSource::Inferred,
            paths: infer_from_name(package.name()),
        },
    }
}

/// Name-derived candidates, bare name first and most-split last.
pub fn infer_from_name(name: &str) -> Vec<String> {
    let mut candidates = vec![name.to_string()];
    let mut current = name.to_string();

    for (idx, _) in name.match_indices('-') {
        // '-' and '/' are both one byte, so indices line up with `name`.
        current.replace_range(idx..idx + 1, "/");
        if !candidates.contains(&current) {
            candidates.push(current.clone());
        }
    }

    candidates
}
