//! Group identifiers and the per-run group selection.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The distinguished group every undeclared package belongs to.
pub const DEFAULT_GROUP: &str = "default";

/// Set of case-sensitive group identifiers requested for one activation run.
///
/// Built with [`GroupSelection::from_request`]: an empty request means
/// default-only, while naming explicit groups selects exactly those groups.
/// The default group is only part of an explicit request when the caller
/// names it (or calls [`GroupSelection::with_default`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupSelection {
    groups: BTreeSet<String>,
}

impl GroupSelection {
    /// Selection containing only the default group.
    pub fn default_only() -> Self {
        Self {
            groups: BTreeSet::from([DEFAULT_GROUP.to_string()]),
        }
    }

    /// Build a selection from caller-supplied group names.
    pub fn from_request<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let groups: BTreeSet<String> = groups.into_iter().map(Into::into).collect();
        if groups.is_empty() {
            return Self::default_only();
        }
        Self { groups }
    }

    /// Add the default group to this selection.
    pub fn with_default(mut self) -> Self {
        self.groups.insert(DEFAULT_GROUP.to_string());
        self
    }

    pub fn contains(&self, group: &str) -> bool {
        self.groups.contains(group)
    }

    /// True if any of `groups` is selected.
    pub fn intersects(&self, groups: &BTreeSet<String>) -> bool {
        groups.iter().any(|g| self.groups.contains(g))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Default for GroupSelection {
    fn default() -> Self {
        Self::default_only()
    }
}

impl fmt::Display for GroupSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().collect();
        write!(f, "{}", names.join(", "))
    }
}
