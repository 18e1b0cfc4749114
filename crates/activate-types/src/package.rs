//! Resolved package records.
//!
//! A [`Package`] is what the resolver hands over for every entry of a lock:
//! its unique name, the groups it was declared in, the platforms it is pinned
//! to, and an optional [`RequireOverride`] naming the entry modules to load.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::group::DEFAULT_GROUP;

/// Which entry modules a package asks to load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequireOverride {
    /// No override: entry modules are inferred from the package name.
    #[default]
    Inferred,
    /// Load exactly this path.
    Single(String),
    /// Load each of these paths, in order.
    List(Vec<String>),
    /// Never auto-load anything for this package.
    Disabled,
}

impl RequireOverride {
    /// Build an override from an explicit path list.
    ///
    /// An empty list has nothing to load and becomes [`RequireOverride::Disabled`].
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut paths: Vec<String> = paths.into_iter().map(Into::into).collect();
        match paths.len() {
            0 => RequireOverride::Disabled,
            1 => RequireOverride::Single(paths.remove(0)),
            _ => RequireOverride::List(paths),
        }
    }

    pub fn is_inferred(&self) -> bool {
        matches!(self, RequireOverride::Inferred)
    }

    /// Explicit paths, if this is an explicit override.
    pub fn explicit_paths(&self) -> Option<Vec<String>> {
        match self {
            RequireOverride::Single(path) => Some(vec![path.clone()]),
            RequireOverride::List(paths) => Some(paths.clone()),
            RequireOverride::Inferred | RequireOverride::Disabled => None,
        }
    }
}

// Lock snapshot shape: absent/null/true = inferred, false = disabled,
// string = single path, array = path list.
#[derive(Deserialize)]
#[serde(untagged)]
enum RequireRepr {
    Flag(bool),
    Single(String),
    List(Vec<String>),
}

impl Serialize for RequireOverride {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RequireOverride::Inferred => serializer.serialize_none(),
            RequireOverride::Disabled => serializer.serialize_bool(false),
            RequireOverride::Single(path) => serializer.serialize_str(path),
            RequireOverride::List(paths) => paths.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for RequireOverride {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<RequireRepr>::deserialize(deserializer)? {
            None | Some(RequireRepr::Flag(true)) => RequireOverride::Inferred,
            Some(RequireRepr::Flag(false)) => RequireOverride::Disabled,
            Some(RequireRepr::Single(path)) => RequireOverride::Single(path),
            Some(RequireRepr::List(paths)) => RequireOverride::from_paths(paths),
        })
    }
}

/// A resolved package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PackageRecord", into = "PackageRecord")]
pub struct Package {
    name: String,
    groups: BTreeSet<String>,
    platforms: BTreeSet<String>,
    require: RequireOverride,
}

impl Package {
    /// Create a package in the default group with an inferred require.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            groups: BTreeSet::from([DEFAULT_GROUP.to_string()]),
            platforms: BTreeSet::new(),
            require: RequireOverride::Inferred,
        }
    }

    /// Replace the package's groups. An empty set falls back to the default group.
    pub fn in_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = normalize_groups(groups.into_iter().map(Into::into).collect());
        self
    }

    /// Pin the package to the given platforms.
    pub fn on_platforms<I, S>(mut self, platforms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.platforms = platforms.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_require(mut self, require: RequireOverride) -> Self {
        self.require = require;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn groups(&self) -> &BTreeSet<String> {
        &self.groups
    }

    pub fn platforms(&self) -> &BTreeSet<String> {
        &self.platforms
    }

    pub fn require(&self) -> &RequireOverride {
        &self.require
    }

    /// True if the package is not pinned, or is pinned to `platform`.
    pub fn supports_platform(&self, platform: &str) -> bool {
        self.platforms.is_empty() || self.platforms.contains(platform)
    }
}

fn normalize_groups(groups: BTreeSet<String>) -> BTreeSet<String> {
    if groups.is_empty() {
        BTreeSet::from([DEFAULT_GROUP.to_string()])
    } else {
        groups
    }
}

#[derive(Serialize, Deserialize)]
struct PackageRecord {
    name: String,
    #[serde(default)]
    groups: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    platforms: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "RequireOverride::is_inferred")]
    require: RequireOverride,
}

impl From<PackageRecord> for Package {
    fn from(record: PackageRecord) -> Self {
        Self {
            name: record.name,
            groups: normalize_groups(record.groups),
            platforms: record.platforms,
            require: record.require,
        }
    }
}

impl From<Package> for PackageRecord {
    fn from(package: Package) -> Self {
        Self {
            name: package.name,
            groups: package.groups,
            platforms: package.platforms,
            require: package.require,
        }
    }
}
