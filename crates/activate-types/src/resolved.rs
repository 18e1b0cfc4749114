//! The resolver's ordered package list.
//!
//! Order is produced externally (dependencies before dependents, otherwise
//! first-declaration order) and is never changed here.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::package::Package;

/// Errors building a [`ResolvedSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedSetError {
    /// Two entries share a package name.
    DuplicatePackage {
        name: String,
        /// Position of the second occurrence.
        index: usize,
    },
    /// An entry has an empty name.
    EmptyName { index: usize },
}

impl fmt::Display for ResolvedSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedSetError::DuplicatePackage { name, index } => {
                write!(f, "duplicate package '{}' at position {}", name, index)
            }
            ResolvedSetError::EmptyName { index } => {
                write!(f, "package at position {} has an empty name", index)
            }
        }
    }
}

impl std::error::Error for ResolvedSetError {}

/// Ordered, name-unique sequence of resolved packages.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "ResolvedSetRecord", into = "ResolvedSetRecord")]
pub struct ResolvedSet {
    packages: Vec<Package>,
}

impl ResolvedSet {
    pub fn new(packages: Vec<Package>) -> Result<Self, ResolvedSetError> {
        let mut seen = HashSet::new();
        for (index, package) in packages.iter().enumerate() {
            if package.name().is_empty() {
                return Err(ResolvedSetError::EmptyName { index });
            }
            if !seen.insert(package.name()) {
                return Err(ResolvedSetError::DuplicatePackage {
                    name: package.name().to_string(),
                    index,
                });
            }
        }
        Ok(Self { packages })
    }

    /// Packages in resolver order.
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Package> {
        self.packages.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.name() == name)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl<'a> IntoIterator for &'a ResolvedSet {
    type Item = &'a Package;
    type IntoIter = std::slice::Iter<'a, Package>;

    fn into_iter(self) -> Self::IntoIter {
        self.packages.iter()
    }
}

#[derive(Serialize, Deserialize)]
struct ResolvedSetRecord {
    #[serde(default)]
    packages: Vec<Package>,
}

impl TryFrom<ResolvedSetRecord> for ResolvedSet {
    type Error = ResolvedSetError;

    fn try_from(record: ResolvedSetRecord) -> Result<Self, Self::Error> {
        ResolvedSet::new(record.packages)
    }
}

impl From<ResolvedSet> for ResolvedSetRecord {
    fn from(set: ResolvedSet) -> Self {
        Self {
            packages: set.packages,
        }
    }
}
