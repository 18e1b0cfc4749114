//! Shared types for the bundle-activate workspace.
//!
//! This crate holds the data model handed to the require orchestrator by the
//! (external) resolver and lock parser:
//!
//! - [`Package`](package::Package) - a resolved package with its groups, platforms and require override
//! - [`RequireOverride`](package::RequireOverride) - which entry modules a package asks to load
//! - [`GroupSelection`](group::GroupSelection) - the groups requested for one activation run
//! - [`ResolvedSet`](resolved::ResolvedSet) - the resolver's ordered package list
//!
//! ## JSON lock snapshot
//!
//! ```
//! use activate_types::{RequireOverride, ResolvedSet};
//!
//! let set: ResolvedSet = serde_json::from_str(r#"{
//!     "packages": [
//!         { "name": "two" },
//!         { "name": "one", "groups": ["bar"], "require": ["baz", "qux"] },
//!         { "name": "four", "require": false }
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(set.len(), 3);
//! assert_eq!(set.get("four").unwrap().require(), &RequireOverride::Disabled);
//! ```

pub mod env_utils;
pub mod group;
pub mod package;
pub mod resolved;

pub use group::{GroupSelection, DEFAULT_GROUP};
pub use package::{Package, RequireOverride};
pub use resolved::{ResolvedSet, ResolvedSetError};
