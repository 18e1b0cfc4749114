//! bundle-activate
//!
//! Activates a resolved package set into a running module runtime:
//!
//! - **Group selection**: only packages in the requested groups are loaded
//! - **Entry-module inference**: package names map to module paths, with
//!   namespaced fallbacks for hyphenated names
//! - **Explicit overrides**: packages may name their entry modules or opt out
//! - **Ordered, fail-fast loading**: resolver order is preserved and the first
//!   genuine load failure stops the run
//!
//! The work is done by [`activate_core`]; the data model lives in
//! [`activate_types`]. This crate re-exports both and ships the
//! `bundle-activate` CLI.

pub use activate_core::*;
pub use activate_types;
pub use activate_types::{GroupSelection, Package, RequireOverride, ResolvedSet, DEFAULT_GROUP};
