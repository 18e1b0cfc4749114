//! # Module Loading
//!
//! The orchestrator only needs one primitive: load a module by path, once.
//! That primitive is the [`ModuleLoader`] trait. This module also provides a
//! concrete load-once runtime for module scripts.
//!
//! ## Key Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ModuleLoader`] | Trait the orchestrator drives |
//! | [`ModuleSource`] | Trait for finding a module script by path |
//! | [`ModuleRuntime`] | Load-once evaluator over a [`ModuleSource`] |
//! | [`MemorySource`] | In-memory path -> script map |
//! | [`SearchPathSource`] | Load-path directories of JSON module files |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │    ModuleLoader     │  ◄── Trait interface
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │   ModuleRuntime     │  ◄── loaded registry, symbols, transcript
//! └──────────┬──────────┘
//!            │ find(path)
//!            ▼
//! ┌─────────────────────┐
//! │ MemorySource /      │
//! │ SearchPathSource    │
//! └─────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```
//! use activate_core::loader::{MemorySource, ModuleLoader, ModuleRuntime, ModuleScript};
//!
//! let source = MemorySource::new()
//!     .with_module("two", ModuleScript::new().defines("Two").prints("two"))
//!     .with_module("one", ModuleScript::new().expects("Two").prints("one"));
//! let mut runtime = ModuleRuntime::new(source);
//!
//! runtime.load("two").unwrap();
//! runtime.load("one").unwrap();
//! assert_eq!(runtime.transcript(), &["two", "one"]);
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::LoadFailure;

mod memory;
mod search_path;

pub use memory::MemorySource;
pub use search_path::{SearchPathSource, DEFAULT_MODULE_EXTENSION};

// =============================================================================
// Traits
// =============================================================================

/// The module-loading primitive.
///
/// Implementations load `path` at most once per lifetime: a second load of a
/// path that already succeeded is a no-op success. Failures carry only a
/// human-readable message.
pub trait ModuleLoader {
    fn load(&mut self, path: &str) -> Result<(), LoadFailure>;
}

/// Finds module scripts by path.
pub trait ModuleSource {
    /// Look up `path`.
    ///
    /// `Ok(None)` means no module exists at that path. `Err` means a module
    /// exists but could not be read.
    fn find(&self, path: &str) -> Result<Option<ModuleScript>, LoadFailure>;
}

// =============================================================================
// Module scripts
// =============================================================================

/// One line of output, optionally conditional on a symbol being defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrintLine {
    Text(String),
    WhenDefined {
        when_defined: String,
        then: String,
        #[serde(default)]
        otherwise: Option<String>,
    },
}

/// Declarative body of a module.
///
/// Evaluated in a fixed order: `requires`, `raises`, `expects`, `prints`,
/// `defines`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleScript {
    /// Other module paths loaded before this module's own body.
    #[serde(default)]
    pub requires: Vec<String>,
    /// Fail the load with this message.
    #[serde(default)]
    pub raises: Option<String>,
    /// Symbols that must already be defined.
    #[serde(default)]
    pub expects: Vec<String>,
    #[serde(default)]
    pub prints: Vec<PrintLine>,
    /// Symbols this module defines once loaded.
    #[serde(default)]
    pub defines: Vec<String>,
}

impl ModuleScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requires(mut self, path: impl Into<String>) -> Self {
        self.requires.push(path.into());
        self
    }

    pub fn raises(mut self, message: impl Into<String>) -> Self {
        self.raises = Some(message.into());
        self
    }

    pub fn expects(mut self, symbol: impl Into<String>) -> Self {
        self.expects.push(symbol.into());
        self
    }

    pub fn prints(mut self, line: impl Into<String>) -> Self {
        self.prints.push(PrintLine::Text(line.into()));
        self
    }

    pub fn prints_if_defined(
        mut self,
        symbol: impl Into<String>,
        then: impl Into<String>,
        otherwise: impl Into<String>,
    ) -> Self {
        self.prints.push(PrintLine::WhenDefined {
            when_defined: symbol.into(),
            then: then.into(),
            otherwise: Some(otherwise.into()),
        });
        self
    }

    pub fn defines(mut self, symbol: impl Into<String>) -> Self {
        self.defines.push(symbol.into());
        self
    }
}

// =============================================================================
// ModuleRuntime
// =============================================================================

/// Load-once evaluator for module scripts.
///
/// Owns the "already loaded" registry. A path that is currently being loaded
/// counts as loaded, so require cycles terminate. Failed loads are not
/// recorded and leave no symbols or output behind from the failing module.
#[derive(Debug)]
pub struct ModuleRuntime<S> {
    source: S,
    loaded: Vec<String>,
    loaded_set: HashSet<String>,
    loading: Vec<String>,
    defined: HashSet<String>,
    transcript: Vec<String>,
}

impl<S: ModuleSource> ModuleRuntime<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            loaded: Vec::new(),
            loaded_set: HashSet::new(),
            loading: Vec::new(),
            defined: HashSet::new(),
            transcript: Vec::new(),
        }
    }

    /// Paths loaded so far, in completion order.
    pub fn loaded(&self) -> &[String] {
        &self.loaded
    }

    pub fn is_loaded(&self, path: &str) -> bool {
        self.loaded_set.contains(path)
    }

    pub fn is_defined(&self, symbol: &str) -> bool {
        self.defined.contains(symbol)
    }

    /// Output lines printed by loaded modules, in order.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn evaluate(&mut self, script: &ModuleScript) -> Result<(), LoadFailure> {
        for dependency in &script.requires {
            self.load(dependency)?;
        }

        if let Some(message) = &script.raises {
            return Err(LoadFailure::new(message.clone()));
        }

        if let Some(missing) = script.expects.iter().find(|s| !self.defined.contains(*s)) {
            return Err(LoadFailure::new(format!("uninitialized constant {}", missing)));
        }

        for line in &script.prints {
            match line {
                PrintLine::Text(text) => self.transcript.push(text.clone()),
                PrintLine::WhenDefined {
                    when_defined,
                    then,
                    otherwise,
                } => {
                    if self.defined.contains(when_defined) {
                        self.transcript.push(then.clone());
                    } else if let Some(otherwise) = otherwise {
                        self.transcript.push(otherwise.clone());
                    }
                }
            }
        }

        self.defined.extend(script.defines.iter().cloned());
        Ok(())
    }
}

impl<S: ModuleSource> ModuleLoader for ModuleRuntime<S> {
    fn load(&mut self, path: &str) -> Result<(), LoadFailure> {
        if self.loaded_set.contains(path) || self.loading.iter().any(|p| p == path) {
            trace!(path, "module already loaded");
            return Ok(());
        }

        let script = self
            .source
            .find(path)?
            .ok_or_else(|| LoadFailure::not_found(path))?;

        self.loading.push(path.to_string());
        let result = self.evaluate(&script);
        self.loading.pop();
        result?;

        debug!(path, "module loaded");
        self.loaded.push(path.to_string());
        self.loaded_set.insert(path.to_string());
        Ok(())
    }
}
