//! Load and activation failure types.
//!
//! Load failures carry only the loader's human-readable message. Activation
//! failures attribute that message to a package without rewriting it:
//! [`ActivationFailure::message`] always returns the loader's text verbatim.

use serde::Serialize;

/// Failure reported by a [`ModuleLoader`](crate::loader::ModuleLoader).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    message: String,
}

impl LoadFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The canonical "module not found" failure for `path`.
    pub fn not_found(path: &str) -> Self {
        Self::new(format!("cannot load such file -- {}", path))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for LoadFailure {}

/// Terminal failure of an activation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActivationFailure {
    /// An explicitly requested module could not be found.
    MissingExplicitModule {
        package: String,
        path: String,
        message: String,
    },
    /// Loading a candidate failed somewhere other than locating the candidate
    /// itself (a deeper require, a raised error, a malformed module).
    NestedLoadFailure {
        package: String,
        candidate: String,
        message: String,
    },
    /// Several packages failed (collect mode only), in resolver order.
    Multiple { failures: Vec<ActivationFailure> },
}

impl ActivationFailure {
    /// The loader's message, unchanged.
    ///
    /// For [`ActivationFailure::Multiple`] this is the first failure's message.
    pub fn message(&self) -> &str {
        match self {
            ActivationFailure::MissingExplicitModule { message, .. }
            | ActivationFailure::NestedLoadFailure { message, .. } => message,
            ActivationFailure::Multiple { failures } => {
                failures.first().map(|f| f.message()).unwrap_or_default()
            }
        }
    }

    /// The package this failure is attributed to.
    pub fn package(&self) -> Option<&str> {
        match self {
            ActivationFailure::MissingExplicitModule { package, .. }
            | ActivationFailure::NestedLoadFailure { package, .. } => Some(package),
            ActivationFailure::Multiple { failures } => failures.first().and_then(|f| f.package()),
        }
    }

    /// The module path whose load failed.
    pub fn path(&self) -> Option<&str> {
        match self {
            ActivationFailure::MissingExplicitModule { path, .. } => Some(path),
            ActivationFailure::NestedLoadFailure { candidate, .. } => Some(candidate),
            ActivationFailure::Multiple { failures } => failures.first().and_then(|f| f.path()),
        }
    }

    /// Flattened list of single-package failures.
    pub fn failures(&self) -> Vec<&ActivationFailure> {
        match self {
            ActivationFailure::Multiple { failures } => failures.iter().collect(),
            single => vec![single],
        }
    }
}

impl std::fmt::Display for ActivationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivationFailure::MissingExplicitModule {
                package,
                path,
                message,
            } => write!(
                f,
                "package '{}' requires '{}' which could not be loaded: {}",
                package, path, message
            ),
            ActivationFailure::NestedLoadFailure {
                package, message, ..
            } => write!(f, "package '{}' failed to load: {}", package, message),
            ActivationFailure::Multiple { failures } => {
                write!(f, "{} packages failed to activate", failures.len())?;
                for failure in failures {
                    write!(f, "\n  - {}", failure)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ActivationFailure {}
