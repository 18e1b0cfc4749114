//! Load-path directories of JSON module files.
//!
//! A module path `jquery/rails` resolves to `<root>/jquery/rails.<ext>` for
//! the first load-path root (and first extension) where the file exists.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;

use super::{ModuleScript, ModuleSource};
use crate::error::LoadFailure;

/// File extension used for module files when none is configured.
pub const DEFAULT_MODULE_EXTENSION: &str = "module.json";

/// Module source backed by an ordered list of load-path directories.
#[derive(Debug, Clone)]
pub struct SearchPathSource {
    roots: Vec<PathBuf>,
    extensions: Vec<String>,
}

impl SearchPathSource {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            extensions: vec![DEFAULT_MODULE_EXTENSION.to_string()],
        }
    }

    /// Replace the module file extensions. An empty list keeps the default.
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        let extensions: Vec<String> = extensions
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .collect();
        if !extensions.is_empty() {
            self.extensions = extensions;
        }
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Finds a module file but does not read it.
    pub fn resolve(&self, module_path: &str) -> Option<PathBuf> {
        let segments = split_segments(module_path)?;
        let (last, rest) = segments.split_last()?;

        for root in &self.roots {
            let dir = rest.iter().fold(root.to_path_buf(), |acc, s| acc.join(s));
            for ext in &self.extensions {
                let candidate = dir.join(format!("{}.{}", last, ext));
                trace!(path = %candidate.display(), "probing module file");
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }

        None
    }
}

/// Split a module path into directory segments.
///
/// Paths that are empty, absolute, or climb out of the root (`..`) never
/// resolve.
fn split_segments(module_path: &str) -> Option<Vec<&str>> {
    let segments: Vec<&str> = module_path.split('/').collect();
    let valid = segments
        .iter()
        .all(|s| !s.is_empty() && *s != "." && *s != ".." && !s.contains('\\'));
    valid.then_some(segments)
}

fn read_script(file: &Path) -> Result<ModuleScript, LoadFailure> {
    let content = fs::read_to_string(file).map_err(|e| {
        LoadFailure::new(format!("failed to read module file {}: {}", file.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        LoadFailure::new(format!("invalid module file {}: {}", file.display(), e))
    })
}

impl ModuleSource for SearchPathSource {
    fn find(&self, path: &str) -> Result<Option<ModuleScript>, LoadFailure> {
        match self.resolve(path) {
            Some(file) => read_script(&file).map(Some),
            None => Ok(None),
        }
    }
}
