use std::collections::HashMap;

use super::{ModuleScript, ModuleSource};
use crate::error::LoadFailure;

/// In-memory module source keyed by module path.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    modules: HashMap<String, ModuleScript>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, script: ModuleScript) {
        self.modules.insert(path.into(), script);
    }

    pub fn with_module(mut self, path: impl Into<String>, script: ModuleScript) -> Self {
        self.insert(path, script);
        self
    }

    /// Drop a module, e.g. to simulate a package without its default file.
    pub fn remove(&mut self, path: &str) -> Option<ModuleScript> {
        self.modules.remove(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.modules.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl ModuleSource for MemorySource {
    fn find(&self, path: &str) -> Result<Option<ModuleScript>, LoadFailure> {
        Ok(self.modules.get(path).cloned())
    }
}
