#![allow(dead_code)]
//! Shared test utilities for integration tests.
//!
//! - `fixture_set` builds the seven-package lock used by the require tests
//! - `fixture_source` provides the module scripts those packages load
//! - `write_module` lays out JSON module files under a load-path root

use std::fs;
use std::path::Path;

use bundle_activate::loader::{MemorySource, ModuleRuntime, ModuleScript};
use bundle_activate::{Package, RequireOverride, ResolvedSet};

/// Lock with packages one..seven, in resolver order.
///
/// `three` depends on `seven` and `two` on `three`, so the resolver places
/// them dependencies-first.
pub fn fixture_set() -> ResolvedSet {
    ResolvedSet::new(vec![
        Package::new("one")
            .in_groups(["bar"])
            .with_require(RequireOverride::from_paths(["baz", "qux"])),
        Package::new("seven").in_groups(["not"]),
        Package::new("three").in_groups(["not"]),
        Package::new("two"),
        Package::new("four").with_require(RequireOverride::Disabled),
        Package::new("five"),
        Package::new("six").in_groups(["string"]),
    ])
    .expect("fixture set")
}

/// Module scripts for `fixture_set`. `five` ships a module named `mofive`.
pub fn fixture_source() -> MemorySource {
    MemorySource::new()
        .with_module("baz", ModuleScript::new().prints("baz"))
        .with_module("qux", ModuleScript::new().prints("qux"))
        .with_module("two", ModuleScript::new().prints("two"))
        .with_module("three", ModuleScript::new().prints("three"))
        .with_module("four", ModuleScript::new().prints("four"))
        .with_module("mofive", ModuleScript::new().prints("five"))
        .with_module("six", ModuleScript::new().prints("six"))
        .with_module("seven", ModuleScript::new().prints("seven"))
}

pub fn fixture_runtime() -> ModuleRuntime<MemorySource> {
    ModuleRuntime::new(fixture_source())
}

/// Runtime over `modules`, each printing its own path.
pub fn printing_runtime(paths: &[&str]) -> ModuleRuntime<MemorySource> {
    let mut source = MemorySource::new();
    for path in paths {
        source.insert(*path, ModuleScript::new().prints(*path));
    }
    ModuleRuntime::new(source)
}

/// Write `script` as `<root>/<module_path>.module.json`.
pub fn write_module(root: &Path, module_path: &str, script: &ModuleScript) {
    let file = root.join(format!("{}.module.json", module_path));
    fs::create_dir_all(file.parent().expect("module parent")).expect("create module dir");
    fs::write(&file, serde_json::to_string(script).expect("serialize module")).expect("write module");
}

pub fn write_resolved_set(path: &Path, set: &ResolvedSet) {
    fs::write(path, serde_json::to_string_pretty(set).expect("serialize set")).expect("write set");
}
