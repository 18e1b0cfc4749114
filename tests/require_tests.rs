//! End-to-end require tests over an in-memory module runtime.
//!
//! Test coverage areas:
//! - Group selection (default, explicit, union, string-declared groups)
//! - Explicit overrides, disabled requires, non-standard module names
//! - Namespaced (hyphenated) package names
//! - Load failure disambiguation and fail-fast propagation
//! - Load order

mod common;

use bundle_activate::candidates::infer_from_name;
use bundle_activate::loader::{MemorySource, ModuleLoader, ModuleRuntime, ModuleScript};
use bundle_activate::{
    ActivationFailure, GroupSelection, Package, PackageOutcome, RequireOrchestrator,
    RequireOverride, ResolvedSet,
};

use common::{fixture_runtime, fixture_set, printing_runtime};

fn require(groups: &[&str]) -> Vec<String> {
    let mut runtime = fixture_runtime();
    RequireOrchestrator::new()
        .activate(
            &fixture_set(),
            &GroupSelection::from_request(groups.iter().copied()),
            &mut runtime,
        )
        .expect("activation");
    runtime.transcript().to_vec()
}

// =============================================================================
// Group selection
// =============================================================================

mod groups {
    use super::*;

    #[test]
    fn test_default_group() {
        assert_eq!(require(&[]), vec!["two"]);
    }

    #[test]
    fn test_specific_group() {
        assert_eq!(require(&["bar"]), vec!["baz", "qux"]);
    }

    #[test]
    fn test_default_and_specific_group_keep_resolver_order() {
        assert_eq!(require(&["default", "bar"]), vec!["baz", "qux", "two"]);
        assert_eq!(require(&["bar", "default"]), vec!["baz", "qux", "two"]);
    }

    #[test]
    fn test_string_declared_group() {
        assert_eq!(require(&["string"]), vec!["six"]);
    }

    #[test]
    fn test_resolver_order_not_declaration_order() {
        assert_eq!(require(&["not"]), vec!["seven", "three"]);
    }

    #[test]
    fn test_unknown_group_loads_nothing() {
        assert!(require(&["nope"]).is_empty());
    }

    #[test]
    fn test_same_runtime_across_selections() {
        let set = fixture_set();
        let orchestrator = RequireOrchestrator::new();
        let mut runtime = fixture_runtime();

        orchestrator
            .activate(&set, &GroupSelection::default_only(), &mut runtime)
            .unwrap();
        orchestrator
            .activate(
                &set,
                &GroupSelection::from_request(["bar"]).with_default(),
                &mut runtime,
            )
            .unwrap();

        // `two` was already loaded by the first run.
        assert_eq!(runtime.transcript(), &["two", "baz", "qux"]);
    }
}

// =============================================================================
// Overrides
// =============================================================================

mod overrides {
    use super::*;

    #[test]
    fn test_non_standard_name_requires_explicitly() {
        let mut runtime = fixture_runtime();
        let report = RequireOrchestrator::new()
            .activate(&fixture_set(), &GroupSelection::default_only(), &mut runtime)
            .unwrap();
        assert!(matches!(
            report.outcome("five"),
            Some(PackageOutcome::NoDefaultModule { .. })
        ));

        runtime.load("mofive").unwrap();
        assert_eq!(runtime.transcript(), &["two", "five"]);
    }

    #[test]
    fn test_disabled_require_is_never_loaded() {
        let mut runtime = fixture_runtime();
        RequireOrchestrator::new()
            .activate(&fixture_set(), &GroupSelection::default_only(), &mut runtime)
            .unwrap();
        assert!(!runtime.is_loaded("four"));
    }

    #[test]
    fn test_missing_explicit_require_fails() {
        let set = ResolvedSet::new(vec![
            Package::new("two").with_require(RequireOverride::Single("fail".to_string()))
        ])
        .unwrap();
        let mut runtime = fixture_runtime();

        let err = RequireOrchestrator::new()
            .activate(&set, &GroupSelection::default_only(), &mut runtime)
            .unwrap_err();
        assert_eq!(
            err,
            ActivationFailure::MissingExplicitModule {
                package: "two".to_string(),
                path: "fail".to_string(),
                message: "cannot load such file -- fail".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_explicit_require_is_a_missing_module() {
        let set = ResolvedSet::new(vec![
            Package::new("blank").with_require(RequireOverride::Single(String::new()))
        ])
        .unwrap();
        let mut runtime = fixture_runtime();

        let err = RequireOrchestrator::new()
            .activate(&set, &GroupSelection::default_only(), &mut runtime)
            .unwrap_err();
        assert_eq!(
            err,
            ActivationFailure::MissingExplicitModule {
                package: "blank".to_string(),
                path: String::new(),
                message: "cannot load such file -- ".to_string(),
            }
        );
    }

    #[test]
    fn test_explicit_failure_stops_later_packages() {
        let set = ResolvedSet::new(vec![
            Package::new("a"),
            Package::new("b").with_require(RequireOverride::Single("nowhere".to_string())),
            Package::new("c"),
        ])
        .unwrap();
        let mut runtime = printing_runtime(&["a", "c"]);

        assert!(RequireOrchestrator::new()
            .activate(&set, &GroupSelection::default_only(), &mut runtime)
            .is_err());
        assert_eq!(runtime.loaded(), &["a"]);
    }
}

// =============================================================================
// Namespaced gems
// =============================================================================

mod namespaced {
    use super::*;

    fn jquery_source() -> MemorySource {
        MemorySource::new().with_module("jquery/rails", ModuleScript::new().prints("jquery/rails"))
    }

    #[test]
    fn test_requires_namespaced_names() {
        let set = ResolvedSet::new(vec![Package::new("jquery-rails")]).unwrap();
        let mut runtime = ModuleRuntime::new(jquery_source());

        RequireOrchestrator::new()
            .activate(&set, &GroupSelection::default_only(), &mut runtime)
            .unwrap();
        assert_eq!(runtime.transcript(), &["jquery/rails"]);
    }

    #[test]
    fn test_silently_passes_if_nothing_matches() {
        let set = ResolvedSet::new(vec![Package::new("bcrypt-ruby")]).unwrap();
        let source = MemorySource::new().with_module("brcrypt", ModuleScript::new().defines("BCrypt"));
        let mut runtime = ModuleRuntime::new(source);

        let report = RequireOrchestrator::new()
            .activate(&set, &GroupSelection::default_only(), &mut runtime)
            .unwrap();
        assert!(report.loaded_paths().is_empty());
        assert!(runtime.loaded().is_empty());
    }

    #[test]
    fn test_does_not_mangle_explicit_requires() {
        let set = ResolvedSet::new(vec![Package::new("jquery-rails")
            .with_require(RequireOverride::Single("jquery-rails".to_string()))])
        .unwrap();
        let mut runtime = ModuleRuntime::new(jquery_source());

        let err = RequireOrchestrator::new()
            .activate(&set, &GroupSelection::default_only(), &mut runtime)
            .unwrap_err();
        assert_eq!(err.message(), "cannot load such file -- jquery-rails");
        assert!(runtime.transcript().is_empty());
    }

    #[test]
    fn test_punctuated_failure_is_not_a_miss() {
        let message = "Could not open library 'libfuuu-1.0': libfuuu-1.0: cannot open shared object file: No such file or directory.";
        let set = ResolvedSet::new(vec![Package::new("load-fuuu")]).unwrap();
        let source = MemorySource::new()
            .with_module("load-fuuu", ModuleScript::new().raises(message))
            .with_module("load/fuuu", ModuleScript::new().prints("should not load"));
        let mut runtime = ModuleRuntime::new(source);

        let err = RequireOrchestrator::new()
            .activate(&set, &GroupSelection::default_only(), &mut runtime)
            .unwrap_err();
        assert!(matches!(err, ActivationFailure::NestedLoadFailure { .. }));
        assert_eq!(err.message(), message);
        assert!(err.message().contains("Could not open library 'libfuuu-1.0'"));
        assert!(runtime.transcript().is_empty());
    }

    #[test]
    fn test_deeply_namespaced_name_tries_each_split() {
        assert_eq!(
            infer_from_name("rspec-rails-matchers"),
            vec!["rspec-rails-matchers", "rspec/rails-matchers", "rspec/rails/matchers"]
        );

        let set = ResolvedSet::new(vec![Package::new("rspec-rails-matchers")]).unwrap();
        let mut runtime = printing_runtime(&["rspec/rails/matchers"]);
        let report = RequireOrchestrator::new()
            .activate(&set, &GroupSelection::default_only(), &mut runtime)
            .unwrap();
        assert_eq!(report.loaded_paths(), vec!["rspec/rails/matchers"]);
    }
}

// =============================================================================
// Order
// =============================================================================

mod order {
    use super::*;

    fn order_source() -> MemorySource {
        MemorySource::new()
            .with_module(
                "one",
                ModuleScript::new()
                    .prints_if_defined("Two", "module_two", "two_not_loaded")
                    .prints("one"),
            )
            .with_module("two", ModuleScript::new().defines("Two").prints("two"))
    }

    #[test]
    fn test_dependency_loaded_first_is_observed() {
        let set = ResolvedSet::new(vec![Package::new("two"), Package::new("one")]).unwrap();
        let mut runtime = ModuleRuntime::new(order_source());

        RequireOrchestrator::new()
            .activate(&set, &GroupSelection::default_only(), &mut runtime)
            .unwrap();
        assert_eq!(runtime.transcript(), &["two", "module_two", "one"]);
    }

    #[test]
    fn test_wrong_order_is_not_corrected() {
        let set = ResolvedSet::new(vec![Package::new("one"), Package::new("two")]).unwrap();
        let mut runtime = ModuleRuntime::new(order_source());

        RequireOrchestrator::new()
            .activate(&set, &GroupSelection::default_only(), &mut runtime)
            .unwrap();
        assert_eq!(runtime.transcript(), &["two_not_loaded", "one", "two"]);
    }

    #[test]
    fn test_dependent_expecting_dependency_succeeds() {
        let set = ResolvedSet::new(vec![Package::new("a"), Package::new("b")]).unwrap();
        let source = MemorySource::new()
            .with_module("a", ModuleScript::new().defines("A"))
            .with_module("b", ModuleScript::new().expects("A").prints("b saw A"));
        let mut runtime = ModuleRuntime::new(source);

        RequireOrchestrator::new()
            .activate(&set, &GroupSelection::default_only(), &mut runtime)
            .unwrap();
        assert_eq!(runtime.transcript(), &["b saw A"]);
    }

    #[test]
    fn test_busted_require_propagates() {
        let set = ResolvedSet::new(vec![Package::new("busted_require")]).unwrap();
        let source = MemorySource::new().with_module(
            "busted_require",
            ModuleScript::new().requires("no_such_file_omg"),
        );
        let mut runtime = ModuleRuntime::new(source);

        let err = RequireOrchestrator::new()
            .activate(&set, &GroupSelection::default_only(), &mut runtime)
            .unwrap_err();
        assert_eq!(
            err,
            ActivationFailure::NestedLoadFailure {
                package: "busted_require".to_string(),
                candidate: "busted_require".to_string(),
                message: "cannot load such file -- no_such_file_omg".to_string(),
            }
        );
    }
}

// =============================================================================
// Platforms
// =============================================================================

mod platforms {
    use super::*;

    #[test]
    fn test_other_platform_is_not_required() {
        let set = ResolvedSet::new(vec![
            Package::new("fail")
                .on_platforms(["plan9"])
                .with_require(RequireOverride::Single("omgomg".to_string())),
            Package::new("rack"),
        ])
        .unwrap();
        let mut runtime = printing_runtime(&["rack"]);

        RequireOrchestrator::new()
            .with_platform("linux")
            .activate(&set, &GroupSelection::default_only(), &mut runtime)
            .unwrap();
        assert_eq!(runtime.transcript(), &["rack"]);
    }

    #[test]
    fn test_multiple_platforms_including_current() {
        let set = ResolvedSet::new(vec![Package::new("rack")
            .on_platforms(["plan9", "linux"])
            .with_require(RequireOverride::Single("rack".to_string()))])
        .unwrap();
        let mut runtime = printing_runtime(&["rack"]);

        RequireOrchestrator::new()
            .with_platform("linux")
            .activate(&set, &GroupSelection::default_only(), &mut runtime)
            .unwrap();
        assert_eq!(runtime.transcript(), &["rack"]);
    }
}
