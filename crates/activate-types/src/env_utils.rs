//! Environment variable helpers used to build activation configuration.
//!
//! ```
//! use activate_types::env_utils::{env_bool_or, env_list};
//!
//! let groups: Vec<String> = env_list("BUNDLE_ACTIVATE_DOCTEST_UNSET");
//! assert!(groups.is_empty());
//! assert!(env_bool_or("BUNDLE_ACTIVATE_DOCTEST_UNSET", true));
//! ```

/// Read a non-empty environment variable.
///
/// Returns `None` when the variable is unset or blank.
pub fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a boolean flag, falling back to `default` when unset.
///
/// "1", "true", "yes" and "on" (any case) are truthy; anything else is false.
pub fn env_bool_or(key: &str, default: bool) -> bool {
    match env_string(key) {
        Some(v) => matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        None => default,
    }
}

/// Split a comma-separated variable into trimmed, non-empty entries.
pub fn env_list(key: &str) -> Vec<String> {
    env_string(key)
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
