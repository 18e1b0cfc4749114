//! Load outcome classification.
//!
//! Loaders report failures as plain text. A failure only counts as a miss of
//! the attempted candidate when the message is a "not found" message naming
//! exactly that candidate. Everything else, including a "not found" for some
//! deeper path, is a failure inside the candidate.
//!
//! Paths are compared as literal strings. Messages often contain punctuation
//! (`'libfuuu-1.0': ...`, `(LoadError)`), so no pattern language is involved.

use serde::Serialize;

/// How a failed load relates to the candidate that was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadOutcome {
    /// The candidate path itself could not be located.
    SelfMiss,
    /// The failure happened past the candidate, or is not a missing-module failure.
    NestedFailure,
}

/// Message prefixes that introduce the path of a module that could not be found.
/// Matched case-insensitively.
const NOT_FOUND_PREFIXES: &[&str] = &[
    "cannot load such file -- ",
    "no such file to load -- ",
    "missing api definition file in ",
];

/// Classify a load failure for `candidate`.
pub fn classify(candidate: &str, message: &str) -> LoadOutcome {
    match missing_path(message) {
        Some(missing) if missing == candidate => LoadOutcome::SelfMiss,
        _ => LoadOutcome::NestedFailure,
    }
}

/// The path named by a "not found" message, if `message` is one.
///
/// The remainder after the prefix is returned untouched, so padded or empty
/// paths still compare equal to the candidate that produced them.
pub fn missing_path(message: &str) -> Option<&str> {
    NOT_FOUND_PREFIXES.iter().find_map(|prefix| {
        let head = message.get(..prefix.len())?;
        head.eq_ignore_ascii_case(prefix)
            .then(|| &message[prefix.len()..])
    })
}
