//! Regex pattern validation and matching.
//!
//! Every user-supplied pattern in the system (binding patterns from the
//! discovery feed, banned phrases from banlist files) goes through
//! [`validate`] before it can participate in matching. Invalid patterns are
//! surfaced with the regex engine's own diagnostic so the user sees exactly
//! what the engine rejected.

use std::fmt;

use regex::{Matches, Regex, RegexBuilder};

/// A pattern that failed to compile.
///
/// Carries the regex engine's diagnostic message verbatim. Reporting layers
/// may prefix it but must not reword it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternError {
    message: String,
}

impl PatternError {
    /// The engine's diagnostic message, unmodified.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for PatternError {}

/// A successfully compiled pattern, usable for both full-text matching
/// (binding patterns against step text) and global searching (banned
/// phrases inside binding pattern text).
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// The pattern as written, for unanchored global searches.
    search: Regex,
    /// The same pattern wrapped in `^(?:...)$` so a match must consume the
    /// entire subject.
    full: Regex,
}

impl CompiledPattern {
    /// Whether the pattern matches the entire subject text.
    pub fn is_full_match(&self, text: &str) -> bool {
        self.full.is_match(text)
    }

    /// All non-overlapping match occurrences of the pattern in the text.
    pub fn find_iter<'r, 't>(&'r self, text: &'t str) -> Matches<'r, 't> {
        self.search.find_iter(text)
    }
}

/// Compile a pattern, case-sensitively.
///
/// Safe to call concurrently: no shared state is touched.
pub fn validate(pattern: &str) -> Result<CompiledPattern, PatternError> {
    validate_with(pattern, false)
}

/// Compile a pattern with an explicit case-sensitivity option.
pub fn validate_with(pattern: &str, ignore_case: bool) -> Result<CompiledPattern, PatternError> {
    let search = RegexBuilder::new(pattern)
        .case_insensitive(ignore_case)
        .build()
        .map_err(|e| PatternError {
            message: e.to_string(),
        })?;

    // Wrapping a valid pattern in a non-capturing group cannot introduce a
    // syntax error, so this second compile only fails on resource limits.
    let full = RegexBuilder::new(&format!("^(?:{pattern})$"))
        .case_insensitive(ignore_case)
        .build()
        .map_err(|e| PatternError {
            message: e.to_string(),
        })?;

    Ok(CompiledPattern { search, full })
}
