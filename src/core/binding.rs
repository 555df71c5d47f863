//! Step binding declarations and the immutable binding registry.
//!
//! Bindings arrive through a discovery feed: a JSON array produced by an
//! external declaration scanner, one record per `(function, keyword,
//! pattern)` attribute. The registry compiles every pattern up front and is
//! read-only for the rest of the run.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::pattern::{self, CompiledPattern, PatternError};

/// The role a binding declares for itself.
///
/// `StepDefinition` is the wildcard role: it matches a step of any role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepKeyword {
    Given,
    When,
    Then,
    StepDefinition,
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepKeyword::Given => write!(f, "Given"),
            StepKeyword::When => write!(f, "When"),
            StepKeyword::Then => write!(f, "Then"),
            StepKeyword::StepDefinition => write!(f, "StepDefinition"),
        }
    }
}

/// Where a binding declaration lives, for reporting only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

/// One record of the discovery feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingRecord {
    /// Stable display name of the declaring function.
    pub method: String,
    pub keyword: StepKeyword,
    pub pattern: String,
    pub file: String,
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

/// One declared step binding. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Opaque identity of the declaring function. Several bindings may
    /// share it (a function can carry multiple binding attributes).
    pub method: String,
    pub keyword: StepKeyword,
    /// The raw regex pattern text as declared.
    pub pattern: String,
    pub location: SourceLocation,
}

/// A registry entry: the binding plus the outcome of compiling its pattern.
#[derive(Debug, Clone)]
pub struct BindingEntry {
    pub binding: Binding,
    pub compiled: Result<CompiledPattern, PatternError>,
}

impl BindingEntry {
    /// The compiled pattern, if the declared text was a valid regex.
    pub fn pattern(&self) -> Option<&CompiledPattern> {
        self.compiled.as_ref().ok()
    }
}

/// Immutable table of all discovered bindings, in feed order.
#[derive(Debug, Default)]
pub struct BindingRegistry {
    entries: Vec<BindingEntry>,
}

impl BindingRegistry {
    /// Build the registry from feed records, compiling every pattern.
    pub fn from_records(records: Vec<BindingRecord>) -> Self {
        let entries = records
            .into_iter()
            .map(|r| {
                let compiled = pattern::validate(&r.pattern);
                BindingEntry {
                    binding: Binding {
                        method: r.method,
                        keyword: r.keyword,
                        pattern: r.pattern,
                        location: SourceLocation::new(r.file, r.line, r.column),
                    },
                    compiled,
                }
            })
            .collect();
        Self { entries }
    }

    /// Load the registry from a JSON discovery feed on disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read bindings feed: {}", path.display()))?;
        let records: Vec<BindingRecord> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse bindings feed: {}", path.display()))?;
        Ok(Self::from_records(records))
    }

    pub fn entries(&self) -> &[BindingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn record(method: &str, keyword: StepKeyword, pattern: &str) -> BindingRecord {
        BindingRecord {
            method: method.to_string(),
            keyword,
            pattern: pattern.to_string(),
            file: "Steps.cs".to_string(),
            line: 10,
            column: 6,
        }
    }

    #[test]
    fn test_registry_compiles_patterns() {
        let registry = BindingRegistry::from_records(vec![
            record("Steps.Valid()", StepKeyword::Given, r"^a (\w+) bird$"),
            record("Steps.Broken()", StepKeyword::When, r"a(b"),
        ]);

        assert_eq!(registry.len(), 2);
        assert!(registry.entries()[0].pattern().is_some());
        assert!(registry.entries()[1].pattern().is_none());
    }

    #[test]
    fn test_registry_preserves_feed_order() {
        let registry = BindingRegistry::from_records(vec![
            record("Steps.B()", StepKeyword::Then, "b"),
            record("Steps.A()", StepKeyword::Given, "a"),
        ]);

        assert_eq!(registry.entries()[0].binding.method, "Steps.B()");
        assert_eq!(registry.entries()[1].binding.method, "Steps.A()");
    }

    #[test]
    fn test_load_feed_from_disk() {
        let dir = tempdir().unwrap();
        let feed = dir.path().join("bindings.json");
        fs::write(
            &feed,
            r#"[
                {
                    "method": "CalculatorSteps.GivenANumber(Int32)",
                    "keyword": "Given",
                    "pattern": "^a number (\\d+)$",
                    "file": "Steps/CalculatorSteps.cs",
                    "line": 12,
                    "column": 6
                }
            ]"#,
        )
        .unwrap();

        let registry = BindingRegistry::load(&feed).unwrap();
        assert_eq!(registry.len(), 1);
        let binding = &registry.entries()[0].binding;
        assert_eq!(binding.keyword, StepKeyword::Given);
        assert_eq!(binding.location.file, "Steps/CalculatorSteps.cs");
        assert_eq!(binding.location.line, 12);
    }

    #[test]
    fn test_load_rejects_malformed_feed() {
        let dir = tempdir().unwrap();
        let feed = dir.path().join("bindings.json");
        fs::write(&feed, "{ not a feed }").unwrap();

        let result = BindingRegistry::load(&feed);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse bindings feed")
        );
    }

    #[test]
    fn test_column_defaults_to_zero() {
        let json = r#"{"method": "M()", "keyword": "Then", "pattern": "x", "file": "f.cs", "line": 3}"#;
        let record: BindingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.column, 0);
    }
}
