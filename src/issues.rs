//! Issue types for step-binding analysis results.
//!
//! Each issue is self-contained with all information needed by the
//! reporting layers (CLI text and JSON output).

use std::cmp::Ordering;

use enum_dispatch::enum_dispatch;
use serde::Serialize;

use crate::core::binding::{SourceLocation, StepKeyword};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
///
/// `Info` exists for banned-phrase rules, whose severity is configured per
/// rule; the built-in rules only use `Error` and `Warning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    /// Parses the configuration vocabulary exactly: `Error`, `Warning`,
    /// `Info`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Error" => Ok(Severity::Error),
            "Warning" => Ok(Severity::Warning),
            "Info" => Ok(Severity::Info),
            other => Err(format!("unknown severity '{other}'")),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    InvalidPattern,
    UnusedBinding,
    UnusedFunction,
    BannedPhrase,
    DuplicateStepText,
    InvalidBanlist,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::InvalidPattern => write!(f, "invalid-pattern"),
            Rule::UnusedBinding => write!(f, "unused-binding"),
            Rule::UnusedFunction => write!(f, "unused-function"),
            Rule::BannedPhrase => write!(f, "banned-phrase"),
            Rule::DuplicateStepText => write!(f, "duplicate-step-text"),
            Rule::InvalidBanlist => write!(f, "invalid-banlist"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Issue Types - Binding Declarations
// ============================================================

/// A binding whose declared pattern is not a valid regular expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPatternIssue {
    pub location: SourceLocation,
    pub keyword: StepKeyword,
    pub pattern: String,
    /// The regex engine's diagnostic, verbatim.
    pub error: String,
}

impl InvalidPatternIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::InvalidPattern
    }
}

/// A binding whose pattern matched no step in any feature file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedBindingIssue {
    pub location: SourceLocation,
    pub keyword: StepKeyword,
    pub pattern: String,
    pub method: String,
}

impl UnusedBindingIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnusedBinding
    }
}

/// A binding function none of whose bindings matched any step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedFunctionIssue {
    /// Location of the function's first binding declaration.
    pub location: SourceLocation,
    pub method: String,
    pub binding_count: usize,
}

impl UnusedFunctionIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnusedFunction
    }
}

/// A banned phrase occurring in a binding's declared pattern text.
///
/// One issue per match occurrence; a pattern hit N times yields N issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannedPhraseIssue {
    pub location: SourceLocation,
    /// Severity configured on the matching rule.
    pub severity: Severity,
    /// The rule's message, or the generated default embedding the phrase.
    pub message: String,
    pub phrase: String,
    /// The pattern text that was searched.
    pub pattern: String,
    /// Byte offset of this match occurrence in `pattern`.
    pub match_start: usize,
}

impl BannedPhraseIssue {
    pub fn rule() -> Rule {
        Rule::BannedPhrase
    }
}

/// The same step text declared more than once on one function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateStepTextIssue {
    pub location: SourceLocation,
    pub keyword: StepKeyword,
    pub pattern: String,
    pub method: String,
}

impl DuplicateStepTextIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::DuplicateStepText
    }
}

// ============================================================
// Issue Types - Input Files
// ============================================================

/// A banlist configuration source that was rejected in whole or in part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BanlistFileIssue {
    pub file_path: String,
    pub error: String,
}

impl BanlistFileIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::InvalidBanlist
    }
}

/// A feature file that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// A step-binding issue found during analysis.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    InvalidPattern(InvalidPatternIssue),
    UnusedBinding(UnusedBindingIssue),
    UnusedFunction(UnusedFunctionIssue),
    BannedPhrase(BannedPhraseIssue),
    DuplicateStepText(DuplicateStepTextIssue),
    InvalidBanlist(BanlistFileIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }
}

impl Ord for Issue {
    // Sort by file path, then line, col, rule, message for deterministic
    // output: the tally reduction and HashMap groupings do not guarantee
    // any ordering of their own.
    fn cmp(&self, other: &Self) -> Ordering {
        let (a_path, a_line, a_col) = location_key(self.location());
        let (b_path, b_line, b_col) = location_key(other.location());
        a_path
            .cmp(b_path)
            .then_with(|| a_line.cmp(&b_line))
            .then_with(|| a_col.cmp(&b_col))
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn location_key(loc: ReportLocation<'_>) -> (&str, u32, u32) {
    match loc {
        ReportLocation::Binding(location) => (&location.file, location.line, location.column),
        ReportLocation::File { path } => (path, 0, 0),
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// A binding declaration site.
    Binding(&'a SourceLocation),
    /// File-level only (config and parse errors - no line context).
    File { path: &'a str },
}

/// An excerpt to print under the location line, cargo-style.
pub struct Snippet<'a> {
    pub text: &'a str,
    /// Byte offset to point the caret at, if any.
    pub caret: Option<usize>,
}

/// Trait for types that can be reported to the CLI.
///
/// Implemented by all issue types; `enum_dispatch` gives zero-cost dispatch
/// on the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional excerpt shown under the location line.
    fn snippet(&self) -> Option<Snippet<'_>> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for InvalidPatternIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Binding(&self.location)
    }

    fn message(&self) -> String {
        format!("Invalid regex: {}", self.error)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn snippet(&self) -> Option<Snippet<'_>> {
        Some(Snippet {
            text: &self.pattern,
            caret: None,
        })
    }
}

impl Report for UnusedBindingIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Binding(&self.location)
    }

    fn message(&self) -> String {
        self.pattern.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("[{}] on {}", self.keyword, self.method))
    }
}

impl Report for UnusedFunctionIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Binding(&self.location)
    }

    fn message(&self) -> String {
        self.method.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "{} binding(s), none matched by any feature file",
            self.binding_count
        ))
    }
}

impl Report for BannedPhraseIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Binding(&self.location)
    }

    fn message(&self) -> String {
        self.message.clone()
    }

    fn report_severity(&self) -> Severity {
        self.severity
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn snippet(&self) -> Option<Snippet<'_>> {
        Some(Snippet {
            text: &self.pattern,
            caret: Some(self.match_start),
        })
    }
}

impl Report for DuplicateStepTextIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Binding(&self.location)
    }

    fn message(&self) -> String {
        self.pattern.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("duplicated on {}", self.method))
    }

    fn hint(&self) -> Option<&str> {
        Some("replace the duplicated attributes with a single [StepDefinition] binding")
    }
}

impl Report for BanlistFileIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Info.to_string(), "info");
    }

    #[test]
    fn test_severity_parse_is_exact() {
        assert_eq!("Error".parse::<Severity>(), Ok(Severity::Error));
        assert_eq!("Warning".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!("Info".parse::<Severity>(), Ok(Severity::Info));
        assert!("error".parse::<Severity>().is_err());
        assert!("Fatal".parse::<Severity>().is_err());
    }

    #[test]
    fn test_rule_display() {
        assert_eq!(Rule::UnusedBinding.to_string(), "unused-binding");
        assert_eq!(Rule::BannedPhrase.to_string(), "banned-phrase");
        assert_eq!(Rule::InvalidBanlist.to_string(), "invalid-banlist");
    }

    #[test]
    fn test_invalid_pattern_message_keeps_engine_diagnostic() {
        let engine_error = regex::Regex::new("a(b").unwrap_err().to_string();
        let issue = InvalidPatternIssue {
            location: SourceLocation::new("Steps.cs", 4, 6),
            keyword: StepKeyword::Given,
            pattern: "a(b".to_string(),
            error: engine_error.clone(),
        };
        assert_eq!(issue.message(), format!("Invalid regex: {engine_error}"));
    }

    #[test]
    fn test_issues_sort_by_location() {
        let early = Issue::UnusedBinding(UnusedBindingIssue {
            location: SourceLocation::new("a.cs", 1, 1),
            keyword: StepKeyword::Given,
            pattern: "x".to_string(),
            method: "A.M()".to_string(),
        });
        let late = Issue::UnusedBinding(UnusedBindingIssue {
            location: SourceLocation::new("b.cs", 1, 1),
            keyword: StepKeyword::Given,
            pattern: "x".to_string(),
            method: "B.M()".to_string(),
        });

        let mut issues = vec![late.clone(), early.clone()];
        issues.sort();
        assert_eq!(issues, vec![early, late]);
    }

    #[test]
    fn test_banned_phrase_severity_is_per_rule() {
        let issue = BannedPhraseIssue {
            location: SourceLocation::new("Steps.cs", 2, 2),
            severity: Severity::Info,
            message: "Banned phrase: Hello".to_string(),
            phrase: "Hello".to_string(),
            pattern: "say Hello".to_string(),
            match_start: 4,
        };
        assert_eq!(issue.report_severity(), Severity::Info);
    }
}
