//! Report formatting and printing utilities.
//!
//! This module displays issues in cargo-style format, or as a JSON report
//! for machine consumption. Separate from core logic so steplint can be
//! used as a library.

use std::io::{self, Write};

use colored::{ColoredString, Colorize};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use super::commands::{BindingUsage, CommandResult, CommandSummary, InitSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
///
/// Useful for testing or redirecting output.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    // Calculate max line number width for alignment
    let max_line_width = calculate_max_line_width(issues);

    for issue in issues {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(issues, writer);
}

/// Print a success message when no issues are found.
pub fn print_success(feature_files: usize, bindings: usize) {
    print_success_to(feature_files, bindings, &mut io::stdout().lock());
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(feature_files: usize, bindings: usize, writer: &mut W) {
    let msg = format!(
        "Checked {} binding{} against {} feature file{} - no issues found",
        bindings,
        if bindings == 1 { "" } else { "s" },
        feature_files,
        if feature_files == 1 { "" } else { "s" },
    );
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
}

/// Print a warning about feature files that could not be parsed.
pub fn print_parse_warning(count: usize, verbose: bool) {
    print_parse_warning_to(count, verbose, &mut io::stderr().lock());
}

/// Print a parse warning to a custom writer.
pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} feature file(s) could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn severity_label(severity: Severity) -> ColoredString {
    match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
        Severity::Info => "info".bold().cyan(),
    }
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();
    let (file_path, line, col) = extract_location_info(&loc);

    // Print severity and message (cargo-style)
    let severity = issue.report_severity();
    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_label(severity),
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    // Print clickable location: --> path:line:col
    let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), file_path, line, col);

    // Print the pattern excerpt if the issue carries one
    if let Some(snippet) = issue.snippet() {
        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            line.to_string().blue(),
            "|".blue(),
            snippet.text,
            width = max_line_width
        );

        if let Some(caret_at) = snippet.caret {
            let caret_char = match severity {
                Severity::Error => "^".red(),
                Severity::Warning => "^".yellow(),
                Severity::Info => "^".cyan(),
            };
            let prefix = &snippet.text[..caret_at];
            let caret_padding = UnicodeWidthStr::width(prefix);
            let _ = writeln!(
                writer,
                "{:>width$} {} {:>padding$}{}",
                "",
                "|".blue(),
                "",
                caret_char,
                width = max_line_width,
                padding = caret_padding
            );
        }
    }

    // Print details if present (cargo-style note)
    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    // Print hint if present
    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Warning)
        .count();
    let total_infos = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Info)
        .count();
    let total_problems = total_errors + total_warnings + total_infos;

    if total_problems == 0 {
        return;
    }

    let mut parts = vec![
        format!(
            "{} {}",
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red()
        ),
        format!(
            "{} {}",
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        ),
    ];
    if total_infos > 0 {
        parts.push(format!(
            "{} {}",
            total_infos,
            if total_infos == 1 { "info" } else { "infos" }.cyan()
        ));
    }

    let _ = writeln!(
        writer,
        "\n{} {} problems ({})",
        FAILURE_MARK.red(),
        total_problems,
        parts.join(", ")
    );
}

fn extract_location_info<'a>(loc: &'a ReportLocation<'a>) -> (&'a str, u32, u32) {
    match loc {
        ReportLocation::Binding(location) => (&location.file, location.line, location.column),
        ReportLocation::File { path } => (path, 0, 0),
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Binding(location) => Some(location.line),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

// ============================================================
// Command output
// ============================================================

pub fn print(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Check => {
            report(&result.issues);
            if result.issues.is_empty() {
                print_success(result.feature_files_checked, result.bindings_checked);
            }
            print_parse_warning(result.parse_error_count, verbose);
        }
        CommandSummary::Init(summary) => print_init(summary),
    }
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

// ============================================================
// JSON report
// ============================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    /// Functions none of whose bindings matched any step.
    unused_binding_methods: Vec<&'a str>,
    /// Individual bindings that matched no step.
    unused_bindings: Vec<JsonBinding<'a>>,
    banned_phrase_hits: Vec<JsonBannedHit<'a>>,
    invalid_patterns: Vec<JsonInvalidPattern<'a>>,
    duplicate_step_texts: Vec<JsonBinding<'a>>,
    invalid_banlist_files: Vec<JsonFileError<'a>>,
    parse_errors: Vec<JsonFileError<'a>>,
    bindings_usage: &'a [BindingUsage],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonBinding<'a> {
    file: &'a str,
    line: u32,
    column: u32,
    keyword: String,
    step_text: &'a str,
    method: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonBannedHit<'a> {
    file: &'a str,
    line: u32,
    column: u32,
    severity: Severity,
    message: &'a str,
    phrase: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonInvalidPattern<'a> {
    file: &'a str,
    line: u32,
    column: u32,
    keyword: String,
    step_text: &'a str,
    error: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonFileError<'a> {
    file: &'a str,
    error: &'a str,
}

/// Print the JSON report for a check run to stdout.
pub fn print_json(result: &CommandResult) -> anyhow::Result<()> {
    let mut report = JsonReport {
        unused_binding_methods: Vec::new(),
        unused_bindings: Vec::new(),
        banned_phrase_hits: Vec::new(),
        invalid_patterns: Vec::new(),
        duplicate_step_texts: Vec::new(),
        invalid_banlist_files: Vec::new(),
        parse_errors: Vec::new(),
        bindings_usage: &result.usage,
    };

    for issue in &result.issues {
        match issue {
            Issue::UnusedFunction(i) => report.unused_binding_methods.push(&i.method),
            Issue::UnusedBinding(i) => report.unused_bindings.push(JsonBinding {
                file: &i.location.file,
                line: i.location.line,
                column: i.location.column,
                keyword: i.keyword.to_string(),
                step_text: &i.pattern,
                method: &i.method,
            }),
            Issue::BannedPhrase(i) => report.banned_phrase_hits.push(JsonBannedHit {
                file: &i.location.file,
                line: i.location.line,
                column: i.location.column,
                severity: i.severity,
                message: &i.message,
                phrase: &i.phrase,
            }),
            Issue::InvalidPattern(i) => report.invalid_patterns.push(JsonInvalidPattern {
                file: &i.location.file,
                line: i.location.line,
                column: i.location.column,
                keyword: i.keyword.to_string(),
                step_text: &i.pattern,
                error: &i.error,
            }),
            Issue::DuplicateStepText(i) => report.duplicate_step_texts.push(JsonBinding {
                file: &i.location.file,
                line: i.location.line,
                column: i.location.column,
                keyword: i.keyword.to_string(),
                step_text: &i.pattern,
                method: &i.method,
            }),
            Issue::InvalidBanlist(i) => report.invalid_banlist_files.push(JsonFileError {
                file: &i.file_path,
                error: &i.error,
            }),
            Issue::ParseError(i) => report.parse_errors.push(JsonFileError {
                file: &i.file_path,
                error: &i.error,
            }),
        }
    }

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &report)?;
    let _ = writeln!(stdout);
    Ok(())
}
