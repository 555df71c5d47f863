use serde::Serialize;

use crate::core::binding::StepKeyword;
use crate::issues::Issue;

#[derive(Debug)]
pub enum CommandSummary {
    Check,
    Init(InitSummary),
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Per-binding usage counts, carried for the JSON report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingUsage {
    pub method: String,
    pub keyword: StepKeyword,
    pub step_text: String,
    pub count: u32,
}

/// Result of running steplint commands.
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Number of error-level issues; drives the exit code.
    pub error_count: usize,
    /// All issues found during the check, sorted.
    /// Empty for non-check commands.
    pub issues: Vec<Issue>,
    /// Number of feature files that failed to parse.
    pub parse_error_count: usize,
    /// Number of feature files that were scanned.
    pub feature_files_checked: usize,
    /// Number of banlist configuration files that were loaded.
    pub banlist_files_checked: usize,
    /// Number of bindings in the discovery feed.
    pub bindings_checked: usize,
    /// Per-binding usage counts (empty unless the unused check ran).
    pub usage: Vec<BindingUsage>,
}
