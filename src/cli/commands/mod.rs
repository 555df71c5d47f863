pub mod check;
mod command_result;

pub use command_result::*;

use crate::issues::{Issue, Severity};

pub fn finish(
    summary: CommandSummary,
    mut issues: Vec<Issue>,
    feature_files_checked: usize,
    banlist_files_checked: usize,
    bindings_checked: usize,
    usage: Vec<BindingUsage>,
) -> CommandResult {
    issues.sort();

    let parse_error_count = issues
        .iter()
        .filter(|i| matches!(i, Issue::ParseError(_)))
        .count();

    let error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();

    CommandResult {
        summary,
        error_count,
        issues,
        parse_error_count,
        feature_files_checked,
        banlist_files_checked,
        bindings_checked,
        usage,
    }
}
