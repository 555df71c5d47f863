use std::collections::HashSet;

use anyhow::Result;
use clap::ValueEnum;

use super::super::args::CheckCommand;
use super::{BindingUsage, CommandResult, CommandSummary, finish};

use crate::{
    core::CheckContext,
    core::binding::BindingRegistry,
    issues::Issue,
    rules::{
        banned::check_banned_phrases, duplicate::check_duplicate_step_text,
        invalid::check_invalid_patterns, unused::check_unused_bindings,
        unused::check_unused_functions,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum CheckRule {
    Unused,
    Banned,
    InvalidPattern,
    Duplicate,
}

impl CheckRule {
    pub fn all() -> Vec<CheckRule> {
        vec![
            CheckRule::Unused,
            CheckRule::Banned,
            CheckRule::InvalidPattern,
            CheckRule::Duplicate,
        ]
    }
}

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = CheckContext::new(&cmd.args.common)?;

    let mut checks = if cmd.checks.is_empty() {
        CheckRule::all()
    } else {
        cmd.checks.clone()
    };
    let mut seen = HashSet::new();
    checks.retain(|c| seen.insert(*c));

    let mut all_issues: Vec<Issue> = Vec::new();
    let mut usage_report: Vec<BindingUsage> = Vec::new();

    for check in checks {
        match check {
            CheckRule::Unused => {
                let usage = ctx.usage();
                all_issues.extend(
                    check_unused_functions(&ctx.registry, &usage.tally)
                        .into_iter()
                        .map(Issue::UnusedFunction),
                );
                all_issues.extend(
                    check_unused_bindings(&ctx.registry, &usage.tally)
                        .into_iter()
                        .map(Issue::UnusedBinding),
                );
                all_issues.extend(usage.parse_errors.iter().cloned().map(Issue::ParseError));
                usage_report = binding_usage(&ctx.registry, &usage.tally);
            }
            CheckRule::Banned => {
                let banlist = ctx.banlist();
                all_issues.extend(banlist.issues.iter().cloned().map(Issue::InvalidBanlist));
                all_issues.extend(
                    check_banned_phrases(&ctx.registry, &banlist.rules)
                        .into_iter()
                        .map(Issue::BannedPhrase),
                );
            }
            CheckRule::InvalidPattern => {
                all_issues.extend(
                    check_invalid_patterns(&ctx.registry)
                        .into_iter()
                        .map(Issue::InvalidPattern),
                );
            }
            CheckRule::Duplicate => {
                all_issues.extend(
                    check_duplicate_step_text(&ctx.registry)
                        .into_iter()
                        .map(Issue::DuplicateStepText),
                );
            }
        }
    }

    Ok(finish(
        CommandSummary::Check,
        all_issues,
        ctx.feature_files.len(),
        ctx.banlist_files.len(),
        ctx.registry.len(),
        usage_report,
    ))
}

fn binding_usage(registry: &BindingRegistry, tally: &[u32]) -> Vec<BindingUsage> {
    registry
        .entries()
        .iter()
        .zip(tally)
        .map(|(entry, count)| BindingUsage {
            method: entry.binding.method.clone(),
            keyword: entry.binding.keyword,
            step_text: entry.binding.pattern.clone(),
            count: *count,
        })
        .collect()
}
