//! Unused binding detection.
//!
//! Two granularities, both fed by the same tally:
//! - individual bindings (one keyword/pattern pair) with zero matches;
//! - binding functions whose bindings sum to zero matches, deduplicated by
//!   the declaring function's identity.

use std::collections::HashMap;

use crate::core::binding::BindingRegistry;
use crate::issues::{UnusedBindingIssue, UnusedFunctionIssue};

/// Check for individual bindings that no step ever matched.
///
/// Bindings whose pattern failed to compile are excluded: they are reported
/// as invalid patterns, not as unused.
pub fn check_unused_bindings(registry: &BindingRegistry, tally: &[u32]) -> Vec<UnusedBindingIssue> {
    let mut issues: Vec<UnusedBindingIssue> = registry
        .entries()
        .iter()
        .zip(tally)
        .filter(|(entry, count)| entry.pattern().is_some() && **count == 0)
        .map(|(entry, _)| UnusedBindingIssue {
            location: entry.binding.location.clone(),
            keyword: entry.binding.keyword,
            pattern: entry.binding.pattern.clone(),
            method: entry.binding.method.clone(),
        })
        .collect();

    // Sort by file path, then line for deterministic output
    issues.sort_by(|a, b| {
        a.location
            .file
            .cmp(&b.location.file)
            .then_with(|| a.location.line.cmp(&b.location.line))
            .then_with(|| a.pattern.cmp(&b.pattern))
    });

    issues
}

/// Check for binding functions none of whose bindings matched any step.
///
/// A function's usage is the sum over all of its bindings; invalid-pattern
/// bindings contribute zero. One issue per function, anchored at its first
/// declaration site.
pub fn check_unused_functions(
    registry: &BindingRegistry,
    tally: &[u32],
) -> Vec<UnusedFunctionIssue> {
    struct FunctionUsage {
        first_entry: usize,
        binding_count: usize,
        total: u64,
    }

    let mut functions: HashMap<&str, FunctionUsage> = HashMap::new();
    for (index, (entry, count)) in registry.entries().iter().zip(tally).enumerate() {
        let usage = functions
            .entry(entry.binding.method.as_str())
            .or_insert(FunctionUsage {
                first_entry: index,
                binding_count: 0,
                total: 0,
            });
        usage.binding_count += 1;
        usage.total += u64::from(*count);
    }

    let mut issues: Vec<UnusedFunctionIssue> = functions
        .into_iter()
        .filter(|(_, usage)| usage.total == 0)
        .map(|(method, usage)| {
            let binding = &registry.entries()[usage.first_entry].binding;
            UnusedFunctionIssue {
                location: binding.location.clone(),
                method: method.to_string(),
                binding_count: usage.binding_count,
            }
        })
        .collect();

    issues.sort_by(|a, b| {
        a.location
            .file
            .cmp(&b.location.file)
            .then_with(|| a.location.line.cmp(&b.location.line))
            .then_with(|| a.method.cmp(&b.method))
    });

    issues
}
