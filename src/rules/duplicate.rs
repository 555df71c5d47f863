//! Duplicate step text detection.
//!
//! A function carrying several binding attributes with the same step text
//! should declare a single StepDefinition binding instead. StepDefinition
//! attributes themselves are never flagged - they are the suggested fix.

use std::collections::HashMap;

use crate::core::binding::{BindingRegistry, StepKeyword};
use crate::issues::DuplicateStepTextIssue;

/// Report every non-StepDefinition binding whose step text occurs more than
/// once on the same declaring function.
pub fn check_duplicate_step_text(registry: &BindingRegistry) -> Vec<DuplicateStepTextIssue> {
    // Occurrences of each (method, pattern) pair, counted over all entries.
    let mut occurrences: HashMap<(&str, &str), usize> = HashMap::new();
    for entry in registry.entries() {
        let key = (entry.binding.method.as_str(), entry.binding.pattern.as_str());
        *occurrences.entry(key).or_insert(0) += 1;
    }

    registry
        .entries()
        .iter()
        .filter(|entry| {
            entry.binding.keyword != StepKeyword::StepDefinition
                && occurrences[&(entry.binding.method.as_str(), entry.binding.pattern.as_str())] > 1
        })
        .map(|entry| DuplicateStepTextIssue {
            location: entry.binding.location.clone(),
            keyword: entry.binding.keyword,
            pattern: entry.binding.pattern.clone(),
            method: entry.binding.method.clone(),
        })
        .collect()
}
