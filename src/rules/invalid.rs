//! Invalid binding pattern detection.

use crate::core::binding::BindingRegistry;
use crate::issues::InvalidPatternIssue;

/// Report every binding whose declared pattern failed to compile, carrying
/// the regex engine's diagnostic verbatim.
pub fn check_invalid_patterns(registry: &BindingRegistry) -> Vec<InvalidPatternIssue> {
    let mut issues: Vec<InvalidPatternIssue> = registry
        .entries()
        .iter()
        .filter_map(|entry| {
            let error = entry.compiled.as_ref().err()?;
            Some(InvalidPatternIssue {
                location: entry.binding.location.clone(),
                keyword: entry.binding.keyword,
                pattern: entry.binding.pattern.clone(),
                error: error.message().to_string(),
            })
        })
        .collect();

    issues.sort_by(|a, b| {
        a.location
            .file
            .cmp(&b.location.file)
            .then_with(|| a.location.line.cmp(&b.location.line))
    });

    issues
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::binding::{BindingRecord, StepKeyword};

    fn registry(patterns: &[&str]) -> BindingRegistry {
        BindingRegistry::from_records(
            patterns
                .iter()
                .enumerate()
                .map(|(i, pattern)| BindingRecord {
                    method: format!("S.M{i}()"),
                    keyword: StepKeyword::Given,
                    pattern: pattern.to_string(),
                    file: "Steps.cs".to_string(),
                    line: i as u32 + 1,
                    column: 6,
                })
                .collect(),
        )
    }

    #[test]
    fn test_valid_patterns_produce_no_issues() {
        let registry = registry(&["^a$", r"(\d+)"]);
        assert!(check_invalid_patterns(&registry).is_empty());
    }

    #[test]
    fn test_invalid_pattern_carries_engine_diagnostic() {
        let registry = registry(&["^ok$", "a(b"]);
        let issues = check_invalid_patterns(&registry);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].pattern, "a(b");
        let expected = regex::Regex::new("a(b").unwrap_err().to_string();
        assert_eq!(issues[0].error, expected);
    }

    #[test]
    fn test_one_issue_per_invalid_binding() {
        let registry = registry(&["a(b", "[z", "ok"]);
        let issues = check_invalid_patterns(&registry);
        assert_eq!(issues.len(), 2);
    }
}
