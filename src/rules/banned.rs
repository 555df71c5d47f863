//! Banned-phrase scanning over declared binding patterns.
//!
//! The subject here is the pattern text the author wrote, not the Gherkin
//! step text the usage counter consumes. Regex validity of the binding
//! pattern is irrelevant: a broken pattern is still a string that can
//! contain a banned phrase.

use crate::banlist::BannedPhraseRule;
use crate::core::binding::BindingRegistry;
use crate::issues::BannedPhraseIssue;

/// Report every occurrence of every banned phrase in every binding's
/// declared pattern text. A pattern hit by N rules, or N times by one
/// rule, yields N issues.
pub fn check_banned_phrases(
    registry: &BindingRegistry,
    rules: &[BannedPhraseRule],
) -> Vec<BannedPhraseIssue> {
    let mut issues = Vec::new();

    for entry in registry.entries() {
        let binding = &entry.binding;
        for rule in rules {
            for hit in rule.matches(&binding.pattern) {
                issues.push(BannedPhraseIssue {
                    location: binding.location.clone(),
                    severity: rule.severity,
                    message: rule.display_message(),
                    phrase: rule.phrase.clone(),
                    pattern: binding.pattern.clone(),
                    match_start: hit.start(),
                });
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::binding::{BindingRecord, StepKeyword};
    use crate::issues::Severity;

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

    fn rule(phrase: &str, severity: Severity, ignore_case: bool) -> BannedPhraseRule {
        BannedPhraseRule::new(phrase, severity, None, ignore_case).unwrap()
    }

    #[test]
    fn test_each_occurrence_is_one_issue() {
        let registry = registry(&["bad Hello World Hello more text"]);
        let rules = vec![rule("Hello", Severity::Error, false)];

        let issues = check_banned_phrases(&registry, &rules);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.severity == Severity::Error));
        assert!(issues.iter().all(|i| i.message == "Banned phrase: Hello"));
        assert_eq!(issues[0].match_start, 4);
        assert_eq!(issues[1].match_start, 16);
    }

    #[test]
    fn test_multiple_rules_fire_independently() {
        let registry = registry(&["bad Hello World Hello more text"]);
        let rules = vec![
            rule("Hello", Severity::Error, false),
            rule("World", Severity::Warning, false),
        ];

        let issues = check_banned_phrases(&registry, &rules);
        assert_eq!(issues.len(), 3);
        assert_eq!(
            issues
                .iter()
                .filter(|i| i.severity == Severity::Error)
                .count(),
            2
        );
        assert_eq!(
            issues
                .iter()
                .filter(|i| i.severity == Severity::Warning)
                .count(),
            1
        );
    }

    #[test]
    fn test_no_match_emits_nothing() {
        let registry = registry(&["^a perfectly fine step$"]);
        let rules = vec![rule("Hello", Severity::Error, false)];
        assert!(check_banned_phrases(&registry, &rules).is_empty());
    }

    #[test]
    fn test_case_option_is_per_rule() {
        let registry = registry(&["say hello"]);
        let rules = vec![
            rule("HELLO", Severity::Error, false),
            rule("HELLO", Severity::Warning, true),
        ];

        let issues = check_banned_phrases(&registry, &rules);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_invalid_binding_pattern_is_still_scanned() {
        // The binding pattern is not a valid regex, but as a string it
        // still contains the banned phrase.
        let registry = registry(&["click the (button"]);
        assert!(registry.entries()[0].pattern().is_none());

        let rules = vec![rule("click", Severity::Info, false)];
        let issues = check_banned_phrases(&registry, &rules);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Info);
    }

    #[test]
    fn test_custom_message_is_used() {
        let registry = registry(&["please click here"]);
        let rules = vec![
            BannedPhraseRule::new(
                "click",
                Severity::Warning,
                Some("describe intent, not gestures".to_string()),
                false,
            )
            .unwrap(),
        ];

        let issues = check_banned_phrases(&registry, &rules);
        assert_eq!(issues[0].message, "describe intent, not gestures");
        assert_eq!(issues[0].phrase, "click");
    }

    #[test]
    fn test_no_rules_means_no_issues() {
        let registry = registry(&["anything at all"]);
        assert!(check_banned_phrases(&registry, &[]).is_empty());
    }
}
