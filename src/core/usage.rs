//! Usage counting: how often each binding's pattern matches real steps.
//!
//! The keyword-inheritance rule ("And"/"But" reuse the nearest preceding
//! step's role) is sequential per container, so each container is folded in
//! file order. Parallelism happens across containers and files; partial
//! tallies merge by element-wise addition, which is associative and
//! commutative, so scheduling order never changes the totals.

use crate::core::binding::{BindingRegistry, StepKeyword};
use crate::core::feature::StepsContainer;

/// Hit counts per registry entry, indexed by entry position.
/// Starts at zero for every binding; only ever incremented.
pub type UsageTally = Vec<u32>;

/// A fresh all-zero tally sized to the registry.
pub fn new_tally(registry: &BindingRegistry) -> UsageTally {
    vec![0; registry.len()]
}

/// How a literal step keyword affects the inherited role.
enum LiteralKind {
    /// "And"/"But": reuse the current role.
    Inherit,
    /// A recognized role keyword.
    Set(StepKeyword),
    /// Outside the vocabulary (e.g. "*"): nothing can match until the
    /// next recognized keyword.
    Unknown,
}

fn classify(literal: &str) -> LiteralKind {
    match literal.trim().to_lowercase().as_str() {
        "and" | "but" => LiteralKind::Inherit,
        "given" => LiteralKind::Set(StepKeyword::Given),
        "when" => LiteralKind::Set(StepKeyword::When),
        "then" => LiteralKind::Set(StepKeyword::Then),
        _ => LiteralKind::Unknown,
    }
}

/// Fold one container's steps into the tally.
///
/// Every binding whose keyword equals the step's effective keyword (or is
/// `StepDefinition`) and whose pattern fully matches the step text is
/// credited once. Matching is non-exclusive: one step may credit several
/// bindings. Bindings with invalid patterns never match.
pub fn tally_container(registry: &BindingRegistry, container: &StepsContainer, tally: &mut [u32]) {
    let mut last_keyword: Option<StepKeyword> = None;

    for step in &container.steps {
        match classify(&step.keyword) {
            LiteralKind::Inherit => {}
            LiteralKind::Set(keyword) => last_keyword = Some(keyword),
            LiteralKind::Unknown => last_keyword = None,
        }

        let Some(effective) = last_keyword else {
            // A leading "And"/"But" has nothing to inherit; the step
            // contributes no matches.
            continue;
        };

        for (index, entry) in registry.entries().iter().enumerate() {
            let Some(pattern) = entry.pattern() else {
                continue;
            };
            let keyword = entry.binding.keyword;
            if keyword != effective && keyword != StepKeyword::StepDefinition {
                continue;
            }
            if pattern.is_full_match(&step.text) {
                tally[index] += 1;
            }
        }
    }
}

/// Merge a partial tally into an accumulator, element-wise.
pub fn merge_tallies(mut acc: UsageTally, other: &[u32]) -> UsageTally {
    for (slot, value) in acc.iter_mut().zip(other) {
        *slot += value;
    }
    acc
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::binding::{BindingRecord, BindingRegistry};
    use crate::core::feature::ScenarioStep;

    fn registry(bindings: &[(&str, StepKeyword, &str)]) -> BindingRegistry {
        BindingRegistry::from_records(
            bindings
                .iter()
                .map(|(method, keyword, pattern)| BindingRecord {
                    method: method.to_string(),
                    keyword: *keyword,
                    pattern: pattern.to_string(),
                    file: "Steps.cs".to_string(),
                    line: 1,
                    column: 1,
                })
                .collect(),
        )
    }

    fn container(steps: &[(&str, &str)]) -> StepsContainer {
        StepsContainer {
            name: "test".to_string(),
            steps: steps
                .iter()
                .enumerate()
                .map(|(i, (keyword, text))| ScenarioStep {
                    keyword: keyword.to_string(),
                    text: text.to_string(),
                    line: i + 1,
                })
                .collect(),
        }
    }

    #[test]
    fn test_given_binding_matches_given_step() {
        let registry = registry(&[("S.Bird()", StepKeyword::Given, r"^a (\w+) bird$")]);
        let container = container(&[("Given", "a red bird"), ("And", "it can fly")]);

        let mut tally = new_tally(&registry);
        tally_container(&registry, &container, &mut tally);

        // The "And" step inherits Given but "it can fly" does not match.
        assert_eq!(tally, vec![1]);
    }

    #[test]
    fn test_and_inherits_keyword_transitively() {
        let registry = registry(&[("S.Fly()", StepKeyword::Given, "^it can .+$")]);
        let container = container(&[
            ("Given", "a red bird"),
            ("And", "it can fly"),
            ("But", "it can not swim"),
        ]);

        let mut tally = new_tally(&registry);
        tally_container(&registry, &container, &mut tally);

        assert_eq!(tally, vec![2]);
    }

    #[test]
    fn test_keyword_change_stops_inheritance() {
        let registry = registry(&[("S.Fly()", StepKeyword::Given, "^it can fly$")]);
        let container = container(&[
            ("Given", "a red bird"),
            ("When", "I look up"),
            ("And", "it can fly"),
        ]);

        let mut tally = new_tally(&registry);
        tally_container(&registry, &container, &mut tally);

        // The And step now carries When, which the Given binding ignores.
        assert_eq!(tally, vec![0]);
    }

    #[test]
    fn test_step_definition_matches_any_keyword() {
        let registry = registry(&[("S.Any()", StepKeyword::StepDefinition, "^.*bird$")]);
        let container = container(&[
            ("Given", "a red bird"),
            ("When", "I spot a blue bird"),
            ("Then", "I log the bird"),
        ]);

        let mut tally = new_tally(&registry);
        tally_container(&registry, &container, &mut tally);

        assert_eq!(tally, vec![3]);
    }

    #[test]
    fn test_matching_is_non_exclusive() {
        let registry = registry(&[
            ("S.Color()", StepKeyword::Given, r"^a (\w+) bird$"),
            ("S.AnyBird()", StepKeyword::Given, "^a .+$"),
        ]);
        let container = container(&[("Given", "a red bird")]);

        let mut tally = new_tally(&registry);
        tally_container(&registry, &container, &mut tally);

        // Both patterns match; both are credited, no first-match-wins.
        assert_eq!(tally, vec![1, 1]);
    }

    #[test]
    fn test_leading_and_matches_nothing() {
        let registry = registry(&[("S.Any()", StepKeyword::StepDefinition, "^.*$")]);
        let container = container(&[("And", "a dangling step"), ("Given", "a real step")]);

        let mut tally = new_tally(&registry);
        tally_container(&registry, &container, &mut tally);

        assert_eq!(tally, vec![1]);
    }

    #[test]
    fn test_unknown_keyword_clears_inheritance() {
        let registry = registry(&[("S.Any()", StepKeyword::StepDefinition, "^.*$")]);
        let container = container(&[
            ("Given", "a red bird"),
            ("*", "a wildcard step"),
            ("And", "an inheriting step"),
        ]);

        let mut tally = new_tally(&registry);
        tally_container(&registry, &container, &mut tally);

        // Only the Given step matches; "*" and the And after it carry no role.
        assert_eq!(tally, vec![1]);
    }

    #[test]
    fn test_invalid_pattern_never_matches() {
        let registry = registry(&[
            ("S.Broken()", StepKeyword::Given, r"a(b"),
            ("S.Valid()", StepKeyword::Given, "^a red bird$"),
        ]);
        let container = container(&[("Given", "a red bird")]);

        let mut tally = new_tally(&registry);
        tally_container(&registry, &container, &mut tally);

        assert_eq!(tally, vec![0, 1]);
    }

    #[test]
    fn test_matching_requires_full_text() {
        let registry = registry(&[("S.Color()", StepKeyword::Given, "red")]);
        let container = container(&[("Given", "a red bird"), ("Given", "red")]);

        let mut tally = new_tally(&registry);
        tally_container(&registry, &container, &mut tally);

        // "red" is a substring of the first step but only the second step
        // is consumed entirely by the pattern.
        assert_eq!(tally, vec![1]);
    }

    #[test]
    fn test_merge_is_element_wise_addition() {
        let merged = merge_tallies(vec![1, 0, 2], &[0, 3, 1]);
        assert_eq!(merged, vec![1, 3, 3]);
    }

    #[test]
    fn test_tally_is_idempotent_across_runs() {
        let registry = registry(&[("S.Bird()", StepKeyword::Given, r"^a (\w+) bird$")]);
        let container = container(&[("Given", "a red bird"), ("And", "a blue bird")]);

        let mut first = new_tally(&registry);
        tally_container(&registry, &container, &mut first);
        let mut second = new_tally(&registry);
        tally_container(&registry, &container, &mut second);

        assert_eq!(first, second);
        assert_eq!(first, vec![2]);
    }
}
