//! Banned-phrase rules.
//!
//! A rule is only ever constructed from a phrase that compiled as a regex
//! and a severity that parsed to a known level; `loader` enforces this and
//! drops everything else with a diagnostic.

pub mod loader;

use regex::Matches;

use crate::core::pattern::{self, CompiledPattern, PatternError};
use crate::issues::Severity;

/// One validated banned-phrase rule.
#[derive(Debug, Clone)]
pub struct BannedPhraseRule {
    pub phrase: String,
    pub severity: Severity,
    /// User-facing override text; `display_message` falls back to a
    /// generated default when absent.
    pub message: Option<String>,
    pub ignore_case: bool,
    pattern: CompiledPattern,
}

impl BannedPhraseRule {
    /// Build a rule, compiling the phrase with the rule's case option.
    pub fn new(
        phrase: &str,
        severity: Severity,
        message: Option<String>,
        ignore_case: bool,
    ) -> Result<Self, PatternError> {
        let pattern = pattern::validate_with(phrase, ignore_case)?;
        Ok(Self {
            phrase: phrase.to_string(),
            severity,
            message,
            ignore_case,
            pattern,
        })
    }

    /// All match occurrences of the phrase in the given text.
    pub fn matches<'r, 't>(&'r self, text: &'t str) -> Matches<'r, 't> {
        self.pattern.find_iter(text)
    }

    /// The configured message, or the generated default naming the phrase.
    pub fn display_message(&self) -> String {
        match &self.message {
            Some(message) if !message.is_empty() => message.clone(),
            _ => format!("Banned phrase: {}", self.phrase),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_rejects_invalid_phrase() {
        assert!(BannedPhraseRule::new("a(b", Severity::Error, None, false).is_err());
    }

    #[test]
    fn test_matches_are_global() {
        let rule = BannedPhraseRule::new("Hello", Severity::Error, None, false).unwrap();
        assert_eq!(rule.matches("bad Hello World Hello more text").count(), 2);
    }

    #[test]
    fn test_case_sensitivity_option() {
        let rule = BannedPhraseRule::new("hello", Severity::Warning, None, true).unwrap();
        assert_eq!(rule.matches("say Hello").count(), 1);

        let strict = BannedPhraseRule::new("hello", Severity::Warning, None, false).unwrap();
        assert_eq!(strict.matches("say Hello").count(), 0);
    }

    #[test]
    fn test_default_message_embeds_phrase() {
        let rule = BannedPhraseRule::new("click", Severity::Info, None, false).unwrap();
        assert_eq!(rule.display_message(), "Banned phrase: click");

        let custom = BannedPhraseRule::new(
            "click",
            Severity::Info,
            Some("do not describe UI gestures".to_string()),
            false,
        )
        .unwrap();
        assert_eq!(custom.display_message(), "do not describe UI gestures");
    }
}
