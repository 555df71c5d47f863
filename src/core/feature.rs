//! Feature-file feed: flattens parsed Gherkin documents into ordered step
//! lists per scenario container.
//!
//! Parsing itself is delegated to the `gherkin` crate; this module only
//! reshapes its AST into the `(literal keyword, text)` pairs the usage
//! counter consumes. Keyword-inheritance is deliberately NOT resolved here -
//! the counter owns that rule and works from the literal keywords.

use std::path::Path;

use anyhow::{Result, anyhow};
use gherkin::GherkinEnv;

/// One step line, with its keyword exactly as written in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioStep {
    /// Literal leading keyword ("Given", "And", "But", ...).
    pub keyword: String,
    /// Trimmed natural-language step text, the match subject.
    pub text: String,
    pub line: usize,
}

/// One Scenario, Background, or Scenario Outline block.
///
/// Steps are in file order; the usage counter depends on that for keyword
/// inheritance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepsContainer {
    pub name: String,
    pub steps: Vec<ScenarioStep>,
}

/// All step containers of one feature file.
#[derive(Debug, Clone)]
pub struct FeatureSteps {
    pub path: String,
    pub containers: Vec<StepsContainer>,
}

/// Parse a feature file from disk and flatten it to step containers.
pub fn parse_feature_file(path: &Path) -> Result<FeatureSteps> {
    let feature = gherkin::Feature::parse_path(path, GherkinEnv::default())
        .map_err(|e| anyhow!("Failed to parse feature file {}: {}", path.display(), e))?;
    Ok(FeatureSteps {
        path: path.to_string_lossy().into_owned(),
        containers: flatten(&feature),
    })
}

/// Parse feature source text directly. Used by tests and embedders that
/// already hold the file contents.
pub fn parse_feature_str(source: &str, path: &str) -> Result<FeatureSteps> {
    let feature = gherkin::Feature::parse(source, GherkinEnv::default())
        .map_err(|e| anyhow!("Failed to parse feature file {}: {}", path, e))?;
    Ok(FeatureSteps {
        path: path.to_string(),
        containers: flatten(&feature),
    })
}

/// Flatten a parsed feature into its step containers: the feature-level
/// background, every scenario (outlines included, placeholders verbatim),
/// and the same again for each nested Rule block.
fn flatten(feature: &gherkin::Feature) -> Vec<StepsContainer> {
    let mut containers = Vec::new();

    if let Some(background) = &feature.background {
        containers.push(container(&background.name, &background.steps));
    }
    for scenario in &feature.scenarios {
        containers.push(container(&scenario.name, &scenario.steps));
    }
    for rule in &feature.rules {
        if let Some(background) = &rule.background {
            containers.push(container(&background.name, &background.steps));
        }
        for scenario in &rule.scenarios {
            containers.push(container(&scenario.name, &scenario.steps));
        }
    }

    containers
}

fn container(name: &str, steps: &[gherkin::Step]) -> StepsContainer {
    StepsContainer {
        name: name.to_string(),
        steps: steps
            .iter()
            .map(|step| ScenarioStep {
                keyword: step.keyword.trim().to_string(),
                text: step.value.trim().to_string(),
                line: step.position.line,
            })
            .collect(),
    }
}
