//! Steplint - step binding auditor for BDD test suites
//!
//! Steplint is a CLI tool and library for auditing step bindings (functions
//! annotated with a Given/When/Then/StepDefinition keyword and a regex
//! pattern) against the Gherkin feature files that should exercise them.
//! It detects bindings that never match any step, binding patterns that
//! contain organization-banned phrases, and binding patterns that are not
//! valid regular expressions.
//!
//! ## Module Structure
//!
//! - `banlist`: Banned-phrase rules and configuration file loading
//! - `cli`: Command-line interface layer (user-facing commands and reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Core analysis engine (registry, feature feed, usage counting)
//! - `issues`: Issue type definitions and reporting
//! - `rules`: Detection rules producing user-facing issues

pub mod banlist;
pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod rules;
