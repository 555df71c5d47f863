//! Core analysis engine.
//!
//! The matching and counting logic here has no knowledge of how bindings or
//! feature syntax are physically discovered: bindings arrive through the
//! feed in `binding`, steps through the flattener in `feature`.

pub mod binding;
pub mod context;
pub mod feature;
pub mod file_scanner;
pub mod pattern;
pub mod usage;

pub use binding::{Binding, BindingEntry, BindingRegistry, SourceLocation, StepKeyword};
pub use context::{CheckContext, UsageData};
pub use feature::{FeatureSteps, ScenarioStep, StepsContainer};
pub use pattern::{CompiledPattern, PatternError};
pub use usage::UsageTally;
