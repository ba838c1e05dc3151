//! Lint rules for single-file components
//!
//! This crate provides template and script lint rules ported from
//! eslint-plugin-vue. Rules can be used:
//! 1. Standalone through [`lint`] / [`lint_with_config`] for custom tooling
//! 2. Rule by rule through [`RuleRegistry`] and [`LintRunner`]
//! 3. From a JS host through the napi binding of the root crate

pub mod component;
pub mod configs;
pub mod fixer;
pub mod matcher;
pub mod registry;
pub mod rule;
pub mod rules;
pub mod schema;
pub mod scope;
pub mod utils;
pub mod visitor;
pub mod well_known;
mod context;
mod diagnostic;

pub use configs::{ConfigError, LintConfig, RuleSetting, Severity};
pub use context::LintContext;
pub use diagnostic::{Diagnostic, DiagnosticSeverity, Edit, Fix, Suggestion};
pub use fixer::{apply_fixes, FixBuilder, FixedSource};
pub use registry::{RuleEntry, RuleRegistry};
pub use rule::{Rule, RuleCategory, RuleMeta, RuleMetadata};
pub use rules::*;
pub use schema::{OptionSchema, SchemaError};
pub use scope::ScopeTracker;
pub use visitor::{fix_until_stable, lint, lint_with_config, FixResult, LintResult, LintRunner};
