//! Vue Lint OXC
//!
//! A Rust-based linter for single-file components using OXC. It parses the
//! component, runs the rules ported from eslint-plugin-vue in one pass over
//! the template and the script blocks, and can apply their fixes.
//!
//! ## Usage
//!
//! ```rust
//! use vue_lint_oxc::lint;
//!
//! let source = r#"<template><div foo="a" foo="b"></div></template>"#;
//! let result = lint(source);
//! for diagnostic in &result.diagnostics {
//!     println!("{}: {}", diagnostic.rule, diagnostic.message);
//! }
//! ```

pub use vue_linter::{
    fix_until_stable, lint, lint_with_config, ConfigError, Diagnostic, DiagnosticSeverity, Fix,
    FixResult, LintConfig, LintResult, RuleRegistry, Suggestion,
};

#[cfg(feature = "napi")]
use napi_derive::napi;

use sfc::LineIndex;

/// Parses a JSON configuration, or uses the `recommended` preset when there is none
pub fn load_config(config_json: Option<&str>) -> Result<LintConfig, ConfigError> {
    match config_json {
        Some(json) if !json.trim().is_empty() => LintConfig::from_json(json),
        _ => Ok(LintConfig::default()),
    }
}

/// Lints and fixes `source` until it is stable
pub fn fix(source: &str, config_json: Option<&str>) -> Result<FixResult, ConfigError> {
    let config = load_config(config_json)?;
    fix_until_stable(source, &config)
}

/// A diagnostic with one-based line and column, as hosts expect
#[derive(Debug, Clone)]
#[cfg_attr(feature = "napi", napi(object))]
pub struct LocatedDiagnostic {
    pub rule_id: String,
    pub message_id: Option<String>,
    pub message: String,
    /// "error" or "warning"
    pub severity: String,
    pub start: u32,
    pub end: u32,
    pub line: u32,
    pub column: u32,
    pub end_line: u32,
    pub end_column: u32,
    /// Edits of the automatic fix as JSON
    pub fix: Option<String>,
    /// Suggestions as `{ message, fix }` JSON
    pub suggestions: Vec<String>,
}

/// Output of [`lint_sfc`] and [`fix_sfc`]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "napi", napi(object))]
pub struct LintOutput {
    pub diagnostics: Vec<LocatedDiagnostic>,
    pub parse_errors: Vec<String>,
    /// Fixed source, when fixing was requested
    pub output: Option<String>,
}

fn locate(source: &str, result: &LintResult, output: Option<String>) -> LintOutput {
    let line_index = LineIndex::new(source);
    let diagnostics = result
        .diagnostics
        .iter()
        .map(|diagnostic| {
            let start = line_index.line_col(diagnostic.start);
            let end = line_index.line_col(diagnostic.end);
            LocatedDiagnostic {
                rule_id: format!("vue/{}", diagnostic.rule),
                message_id: diagnostic.message_id.clone(),
                message: diagnostic.message.clone(),
                severity: match diagnostic.severity {
                    DiagnosticSeverity::Error => "error".to_string(),
                    DiagnosticSeverity::Warning => "warning".to_string(),
                },
                start: diagnostic.start,
                end: diagnostic.end,
                line: start.line + 1,
                column: start.column + 1,
                end_line: end.line + 1,
                end_column: end.column + 1,
                fix: diagnostic
                    .fix
                    .as_ref()
                    .and_then(|fix| serde_json::to_string(&fix.edits).ok()),
                suggestions: diagnostic
                    .suggestions
                    .iter()
                    .filter_map(|suggestion| serde_json::to_string(suggestion).ok())
                    .collect(),
            }
        })
        .collect();
    LintOutput {
        diagnostics,
        parse_errors: result.parse_errors.iter().map(|e| e.message.clone()).collect(),
        output,
    }
}

/// Lints `source` and reports located diagnostics
pub fn lint_located(source: &str, config_json: Option<&str>) -> Result<LintOutput, ConfigError> {
    let config = load_config(config_json)?;
    let result = lint_with_config(source, &config)?;
    Ok(locate(source, &result, None))
}

/// Fixes `source` and reports what remains in the fixed text
pub fn fix_located(source: &str, config_json: Option<&str>) -> Result<LintOutput, ConfigError> {
    let fixed = fix(source, config_json)?;
    Ok(locate(&fixed.output, &fixed.result, Some(fixed.output.clone())))
}

/// Lint a single-file component
#[cfg(feature = "napi")]
#[napi]
pub fn lint_sfc(source: String, config_json: Option<String>) -> napi::Result<LintOutput> {
    lint_located(&source, config_json.as_deref())
        .map_err(|err| napi::Error::from_reason(err.to_string()))
}

/// Lint a single-file component and apply every fix
#[cfg(feature = "napi")]
#[napi]
pub fn fix_sfc(source: String, config_json: Option<String>) -> napi::Result<LintOutput> {
    fix_located(&source, config_json.as_deref())
        .map_err(|err| napi::Error::from_reason(err.to_string()))
}

/// Metadata of every rule as JSON
#[cfg(feature = "napi")]
#[napi]
pub fn rule_metadata() -> napi::Result<String> {
    let metadata: Vec<_> = RuleRegistry::all().iter().map(|entry| entry.metadata()).collect();
    serde_json::to_string(&metadata).map_err(|err| napi::Error::from_reason(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let output = lint_located(r#"<template><div foo="a" foo="b" /></template>"#, None).unwrap();
        assert_eq!(output.diagnostics.len(), 1);
        let diagnostic = &output.diagnostics[0];
        assert_eq!(diagnostic.rule_id, "vue/no-duplicate-attributes");
        assert_eq!(diagnostic.severity, "error");
        assert_eq!((diagnostic.line, diagnostic.column), (1, 24));
        assert!(output.output.is_none());
    }

    #[test]
    fn test_bad_config_is_an_error() {
        let config = r#"{ "rules": { "vue/nope": "error" } }"#;
        let err = lint_located("<template></template>", Some(config));
        assert!(err.is_err());
    }

    #[test]
    fn test_fix_located() {
        let config = r#"{ "rules": {
            "vue/v-on-style": "warn",
            "vue/mustache-interpolation-spacing": "warn"
        } }"#;
        let output = fix_located(
            "<template>\n  <button v-on:click=\"go\">{{label}}</button>\n</template>",
            Some(config),
        )
        .unwrap();
        assert_eq!(
            output.output.as_deref(),
            Some("<template>\n  <button @click=\"go\">{{ label }}</button>\n</template>")
        );
        assert!(output.diagnostics.is_empty());
    }
}
