//! vue/no-unused-vars
//!
//! Reports `v-for` aliases and slot parameters that are never read. Only the
//! trailing run of unused names is reported, since a positional alias such as
//! `item` in `(item, index)` cannot be dropped on its own.

use regex::Regex;
use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::LintContext;
use crate::rule::{option, Rule, RuleCategory, RuleMeta};
use crate::schema::OptionSchema;
use crate::scope::Binding;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NoUnusedVarsConfig {
    /// Names matching this regular expression are never reported
    pub ignore_pattern: Option<String>,
}

/// no-unused-vars rule
#[derive(Debug, Clone, Default)]
pub struct NoUnusedVars {
    ignore: Option<Regex>,
}

impl RuleMeta for NoUnusedVars {
    const NAME: &'static str = "no-unused-vars";
    const CATEGORY: RuleCategory = RuleCategory::Essential;
    const DESCRIPTION: &'static str =
        "disallow unused variable definitions of v-for directives or scope attributes";
    const HAS_SUGGESTIONS: bool = true;
    const MESSAGES: &'static [(&'static str, &'static str)] = &[
        ("unusedVariable", "'{{name}}' is defined but never used."),
        ("replaceWithUnderscore", "Replace `{{name}}` with `_{{name}}`."),
    ];

    fn schema() -> OptionSchema {
        OptionSchema::Tuple(&[OptionSchema::Object(&[("ignorePattern", OptionSchema::String)])])
    }

    fn from_options(options: &[Value]) -> Result<Self, serde_json::Error> {
        let config: NoUnusedVarsConfig = option(options, 0)?;
        let ignore = config
            .ignore_pattern
            .as_deref()
            .map(Regex::new)
            .transpose()
            .map_err(serde_json::Error::custom)?;
        Ok(Self { ignore })
    }
}

impl NoUnusedVars {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_ignored(&self, name: &str) -> bool {
        self.ignore.as_ref().is_some_and(|re| re.is_match(name))
    }

    fn report(&self, binding: &Binding, ctx: &mut LintContext<'_, '_>) {
        let data = [("name", binding.name.as_str())];
        let mut diagnostic = Self::diagnostic("unusedVariable", binding.span, &data);
        let prefixed = format!("_{}", binding.name);
        if self.is_ignored(&prefixed) {
            let mut fixer = ctx.fixer();
            fixer.replace(binding.span, prefixed);
            let message = Self::diagnostic("replaceWithUnderscore", binding.span, &data).message;
            diagnostic = diagnostic.with_suggestion(message, fixer.build());
        }
        ctx.report(diagnostic);
    }
}

impl Rule for NoUnusedVars {
    fn finish(&mut self, ctx: &mut LintContext<'_, '_>) {
        let scopes = ctx.scopes();
        let locals: Vec<&Binding> =
            scopes.bindings().filter(|b| b.kind.is_template_local()).collect();
        // aliases of one element are declared together
        for group in locals.chunk_by(|a, b| a.node == b.node) {
            for binding in group.iter().rev() {
                if scopes.is_referenced(binding.id) {
                    break;
                }
                if self.is_ignored(&binding.name) {
                    continue;
                }
                self.report(binding, ctx);
            }
        }
    }
}
