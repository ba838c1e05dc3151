//! vue/no-template-shadow
//!
//! `v-for` aliases and slot parameters must not reuse a name already visible
//! in the template: an outer alias, a `<script setup>` binding or a member
//! of the component options.

use rustc_hash::FxHashSet;
use serde_json::Value;

use crate::component::{component_object, declared_names};
use crate::context::LintContext;
use crate::rule::{Rule, RuleCategory, RuleMeta};

/// no-template-shadow rule
#[derive(Debug, Clone, Default)]
pub struct NoTemplateShadow;

impl RuleMeta for NoTemplateShadow {
    const NAME: &'static str = "no-template-shadow";
    const CATEGORY: RuleCategory = RuleCategory::StronglyRecommended;
    const DESCRIPTION: &'static str =
        "disallow variable declarations from shadowing variables declared in the outer scope";
    const MESSAGES: &'static [(&'static str, &'static str)] = &[(
        "alreadyDeclaredInUpperScope",
        "Variable '{{name}}' is already declared in the upper scope.",
    )];

    fn from_options(_options: &[Value]) -> Result<Self, serde_json::Error> {
        Ok(Self)
    }
}

impl Rule for NoTemplateShadow {
    fn finish(&mut self, ctx: &mut LintContext<'_, '_>) {
        let scopes = ctx.scopes();
        let component_members: FxHashSet<String> = ctx
            .descriptor()
            .script()
            .and_then(|script| component_object(&script.program, scopes))
            .map(|object| declared_names(object).into_iter().map(|(name, _)| name).collect())
            .unwrap_or_default();

        for binding in scopes.bindings().filter(|b| b.kind.is_template_local()) {
            let outer = scopes.scope(binding.scope).parent;
            let shadows = outer.is_some_and(|scope| scopes.resolve(scope, &binding.name).is_some())
                || component_members.contains(&binding.name);
            if shadows {
                ctx.report(Self::diagnostic(
                    "alreadyDeclaredInUpperScope",
                    binding.span,
                    &[("name", binding.name.as_str())],
                ));
            }
        }
    }
}
