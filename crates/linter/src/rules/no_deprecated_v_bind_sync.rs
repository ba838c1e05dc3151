//! vue/no-deprecated-v-bind-sync

use serde_json::Value;
use sfc::DirectiveArgument;

use crate::context::LintContext;
use crate::matcher::{DirectivePattern, Match, Pattern, Selector};
use crate::rule::{Rule, RuleCategory, RuleMeta};
use crate::utils::is_assignable;

const SYNC: DirectivePattern = DirectivePattern::new("bind").with_modifiers(&["sync"]);

/// no-deprecated-v-bind-sync rule
#[derive(Debug, Clone, Default)]
pub struct NoDeprecatedVBindSync;

impl RuleMeta for NoDeprecatedVBindSync {
    const NAME: &'static str = "no-deprecated-v-bind-sync";
    const CATEGORY: RuleCategory = RuleCategory::Essential;
    const DESCRIPTION: &'static str =
        "disallow use of deprecated `.sync` modifier on `v-bind` directive (in Vue.js 3.0.0+)";
    const FIXABLE: bool = true;
    const MESSAGES: &'static [(&'static str, &'static str)] = &[(
        "syncModifierIsDeprecated",
        "'.sync' modifier on 'v-bind' directive is deprecated. Use 'v-model:propName' instead.",
    )];

    fn from_options(_options: &[Value]) -> Result<Self, serde_json::Error> {
        Ok(Self)
    }
}

impl Rule for NoDeprecatedVBindSync {
    fn selectors(&self) -> Vec<Selector> {
        vec![Selector::enter(Pattern::Directive(SYNC))]
    }

    fn enter(&mut self, matched: &Match, ctx: &mut LintContext<'_, '_>) {
        let Some(attribute) = matched.attribute(ctx.ast()) else {
            return;
        };
        let Some(key) = attribute.directive_key() else {
            return;
        };

        let mut fixer = ctx.fixer();
        // `v-bind.sync="object"`, dynamic arguments and extra modifiers have
        // no `v-model` equivalent
        let assignable = attribute
            .expression()
            .and_then(|value| value.as_expression())
            .is_some_and(is_assignable);
        if let Some(DirectiveArgument::Static(argument)) = &key.argument {
            if key.modifiers.len() == 1 && assignable {
                fixer.replace(key.span, format!("v-model:{}", argument.name));
            }
        }
        let diagnostic = Self::diagnostic("syncModifierIsDeprecated", attribute.span, &[]);
        ctx.report(diagnostic.with_fix(fixer.build()));
    }
}
