//! vue/valid-v-else

use serde_json::Value;

use crate::context::LintContext;
use crate::matcher::{
    conditional_of, prev_element_sibling, Conditional, DirectivePattern, Match, Pattern, Selector,
};
use crate::rule::{Rule, RuleCategory, RuleMeta};

/// valid-v-else rule
#[derive(Debug, Clone, Default)]
pub struct ValidVElse;

impl RuleMeta for ValidVElse {
    const NAME: &'static str = "valid-v-else";
    const CATEGORY: RuleCategory = RuleCategory::Essential;
    const DESCRIPTION: &'static str = "enforce valid `v-else` directives";
    const MESSAGES: &'static [(&'static str, &'static str)] = &[
        (
            "missingVIf",
            concat!(
                "'v-else' directives require being preceded by the element which ",
                "has a 'v-if' or 'v-else-if' directive.",
            ),
        ),
        (
            "withVIf",
            concat!(
                "'v-else' and 'v-if' directives can't exist on the same element. ",
                "You may want 'v-else-if' directives.",
            ),
        ),
        ("withVElseIf", "'v-else' and 'v-else-if' directives can't exist on the same element."),
        ("unexpectedArgument", "'v-else' directives require no argument."),
        ("unexpectedModifier", "'v-else' directives require no modifier."),
        ("unexpectedValue", "'v-else' directives require no attribute value."),
    ];

    fn from_options(_options: &[Value]) -> Result<Self, serde_json::Error> {
        Ok(Self)
    }
}

impl Rule for ValidVElse {
    fn selectors(&self) -> Vec<Selector> {
        vec![Selector::enter(Pattern::Directive(DirectivePattern::new("else")))]
    }

    fn enter(&mut self, matched: &Match, ctx: &mut LintContext<'_, '_>) {
        let ast = ctx.ast();
        let (Some(element), Some(attribute)) = (matched.element(ast), matched.attribute(ast)) else {
            return;
        };
        let Some(key) = attribute.directive_key() else {
            return;
        };

        let preceded = prev_element_sibling(ast, matched.node)
            .and_then(|prev| ast.element(prev))
            .and_then(conditional_of)
            .is_some_and(|kind| matches!(kind, Conditional::If | Conditional::ElseIf));
        let mut problems = Vec::new();
        if !preceded {
            problems.push("missingVIf");
        }
        if element.has_directive("if") {
            problems.push("withVIf");
        }
        if element.has_directive("else-if") {
            problems.push("withVElseIf");
        }
        if key.argument.is_some() {
            problems.push("unexpectedArgument");
        }
        if !key.modifiers.is_empty() {
            problems.push("unexpectedModifier");
        }
        if attribute.value.is_some() {
            problems.push("unexpectedValue");
        }
        for message_id in problems {
            ctx.report(Self::diagnostic(message_id, attribute.span, &[]));
        }
    }
}
