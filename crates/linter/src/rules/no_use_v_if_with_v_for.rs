//! vue/no-use-v-if-with-v-for

use oxc_ast::ast::Expression;
use oxc_span::GetSpan;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sfc::DirectiveExpression;

use crate::context::LintContext;
use crate::matcher::{ElementPattern, Match, Pattern, Selector};
use crate::rule::{option, Rule, RuleCategory, RuleMeta};
use crate::schema::OptionSchema;
use crate::scope::BindingKind;
use crate::utils::without_parens;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NoUseVIfWithVForConfig {
    /// Accept a `v-if` that filters on the iteration variable
    pub allow_using_iteration_var: bool,
}

/// no-use-v-if-with-v-for rule
#[derive(Debug, Clone, Default)]
pub struct NoUseVIfWithVFor {
    pub config: NoUseVIfWithVForConfig,
}

impl RuleMeta for NoUseVIfWithVFor {
    const NAME: &'static str = "no-use-v-if-with-v-for";
    const CATEGORY: RuleCategory = RuleCategory::Essential;
    const DESCRIPTION: &'static str = "disallow using `v-if` on the same element as `v-for`";
    const MESSAGES: &'static [(&'static str, &'static str)] = &[
        (
            "movedToComputed",
            concat!(
                "The '{{iteratorName}}' {{kind}} inside 'v-for' directive should ",
                "be replaced with a computed property that returns filtered ",
                "array instead. You should not mix 'v-for' with 'v-if'.",
            ),
        ),
        ("movedToWrapper", "This 'v-if' should be moved to the wrapper element."),
    ];

    fn schema() -> OptionSchema {
        OptionSchema::Tuple(&[OptionSchema::Object(&[(
            "allowUsingIterationVar",
            OptionSchema::Bool,
        )])])
    }

    fn from_options(options: &[Value]) -> Result<Self, serde_json::Error> {
        Ok(Self {
            config: option(options, 0)?,
        })
    }
}

impl Rule for NoUseVIfWithVFor {
    fn selectors(&self) -> Vec<Selector> {
        vec![Selector::enter(Pattern::Element(ElementPattern::any().with_directive("for")))]
    }

    fn enter(&mut self, matched: &Match, ctx: &mut LintContext<'_, '_>) {
        let ast = ctx.ast();
        let Some(element) = matched.element(ast) else {
            return;
        };
        let (Some(v_if), Some(v_for)) =
            (element.directive("if", None), element.directive("for", None))
        else {
            return;
        };
        let Some(test) = v_if.expression().and_then(|value| value.as_expression()) else {
            return;
        };

        let scopes = ctx.scopes();
        let test_span = test.span();
        let uses_alias = scopes.all_references().any(|reference| {
            test_span.contains_inclusive(reference.span)
                && reference.resolved.is_some_and(|id| {
                    let binding = scopes.binding(id);
                    binding.kind == BindingKind::VForAlias && binding.node == Some(matched.node)
                })
        });

        if !uses_alias {
            ctx.report(Self::diagnostic("movedToWrapper", v_if.span, &[]));
            return;
        }
        if self.config.allow_using_iteration_var {
            return;
        }
        let Some(DirectiveExpression::For(for_expr)) = v_for.expression() else {
            return;
        };
        let (name, kind) = match without_parens(&for_expr.right) {
            Expression::Identifier(ident) => (ident.name.as_str(), "variable"),
            other => (ast.text(other.span()), "expression"),
        };
        ctx.report(Self::diagnostic(
            "movedToComputed",
            v_if.span,
            &[("iteratorName", name), ("kind", kind)],
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_utils::{lint_rule, messages};
    use serde_json::json;

    #[test]
    fn test_filtering_on_alias() {
        let source = concat!(
            "<template><ul>",
            r#"<li v-for="user in users" v-if="user.active" :key="user.id">"#,
            "{{ user }}</li></ul></template>",
        );
        let diagnostics = lint_rule::<NoUseVIfWithVFor>(source, json!([]));
        assert_eq!(
            messages(&diagnostics),
            [concat!(
                "The 'users' variable inside 'v-for' directive should be ",
                "replaced with a computed property that returns filtered array ",
                "instead. You should not mix 'v-for' with 'v-if'.",
            )]
        );
        let reported = &source[diagnostics[0].start as usize..diagnostics[0].end as usize];
        assert_eq!(reported, r#"v-if="user.active""#);

        let options = json!([{ "allowUsingIterationVar": true }]);
        assert!(lint_rule::<NoUseVIfWithVFor>(source, options).is_empty());
    }

    #[test]
    fn test_expression_source() {
        let source = concat!(
            r#"<template><ul><li v-for="x in list.items" v-if="x" :key="x">"#,
            "a</li></ul></template>",
        );
        let diagnostics = lint_rule::<NoUseVIfWithVFor>(source, json!([]));
        assert!(diagnostics[0].message.starts_with("The 'list.items' expression inside"));
    }

    #[test]
    fn test_unrelated_condition() {
        let source = concat!(
            "<template><ul>",
            r#"<li v-for="user in users" v-if="shown" :key="user.id">a</li>"#,
            "</ul></template>",
        );
        let options = json!([{ "allowUsingIterationVar": true }]);
        assert_eq!(
            messages(&lint_rule::<NoUseVIfWithVFor>(source, options)),
            ["This 'v-if' should be moved to the wrapper element."]
        );
    }
}
