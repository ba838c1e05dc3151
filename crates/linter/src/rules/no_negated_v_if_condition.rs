//! vue/no-negated-v-if-condition

use oxc_ast::ast::Expression;
use oxc_span::{GetSpan, Span};
use oxc_syntax::operator::{BinaryOperator, UnaryOperator};
use serde_json::Value;
use sfc::{Element, TemplateAst};

use crate::context::LintContext;
use crate::fixer::FixBuilder;
use crate::matcher::{
    conditional_of, next_element_sibling, Conditional, ElementPattern, Match, Pattern, Selector,
};
use crate::rule::{Rule, RuleCategory, RuleMeta};
use crate::utils::without_parens;

/// no-negated-v-if-condition rule
#[derive(Debug, Clone, Default)]
pub struct NoNegatedVIfCondition;

impl RuleMeta for NoNegatedVIfCondition {
    const NAME: &'static str = "no-negated-v-if-condition";
    const CATEGORY: RuleCategory = RuleCategory::Uncategorized;
    const DESCRIPTION: &'static str = "disallow negated conditions in `v-if` with `v-else`";
    const HAS_SUGGESTIONS: bool = true;
    const MESSAGES: &'static [(&'static str, &'static str)] = &[
        ("negatedCondition", "Unexpected negated condition in v-if with v-else."),
        ("fixNegatedCondition", "Convert to positive condition and swap if/else blocks."),
    ];

    fn from_options(_options: &[Value]) -> Result<Self, serde_json::Error> {
        Ok(Self)
    }
}

fn is_negated(expr: &Expression<'_>) -> bool {
    match expr {
        Expression::UnaryExpression(unary) => unary.operator == UnaryOperator::LogicalNot,
        Expression::BinaryExpression(binary) => matches!(
            binary.operator,
            BinaryOperator::Inequality | BinaryOperator::StrictInequality
        ),
        _ => false,
    }
}

fn content(element: &Element<'_>) -> Option<Span> {
    Some(Span::new(element.start_tag.span.end, element.end_tag?.start))
}

/// Replaces the condition with its positive form
fn invert(expr: &Expression<'_>, ast: &TemplateAst<'_>, fixer: &mut FixBuilder) -> bool {
    match expr {
        Expression::UnaryExpression(unary) => {
            let argument = ast.text(without_parens(&unary.argument).span());
            fixer.replace(unary.span, argument);
            true
        }
        Expression::BinaryExpression(binary) => {
            let between = Span::new(binary.left.span().end, binary.right.span().start);
            let (negated, positive) = match binary.operator {
                BinaryOperator::StrictInequality => ("!==", "==="),
                _ => ("!=", "=="),
            };
            let Some(at) = ast.text(between).find(negated) else {
                return false;
            };
            let start = between.start + at as u32;
            fixer.replace(Span::new(start, start + negated.len() as u32), positive);
            true
        }
        _ => false,
    }
}

impl Rule for NoNegatedVIfCondition {
    fn selectors(&self) -> Vec<Selector> {
        vec![Selector::enter(Pattern::Element(ElementPattern::any().with_directive("if")))]
    }

    fn enter(&mut self, matched: &Match, ctx: &mut LintContext<'_, '_>) {
        let ast = ctx.ast();
        let Some(element) = matched.element(ast) else {
            return;
        };
        let Some(test) = element
            .directive("if", None)
            .and_then(|attr| attr.expression())
            .and_then(|value| value.as_expression())
        else {
            return;
        };
        let test = without_parens(test);
        if !is_negated(test) {
            return;
        }
        let Some(else_node) = next_element_sibling(ast, matched.node) else {
            return;
        };
        let Some(else_element) = ast.element(else_node) else {
            return;
        };
        if conditional_of(else_element) != Some(Conditional::Else) {
            return;
        }

        let bodies = content(element).zip(content(else_element));
        let suggestion = bodies.and_then(|(if_body, else_body)| {
            let mut fixer = ctx.fixer();
            if !invert(test, ast, &mut fixer) {
                return None;
            }
            fixer.replace(if_body, ast.text(else_body));
            fixer.replace(else_body, ast.text(if_body));
            fixer.build()
        });
        ctx.report(Self::diagnostic("negatedCondition", test.span(), &[]).with_suggestion(
            "Convert to positive condition and swap if/else blocks.",
            suggestion,
        ));
    }
}
