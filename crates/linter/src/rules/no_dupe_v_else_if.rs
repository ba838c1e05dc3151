//! vue/no-dupe-v-else-if
//!
//! A `v-else-if` branch whose condition is implied by the earlier branches of
//! its chain can never render.

use oxc_ast::ast::Expression;
use oxc_span::GetSpan;
use oxc_syntax::operator::LogicalOperator;
use serde_json::Value;
use sfc::Element;

use crate::context::LintContext;
use crate::matcher::{conditional_chain_before, ElementPattern, Match, Pattern, Selector};
use crate::rule::{Rule, RuleCategory, RuleMeta};
use crate::utils::{normalize_source, without_parens};

/// no-dupe-v-else-if rule
#[derive(Debug, Clone, Default)]
pub struct NoDupeVElseIf;

impl RuleMeta for NoDupeVElseIf {
    const NAME: &'static str = "no-dupe-v-else-if";
    const CATEGORY: RuleCategory = RuleCategory::Essential;
    const DESCRIPTION: &'static str =
        "disallow duplicate conditions in `v-if` / `v-else-if` chains";
    const MESSAGES: &'static [(&'static str, &'static str)] = &[(
        "unexpected",
        concat!(
            "This branch can never execute. ",
            "Its condition is a duplicate or covered by previous conditions ",
            "in the `v-if` / `v-else-if` chain.",
        ),
    )];

    fn from_options(_options: &[Value]) -> Result<Self, serde_json::Error> {
        Ok(Self)
    }
}

type Operands<'e, 'a> = Vec<&'e Expression<'a>>;

fn split<'e, 'a>(expr: &'e Expression<'a>, operator: LogicalOperator) -> Operands<'e, 'a> {
    match without_parens(expr) {
        Expression::LogicalExpression(logical) if logical.operator == operator => {
            let mut operands = split(&logical.left, operator);
            operands.extend(split(&logical.right, operator));
            operands
        }
        other => vec![other],
    }
}

/// `a || b && c` as `[[a], [b, c]]`
fn disjunction<'e, 'a>(expr: &'e Expression<'a>) -> Vec<Operands<'e, 'a>> {
    split(expr, LogicalOperator::Or)
        .into_iter()
        .map(|operand| split(operand, LogicalOperator::And))
        .collect()
}

/// Structural equality that treats `&&` and `||` as commutative
fn equal(a: &Expression<'_>, b: &Expression<'_>, source: &str) -> bool {
    let (a, b) = (without_parens(a), without_parens(b));
    if let (Expression::LogicalExpression(left), Expression::LogicalExpression(right)) = (a, b) {
        if left.operator == right.operator && left.operator != LogicalOperator::Coalesce {
            let same = equal(&left.left, &right.left, source)
                && equal(&left.right, &right.right, source);
            let swapped = equal(&left.left, &right.right, source)
                && equal(&left.right, &right.left, source);
            return same || swapped;
        }
    }
    let text = |expr: &Expression<'_>| {
        let span = expr.span();
        normalize_source(source.get(span.start as usize..span.end as usize).unwrap_or(""))
    };
    std::mem::discriminant(a) == std::mem::discriminant(b) && text(a) == text(b)
}

/// Every operand of `subset` appears in `superset`
fn is_subset(subset: &[&Expression<'_>], superset: &[&Expression<'_>], source: &str) -> bool {
    subset
        .iter()
        .all(|a| superset.iter().any(|b| equal(a, b, source)))
}

fn condition<'e, 'a>(element: &'e Element<'a>) -> Option<&'e Expression<'a>> {
    element
        .directive("if", None)
        .or_else(|| element.directive("else-if", None))?
        .expression()?
        .as_expression()
}

impl Rule for NoDupeVElseIf {
    fn selectors(&self) -> Vec<Selector> {
        vec![Selector::enter(Pattern::Element(ElementPattern::any().with_directive("else-if")))]
    }

    fn enter(&mut self, matched: &Match, ctx: &mut LintContext<'_, '_>) {
        let ast = ctx.ast();
        let source = ctx.source_text();
        let Some(test) = matched
            .element(ast)
            .and_then(|element| element.directive("else-if", None))
            .and_then(|attr| attr.expression())
            .and_then(|value| value.as_expression())
        else {
            return;
        };

        // each `&&` operand on its own narrows the branch, so the whole
        // condition is dead if any of them is
        let mut candidates = vec![test];
        if let Expression::LogicalExpression(logical) = without_parens(test) {
            if logical.operator == LogicalOperator::And {
                candidates = split(test, LogicalOperator::And);
                candidates.push(test);
            }
        }
        let mut remaining: Vec<Vec<Operands>> = candidates.into_iter().map(disjunction).collect();
        let or_operands = remaining.last().map_or(0, Vec::len);

        for previous in conditional_chain_before(ast, matched.node) {
            let Some(previous) = ast.element(previous).and_then(condition) else {
                continue;
            };
            let covered = disjunction(previous);
            for operands in &mut remaining {
                operands.retain(|operand| {
                    !covered.iter().any(|earlier| is_subset(earlier, operand, source))
                });
            }
            let unreachable = remaining.iter().any(Vec::is_empty);
            // an `||` operand already handled by an earlier branch is dead code too
            let redundant_operand = remaining.last().is_some_and(|own| own.len() < or_operands);
            if unreachable || redundant_operand {
                ctx.report(Self::diagnostic("unexpected", test.span(), &[]));
                return;
            }
        }
    }
}
