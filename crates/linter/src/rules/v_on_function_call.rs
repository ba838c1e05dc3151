//! vue/v-on-function-call
//!
//! Enforce or forbid parentheses after method calls without arguments in
//! `v-on` handlers.

use oxc_ast::ast::{CallExpression, Expression, Statement};
use oxc_span::{GetSpan, Span};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sfc::DirectiveExpression;

use crate::context::LintContext;
use crate::matcher::{DirectivePattern, Match, Pattern, Selector};
use crate::rule::{option, Rule, RuleCategory, RuleMeta};
use crate::schema::OptionSchema;
use crate::utils::without_parens;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStyle {
    Always,
    #[default]
    Never,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VOnFunctionCallConfig {
    /// Leave `foo(/* comment */)` alone instead of reporting it without a fix
    pub ignore_includes_comment: bool,
}

/// v-on-function-call rule
#[derive(Debug, Clone, Default)]
pub struct VOnFunctionCall {
    pub style: CallStyle,
    pub config: VOnFunctionCallConfig,
}

impl RuleMeta for VOnFunctionCall {
    const NAME: &'static str = "v-on-function-call";
    const CATEGORY: RuleCategory = RuleCategory::Uncategorized;
    const DESCRIPTION: &'static str =
        "enforce or forbid parentheses after method calls without arguments in `v-on` directives";
    const FIXABLE: bool = true;
    const MESSAGES: &'static [(&'static str, &'static str)] = &[
        ("always", "Method calls inside of 'v-on' directives must have parentheses."),
        (
            "never",
            "Method calls without arguments inside of 'v-on' directives must not have parentheses.",
        ),
    ];

    fn schema() -> OptionSchema {
        OptionSchema::Tuple(&[
            OptionSchema::Enum(&["always", "never"]),
            OptionSchema::Object(&[("ignoreIncludesComment", OptionSchema::Bool)]),
        ])
    }

    fn from_options(options: &[Value]) -> Result<Self, serde_json::Error> {
        Ok(Self {
            style: option(options, 0)?,
            config: option(options, 1)?,
        })
    }
}

/// The single call a handler consists of, if any, and the end of the
/// statement holding it (past a trailing `;`)
fn single_call<'e, 'a>(
    value: &'e DirectiveExpression<'a>,
) -> Option<(&'e CallExpression<'a>, u32)> {
    let (expression, end) = match value {
        DirectiveExpression::Expression(expr) => (expr, expr.span().end),
        DirectiveExpression::Handler(statements) => {
            let mut statements = statements
                .iter()
                .filter(|statement| !matches!(statement, Statement::EmptyStatement(_)));
            let Some(Statement::ExpressionStatement(statement)) = statements.next() else {
                return None;
            };
            if statements.next().is_some() {
                return None;
            }
            (&statement.expression, statement.span.end)
        }
        _ => return None,
    };
    match without_parens(expression) {
        Expression::CallExpression(call) => Some((call, end)),
        _ => None,
    }
}

/// `foo` or `a.b.foo`
fn is_method_path(expr: &Expression<'_>) -> bool {
    match expr {
        Expression::Identifier(_) => true,
        Expression::StaticMemberExpression(member) => {
            !member.optional && is_method_path(&member.object)
        }
        _ => false,
    }
}

impl VOnFunctionCall {
    fn check_never(&self, call: &CallExpression<'_>, end: u32, ctx: &mut LintContext<'_, '_>) {
        if !call.arguments.is_empty() || call.optional || call.type_arguments.is_some() {
            return;
        }
        if !is_method_path(&call.callee) {
            return;
        }
        // an alias from `v-for` or a slot may not be a method
        if let Expression::Identifier(ident) = &call.callee {
            if ctx.scopes().resolved_at(ident.span).is_some_and(|b| b.kind.is_template_local()) {
                return;
            }
        }
        // covers a trailing `;`, so `save();` becomes `save`
        let parens = Span::new(call.callee.span().end, end);
        let text = ctx.span_text(parens);
        let has_comment = text.contains("/*") || text.contains("//");
        if has_comment && self.config.ignore_includes_comment {
            return;
        }
        let mut fixer = ctx.fixer();
        if !has_comment {
            fixer.remove(parens);
        }
        ctx.report(Self::diagnostic("never", call.span, &[]).with_fix(fixer.build()));
    }
}

impl Rule for VOnFunctionCall {
    fn selectors(&self) -> Vec<Selector> {
        vec![Selector::enter(Pattern::Directive(DirectivePattern::new("on")))]
    }

    fn enter(&mut self, matched: &Match, ctx: &mut LintContext<'_, '_>) {
        let Some(attribute) = matched.attribute(ctx.ast()) else {
            return;
        };
        if attribute.directive_key().is_none_or(|key| key.argument.is_none()) {
            return;
        }
        let Some(value) = attribute.expression() else {
            return;
        };
        match self.style {
            CallStyle::Always => {
                if let DirectiveExpression::Expression(Expression::Identifier(ident)) = value {
                    ctx.report(Self::diagnostic("always", ident.span, &[]));
                }
            }
            CallStyle::Never => {
                if let Some((call, end)) = single_call(value) {
                    self.check_never(call, end, ctx);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_utils::{fix_rule, lint_rule, messages};
    use serde_json::json;

    #[test]
    fn test_never() {
        let source = r#"<template><div>
  <button @click="save()">a</button>
  <button @click="store.reset( )">b</button>
  <button @click="load(1)">c</button>
  <button @click="save">d</button>
  <button @click="a(); b()">e</button>
  <button @click="reset();">f</button>
</div></template>"#;
        let diagnostics = lint_rule::<VOnFunctionCall>(source, json!(["never"]));
        let expected = concat!(
            "Method calls without arguments inside of 'v-on' directives ",
            "must not have parentheses.",
        );
        assert_eq!(messages(&diagnostics), [expected; 3]);
        let fixed = fix_rule::<VOnFunctionCall>(source, json!(["never"]));
        assert!(fixed.contains(r#"@click="save">a"#));
        assert!(fixed.contains(r#"@click="store.reset">b"#));
        assert!(fixed.contains(r#"@click="load(1)">c"#));
        assert!(fixed.contains(r#"@click="a(); b()">e"#));
        assert!(fixed.contains(r#"@click="reset">f"#));
    }

    #[test]
    fn test_comment_blocks_fix() {
        let source = r#"<template><button @click="save(/* later */)">a</button></template>"#;
        let diagnostics = lint_rule::<VOnFunctionCall>(source, json!([]));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].fix.is_none());

        let options = json!(["never", { "ignoreIncludesComment": true }]);
        assert!(lint_rule::<VOnFunctionCall>(source, options).is_empty());
    }

    #[test]
    fn test_aliases_are_not_methods() {
        let source = r#"<template><div v-for="fn in handlers">
<button @click="fn()">a</button>
</div></template>"#;
        assert!(lint_rule::<VOnFunctionCall>(source, json!(["never"])).is_empty());
    }

    #[test]
    fn test_always() {
        let source = r#"<template><div>
<button @click="save">a</button>
<button @click="save()">b</button>
</div></template>"#;
        let diagnostics = lint_rule::<VOnFunctionCall>(source, json!(["always"]));
        assert_eq!(
            messages(&diagnostics),
            ["Method calls inside of 'v-on' directives must have parentheses."]
        );
        assert!(diagnostics[0].fix.is_none());
    }
}
