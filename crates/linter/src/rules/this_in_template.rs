//! vue/this-in-template
//!
//! Template expressions are evaluated against the component instance, so
//! `this.` is redundant there. The `always` option requires it instead.

use oxc_ast::ast::{ComputedMemberExpression, Expression, Function, StaticMemberExpression};
use oxc_ast_visit::{walk, Visit};
use oxc_span::Span;
use oxc_syntax::scope::ScopeFlags;
use phf::phf_set;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::LintContext;
use crate::matcher::{ElementPattern, Match, Pattern, Selector};
use crate::rule::{option, Rule, RuleCategory, RuleMeta};
use crate::schema::OptionSchema;
use crate::utils::visit_node_expressions;

/// Globals a template expression may use without `this`
static TEMPLATE_GLOBALS: phf::Set<&'static str> = phf_set! {
    "Infinity", "undefined", "NaN", "isFinite", "isNaN", "parseFloat", "parseInt",
    "decodeURI", "decodeURIComponent", "encodeURI", "encodeURIComponent", "Math", "Number",
    "Date", "Array", "Object", "Boolean", "String", "RegExp", "Map", "Set", "JSON", "Intl",
    "BigInt", "console", "Error", "Symbol", "$event",
};

static RESERVED_WORDS: phf::Set<&'static str> = phf_set! {
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
    "import", "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw",
    "true", "try", "typeof", "var", "void", "while", "with", "yield", "let", "static",
    "implements", "interface", "package", "private", "protected", "public", "await",
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThisUsage {
    Always,
    #[default]
    Never,
}

/// this-in-template rule
#[derive(Debug, Clone, Default)]
pub struct ThisInTemplate {
    pub usage: ThisUsage,
}

impl RuleMeta for ThisInTemplate {
    const NAME: &'static str = "this-in-template";
    const CATEGORY: RuleCategory = RuleCategory::Recommended;
    const DESCRIPTION: &'static str = "disallow usage of `this` in template";
    const FIXABLE: bool = true;
    const MESSAGES: &'static [(&'static str, &'static str)] = &[
        ("unexpected", "Unexpected usage of 'this'."),
        ("expected", "Expected 'this'."),
    ];

    fn schema() -> OptionSchema {
        OptionSchema::Tuple(&[OptionSchema::Enum(&["always", "never"])])
    }

    fn from_options(options: &[Value]) -> Result<Self, serde_json::Error> {
        Ok(Self {
            usage: option(options, 0)?,
        })
    }
}

/// `this.name` found in an expression
struct ThisMember {
    member: Span,
    this: Span,
    property: String,
}

#[derive(Default)]
struct ThisMembers {
    found: Vec<ThisMember>,
}

impl<'a> Visit<'a> for ThisMembers {
    fn visit_static_member_expression(&mut self, expr: &StaticMemberExpression<'a>) {
        if let Expression::ThisExpression(this) = &expr.object {
            self.found.push(ThisMember {
                member: expr.span,
                this: this.span,
                property: expr.property.name.to_string(),
            });
        }
        walk::walk_static_member_expression(self, expr);
    }

    fn visit_computed_member_expression(&mut self, expr: &ComputedMemberExpression<'a>) {
        if let (Expression::ThisExpression(this), Expression::StringLiteral(lit)) =
            (&expr.object, &expr.expression)
        {
            self.found.push(ThisMember {
                member: expr.span,
                this: this.span,
                property: lit.value.to_string(),
            });
        }
        walk::walk_computed_member_expression(self, expr);
    }

    // `this` inside a regular function is not the component
    fn visit_function(&mut self, _func: &Function<'a>, _flags: ScopeFlags) {}
}

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        && !RESERVED_WORDS.contains(name)
}

impl ThisInTemplate {
    fn check_never(&self, matched: &Match, ctx: &mut LintContext<'_, '_>) {
        let ast = ctx.ast();
        let mut members = ThisMembers::default();
        visit_node_expressions(ast.node(matched.node), &mut members);

        let scopes = ctx.scopes();
        let scope = scopes.scope_of(ast, matched.node);
        for found in members.found {
            if !is_plain_identifier(&found.property) {
                continue;
            }
            // `this.item` next to a `v-for="item in ..."` alias means something else
            if scope.is_some_and(|scope| scopes.template_local(scope, &found.property).is_some()) {
                continue;
            }
            let mut fixer = ctx.fixer();
            fixer.replace(found.member, found.property);
            ctx.report(Self::diagnostic("unexpected", found.this, &[]).with_fix(fixer.build()));
        }
    }

    fn check_always(&self, ctx: &mut LintContext<'_, '_>) {
        let ast = ctx.ast();
        let Some(template) = ctx.descriptor().template else {
            return;
        };
        let template_span = ast.node(template).span;
        let scopes = ctx.scopes();
        for reference in scopes.all_references().filter(|r| r.in_template) {
            if TEMPLATE_GLOBALS.contains(reference.name.as_str()) {
                continue;
            }
            let local = reference.resolved.is_some_and(|id| {
                let binding = scopes.binding(id);
                binding.kind.is_template_local() || template_span.contains_inclusive(binding.span)
            });
            if !local {
                ctx.report(Self::diagnostic("expected", reference.span, &[]));
            }
        }
    }
}

impl Rule for ThisInTemplate {
    fn selectors(&self) -> Vec<Selector> {
        match self.usage {
            ThisUsage::Never => vec![
                Selector::enter(Pattern::Element(ElementPattern::any())),
                Selector::enter(Pattern::Interpolation),
            ],
            ThisUsage::Always => Vec::new(),
        }
    }

    fn enter(&mut self, matched: &Match, ctx: &mut LintContext<'_, '_>) {
        self.check_never(matched, ctx);
    }

    fn finish(&mut self, ctx: &mut LintContext<'_, '_>) {
        if self.usage == ThisUsage::Always {
            self.check_always(ctx);
        }
    }
}
