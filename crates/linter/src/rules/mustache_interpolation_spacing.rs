//! vue/mustache-interpolation-spacing

use oxc_span::Span;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sfc::NodeKind;

use crate::context::LintContext;
use crate::matcher::{Match, Pattern, Selector};
use crate::rule::{option, Rule, RuleCategory, RuleMeta};
use crate::schema::OptionSchema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    #[default]
    Always,
    Never,
}

/// mustache-interpolation-spacing rule
#[derive(Debug, Clone, Default)]
pub struct MustacheInterpolationSpacing {
    pub spacing: Spacing,
}

impl RuleMeta for MustacheInterpolationSpacing {
    const NAME: &'static str = "mustache-interpolation-spacing";
    const CATEGORY: RuleCategory = RuleCategory::StronglyRecommended;
    const DESCRIPTION: &'static str = "enforce unified spacing in mustache interpolations";
    const FIXABLE: bool = true;
    const MESSAGES: &'static [(&'static str, &'static str)] = &[
        ("expectedSpaceAfter", "Expected 1 space after '{{', but not found."),
        ("expectedSpaceBefore", "Expected 1 space before '}}', but not found."),
        ("unexpectedSpaceAfter", "Expected no space after '{{', but found."),
        ("unexpectedSpaceBefore", "Expected no space before '}}', but found."),
    ];

    fn schema() -> OptionSchema {
        OptionSchema::Tuple(&[OptionSchema::Enum(&["always", "never"])])
    }

    fn from_options(options: &[Value]) -> Result<Self, serde_json::Error> {
        Ok(Self {
            spacing: option(options, 0)?,
        })
    }
}

impl Rule for MustacheInterpolationSpacing {
    fn selectors(&self) -> Vec<Selector> {
        vec![Selector::enter(Pattern::Interpolation)]
    }

    fn enter(&mut self, matched: &Match, ctx: &mut LintContext<'_, '_>) {
        let ast = ctx.ast();
        let NodeKind::Interpolation(interpolation) = &ast.node(matched.node).kind else {
            return;
        };
        if interpolation.expression.is_none() {
            return;
        }
        let (open, close) = (interpolation.open, interpolation.close);
        let inner = ast.text(Span::new(open.end, close.start));
        let first = open.end + (inner.len() - inner.trim_start().len()) as u32;
        let last = close.start - (inner.len() - inner.trim_end().len()) as u32;

        match self.spacing {
            Spacing::Always => {
                if first == open.end {
                    let mut fixer = ctx.fixer();
                    fixer.insert_text_after(open, " ");
                    ctx.report(
                        Self::diagnostic("expectedSpaceAfter", Span::new(open.start, first), &[])
                            .with_fix(fixer.build()),
                    );
                }
                if last == close.start {
                    let mut fixer = ctx.fixer();
                    fixer.insert_text_before(close, " ");
                    ctx.report(
                        Self::diagnostic("expectedSpaceBefore", Span::new(last, close.end), &[])
                            .with_fix(fixer.build()),
                    );
                }
            }
            Spacing::Never => {
                if first != open.end {
                    let mut fixer = ctx.fixer();
                    fixer.remove_range([open.end, first]);
                    ctx.report(
                        Self::diagnostic("unexpectedSpaceAfter", Span::new(open.start, first), &[])
                            .with_fix(fixer.build()),
                    );
                }
                if last != close.start {
                    let mut fixer = ctx.fixer();
                    fixer.remove_range([last, close.start]);
                    ctx.report(
                        Self::diagnostic("unexpectedSpaceBefore", Span::new(last, close.end), &[])
                            .with_fix(fixer.build()),
                    );
                }
            }
        }
    }
}
