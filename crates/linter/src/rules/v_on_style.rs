//! vue/v-on-style

use oxc_span::Span;
use serde_json::Value;

use crate::context::LintContext;
use crate::matcher::{DirectivePattern, Match, Pattern, Selector};
use crate::rule::{option, Rule, RuleCategory, RuleMeta};
use crate::rules::v_bind_style::DirectiveStyle;
use crate::schema::OptionSchema;

/// v-on-style rule
#[derive(Debug, Clone, Default)]
pub struct VOnStyle {
    pub style: DirectiveStyle,
}

impl RuleMeta for VOnStyle {
    const NAME: &'static str = "v-on-style";
    const CATEGORY: RuleCategory = RuleCategory::StronglyRecommended;
    const DESCRIPTION: &'static str = "enforce `v-on` directive style";
    const FIXABLE: bool = true;
    const MESSAGES: &'static [(&'static str, &'static str)] = &[
        ("expectedShorthand", "Expected '@' instead of 'v-on:'."),
        ("expectedLonghand", "Expected 'v-on:' instead of '@'."),
    ];

    fn schema() -> OptionSchema {
        OptionSchema::Tuple(&[OptionSchema::Enum(&["shorthand", "longform"])])
    }

    fn from_options(options: &[Value]) -> Result<Self, serde_json::Error> {
        Ok(Self {
            style: option(options, 0)?,
        })
    }
}

impl Rule for VOnStyle {
    fn selectors(&self) -> Vec<Selector> {
        vec![Selector::enter(Pattern::Directive(DirectivePattern::new("on")))]
    }

    fn enter(&mut self, matched: &Match, ctx: &mut LintContext<'_, '_>) {
        let Some(attribute) = matched.attribute(ctx.ast()) else {
            return;
        };
        let Some(key) = attribute.directive_key() else {
            return;
        };
        let Some(argument) = &key.argument else {
            return;
        };
        let shorthand = key.shorthand == Some('@');
        let prefer_shorthand = self.style == DirectiveStyle::Shorthand;
        if shorthand == prefer_shorthand {
            return;
        }

        let prefix = Span::new(key.span.start, argument.span().start);
        let mut fixer = ctx.fixer();
        let message_id = if prefer_shorthand {
            fixer.replace(prefix, "@");
            "expectedShorthand"
        } else {
            fixer.replace(prefix, "v-on:");
            "expectedLonghand"
        };
        ctx.report(Self::diagnostic(message_id, attribute.span, &[]).with_fix(fixer.build()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_utils::{fix_rule, lint_rule, messages};
    use serde_json::json;

    #[test]
    fn test_shorthand() {
        let source = concat!(
            "<template>",
            r#"<button v-on:click="go" @focus="f" v-on="handlers" v-on:[evt].stop="g">"#,
            "</button></template>",
        );
        let diagnostics = lint_rule::<VOnStyle>(source, json!(["shorthand"]));
        assert_eq!(messages(&diagnostics), ["Expected '@' instead of 'v-on:'."; 2]);
        assert_eq!(
            fix_rule::<VOnStyle>(source, json!([])),
            concat!(
                "<template>",
                r#"<button @click="go" @focus="f" v-on="handlers" @[evt].stop="g">"#,
                "</button></template>",
            )
        );
    }

    #[test]
    fn test_longform() {
        let source = r#"<template><button @click.prevent="go"></button></template>"#;
        let diagnostics = lint_rule::<VOnStyle>(source, json!(["longform"]));
        assert_eq!(messages(&diagnostics), ["Expected 'v-on:' instead of '@'."]);
        assert_eq!(
            fix_rule::<VOnStyle>(source, json!(["longform"])),
            r#"<template><button v-on:click.prevent="go"></button></template>"#
        );
    }
}
