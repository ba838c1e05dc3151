//! vue/v-bind-style

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::LintContext;
use crate::matcher::{DirectivePattern, Match, Pattern, Selector};
use crate::rule::{option, Rule, RuleCategory, RuleMeta};
use crate::schema::OptionSchema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectiveStyle {
    #[default]
    Shorthand,
    Longform,
}

/// v-bind-style rule
#[derive(Debug, Clone, Default)]
pub struct VBindStyle {
    pub style: DirectiveStyle,
}

impl RuleMeta for VBindStyle {
    const NAME: &'static str = "v-bind-style";
    const CATEGORY: RuleCategory = RuleCategory::StronglyRecommended;
    const DESCRIPTION: &'static str = "enforce `v-bind` directive style";
    const FIXABLE: bool = true;
    const MESSAGES: &'static [(&'static str, &'static str)] = &[
        ("expectedLonghand", "Expected 'v-bind' before ':'."),
        ("unexpectedLonghand", "Unexpected 'v-bind' before ':'."),
        ("expectedLonghandForProp", "Expected 'v-bind:' instead of '.'."),
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

impl Rule for VBindStyle {
    fn selectors(&self) -> Vec<Selector> {
        vec![Selector::enter(Pattern::Directive(DirectivePattern::new("bind")))]
    }

    fn enter(&mut self, matched: &Match, ctx: &mut LintContext<'_, '_>) {
        let Some(attribute) = matched.attribute(ctx.ast()) else {
            return;
        };
        let Some(key) = attribute.directive_key() else {
            return;
        };
        // `v-bind="object"` has no shorthand
        let Some(argument) = &key.argument else {
            return;
        };
        let shorthand_prop = key.shorthand == Some('.');
        let shorthand = shorthand_prop || key.shorthand == Some(':');
        let prefer_shorthand = self.style == DirectiveStyle::Shorthand;
        if shorthand == prefer_shorthand {
            return;
        }

        let prefix = [key.span.start, argument.span().start];
        let mut fixer = ctx.fixer();
        let message_id = if prefer_shorthand {
            let prop = key.modifiers.iter().find(|m| m.name == "prop" && !m.span.is_empty());
            match prop {
                Some(prop) => {
                    fixer.replace_range(prefix, ".");
                    fixer.remove_range([prop.span.start - 1, prop.span.end]);
                }
                None => {
                    fixer.replace_range(prefix, ":");
                }
            }
            "unexpectedLonghand"
        } else if shorthand_prop {
            fixer.replace_range(prefix, "v-bind:");
            fixer.insert_text_after(argument.span(), ".prop");
            "expectedLonghandForProp"
        } else {
            fixer.insert_text_before(key.span, "v-bind");
            "expectedLonghand"
        };
        ctx.report(Self::diagnostic(message_id, attribute.span, &[]).with_fix(fixer.build()));
    }
}
