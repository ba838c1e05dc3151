//! vue/no-deprecated-v-on-number-modifiers
//!
//! Numeric key-code modifiers (`@keyup.13`) were removed in favor of key
//! name modifiers (`@keyup.enter`).

use phf::phf_map;
use serde_json::Value;

use crate::context::LintContext;
use crate::matcher::{DirectivePattern, Match, Pattern, Selector};
use crate::rule::{Rule, RuleCategory, RuleMeta};

/// `KeyboardEvent.keyCode` to the kebab-cased `KeyboardEvent.key` modifier
static KEY_CODE_TO_KEY: phf::Map<u32, &'static str> = phf_map! {
    8u32 => "backspace", 9u32 => "tab", 13u32 => "enter", 16u32 => "shift", 17u32 => "ctrl",
    18u32 => "alt", 19u32 => "pause", 20u32 => "caps-lock", 27u32 => "escape",
    32u32 => "space", 33u32 => "page-up", 34u32 => "page-down", 35u32 => "end",
    36u32 => "home", 37u32 => "arrow-left", 38u32 => "arrow-up", 39u32 => "arrow-right",
    40u32 => "arrow-down", 45u32 => "insert", 46u32 => "delete",
    65u32 => "a", 66u32 => "b", 67u32 => "c", 68u32 => "d", 69u32 => "e", 70u32 => "f",
    71u32 => "g", 72u32 => "h", 73u32 => "i", 74u32 => "j", 75u32 => "k", 76u32 => "l",
    77u32 => "m", 78u32 => "n", 79u32 => "o", 80u32 => "p", 81u32 => "q", 82u32 => "r",
    83u32 => "s", 84u32 => "t", 85u32 => "u", 86u32 => "v", 87u32 => "w", 88u32 => "x",
    89u32 => "y", 90u32 => "z", 91u32 => "meta", 93u32 => "context-menu",
    106u32 => "multiply", 107u32 => "add", 109u32 => "subtract", 110u32 => "decimal",
    111u32 => "divide", 112u32 => "f1", 113u32 => "f2", 114u32 => "f3", 115u32 => "f4",
    116u32 => "f5", 117u32 => "f6", 118u32 => "f7", 119u32 => "f8", 120u32 => "f9",
    121u32 => "f10", 122u32 => "f11", 123u32 => "f12", 144u32 => "num-lock",
    145u32 => "scroll-lock",
};

/// no-deprecated-v-on-number-modifiers rule
#[derive(Debug, Clone, Default)]
pub struct NoDeprecatedVOnNumberModifiers;

impl RuleMeta for NoDeprecatedVOnNumberModifiers {
    const NAME: &'static str = "no-deprecated-v-on-number-modifiers";
    const CATEGORY: RuleCategory = RuleCategory::Essential;
    const DESCRIPTION: &'static str =
        "disallow using deprecated number (keycode) modifiers (in Vue.js 3.0.0+)";
    const FIXABLE: bool = true;
    const MESSAGES: &'static [(&'static str, &'static str)] = &[(
        "numeralModifierDeprecated",
        concat!(
            "'KeyboardEvent.keyCode' modifier on 'v-on' directive is deprecated. ",
            "Using 'KeyboardEvent.key' instead.",
        ),
    )];

    fn from_options(_options: &[Value]) -> Result<Self, serde_json::Error> {
        Ok(Self)
    }
}

impl Rule for NoDeprecatedVOnNumberModifiers {
    fn selectors(&self) -> Vec<Selector> {
        vec![Selector::enter(Pattern::Directive(DirectivePattern::new("on")))]
    }

    fn enter(&mut self, matched: &Match, ctx: &mut LintContext<'_, '_>) {
        let Some(key) = matched.attribute(ctx.ast()).and_then(|attr| attr.directive_key()) else {
            return;
        };
        for modifier in &key.modifiers {
            if modifier.name.is_empty() || !modifier.name.bytes().all(|b| b.is_ascii_digit()) {
                continue;
            }
            let Ok(code) = modifier.name.parse::<u32>() else {
                continue;
            };
            // single digits are the `0`-`9` key names
            if code <= 9 {
                continue;
            }
            let mut fixer = ctx.fixer();
            if let Some(key_name) = KEY_CODE_TO_KEY.get(&code) {
                fixer.replace(modifier.span, *key_name);
            }
            ctx.report(
                Self::diagnostic("numeralModifierDeprecated", modifier.span, &[])
                    .with_fix(fixer.build()),
            );
        }
    }
}
