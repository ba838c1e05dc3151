//! vue/no-duplicate-attributes
//!
//! Disallow passing the same attribute twice on one element.
//!
//! `:foo` and `v-bind:foo` count as `foo`. By default a plain `class` and a
//! bound `:class` may coexist because the framework merges them; the same
//! holds for `style`.

use oxc_span::Span;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sfc::{Attribute, AttributeKey, DirectiveArgument};

use crate::context::LintContext;
use crate::matcher::{ElementPattern, Match, Pattern, Selector};
use crate::rule::{option, Rule, RuleCategory, RuleMeta};
use crate::schema::OptionSchema;

/// Configuration for no-duplicate-attributes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoDuplicateAttributesConfig {
    #[serde(default = "enabled")]
    pub allow_coexist_class: bool,
    #[serde(default = "enabled")]
    pub allow_coexist_style: bool,
}

fn enabled() -> bool {
    true
}

impl Default for NoDuplicateAttributesConfig {
    fn default() -> Self {
        Self {
            allow_coexist_class: true,
            allow_coexist_style: true,
        }
    }
}

/// no-duplicate-attributes rule
#[derive(Debug, Clone, Default)]
pub struct NoDuplicateAttributes {
    pub config: NoDuplicateAttributesConfig,
}

impl RuleMeta for NoDuplicateAttributes {
    const NAME: &'static str = "no-duplicate-attributes";
    const CATEGORY: RuleCategory = RuleCategory::Essential;
    const DESCRIPTION: &'static str = "disallow duplication of attributes";
    const MESSAGES: &'static [(&'static str, &'static str)] =
        &[("duplicateAttribute", "Duplicate attribute '{{name}}'.")];

    fn schema() -> OptionSchema {
        OptionSchema::Tuple(&[OptionSchema::Object(&[
            ("allowCoexistClass", OptionSchema::Bool),
            ("allowCoexistStyle", OptionSchema::Bool),
        ])])
    }

    fn from_options(options: &[Value]) -> Result<Self, serde_json::Error> {
        Ok(Self::with_config(option(options, 0)?))
    }
}

/// Name an attribute sets: the plain name, or the static argument of `v-bind`
fn attribute_name<'n>(attribute: &'n Attribute<'_>) -> Option<&'n str> {
    match &attribute.key {
        AttributeKey::Plain(ident) => Some(&ident.name),
        AttributeKey::Directive(key) if key.name.name == "bind" => match &key.argument {
            Some(DirectiveArgument::Static(ident)) => Some(&ident.name),
            _ => None,
        },
        AttributeKey::Directive(_) => None,
    }
}

impl NoDuplicateAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: NoDuplicateAttributesConfig) -> Self {
        Self { config }
    }

    fn may_coexist(&self, name: &str) -> bool {
        (self.config.allow_coexist_class && name == "class")
            || (self.config.allow_coexist_style && name == "style")
    }
}

impl Rule for NoDuplicateAttributes {
    fn selectors(&self) -> Vec<Selector> {
        vec![Selector::enter(Pattern::Element(ElementPattern::any()))]
    }

    fn enter(&mut self, matched: &Match, ctx: &mut LintContext<'_, '_>) {
        let Some(element) = matched.element(ctx.ast()) else {
            return;
        };
        let mut directives: FxHashMap<&str, Span> = FxHashMap::default();
        let mut plain: FxHashMap<&str, Span> = FxHashMap::default();

        for attribute in &element.start_tag.attributes {
            let Some(name) = attribute_name(attribute) else {
                continue;
            };
            let is_directive = attribute.is_directive();
            let first = if self.may_coexist(name) {
                if is_directive { directives.get(name) } else { plain.get(name) }
            } else {
                directives.get(name).or_else(|| plain.get(name))
            };
            if let Some(&first) = first {
                ctx.report(
                    Self::diagnostic("duplicateAttribute", attribute.span, &[("name", name)])
                        .with_label(first, "first occurrence"),
                );
            }
            let seen = if is_directive { &mut directives } else { &mut plain };
            seen.entry(name).or_insert(attribute.span);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_utils::{lint_rule, messages};
    use serde_json::json;

    #[test]
    fn test_config_defaults() {
        let config = NoDuplicateAttributesConfig::default();
        assert!(config.allow_coexist_class);
        assert!(config.allow_coexist_style);
    }

    #[test]
    fn test_config_deserialize() {
        let json = r#"{"allowCoexistClass": false}"#;
        let config: NoDuplicateAttributesConfig = serde_json::from_str(json).unwrap();
        assert!(!config.allow_coexist_class);
        assert!(config.allow_coexist_style);
    }

    #[test]
    fn test_duplicates() {
        let diagnostics = lint_rule::<NoDuplicateAttributes>(
            r#"<template><div foo="a" :foo="b" v-bind:bar="c" :bar="d" /></template>"#,
            json!([]),
        );
        assert_eq!(
            messages(&diagnostics),
            ["Duplicate attribute 'foo'.", "Duplicate attribute 'bar'."]
        );
        assert_eq!(diagnostics[0].labels.len(), 1);
    }

    #[test]
    fn test_class_and_style_coexist() {
        let source = r#"<template><div class="a" :class="b" style="c" :style="d" /></template>"#;
        assert!(lint_rule::<NoDuplicateAttributes>(source, json!([])).is_empty());

        let options = json!([{ "allowCoexistClass": false }]);
        let diagnostics = lint_rule::<NoDuplicateAttributes>(source, options);
        assert_eq!(messages(&diagnostics), ["Duplicate attribute 'class'."]);

        let twice = r#"<template><div class="a" class="b" /></template>"#;
        assert_eq!(lint_rule::<NoDuplicateAttributes>(twice, json!([])).len(), 1);
    }

    #[test]
    fn test_dynamic_arguments_are_ignored() {
        let source = concat!(
            r#"<template><div :[name]="a" :[name]="b" @click="c" @click="d" />"#,
            "</template>",
        );
        assert!(lint_rule::<NoDuplicateAttributes>(source, json!([])).is_empty());
    }
}
