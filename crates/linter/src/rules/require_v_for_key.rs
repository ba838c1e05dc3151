//! vue/require-v-for-key

use serde_json::Value;
use sfc::{is_custom_component, NodeId, TemplateAst};

use crate::context::LintContext;
use crate::matcher::{ElementPattern, Match, Pattern, Selector};
use crate::rule::{Rule, RuleCategory, RuleMeta};

/// require-v-for-key rule
#[derive(Debug, Clone, Default)]
pub struct RequireVForKey;

impl RuleMeta for RequireVForKey {
    const NAME: &'static str = "require-v-for-key";
    const CATEGORY: RuleCategory = RuleCategory::Essential;
    const DESCRIPTION: &'static str = "require `v-bind:key` with `v-for` directives";
    const MESSAGES: &'static [(&'static str, &'static str)] = &[(
        "requireKey",
        "Elements in iteration expect to have 'v-bind:key' directives.",
    )];

    fn from_options(_options: &[Value]) -> Result<Self, serde_json::Error> {
        Ok(Self)
    }
}

impl RequireVForKey {
    fn check_key(ast: &TemplateAst<'_>, node: NodeId, ctx: &mut LintContext<'_, '_>) {
        let Some(element) = ast.element(node) else {
            return;
        };
        let has_key = element.directive("bind", Some("key")).is_some();
        if matches!(element.name.as_str(), "template" | "slot") {
            // a key on the `<template>` itself covers its children
            if has_key {
                return;
            }
            for &child in &element.children {
                Self::check_key(ast, child, ctx);
            }
        } else if !is_custom_component(element) && !has_key {
            ctx.report(Self::diagnostic("requireKey", element.start_tag.span, &[]));
        }
    }
}

impl Rule for RequireVForKey {
    fn selectors(&self) -> Vec<Selector> {
        vec![Selector::enter(Pattern::Element(ElementPattern::any().with_directive("for")))]
    }

    fn enter(&mut self, matched: &Match, ctx: &mut LintContext<'_, '_>) {
        let ast = ctx.ast();
        Self::check_key(ast, matched.node, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_utils::{lint_rule, messages};
    use serde_json::json;

    #[test]
    fn test_missing_key() {
        let source = r#"<template><ul><li v-for="item in items">{{ item }}</li></ul></template>"#;
        let diagnostics = lint_rule::<RequireVForKey>(source, json!([]));
        assert_eq!(
            messages(&diagnostics),
            ["Elements in iteration expect to have 'v-bind:key' directives."]
        );
        assert_eq!(
            &source[diagnostics[0].start as usize..diagnostics[0].end as usize],
            r#"<li v-for="item in items">"#
        );
    }

    #[test]
    fn test_accepted_forms() {
        let source = r#"<template><div>
  <li v-for="item in items" :key="item.id">{{ item }}</li>
  <li v-for="item in items" v-bind:key="item.id">{{ item }}</li>
  <MyItem v-for="item in items" />
  <template v-for="item in items" :key="item.id"><p>{{ item }}</p></template>
</div></template>"#;
        assert!(lint_rule::<RequireVForKey>(source, json!([])).is_empty());
    }

    #[test]
    fn test_template_children_are_checked() {
        let source = concat!(
            r#"<template><div><template v-for="item in items"><p>{{ item }}</p>"#,
            r#"<span :key="item">x</span></template></div></template>"#,
        );
        let diagnostics = lint_rule::<RequireVForKey>(source, json!([]));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            &source[diagnostics[0].start as usize..diagnostics[0].end as usize],
            "<p>"
        );
    }
}
