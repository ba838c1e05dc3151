//! vue/custom-event-name-casing
//!
//! Checks the literal event names passed to `$emit` in the template,
//! `this.$emit` in the options object, `emit` from `defineEmits()` and the
//! `emit` of the setup context. Renaming an event changes the listener name
//! a parent must use, so corrections are offered as suggestions only.

use oxc_ast::ast::{Argument, BindingPattern, CallExpression, Expression, Statement};
use oxc_ast_visit::{walk, Visit};
use oxc_span::Span;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::component::{component_object, option_function};
use crate::context::LintContext;
use crate::matcher::{ElementPattern, Match, Pattern, Selector};
use crate::rule::{option, Rule, RuleCategory, RuleMeta};
use crate::schema::OptionSchema;
use crate::scope::{BindingId, ScopeTracker};
use crate::utils::{
    is_camel_case, is_kebab_case, matches_any, to_camel_case, to_kebab_case, visit_node_expressions,
    without_parens,
};
use crate::well_known::is_api_call;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventCase {
    #[default]
    #[serde(rename = "camelCase")]
    CamelCase,
    #[serde(rename = "kebab-case")]
    KebabCase,
}

impl EventCase {
    fn name(self) -> &'static str {
        match self {
            Self::CamelCase => "camelCase",
            Self::KebabCase => "kebab-case",
        }
    }

    fn check(self, name: &str) -> bool {
        match self {
            Self::CamelCase => is_camel_case(name),
            Self::KebabCase => is_kebab_case(name),
        }
    }

    fn convert(self, name: &str) -> String {
        match self {
            Self::CamelCase => to_camel_case(name),
            Self::KebabCase => to_kebab_case(name),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomEventNameCasingConfig {
    /// Event names (or `/regex/` patterns) that are never reported
    pub ignores: Vec<String>,
}

/// A string literal passed as the event name
struct EmittedName {
    span: Span,
    name: String,
}

/// Finds emit calls with a literal event name
struct EmitCalls<'t> {
    scopes: &'t ScopeTracker,
    /// `emit` functions bound in script
    emit_bindings: &'t FxHashSet<BindingId>,
    /// setup context parameters, used as `context.emit(...)`
    context_bindings: &'t FxHashSet<BindingId>,
    found: Vec<EmittedName>,
}

impl EmitCalls<'_> {
    fn resolves_to(&self, span: Span, ids: &FxHashSet<BindingId>) -> bool {
        self.scopes.resolved_at(span).is_some_and(|b| ids.contains(&b.id))
    }

    fn is_emit_callee(&self, callee: &Expression<'_>) -> bool {
        match without_parens(callee) {
            Expression::Identifier(ident) => {
                (ident.name == "$emit" && self.scopes.resolved_at(ident.span).is_none())
                    || self.resolves_to(ident.span, self.emit_bindings)
            }
            Expression::StaticMemberExpression(member) => match without_parens(&member.object) {
                Expression::ThisExpression(_) => member.property.name == "$emit",
                Expression::Identifier(object) => {
                    member.property.name == "emit"
                        && self.resolves_to(object.span, self.context_bindings)
                }
                _ => false,
            },
            _ => false,
        }
    }
}

impl<'a> Visit<'a> for EmitCalls<'_> {
    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        if self.is_emit_callee(&call.callee) {
            if let Some(Argument::StringLiteral(lit)) = call.arguments.first() {
                self.found.push(EmittedName {
                    span: lit.span,
                    name: lit.value.to_string(),
                });
            }
        }
        walk::walk_call_expression(self, call);
    }
}

/// custom-event-name-casing rule
#[derive(Debug, Clone, Default)]
pub struct CustomEventNameCasing {
    pub case: EventCase,
    pub config: CustomEventNameCasingConfig,
    collected: bool,
    emit_bindings: FxHashSet<BindingId>,
    context_bindings: FxHashSet<BindingId>,
}

impl RuleMeta for CustomEventNameCasing {
    const NAME: &'static str = "custom-event-name-casing";
    const CATEGORY: RuleCategory = RuleCategory::Uncategorized;
    const DESCRIPTION: &'static str = "enforce specific casing for custom event name";
    const HAS_SUGGESTIONS: bool = true;
    const MESSAGES: &'static [(&'static str, &'static str)] = &[
        ("unexpected", "Custom event name '{{name}}' must be {{caseType}}."),
        ("rename", "Rename the event to '{{name}}'."),
    ];

    fn schema() -> OptionSchema {
        OptionSchema::Tuple(&[
            OptionSchema::Enum(&["camelCase", "kebab-case"]),
            OptionSchema::Object(&[("ignores", OptionSchema::StringArray)]),
        ])
    }

    fn from_options(options: &[Value]) -> Result<Self, serde_json::Error> {
        Ok(Self {
            case: option(options, 0)?,
            config: option(options, 1)?,
            ..Self::default()
        })
    }
}

impl CustomEventNameCasing {
    /// Collects the `emit` functions and setup contexts declared in script
    fn collect_bindings(&mut self, ctx: &LintContext<'_, '_>) {
        if std::mem::replace(&mut self.collected, true) {
            return;
        }
        let scopes = ctx.scopes();
        let descriptor = ctx.descriptor();

        if let Some(script) = descriptor.script_setup() {
            for statement in &script.program.body {
                let Statement::VariableDeclaration(decl) = statement else {
                    continue;
                };
                for declarator in &decl.declarations {
                    let (BindingPattern::BindingIdentifier(ident), Some(init)) =
                        (&declarator.id, &declarator.init)
                    else {
                        continue;
                    };
                    if is_api_call(scopes, init, &["defineEmits"]) {
                        if let Some(binding) = scopes.binding_at(ident.span) {
                            self.emit_bindings.insert(binding.id);
                        }
                    }
                }
            }
        }

        let setup = descriptor
            .script()
            .and_then(|script| component_object(&script.program, scopes))
            .and_then(|object| option_function(object, "setup"));
        let Some(context) = setup.as_ref().and_then(|setup| setup.params().items.get(1)) else {
            return;
        };
        match &context.pattern {
            BindingPattern::BindingIdentifier(ident) => {
                if let Some(binding) = scopes.binding_at(ident.span) {
                    self.context_bindings.insert(binding.id);
                }
            }
            BindingPattern::ObjectPattern(pattern) => {
                for property in &pattern.properties {
                    if property.key.static_name().as_deref() != Some("emit") {
                        continue;
                    }
                    if let BindingPattern::BindingIdentifier(ident) = &property.value {
                        if let Some(binding) = scopes.binding_at(ident.span) {
                            self.emit_bindings.insert(binding.id);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn emit_calls<'t>(&'t self, scopes: &'t ScopeTracker) -> EmitCalls<'t> {
        EmitCalls {
            scopes,
            emit_bindings: &self.emit_bindings,
            context_bindings: &self.context_bindings,
            found: Vec::new(),
        }
    }

    fn check_name(&self, emitted: EmittedName, ctx: &mut LintContext<'_, '_>) {
        let (prefix, event) = match emitted.name.strip_prefix("update:") {
            Some(rest) => ("update:", rest),
            None => ("", emitted.name.as_str()),
        };
        if event.is_empty()
            || self.case.check(event)
            || matches_any(&self.config.ignores, &emitted.name)
        {
            return;
        }

        let data = [("name", emitted.name.as_str()), ("caseType", self.case.name())];
        let mut diagnostic = Self::diagnostic("unexpected", emitted.span, &data);
        let renamed = format!("{prefix}{}", self.case.convert(event));
        if renamed != emitted.name {
            let quote = ctx.span_text(emitted.span).chars().next().unwrap_or('\'');
            let mut fixer = ctx.fixer();
            fixer.replace(emitted.span, format!("{quote}{renamed}{quote}"));
            let message =
                Self::diagnostic("rename", emitted.span, &[("name", renamed.as_str())]).message;
            diagnostic = diagnostic.with_suggestion(message, fixer.build());
        }
        ctx.report(diagnostic);
    }
}

impl Rule for CustomEventNameCasing {
    fn selectors(&self) -> Vec<Selector> {
        vec![
            Selector::enter(Pattern::Element(ElementPattern::any())),
            Selector::enter(Pattern::Interpolation),
        ]
    }

    fn enter(&mut self, matched: &Match, ctx: &mut LintContext<'_, '_>) {
        self.collect_bindings(ctx);
        let ast = ctx.ast();
        let mut calls = self.emit_calls(ctx.scopes());
        visit_node_expressions(ast.node(matched.node), &mut calls);
        for emitted in calls.found {
            self.check_name(emitted, ctx);
        }
    }

    fn check_script(&mut self, ctx: &mut LintContext<'_, '_>) {
        self.collect_bindings(ctx);
        let mut calls = self.emit_calls(ctx.scopes());
        for script in &ctx.descriptor().scripts {
            calls.visit_program(&script.program);
        }
        for emitted in calls.found {
            self.check_name(emitted, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_utils::{apply_suggestion, lint_rule, messages};
    use serde_json::json;

    #[test]
    fn test_template_emit() {
        let source = concat!(
            r#"<template><button @click="$emit('my-event')">"#,
            "{{ $emit('update:model-value') }}</button>",
            r#"<a @click="$emit('ok')" /></template>"#,
        );
        let diagnostics = lint_rule::<CustomEventNameCasing>(source, json!([]));
        assert_eq!(
            messages(&diagnostics),
            [
                "Custom event name 'my-event' must be camelCase.",
                "Custom event name 'update:model-value' must be camelCase.",
            ]
        );
        assert!(diagnostics.iter().all(|d| d.fix.is_none()));
        assert_eq!(diagnostics[0].suggestions[0].message, "Rename the event to 'myEvent'.");
        assert_eq!(
            apply_suggestion(source, &diagnostics[1], 0),
            concat!(
                r#"<template><button @click="$emit('my-event')">"#,
                "{{ $emit('update:modelValue') }}</button>",
                r#"<a @click="$emit('ok')" /></template>"#,
            )
        );
    }

    #[test]
    fn test_script_emitters() {
        let source = r#"<script>
export default {
  methods: {
    save() { this.$emit('saveDone') }
  },
  setup(props, { emit }) {
    emit('setupEvent')
  }
}
</script>
<script setup>
const emit = defineEmits(['fooBar'])
emit('fooBar')
const other = { emit() {} }
other.emit('not_checked')
</script>
<template><input @change="emit('changedValue')"></template>"#;
        let diagnostics = lint_rule::<CustomEventNameCasing>(source, json!(["kebab-case"]));
        assert_eq!(
            messages(&diagnostics),
            [
                "Custom event name 'saveDone' must be kebab-case.",
                "Custom event name 'setupEvent' must be kebab-case.",
                "Custom event name 'fooBar' must be kebab-case.",
                "Custom event name 'changedValue' must be kebab-case.",
            ]
        );
        assert_eq!(diagnostics[0].suggestions[0].message, "Rename the event to 'save-done'.");
    }

    #[test]
    fn test_context_emit_and_ignores() {
        let source = r#"<script>
export default {
  setup(props, context) {
    context.emit('my-change')
    context.emit('legacy_event')
  }
}
</script>"#;
        let options = json!(["camelCase", { "ignores": ["/^legacy_/"] }]);
        let diagnostics = lint_rule::<CustomEventNameCasing>(source, options);
        assert_eq!(messages(&diagnostics), ["Custom event name 'my-change' must be camelCase."]);
    }
}
