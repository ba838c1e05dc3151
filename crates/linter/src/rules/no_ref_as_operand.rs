//! vue/no-ref-as-operand
//!
//! A ref object used directly as an operand, a condition or a callee is
//! almost always a missing `.value`. Template expressions unwrap refs
//! automatically and are not checked.

use oxc_ast::ast::{BindingPattern, Expression, VariableDeclarator};
use oxc_ast_visit::{walk, Visit};
use oxc_span::Span;
use serde_json::Value;

use crate::context::LintContext;
use crate::rule::{Rule, RuleCategory, RuleMeta};
use crate::scope::{ScopeTracker, Usage};
use crate::utils::without_parens;
use crate::well_known::api_call;

/// Framework functions whose result is a ref
const REF_APIS: &[&str] = &[
    "ref", "shallowRef", "computed", "customRef", "toRef", "defineModel",
];

/// A variable initialized with a ref
struct TrackedRef {
    declared: Span,
    method: &'static str,
}

struct RefDeclarations<'t> {
    scopes: &'t ScopeTracker,
    found: Vec<TrackedRef>,
}

impl RefDeclarations<'_> {
    fn ref_method(&self, init: &Expression<'_>, names: &[&'static str]) -> Option<&'static str> {
        match without_parens(init) {
            Expression::CallExpression(call) => api_call(self.scopes, call, names),
            Expression::TSAsExpression(expr) => self.ref_method(&expr.expression, names),
            Expression::TSNonNullExpression(expr) => self.ref_method(&expr.expression, names),
            _ => None,
        }
    }
}

impl<'a> Visit<'a> for RefDeclarations<'_> {
    fn visit_variable_declarator(&mut self, decl: &VariableDeclarator<'a>) {
        if let Some(init) = &decl.init {
            match &decl.id {
                BindingPattern::BindingIdentifier(ident) => {
                    if let Some(method) = self.ref_method(init, REF_APIS) {
                        self.found.push(TrackedRef {
                            declared: ident.span,
                            method,
                        });
                    }
                }
                // const { a, b } = toRefs(state)
                BindingPattern::ObjectPattern(pattern) => {
                    if let Some(method) = self.ref_method(init, &["toRefs"]) {
                        for property in &pattern.properties {
                            if let BindingPattern::BindingIdentifier(ident) = &property.value {
                                self.found.push(TrackedRef {
                                    declared: ident.span,
                                    method,
                                });
                            }
                        }
                    }
                }
                _ => {}
            }
        }
        walk::walk_variable_declarator(self, decl);
    }
}

/// no-ref-as-operand rule
#[derive(Debug, Clone, Default)]
pub struct NoRefAsOperand;

impl RuleMeta for NoRefAsOperand {
    const NAME: &'static str = "no-ref-as-operand";
    const CATEGORY: RuleCategory = RuleCategory::Essential;
    const DESCRIPTION: &'static str =
        "disallow use of value wrapped by `ref()` (Composition API) as an operand";
    const FIXABLE: bool = true;
    const HAS_SUGGESTIONS: bool = true;
    const MESSAGES: &'static [(&'static str, &'static str)] = &[
        (
            "requireDotValue",
            "Must use `.value` to read or write the value wrapped by `{{method}}()`.",
        ),
        ("wrapWithUnref", "Wrap `{{name}}` with `unref()`."),
    ];

    fn from_options(_options: &[Value]) -> Result<Self, serde_json::Error> {
        Ok(Self)
    }
}

impl Rule for NoRefAsOperand {
    fn check_script(&mut self, ctx: &mut LintContext<'_, '_>) {
        let scopes = ctx.scopes();
        let mut declarations = RefDeclarations {
            scopes,
            found: Vec::new(),
        };
        for script in &ctx.descriptor().scripts {
            declarations.visit_program(&script.program);
        }

        for tracked in declarations.found {
            let Some(binding) = scopes.binding_at(tracked.declared) else {
                continue;
            };
            // a reassigned variable may no longer hold a ref
            let maybe_ref = scopes.references(binding.id).any(|r| r.usage == Usage::Write);
            for reference in scopes.references(binding.id) {
                if reference.in_template
                    || !matches!(reference.usage, Usage::Operand | Usage::Call)
                {
                    continue;
                }
                let diagnostic = Self::diagnostic(
                    "requireDotValue",
                    reference.span,
                    &[("method", tracked.method)],
                );
                let mut fixer = ctx.fixer();
                if maybe_ref {
                    fixer.replace(reference.span, format!("unref({})", reference.name));
                    let data = [("name", reference.name.as_str())];
                    let message = Self::diagnostic("wrapWithUnref", reference.span, &data).message;
                    ctx.report(diagnostic.with_suggestion(message, fixer.build()));
                } else {
                    fixer.insert_text_after(reference.span, ".value");
                    ctx.report(diagnostic.with_fix(fixer.build()));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_utils::{apply_suggestion, fix_rule, lint_rule, messages};
    use serde_json::json;

    #[test]
    fn test_operands_and_conditions() {
        let source = r#"<script setup>
import { ref, computed } from 'vue'
const count = ref(0)
const double = computed(() => count.value * 2)
if (count) {}
const next = count + 1
count++
console.log(double.value, `${double}`)
</script>
<template><p>{{ count + 1 }}</p></template>"#;
        let diagnostics = lint_rule::<NoRefAsOperand>(source, json!([]));
        assert_eq!(
            messages(&diagnostics),
            [
                "Must use `.value` to read or write the value wrapped by `ref()`.",
                "Must use `.value` to read or write the value wrapped by `ref()`.",
                "Must use `.value` to read or write the value wrapped by `ref()`.",
                "Must use `.value` to read or write the value wrapped by `computed()`.",
            ]
        );
        let fixed = fix_rule::<NoRefAsOperand>(source, json!([]));
        assert!(fixed.contains("if (count.value) {}"));
        assert!(fixed.contains("const next = count.value + 1"));
        assert!(fixed.contains("count.value++"));
        assert!(fixed.contains("`${double.value}`"));
        assert!(fixed.contains("{{ count + 1 }}"));
    }

    #[test]
    fn test_to_refs_and_options_setup() {
        let source = r#"<script>
import { toRefs, shallowRef } from 'vue'
export default {
  setup(props) {
    const { title } = toRefs(props)
    const handler = shallowRef(() => {})
    handler()
    return { upper: title + '!' }
  }
}
</script>"#;
        let diagnostics = lint_rule::<NoRefAsOperand>(source, json!([]));
        assert_eq!(
            messages(&diagnostics),
            [
                "Must use `.value` to read or write the value wrapped by `shallowRef()`.",
                "Must use `.value` to read or write the value wrapped by `toRefs()`.",
            ]
        );
        assert!(fix_rule::<NoRefAsOperand>(source, json!([])).contains("handler.value()"));
    }

    #[test]
    fn test_reassigned_variable_gets_suggestion() {
        let source = r#"<script setup>
import { ref } from 'vue'
let total = ref(0)
total = load()
const sum = total + 1
</script>"#;
        let diagnostics = lint_rule::<NoRefAsOperand>(source, json!([]));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].fix.is_none());
        assert_eq!(diagnostics[0].suggestions[0].message, "Wrap `total` with `unref()`.");
        let suggested = apply_suggestion(source, &diagnostics[0], 0);
        assert!(suggested.contains("const sum = unref(total) + 1"));
    }

    #[test]
    fn test_untracked_values() {
        let source = r#"<script setup>
import { ref } from './my-ref'
import { reactive } from 'vue'
const a = ref(0)
const state = reactive({ n: 1 })
const b = a + state.n
</script>"#;
        assert!(lint_rule::<NoRefAsOperand>(source, json!([])).is_empty());
    }
}
