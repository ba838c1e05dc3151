//! Resolution of framework API references
//!
//! Answers "does this callee refer to the framework export `X`" in one place:
//! named, default and namespace imports, `require()` destructuring and
//! namespaces, and compiler macros that are available without an import.

use oxc_ast::ast::{CallExpression, Expression};
use phf::phf_set;

use crate::scope::{BindingKind, Imported, ScopeTracker};
use crate::utils::without_parens;

static FRAMEWORK_MODULES: phf::Set<&'static str> = phf_set! {
    "vue", "@vue/composition-api", "@vue/runtime-core", "@vue/runtime-dom", "@vue/reactivity",
};

/// Macros of `<script setup>` that are globals at compile time
static COMPILER_MACROS: phf::Set<&'static str> = phf_set! {
    "defineProps", "defineEmits", "defineExpose", "withDefaults", "defineModel",
    "defineSlots", "defineOptions",
};

pub fn is_framework_module(source: &str) -> bool {
    FRAMEWORK_MODULES.contains(source)
}

/// Export name a callee refers to, if it is a framework API
pub fn api_name(tracker: &ScopeTracker, callee: &Expression<'_>) -> Option<String> {
    match without_parens(callee) {
        Expression::Identifier(ident) => match tracker.resolved_at(ident.span) {
            Some(binding) => match &binding.kind {
                BindingKind::Import {
                    source,
                    imported: Imported::Named(name),
                } if is_framework_module(source) => Some(name.clone()),
                _ => None,
            },
            None if COMPILER_MACROS.contains(ident.name.as_str()) => Some(ident.name.to_string()),
            None => None,
        },
        Expression::StaticMemberExpression(member) => {
            let Expression::Identifier(object) = without_parens(&member.object) else {
                return None;
            };
            let binding = tracker.resolved_at(object.span)?;
            match &binding.kind {
                BindingKind::Import {
                    source,
                    imported: Imported::Namespace | Imported::Default,
                } if is_framework_module(source) => Some(member.property.name.to_string()),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Matches a call against a set of framework export names and returns the
/// one it calls
pub fn api_call<'n>(
    tracker: &ScopeTracker,
    call: &CallExpression<'_>,
    names: &[&'n str],
) -> Option<&'n str> {
    let name = api_name(tracker, &call.callee)?;
    names.iter().copied().find(|candidate| *candidate == name)
}

/// Whether an expression is a call to one of `names`, looking through
/// parentheses and TypeScript `as` / `satisfies` wrappers
pub fn is_api_call(tracker: &ScopeTracker, expr: &Expression<'_>, names: &[&str]) -> bool {
    match without_parens(expr) {
        Expression::CallExpression(call) => api_call(tracker, call, names).is_some(),
        Expression::TSAsExpression(as_expr) => is_api_call(tracker, &as_expr.expression, names),
        Expression::TSSatisfiesExpression(sat) => is_api_call(tracker, &sat.expression, names),
        Expression::TSNonNullExpression(non_null) => {
            is_api_call(tracker, &non_null.expression, names)
        }
        _ => false,
    }
}
