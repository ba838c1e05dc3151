//! vue/no-deprecated-destroyed-lifecycle

use oxc_span::GetSpan;
use serde_json::Value;

use crate::component::{component_object, properties};
use crate::context::LintContext;
use crate::rule::{Rule, RuleCategory, RuleMeta};

/// Deprecated hook, message id and replacement
const RENAMED_HOOKS: &[(&str, &str, &str)] = &[
    ("beforeDestroy", "deprecatedBeforeDestroy", "beforeUnmount"),
    ("destroyed", "deprecatedDestroyed", "unmounted"),
];

/// no-deprecated-destroyed-lifecycle rule
#[derive(Debug, Clone, Default)]
pub struct NoDeprecatedDestroyedLifecycle;

impl RuleMeta for NoDeprecatedDestroyedLifecycle {
    const NAME: &'static str = "no-deprecated-destroyed-lifecycle";
    const CATEGORY: RuleCategory = RuleCategory::Essential;
    const DESCRIPTION: &'static str =
        "disallow using deprecated `destroyed` and `beforeDestroy` lifecycle hooks";
    const FIXABLE: bool = true;
    const MESSAGES: &'static [(&'static str, &'static str)] = &[
        (
            "deprecatedBeforeDestroy",
            "The `beforeDestroy` lifecycle hook is deprecated. Use `beforeUnmount` instead.",
        ),
        (
            "deprecatedDestroyed",
            "The `destroyed` lifecycle hook is deprecated. Use `unmounted` instead.",
        ),
    ];

    fn from_options(_options: &[Value]) -> Result<Self, serde_json::Error> {
        Ok(Self)
    }
}

impl Rule for NoDeprecatedDestroyedLifecycle {
    fn check_script(&mut self, ctx: &mut LintContext<'_, '_>) {
        let scopes = ctx.scopes();
        let Some(object) = ctx
            .descriptor()
            .script()
            .and_then(|script| component_object(&script.program, scopes))
        else {
            return;
        };

        let keys: Vec<_> = properties(object)
            .filter(|(_, prop)| !prop.computed)
            .map(|(name, prop)| (name, prop.key.span()))
            .collect();
        for (name, span) in &keys {
            let Some(&(_, message_id, replacement)) =
                RENAMED_HOOKS.iter().find(|(hook, ..)| *hook == name.as_str())
            else {
                continue;
            };
            let mut diagnostic = Self::diagnostic(message_id, *span, &[]);
            // renaming onto an existing key would shadow it
            if keys.iter().any(|(other, _)| other.as_str() == replacement) {
                diagnostic = diagnostic.with_help(format!(
                    "`{replacement}` is already defined; merge the two hooks by hand."
                ));
            } else {
                let mut fixer = ctx.fixer();
                fixer.replace(*span, replacement);
                diagnostic = diagnostic.with_fix(fixer.build());
            }
            ctx.report(diagnostic);
        }
    }
}
