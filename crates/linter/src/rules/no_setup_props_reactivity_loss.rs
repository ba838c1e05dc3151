//! vue/no-setup-props-reactivity-loss
//!
//! `props` is a reactive object. Destructuring it, or copying one of its
//! members into a variable at the top level of `setup`, captures a snapshot
//! that never updates.

use oxc_ast::ast::{
    ArrowFunctionExpression, AssignmentExpression, AssignmentTarget, BindingPattern, Class,
    Expression, Function, Statement, VariableDeclarator,
};
use oxc_ast_visit::{walk, Visit};
use oxc_span::{GetSpan, Span};
use oxc_syntax::scope::ScopeFlags;
use serde_json::Value;

use crate::component::{component_object, option_function};
use crate::context::LintContext;
use crate::rule::{Rule, RuleCategory, RuleMeta};
use crate::scope::{BindingId, ScopeTracker};
use crate::utils::without_parens;
use crate::well_known::is_api_call;

/// A read of some identifier that loses reactivity if it is `props`
enum RootRead {
    Destructure { pattern: Span, source: Span },
    Property { member: Span, source: Span },
}

/// Reads made directly in the body of a setup scope; nested functions run
/// later and keep reactivity.
#[derive(Default)]
struct RootReads {
    reads: Vec<RootRead>,
}

impl RootReads {
    fn record(&mut self, target: Span, destructures: bool, value: &Expression<'_>) {
        let value = without_parens(value);
        if destructures {
            if let Expression::Identifier(source) = value {
                self.reads.push(RootRead::Destructure {
                    pattern: target,
                    source: source.span,
                });
            }
        } else if let Some(member) = value.as_member_expression() {
            if let Expression::Identifier(source) = without_parens(member.object()) {
                self.reads.push(RootRead::Property {
                    member: member.span(),
                    source: source.span,
                });
            }
        }
    }
}

impl<'a> Visit<'a> for RootReads {
    fn visit_variable_declarator(&mut self, decl: &VariableDeclarator<'a>) {
        if let Some(init) = &decl.init {
            let destructures = !matches!(decl.id, BindingPattern::BindingIdentifier(_));
            self.record(decl.id.span(), destructures, init);
        }
        walk::walk_variable_declarator(self, decl);
    }

    fn visit_assignment_expression(&mut self, expr: &AssignmentExpression<'a>) {
        match &expr.left {
            AssignmentTarget::ArrayAssignmentTarget(_)
            | AssignmentTarget::ObjectAssignmentTarget(_) => {
                self.record(expr.left.span(), true, &expr.right);
            }
            AssignmentTarget::AssignmentTargetIdentifier(_) => {
                self.record(expr.left.span(), false, &expr.right);
            }
            _ => {}
        }
        walk::walk_assignment_expression(self, expr);
    }

    fn visit_function(&mut self, _func: &Function<'a>, _flags: ScopeFlags) {}

    fn visit_arrow_function_expression(&mut self, _arrow: &ArrowFunctionExpression<'a>) {}

    fn visit_class(&mut self, _class: &Class<'a>) {}
}

/// no-setup-props-reactivity-loss rule
#[derive(Debug, Clone, Default)]
pub struct NoSetupPropsReactivityLoss;

impl RuleMeta for NoSetupPropsReactivityLoss {
    const NAME: &'static str = "no-setup-props-reactivity-loss";
    const CATEGORY: RuleCategory = RuleCategory::Uncategorized;
    const DESCRIPTION: &'static str =
        "disallow usages that lose the reactivity of `props` passed to `setup`";
    const MESSAGES: &'static [(&'static str, &'static str)] = &[
        (
            "destructuring",
            "Destructuring the `props` will cause the value to lose reactivity.",
        ),
        (
            "getProperty",
            concat!(
                "Getting a value from the `props` in root scope of ",
                "`{{scopeName}}` will cause the value to lose reactivity.",
            ),
        ),
    ];

    fn from_options(_options: &[Value]) -> Result<Self, serde_json::Error> {
        Ok(Self)
    }
}

impl NoSetupPropsReactivityLoss {
    fn check_root<'a>(
        props: Option<BindingId>,
        statements: &[Statement<'a>],
        scope_name: &str,
        scopes: &ScopeTracker,
        ctx: &mut LintContext<'_, '_>,
    ) {
        let Some(props) = props else { return };
        let mut visitor = RootReads::default();
        for statement in statements {
            visitor.visit_statement(statement);
        }
        let is_props = |span: Span| scopes.resolved_at(span).is_some_and(|b| b.id == props);
        for read in visitor.reads {
            match read {
                RootRead::Destructure { pattern, source } if is_props(source) => {
                    ctx.report(Self::diagnostic("destructuring", pattern, &[]));
                }
                RootRead::Property { member, source } if is_props(source) => {
                    let data = [("scopeName", scope_name)];
                    ctx.report(Self::diagnostic("getProperty", member, &data));
                }
                _ => {}
            }
        }
    }

    /// `setup(props) { ... }` of the options object
    fn check_setup_option(ctx: &mut LintContext<'_, '_>) {
        let scopes = ctx.scopes();
        let Some(object) = ctx
            .descriptor()
            .script()
            .and_then(|script| component_object(&script.program, scopes))
        else {
            return;
        };
        let Some(setup) = option_function(object, "setup") else {
            return;
        };
        let Some(param) = setup.params().items.first() else {
            return;
        };
        let binding_of = |span: Span| scopes.binding_at(span).map(|b| b.id);
        let props = match &param.pattern {
            BindingPattern::BindingIdentifier(ident) => binding_of(ident.span),
            BindingPattern::AssignmentPattern(assign) => match &assign.left {
                BindingPattern::BindingIdentifier(ident) => binding_of(ident.span),
                pattern => {
                    ctx.report(Self::diagnostic("destructuring", pattern.span(), &[]));
                    None
                }
            },
            pattern => {
                ctx.report(Self::diagnostic("destructuring", pattern.span(), &[]));
                None
            }
        };
        if let Some(body) = setup.body() {
            Self::check_root(props, &body.statements, "setup", scopes, ctx);
        }
    }

    /// `const props = defineProps(...)` in `<script setup>`
    fn check_script_setup(ctx: &mut LintContext<'_, '_>) {
        let scopes = ctx.scopes();
        let Some(script) = ctx.descriptor().script_setup() else {
            return;
        };
        let mut props = None;
        for statement in &script.program.body {
            let Statement::VariableDeclaration(decl) = statement else {
                continue;
            };
            for declarator in &decl.declarations {
                let Some(init) = &declarator.init else { continue };
                if !is_api_call(scopes, init, &["defineProps", "withDefaults"]) {
                    continue;
                }
                match &declarator.id {
                    BindingPattern::BindingIdentifier(ident) => {
                        props = scopes.binding_at(ident.span).map(|b| b.id);
                    }
                    pattern => ctx.report(Self::diagnostic("destructuring", pattern.span(), &[])),
                }
            }
        }
        Self::check_root(props, &script.program.body, "<script setup>", scopes, ctx);
    }
}

impl Rule for NoSetupPropsReactivityLoss {
    fn check_script(&mut self, ctx: &mut LintContext<'_, '_>) {
        Self::check_setup_option(ctx);
        Self::check_script_setup(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_utils::{lint_rule, messages};
    use serde_json::json;

    fn flagged<'s>(source: &'s str) -> Vec<&'s str> {
        lint_rule::<NoSetupPropsReactivityLoss>(source, json!([]))
            .iter()
            .map(|d| &source[d.start as usize..d.end as usize])
            .collect()
    }

    #[test]
    fn test_setup_option() {
        let source = r#"<script>
export default {
  setup(props) {
    const { title } = props
    const count = props.count
    const label = computed(() => props.label)
    watch(() => props.count, () => {})
    return { title, count, label }
  }
}
</script>"#;
        assert_eq!(flagged(source), ["{ title }", "props.count"]);
        let diagnostics = lint_rule::<NoSetupPropsReactivityLoss>(source, json!([]));
        assert_eq!(
            messages(&diagnostics)[1],
            concat!(
                "Getting a value from the `props` in root scope of `setup` will ",
                "cause the value to lose reactivity.",
            )
        );
    }

    #[test]
    fn test_destructured_parameter() {
        let source = r#"<script>
export default {
  setup({ title }) {
    return { title }
  }
}
</script>"#;
        let diagnostics = lint_rule::<NoSetupPropsReactivityLoss>(source, json!([]));
        assert_eq!(
            messages(&diagnostics),
            ["Destructuring the `props` will cause the value to lose reactivity."]
        );
    }

    #[test]
    fn test_script_setup() {
        let source = r#"<script setup>
const props = defineProps({ size: Number })
let size = props.size
size = props['size']
const double = computed(() => props.size * 2)
</script>"#;
        assert_eq!(flagged(source), ["props.size", "props['size']"]);
        let diagnostics = lint_rule::<NoSetupPropsReactivityLoss>(source, json!([]));
        assert!(diagnostics[0].message.contains("root scope of `<script setup>`"));

        let source = r#"<script setup>
const { size } = withDefaults(defineProps(), { size: 1 })
</script>"#;
        assert_eq!(flagged(source), ["{ size }"]);
    }

    #[test]
    fn test_other_objects() {
        let source = r#"<script setup>
const props = defineProps(['a'])
const other = { a: 1 }
const { a } = other
const b = other.a
</script>"#;
        assert!(flagged(source).is_empty());
    }
}
