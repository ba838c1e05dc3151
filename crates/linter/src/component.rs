//! Helpers for the component options object of a `<script>` block

use oxc_ast::ast::{
    Argument, ArrayExpressionElement, ArrowFunctionExpression, ExportDefaultDeclarationKind,
    Expression, FormalParameters, Function, FunctionBody, ObjectExpression, ObjectProperty,
    ObjectPropertyKind, Program, Statement,
};
use oxc_span::{GetSpan, Span};

use crate::scope::ScopeTracker;
use crate::utils::without_parens;
use crate::well_known::api_call;

/// `export default { ... }` or `export default defineComponent({ ... })`
pub fn component_object<'p, 'a>(
    program: &'p Program<'a>,
    tracker: &ScopeTracker,
) -> Option<&'p ObjectExpression<'a>> {
    program.body.iter().find_map(|statement| {
        let Statement::ExportDefaultDeclaration(export) = statement else {
            return None;
        };
        match &export.declaration {
            ExportDefaultDeclarationKind::ObjectExpression(object) => Some(&**object),
            ExportDefaultDeclarationKind::CallExpression(call) => {
                api_call(tracker, call, &["defineComponent"])?;
                match call.arguments.first()? {
                    Argument::ObjectExpression(object) => Some(&**object),
                    _ => None,
                }
            }
            _ => None,
        }
    })
}

/// A property of the options object together with its static key
pub fn properties<'p, 'a>(
    object: &'p ObjectExpression<'a>,
) -> impl Iterator<Item = (String, &'p ObjectProperty<'a>)> {
    object.properties.iter().filter_map(|property| match property {
        ObjectPropertyKind::ObjectProperty(prop) => {
            let name = prop.key.static_name()?;
            Some((name.to_string(), &**prop))
        }
        ObjectPropertyKind::SpreadProperty(_) => None,
    })
}

pub fn property<'p, 'a>(
    object: &'p ObjectExpression<'a>,
    name: &str,
) -> Option<&'p ObjectProperty<'a>> {
    properties(object).find(|(key, _)| key == name).map(|(_, prop)| prop)
}

/// A function-valued option such as `setup` or `data`
pub enum OptionFunction<'p, 'a> {
    Function(&'p Function<'a>),
    Arrow(&'p ArrowFunctionExpression<'a>),
}

impl<'p, 'a> OptionFunction<'p, 'a> {
    pub fn from_expression(expr: &'p Expression<'a>) -> Option<Self> {
        match without_parens(expr) {
            Expression::FunctionExpression(func) => Some(Self::Function(func)),
            Expression::ArrowFunctionExpression(arrow) => Some(Self::Arrow(arrow)),
            _ => None,
        }
    }

    pub fn params(&self) -> &'p FormalParameters<'a> {
        match self {
            Self::Function(func) => &func.params,
            Self::Arrow(arrow) => &arrow.params,
        }
    }

    pub fn body(&self) -> Option<&'p FunctionBody<'a>> {
        match self {
            Self::Function(func) => func.body.as_deref(),
            Self::Arrow(arrow) => Some(&arrow.body),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::Function(func) => func.span,
            Self::Arrow(arrow) => arrow.span,
        }
    }

    /// The object literal a function returns directly or through `return`
    pub fn returned_object(&self) -> Option<&'p ObjectExpression<'a>> {
        let body = self.body()?;
        if let Self::Arrow(arrow) = self {
            if arrow.expression {
                if let Some(Statement::ExpressionStatement(stmt)) = body.statements.first() {
                    if let Expression::ObjectExpression(object) = without_parens(&stmt.expression) {
                        return Some(object);
                    }
                }
                return None;
            }
        }
        body.statements.iter().rev().find_map(|statement| match statement {
            Statement::ReturnStatement(ret) => match ret.argument.as_ref().map(without_parens) {
                Some(Expression::ObjectExpression(object)) => Some(&**object),
                _ => None,
            },
            _ => None,
        })
    }
}

pub fn option_function<'p, 'a>(
    object: &'p ObjectExpression<'a>,
    name: &str,
) -> Option<OptionFunction<'p, 'a>> {
    OptionFunction::from_expression(&property(object, name)?.value)
}

/// Names declared by an options group: `props` (array or object form),
/// `computed`, `methods`, `data` (object or function returning one), `setup`
/// (returned object) and `inject`.
pub fn declared_names(object: &ObjectExpression<'_>) -> Vec<(String, Span)> {
    let mut names = Vec::new();
    for (group, prop) in properties(object) {
        match group.as_str() {
            "props" | "inject" | "emits" => match without_parens(&prop.value) {
                Expression::ArrayExpression(array) => {
                    for element in &array.elements {
                        if let ArrayExpressionElement::StringLiteral(lit) = element {
                            names.push((lit.value.to_string(), lit.span));
                        }
                    }
                }
                Expression::ObjectExpression(inner) => {
                    names.extend(properties(inner).map(|(name, p)| (name, p.key.span())));
                }
                _ => {}
            },
            "computed" | "methods" => {
                if let Expression::ObjectExpression(inner) = without_parens(&prop.value) {
                    names.extend(properties(inner).map(|(name, p)| (name, p.key.span())));
                }
            }
            "data" | "setup" => {
                let returned = match without_parens(&prop.value) {
                    Expression::ObjectExpression(inner) if group == "data" => Some(&**inner),
                    other => {
                        OptionFunction::from_expression(other).and_then(|f| f.returned_object())
                    }
                };
                if let Some(inner) = returned {
                    names.extend(properties(inner).map(|(name, p)| (name, p.key.span())));
                }
            }
            _ => {}
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use sfc::parse_sfc;

    #[test]
    fn test_declared_names() {
        let allocator = Allocator::default();
        let source = r#"<script>
import { defineComponent } from 'vue'
export default defineComponent({
  props: ['title'],
  data() { return { count: 0 } },
  computed: { double() { return 2 } },
  methods: { inc() {} },
  setup: () => ({ fromSetup: 1 }),
})
</script>"#;
        let result = parse_sfc(&allocator, source);
        let tracker = ScopeTracker::build(&result.ast, &result.descriptor);
        let script = result.descriptor.script().expect("script");
        let object = component_object(&script.program, &tracker).expect("component");
        let names: Vec<_> = declared_names(object).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["title", "count", "double", "inc", "fromSetup"]);
        assert!(option_function(object, "data").is_some());
    }
}
