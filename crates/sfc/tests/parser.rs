//! Integration tests for the single-file component parser

use oxc_allocator::Allocator;
use oxc_ast::ast::Expression;
use sfc::{parse_sfc, DirectiveExpression, NodeKind, SfcParseResult, TokenKind};

fn dump(result: &SfcParseResult<'_>) -> String {
    let ast = &result.ast;
    let mut lines = Vec::new();
    let mut stack = vec![(ast.root(), 0usize)];
    while let Some((id, depth)) = stack.pop() {
        let node = ast.node(id);
        let label = match &node.kind {
            NodeKind::Root(_) => "Root".to_string(),
            NodeKind::Element(element) => format!("Element {}", element.name),
            NodeKind::Text => "Text".to_string(),
            NodeKind::Interpolation(_) => "Interpolation".to_string(),
            NodeKind::Comment => "Comment".to_string(),
        };
        lines.push(format!(
            "{}{} {}..{}",
            "  ".repeat(depth),
            label,
            node.span.start,
            node.span.end
        ));
        for &child in ast.children(id).iter().rev() {
            stack.push((child, depth + 1));
        }
    }
    lines.join("\n")
}

#[test]
fn test_tree_shape() {
    let allocator = Allocator::default();
    let result = parse_sfc(&allocator, r#"<template><div v-if="a">{{ b }}</div></template>"#);
    assert!(result.errors.is_empty());
    insta::assert_snapshot!(dump(&result), @r"
    Root 0..48
      Element template 0..48
        Element div 10..37
          Interpolation 24..31
    ");
}

#[test]
fn test_tokens_are_ordered() {
    let allocator = Allocator::default();
    let result = parse_sfc(&allocator, r#"<template><div a="1">x</div></template>"#);
    let kinds: Vec<_> = result
        .ast
        .tokens()
        .iter()
        .filter(|t| t.span.start >= 10 && t.span.end <= 28)
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        [
            TokenKind::TagOpen,
            TokenKind::AttrName,
            TokenKind::AttrEquals,
            TokenKind::AttrValue,
            TokenKind::TagClose,
            TokenKind::Text,
            TokenKind::EndTagOpen,
            TokenKind::TagClose,
        ]
    );
    let tokens = result.ast.tokens();
    assert!(tokens.windows(2).all(|w| w[0].span.end <= w[1].span.start));
}

#[test]
fn test_children_are_contained_in_parent() {
    let allocator = Allocator::default();
    let source = r#"<template>
  <ul>
    <li v-for="(item, i) in items" :key="item.id">{{ item.name }}</li>
  </ul>
  <!-- note -->
  <p>text</p>
</template>"#;
    let result = parse_sfc(&allocator, source);
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    for node in result.ast.nodes() {
        let Some(parent) = node.parent else { continue };
        let parent_span = result.ast.node(parent).span;
        assert!(parent_span.start <= node.span.start && node.span.end <= parent_span.end);
    }
}

#[test]
fn test_directive_expression_spans() {
    let allocator = Allocator::default();
    let source = r#"<template><li v-for="item in items" :title="item.label"></li></template>"#;
    let result = parse_sfc(&allocator, source);
    let li = result
        .ast
        .nodes()
        .find_map(|node| match &node.kind {
            NodeKind::Element(element) if element.name == "li" => Some(element),
            _ => None,
        })
        .expect("li element");

    let v_for = li.directive("for", None).expect("v-for");
    let Some(DirectiveExpression::For(for_expr)) = v_for.expression() else {
        panic!("expected v-for expression");
    };
    let Expression::Identifier(right) = &for_expr.right else {
        panic!("expected identifier");
    };
    assert_eq!(result.ast.text(right.span), "items");

    let title = li.directive("bind", Some("title")).expect(":title");
    let expr = title.expression().and_then(DirectiveExpression::as_expression).expect("expr");
    assert_eq!(result.ast.text(oxc_span::GetSpan::span(expr)), "item.label");
}

#[test]
fn test_recovers_from_malformed_markup() {
    let allocator = Allocator::default();
    let result = parse_sfc(&allocator, "<template><div><span></div></p></template>");
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].message.contains("</p>"));
    let template = result.descriptor.template.expect("template");
    assert_eq!(result.ast.descendants(template).len(), 2);
}

#[test]
fn test_invalid_expression_is_reported() {
    let allocator = Allocator::default();
    let result = parse_sfc(&allocator, r#"<template><div v-if="a +"></div></template>"#);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].message.contains("v-if"));
}

#[test]
fn test_trailing_text_is_reported() {
    let allocator = Allocator::default();
    let source = r#"<template><div v-if="a b" :id="c /* id */">{{ d; e }}</div></template>"#;
    let result = parse_sfc(&allocator, source);
    let messages: Vec<_> = result.errors.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, ["invalid expression in `v-if`", "invalid interpolation expression"]);
    assert_eq!(result.ast.text(result.errors[0].span), "a b");
}

#[test]
fn test_handler_keeps_every_statement() {
    let allocator = Allocator::default();
    let source = r#"<template><button @click="a(); b()">x</button></template>"#;
    let result = parse_sfc(&allocator, source);
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    let button = result
        .ast
        .nodes()
        .find_map(|node| match &node.kind {
            NodeKind::Element(element) if element.name == "button" => Some(element),
            _ => None,
        })
        .expect("button element");
    let click = button.directive("on", Some("click")).expect("@click");
    let Some(DirectiveExpression::Handler(statements)) = click.expression() else {
        panic!("expected statement list");
    };
    let texts: Vec<_> = statements
        .iter()
        .map(|s| result.ast.text(oxc_span::GetSpan::span(s)))
        .collect();
    assert_eq!(texts, ["a();", "b()"]);
}

#[test]
fn test_script_content_is_raw() {
    let allocator = Allocator::default();
    let source = "<script>\nconst a = '<div>'\n</script>\n<template><br></template>";
    let result = parse_sfc(&allocator, source);
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    let script = result.descriptor.script().expect("script");
    assert_eq!(script.program.body.len(), 1);
    let declaration = oxc_span::GetSpan::span(&script.program.body[0]);
    assert_eq!(result.ast.text(declaration), "const a = '<div>'");
    let template = result.descriptor.template.expect("template");
    assert_eq!(result.ast.children(template).len(), 1);
}
