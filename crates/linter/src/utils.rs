//! Utility functions shared by the lint rules

use oxc_ast::ast::Expression;
use oxc_ast_visit::Visit;
use sfc::{DirectiveExpression, Node, NodeKind};

/// Feeds every script fragment a template node carries to `visitor`:
/// directive values of an element (only the source side of `v-for`) or the
/// expression of an interpolation.
pub fn visit_node_expressions<'a>(node: &Node<'a>, visitor: &mut impl Visit<'a>) {
    match &node.kind {
        NodeKind::Element(element) => {
            for attribute in &element.start_tag.attributes {
                match attribute.expression() {
                    Some(DirectiveExpression::Expression(expr)) => visitor.visit_expression(expr),
                    Some(DirectiveExpression::For(for_expr)) => {
                        visitor.visit_expression(&for_expr.right)
                    }
                    Some(DirectiveExpression::Handler(statements)) => {
                        for statement in statements {
                            visitor.visit_statement(statement);
                        }
                    }
                    _ => {}
                }
            }
        }
        NodeKind::Interpolation(interpolation) => {
            if let Some(expr) = &interpolation.expression {
                visitor.visit_expression(expr);
            }
        }
        _ => {}
    }
}

/// Strips any number of wrapping parentheses
pub fn without_parens<'e, 'a>(expr: &'e Expression<'a>) -> &'e Expression<'a> {
    let mut current = expr;
    while let Expression::ParenthesizedExpression(paren) = current {
        current = &paren.expression;
    }
    current
}

/// Name of a member access whose property is known statically
pub fn static_property_name<'e>(expr: &'e Expression<'_>) -> Option<&'e str> {
    match expr {
        Expression::StaticMemberExpression(member) => Some(member.property.name.as_str()),
        Expression::ComputedMemberExpression(member) => match &member.expression {
            Expression::StringLiteral(lit) => Some(lit.value.as_str()),
            _ => None,
        },
        _ => None,
    }
}

/// Whether an expression can be written to: an identifier or a
/// non-optional member chain ending in one
pub fn is_assignable(expr: &Expression<'_>) -> bool {
    match without_parens(expr) {
        Expression::Identifier(_) => true,
        Expression::StaticMemberExpression(member) => {
            !member.optional && is_assignable(&member.object)
        }
        Expression::ComputedMemberExpression(member) => {
            !member.optional && is_assignable(&member.object)
        }
        _ => false,
    }
}

/// Collapses whitespace so that two snippets can be compared token-wise
pub fn normalize_source(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.trim().chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            let prev_word = out.chars().last().is_some_and(is_word_char);
            if prev_word && is_word_char(c) {
                out.push(' ');
            }
            pending_space = false;
        }
        out.push(c);
    }
    out
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn has_symbols(name: &str) -> bool {
    name.chars().any(|c| "!\"#%&'()*+,./:;<=>?@[\\]^`{|}".contains(c))
}

pub fn is_camel_case(name: &str) -> bool {
    !has_symbols(name)
        && !name.starts_with(|c: char| c.is_uppercase())
        && !name.contains(['-', '_'])
        && !name.contains(char::is_whitespace)
}

pub fn is_kebab_case(name: &str) -> bool {
    !has_symbols(name)
        && !name.contains(char::is_uppercase)
        && !name.starts_with('-')
        && !name.contains('_')
        && !name.contains("--")
        && !name.contains(char::is_whitespace)
}

/// `my-event` and `my_event` to `myEvent`
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if matches!(c, '-' | '_') {
            upper_next = !out.is_empty();
            continue;
        }
        if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else if out.is_empty() {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// `myEvent` and `my_event` to `my-event`
pub fn to_kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c == '_' {
            out.push('-');
        } else if c.is_uppercase() {
            if i > 0 && !out.ends_with('-') {
                out.push('-');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

pub fn to_pascal_case(name: &str) -> String {
    let camel = to_camel_case(name);
    let mut chars = camel.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Matches `name` against a list of exact names and `/regex/` patterns
pub fn matches_any(patterns: &[String], name: &str) -> bool {
    patterns.iter().any(|pattern| match to_regex(pattern) {
        Some(re) => re.is_match(name),
        None => pattern == name,
    })
}

/// Parses a `/source/flags` string into a regex
pub fn to_regex(pattern: &str) -> Option<regex::Regex> {
    let body = pattern.strip_prefix('/')?;
    let end = body.rfind('/')?;
    let (source, flags) = (&body[..end], &body[end + 1..]);
    let prefix = if flags.contains('i') { "(?i)" } else { "" };
    regex::Regex::new(&format!("{prefix}{source}")).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_casing_checks() {
        assert!(is_camel_case("myEvent"));
        assert!(is_camel_case("update"));
        assert!(!is_camel_case("my-event"));
        assert!(!is_camel_case("MyEvent"));
        assert!(is_kebab_case("my-event"));
        assert!(!is_kebab_case("myEvent"));
        assert!(!is_kebab_case("my--event"));
    }

    #[test]
    fn test_casing_conversions() {
        assert_eq!(to_camel_case("my-custom-event"), "myCustomEvent");
        assert_eq!(to_camel_case("my_event"), "myEvent");
        assert_eq!(to_kebab_case("myCustomEvent"), "my-custom-event");
        assert_eq!(to_kebab_case("MyEvent"), "my-event");
        assert_eq!(to_pascal_case("my-comp"), "MyComp");
    }

    #[test]
    fn test_normalize_source() {
        assert_eq!(normalize_source("a  ||\n b"), "a||b");
        assert_eq!(normalize_source(" foo in  bar "), "foo in bar");
        assert_eq!(normalize_source("a||b"), normalize_source("a || b"));
    }

    #[test]
    fn test_matches_any() {
        let patterns = vec!["foo".to_string(), "/^bar-/i".to_string()];
        assert!(matches_any(&patterns, "foo"));
        assert!(matches_any(&patterns, "BAR-baz"));
        assert!(!matches_any(&patterns, "baz"));
    }
}
