//! Parsing of embedded script fragments through oxc
//!
//! Each fragment is parsed on its own and its spans are then shifted by the
//! fragment's offset, so every oxc span is an absolute offset into the
//! component source.

use oxc_allocator::{Allocator, Box as ArenaBox, Vec as ArenaVec};
use oxc_ast::ast::{ArrowFunctionExpression, Expression, Program, Statement};
use oxc_ast_visit::VisitMut;
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType, Span};

use crate::ast::{DirectiveExpression, ForExpression, ForOperator};

/// Moves every span of a parsed fragment by a fixed offset
struct ShiftSpans(u32);

impl<'a> VisitMut<'a> for ShiftSpans {
    fn visit_span(&mut self, span: &mut Span) {
        span.start += self.0;
        span.end += self.0;
    }
}

pub(crate) struct ExpressionParser<'a> {
    allocator: &'a Allocator,
    source_type: SourceType,
}

impl<'a> ExpressionParser<'a> {
    pub fn new(allocator: &'a Allocator, source_type: SourceType) -> Self {
        Self {
            allocator,
            source_type,
        }
    }

    /// Parses `text` as a single expression. Anything after the expression
    /// other than whitespace and comments makes the fragment invalid.
    pub fn expression(&self, start: u32, text: &str) -> Option<Expression<'a>> {
        if text.trim().is_empty() {
            return None;
        }
        let source = self.allocator.alloc_str(text);
        let mut expr = Parser::new(self.allocator, source, self.source_type)
            .parse_expression()
            .ok()?;
        if !is_trivia(&source[expr.span().end as usize..]) {
            return None;
        }
        ShiftSpans(start).visit_expression(&mut expr);
        Some(expr)
    }

    pub fn program(&self, start: u32, text: &str) -> ParsedProgram<'a> {
        let source = self.allocator.alloc_str(text);
        let mut ret = Parser::new(self.allocator, source, self.source_type).parse();
        let errors = ret.errors.iter().map(ToString::to_string).collect();
        ShiftSpans(start).visit_program(&mut ret.program);
        for comment in ret.program.comments.iter_mut() {
            comment.span.start += start;
            comment.span.end += start;
        }
        ParsedProgram {
            program: ret.program,
            errors,
            panicked: ret.panicked,
        }
    }

    fn statements(&self, start: u32, text: &str) -> Option<ArenaVec<'a, Statement<'a>>> {
        let parsed = self.program(start, text);
        if parsed.panicked || !parsed.errors.is_empty() {
            return None;
        }
        Some(parsed.program.body)
    }

    /// Parses a parameter list (`item`, `(item, index)`, `{ a, b }`) as the
    /// parameters of an arrow function.
    pub fn params(
        &self,
        start: u32,
        text: &str,
    ) -> Option<ArenaBox<'a, ArrowFunctionExpression<'a>>> {
        let trimmed = text.trim_start();
        let start = start + (text.len() - trimmed.len()) as u32;
        let trimmed = trimmed.trim_end();
        if trimmed.is_empty() {
            return None;
        }

        let (prefix, suffix) = if trimmed.starts_with('(') && trimmed.ends_with(')') {
            ("", "=>0")
        } else {
            ("(", ")=>0")
        };
        let offset = start.checked_sub(prefix.len() as u32)?;
        let source = self.allocator.alloc_str(&format!("{prefix}{trimmed}{suffix}"));
        let mut expr = Parser::new(self.allocator, source, self.source_type)
            .parse_expression()
            .ok()?;
        if expr.span().end as usize != source.len() {
            return None;
        }
        ShiftSpans(offset).visit_expression(&mut expr);
        match expr {
            Expression::ArrowFunctionExpression(arrow) => Some(arrow),
            _ => None,
        }
    }

    pub fn for_expression(&self, start: u32, text: &str) -> Option<ForExpression<'a>> {
        let (alias_end, operator, right_start) = split_for(text)?;
        let left = self.params(start, &text[..alias_end])?;
        let right = self.expression(start + right_start as u32, &text[right_start..])?;
        Some(ForExpression {
            left,
            right,
            operator,
        })
    }

    /// A lone expression, or else a statement list (`a(); b()`).
    pub fn handler(&self, start: u32, text: &str) -> Option<DirectiveExpression<'a>> {
        if text.trim().is_empty() {
            return None;
        }
        if let Some(expr) = self.expression(start, text) {
            return Some(DirectiveExpression::Expression(expr));
        }
        Some(
            self.statements(start, text)
                .map_or(DirectiveExpression::Invalid, DirectiveExpression::Handler),
        )
    }
}

/// True when `rest` holds only whitespace and comments.
fn is_trivia(rest: &str) -> bool {
    let mut rest = rest.trim_start();
    while !rest.is_empty() {
        if let Some(line) = rest.strip_prefix("//") {
            rest = line.find('\n').map_or("", |i| &line[i..]);
        } else if let Some(block) = rest.strip_prefix("/*") {
            let Some(close) = block.find("*/") else {
                return false;
            };
            rest = &block[close + 2..];
        } else {
            return false;
        }
        rest = rest.trim_start();
    }
    true
}

pub(crate) struct ParsedProgram<'a> {
    pub program: Program<'a>,
    pub errors: Vec<String>,
    pub panicked: bool,
}

/// Splits `alias in source` at the first top-level ` in ` / ` of ` keyword.
///
/// Returns the end of the alias, the operator and the start of the source.
fn split_for(text: &str) -> Option<(usize, ForOperator, usize)> {
    let bytes = text.as_bytes();
    let mut depth = 0i32;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth -= 1,
            c if depth == 0 && c.is_ascii_whitespace() => {
                let ws_start = i;
                let mut j = i;
                while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                    j += 1;
                }
                let operator = match bytes.get(j..j + 2) {
                    Some(b"in") => Some(ForOperator::In),
                    Some(b"of") => Some(ForOperator::Of),
                    _ => None,
                };
                if let Some(operator) = operator {
                    let mut k = j + 2;
                    if k < bytes.len() && bytes[k].is_ascii_whitespace() && ws_start > 0 {
                        while k < bytes.len() && bytes[k].is_ascii_whitespace() {
                            k += 1;
                        }
                        return Some((ws_start, operator, k));
                    }
                }
                i = j;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_for() {
        assert_eq!(split_for("item in items"), Some((4, ForOperator::In, 8)));
        assert_eq!(split_for("(a, b) of list"), Some((6, ForOperator::Of, 10)));
        assert_eq!(split_for("{ in: x } in items"), Some((9, ForOperator::In, 13)));
        assert_eq!(split_for("items"), None);
    }

    #[test]
    fn test_expression_spans_are_absolute() {
        let allocator = Allocator::default();
        let parser = ExpressionParser::new(&allocator, SourceType::mjs());
        let expr = parser.expression(10, "foo + bar").expect("should parse");
        let Expression::BinaryExpression(binary) = expr else {
            panic!("expected binary expression");
        };
        assert_eq!(binary.span.start, 10);
        assert_eq!(binary.span.end, 19);
    }

    #[test]
    fn test_params_without_parens() {
        let allocator = Allocator::default();
        let parser = ExpressionParser::new(&allocator, SourceType::mjs());
        let arrow = parser.params(5, "item").expect("should parse");
        assert_eq!(arrow.params.items.len(), 1);
        assert_eq!(arrow.params.items[0].span.start, 5);
    }

    #[test]
    fn test_handler_statements() {
        let allocator = Allocator::default();
        let parser = ExpressionParser::new(&allocator, SourceType::mjs());
        assert!(matches!(
            parser.handler(1, "a(); b()"),
            Some(DirectiveExpression::Handler(statements)) if statements.len() == 2
        ));
        assert!(matches!(
            parser.handler(1, "onClick"),
            Some(DirectiveExpression::Expression(_))
        ));
    }

    #[test]
    fn test_expression_must_consume_fragment() {
        let allocator = Allocator::default();
        let parser = ExpressionParser::new(&allocator, SourceType::mjs());
        assert!(parser.expression(0, "a b").is_none());
        assert!(parser.expression(0, "a(); b()").is_none());
        assert!(parser.expression(0, "a // note").is_some());
        assert!(parser.expression(0, "a /* note */ ").is_some());
        assert!(parser.expression(0, "a /* open").is_none());
        assert!(parser.params(0, "(a) b").is_none());
    }

    #[test]
    fn test_handler_spans_are_absolute() {
        let allocator = Allocator::default();
        let parser = ExpressionParser::new(&allocator, SourceType::mjs());
        let Some(DirectiveExpression::Handler(statements)) = parser.handler(20, "a(); b()") else {
            panic!("expected statement list");
        };
        let spans: Vec<_> = statements.iter().map(|s| (s.span().start, s.span().end)).collect();
        assert_eq!(spans, [(20, 24), (25, 28)]);
    }

    #[test]
    fn test_program_spans_are_absolute() {
        let allocator = Allocator::default();
        let parser = ExpressionParser::new(&allocator, SourceType::mjs());
        let parsed = parser.program(8, "\n// lead\nconst a = 1\n");
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.program.body[0].span(), Span::new(17, 28));
        assert_eq!(parsed.program.comments[0].span.end, 16);
    }

    #[test]
    fn test_parenthesized_params_offset() {
        let allocator = Allocator::default();
        let parser = ExpressionParser::new(&allocator, SourceType::mjs());
        let arrow = parser.params(3, " (item, index) ").expect("should parse");
        assert_eq!(arrow.params.items.len(), 2);
        assert_eq!(arrow.params.items[1].span, Span::new(11, 16));
    }
}
