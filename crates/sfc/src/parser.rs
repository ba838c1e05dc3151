//! Tokenizer and tree builder for single-file components
//!
//! This is a forgiving HTML-like parser: it never fails, unmatched end tags are
//! dropped and unclosed elements are closed at the end of their parent. Top-level
//! blocks other than `<template>` keep their content as raw text.

use oxc_span::Span;

use crate::ast::{
    Attribute, AttributeKey, AttributeValue, DirectiveArgument, DirectiveExpression,
    DirectiveKey, Element, Identifier, Interpolation, Namespace, Node, NodeId, NodeKind,
    StartTag, TemplateAst, Token, TokenKind,
};
use crate::check::is_void_element;
use crate::expression::ExpressionParser;
use crate::ParseError;

pub(crate) struct TemplateParser<'a, 'p> {
    source: &'a str,
    pos: usize,
    expressions: &'p ExpressionParser<'a>,
    nodes: Vec<Node<'a>>,
    tokens: Vec<Token>,
    stack: Vec<NodeId>,
    errors: Vec<ParseError>,
}

impl<'a, 'p> TemplateParser<'a, 'p> {
    pub fn new(source: &'a str, expressions: &'p ExpressionParser<'a>) -> Self {
        Self {
            source,
            pos: 0,
            expressions,
            nodes: Vec::new(),
            tokens: Vec::new(),
            stack: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn parse(mut self) -> (TemplateAst<'a>, Vec<ParseError>) {
        let root = self.push_node(
            None,
            self.span(0, self.source.len()),
            NodeKind::Root(Vec::new()),
        );
        self.stack.push(root);

        while self.pos < self.source.len() {
            let rest = self.rest();
            if rest.starts_with(b"<!--") {
                self.parse_comment();
            } else if rest.starts_with(b"</") && starts_tag_name(&rest[2..]) {
                self.parse_end_tag();
            } else if rest.starts_with(b"<") && starts_tag_name(&rest[1..]) {
                self.parse_start_tag();
            } else {
                self.parse_text();
            }
        }

        let end = self.source.len() as u32;
        while self.stack.len() > 1 {
            if let Some(id) = self.stack.pop() {
                self.nodes[id.index()].span.end = end;
            }
        }

        (TemplateAst::new(self.source, self.nodes, self.tokens), self.errors)
    }

    fn rest(&self) -> &'a [u8] {
        &self.source.as_bytes()[self.pos..]
    }

    fn span(&self, start: usize, end: usize) -> Span {
        Span::new(start as u32, end as u32)
    }

    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }

    fn push_token(&mut self, kind: TokenKind, start: usize, end: usize) {
        if end > start {
            let span = self.span(start, end);
            self.tokens.push(Token { kind, span });
        }
    }

    fn push_node(&mut self, parent: Option<NodeId>, span: Span, kind: NodeKind<'a>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node {
            id,
            parent,
            span,
            kind,
        });
        if let Some(parent) = parent {
            match &mut self.nodes[parent.index()].kind {
                NodeKind::Root(children) => children.push(id),
                NodeKind::Element(element) => element.children.push(id),
                _ => {}
            }
        }
        id
    }

    fn current(&self) -> NodeId {
        self.stack.last().copied().unwrap_or(NodeId::new(0))
    }

    /// Interpolations are only recognised inside the top-level `<template>`
    fn in_template(&self) -> bool {
        self.stack
            .get(1)
            .and_then(|id| match &self.nodes[id.index()].kind {
                NodeKind::Element(element) => Some(element.name == "template"),
                _ => None,
            })
            .unwrap_or(false)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn parse_comment(&mut self) {
        let start = self.pos;
        let end = match self.source[start + 4..].find("-->") {
            Some(offset) => start + 4 + offset + 3,
            None => {
                self.errors.push(ParseError::new(
                    "unterminated comment",
                    self.span(start, self.source.len()),
                ));
                self.source.len()
            }
        };
        self.pos = end;
        self.push_token(TokenKind::Comment, start, end);
        let parent = self.current();
        self.push_node(Some(parent), self.span(start, end), NodeKind::Comment);
    }

    fn parse_text(&mut self) {
        let start = self.pos;
        let interpolate = self.in_template();
        let bytes = self.source.as_bytes();
        let mut end = start;
        while end < bytes.len() {
            if bytes[end] == b'<' && end > start && is_markup(&bytes[end..]) {
                break;
            }
            if interpolate && bytes[end..].starts_with(b"{{") {
                if end > start {
                    break;
                }
                if self.parse_interpolation() {
                    return;
                }
                end += 2;
                continue;
            }
            end += 1;
        }
        if end == start {
            end = start + 1;
        }
        self.push_text(start, end);
        self.pos = end;
    }

    fn push_text(&mut self, start: usize, end: usize) {
        let bytes = self.source.as_bytes();
        let mut i = start;
        while i < end {
            let ws = bytes[i].is_ascii_whitespace();
            let mut j = i;
            while j < end && bytes[j].is_ascii_whitespace() == ws {
                j += 1;
            }
            let kind = if ws { TokenKind::Whitespace } else { TokenKind::Text };
            self.push_token(kind, i, j);
            i = j;
        }
        let parent = self.current();
        self.push_node(Some(parent), self.span(start, end), NodeKind::Text);
    }

    /// Parses `{{ ... }}` at the current position. Returns false when the
    /// mustache is not terminated, in which case it is plain text.
    fn parse_interpolation(&mut self) -> bool {
        let start = self.pos;
        let Some(offset) = self.source[start + 2..].find("}}") else {
            return false;
        };
        let inner_start = start + 2;
        let inner_end = inner_start + offset;
        let end = inner_end + 2;

        self.push_token(TokenKind::MustacheOpen, start, inner_start);
        self.push_token(TokenKind::RawText, inner_start, inner_end);
        self.push_token(TokenKind::MustacheClose, inner_end, end);

        let expression = self
            .expressions
            .expression(inner_start as u32, &self.source[inner_start..inner_end]);
        if expression.is_none() && !self.source[inner_start..inner_end].trim().is_empty() {
            self.errors.push(ParseError::new(
                "invalid interpolation expression",
                self.span(inner_start, inner_end),
            ));
        }
        let parent = self.current();
        self.push_node(
            Some(parent),
            self.span(start, end),
            NodeKind::Interpolation(Interpolation {
                open: self.span(start, inner_start),
                close: self.span(inner_end, end),
                expression,
            }),
        );
        self.pos = end;
        true
    }

    fn parse_end_tag(&mut self) {
        let start = self.pos;
        self.pos += 2;
        let name_start = self.pos;
        while self
            .peek()
            .is_some_and(|c| !c.is_ascii_whitespace() && c != b'>')
        {
            self.pos += 1;
        }
        let name = &self.source[name_start..self.pos];
        self.push_token(TokenKind::EndTagOpen, start, self.pos);
        self.skip_whitespace();
        if self.peek() == Some(b'>') {
            self.push_token(TokenKind::TagClose, self.pos, self.pos + 1);
            self.pos += 1;
        } else {
            self.errors.push(ParseError::new("unterminated end tag", self.span(start, self.pos)));
        }
        let end = self.pos;

        let matched = self.stack.iter().rposition(|id| match &self.nodes[id.index()].kind {
            NodeKind::Element(element) => element.raw_name.eq_ignore_ascii_case(name),
            _ => false,
        });
        let Some(depth) = matched else {
            self.errors.push(ParseError::new(
                format!("unexpected end tag `</{name}>`"),
                self.span(start, end),
            ));
            return;
        };

        while self.stack.len() > depth + 1 {
            if let Some(id) = self.stack.pop() {
                self.nodes[id.index()].span.end = start as u32;
            }
        }
        if let Some(id) = self.stack.pop() {
            let node = &mut self.nodes[id.index()];
            node.span.end = end as u32;
            if let NodeKind::Element(element) = &mut node.kind {
                element.end_tag = Some(Span::new(start as u32, end as u32));
            }
        }
    }

    fn parse_start_tag(&mut self) {
        let start = self.pos;
        self.pos += 1;
        let name_start = self.pos;
        while self.peek().is_some_and(|c| {
            !c.is_ascii_whitespace() && c != b'>' && !(c == b'/' && self.rest().starts_with(b"/>"))
        }) {
            self.pos += 1;
        }
        let raw_name = &self.source[name_start..self.pos];
        self.push_token(TokenKind::TagOpen, start, self.pos);

        let parent = self.current();
        let namespace = self.namespace_for(parent, raw_name);
        let name = match namespace {
            Namespace::Html => raw_name.to_ascii_lowercase(),
            _ => raw_name.to_string(),
        };
        let is_top_level = parent.index() == 0;

        let mut attributes = Vec::new();
        let mut self_closing = false;
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => {
                    self.errors.push(ParseError::new(
                        format!("unterminated start tag `<{raw_name}`"),
                        self.span(start, self.pos),
                    ));
                    break;
                }
                Some(b'>') => {
                    self.push_token(TokenKind::TagClose, self.pos, self.pos + 1);
                    self.pos += 1;
                    break;
                }
                Some(b'/') if self.rest().starts_with(b"/>") => {
                    self.push_token(TokenKind::TagSelfClose, self.pos, self.pos + 2);
                    self.pos += 2;
                    self_closing = true;
                    break;
                }
                Some(b'/') => self.pos += 1,
                Some(_) => {
                    let attribute = self.parse_attribute(is_top_level);
                    attributes.push(attribute);
                }
            }
        }

        let tag_span = self.span(start, self.pos);
        let element = Element {
            name,
            raw_name,
            namespace,
            start_tag: StartTag {
                span: tag_span,
                attributes,
                self_closing,
            },
            end_tag: None,
            children: Vec::new(),
        };
        let is_void = namespace == Namespace::Html && is_void_element(&element.name);
        let raw_text = is_raw_text_block(&element, is_top_level);
        let id = self.push_node(Some(parent), tag_span, NodeKind::Element(element));

        if self_closing || is_void {
            return;
        }
        self.stack.push(id);
        if raw_text {
            self.parse_raw_text(raw_name);
        }
    }

    fn namespace_for(&self, parent: NodeId, raw_name: &str) -> Namespace {
        if raw_name.eq_ignore_ascii_case("svg") {
            return Namespace::Svg;
        }
        if raw_name.eq_ignore_ascii_case("math") {
            return Namespace::MathMl;
        }
        match &self.nodes[parent.index()].kind {
            NodeKind::Element(element) if element.raw_name != "foreignObject" => element.namespace,
            _ => Namespace::Html,
        }
    }

    fn parse_raw_text(&mut self, raw_name: &str) {
        let start = self.pos;
        let end = find_end_tag(self.source, start, raw_name).unwrap_or(self.source.len());
        if end > start {
            self.push_token(TokenKind::RawText, start, end);
            let parent = self.current();
            self.push_node(Some(parent), self.span(start, end), NodeKind::Text);
        }
        self.pos = end;
    }

    fn parse_attribute(&mut self, is_top_level: bool) -> Attribute<'a> {
        let start = self.pos;
        let bytes = self.source.as_bytes();
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() || c == b'=' || c == b'>' || self.rest().starts_with(b"/>") {
                break;
            }
            if c == b'[' {
                if let Some(close) = self.rest().iter().position(|&b| b == b']') {
                    self.pos += close;
                }
            }
            self.pos += 1;
        }
        if self.pos == start {
            self.pos += 1;
        }
        let name_end = self.pos;
        self.push_token(TokenKind::AttrName, start, name_end);
        let raw_name = &self.source[start..name_end];
        let key = parse_attribute_key(raw_name, start as u32, is_top_level);

        let after_name = self.pos;
        self.skip_whitespace();
        let mut value = None;
        if bytes.get(self.pos) == Some(&b'=') {
            self.push_token(TokenKind::AttrEquals, self.pos, self.pos + 1);
            self.pos += 1;
            self.skip_whitespace();
            value = Some(self.parse_attribute_value(&key));
        } else {
            self.pos = after_name;
        }

        let end = value.as_ref().map_or(name_end as u32, |v: &AttributeValue<'a>| v.span.end);
        Attribute {
            span: Span::new(start as u32, end),
            key,
            value,
        }
    }

    fn parse_attribute_value(&mut self, key: &AttributeKey) -> AttributeValue<'a> {
        let start = self.pos;
        let (quote, value_start, value_end, end) = match self.peek() {
            Some(q @ (b'"' | b'\'')) => {
                let value_start = start + 1;
                match self.source[value_start..].find(q as char) {
                    Some(offset) => (
                        Some(q as char),
                        value_start,
                        value_start + offset,
                        value_start + offset + 1,
                    ),
                    None => {
                        self.errors.push(ParseError::new(
                            "unterminated attribute value",
                            self.span(start, self.source.len()),
                        ));
                        let end = self.source.len();
                        (Some(q as char), value_start, end, end)
                    }
                }
            }
            _ => {
                let mut end = start;
                let bytes = self.source.as_bytes();
                while end < bytes.len() && !bytes[end].is_ascii_whitespace() && bytes[end] != b'>' {
                    end += 1;
                }
                (None, start, end, end)
            }
        };
        self.pos = end;
        self.push_token(TokenKind::AttrValue, start, end);

        let raw = &self.source[value_start..value_end];
        let expression = match key {
            AttributeKey::Directive(directive) => {
                self.parse_directive_value(directive, value_start as u32, raw)
            }
            AttributeKey::Plain(_) => None,
        };
        AttributeValue {
            span: self.span(start, end),
            value_span: self.span(value_start, value_end),
            raw,
            quote,
            expression,
        }
    }

    fn parse_directive_value(
        &mut self,
        key: &DirectiveKey,
        start: u32,
        raw: &str,
    ) -> Option<DirectiveExpression<'a>> {
        if raw.trim().is_empty() {
            return None;
        }
        let parsed = match key.name.name.as_str() {
            "else" | "pre" | "cloak" | "once" => return None,
            "for" => self.expressions.for_expression(start, raw).map(DirectiveExpression::For),
            "slot" => self.expressions.params(start, raw).map(DirectiveExpression::SlotScope),
            "on" => self.expressions.handler(start, raw),
            _ => self.expressions.expression(start, raw).map(DirectiveExpression::Expression),
        };
        match parsed {
            Some(DirectiveExpression::Invalid) | None => {
                self.errors.push(ParseError::new(
                    format!("invalid expression in `v-{}`", key.name.name),
                    Span::new(start, start + raw.len() as u32),
                ));
                Some(DirectiveExpression::Invalid)
            }
            Some(expression) => Some(expression),
        }
    }
}

fn starts_tag_name(rest: &[u8]) -> bool {
    rest.first().is_some_and(|c| c.is_ascii_alphabetic())
}

fn is_markup(rest: &[u8]) -> bool {
    rest.starts_with(b"<!--")
        || (rest.starts_with(b"</") && starts_tag_name(&rest[2..]))
        || (rest.starts_with(b"<") && starts_tag_name(&rest[1..]))
}

/// `<script>`, `<style>`, custom blocks and non-HTML templates keep raw content
fn is_raw_text_block(element: &Element<'_>, is_top_level: bool) -> bool {
    if matches!(element.name.as_str(), "script" | "style") {
        return true;
    }
    if !is_top_level {
        return false;
    }
    if element.name != "template" {
        return true;
    }
    element
        .attribute("lang")
        .and_then(|attr| attr.value.as_ref())
        .is_some_and(|value| value.raw != "html")
}

fn find_end_tag(source: &str, from: usize, name: &str) -> Option<usize> {
    source[from..].match_indices("</").find_map(|(offset, _)| {
        let at = from + offset;
        let name_end = at + 2 + name.len();
        let candidate = source.get(at + 2..name_end)?;
        let terminated = source
            .as_bytes()
            .get(name_end)
            .is_none_or(|c| c.is_ascii_whitespace() || *c == b'>');
        (candidate.eq_ignore_ascii_case(name) && terminated).then_some(at)
    })
}

/// Splits an attribute name into a plain key or a directive key.
fn parse_attribute_key(raw: &str, start: u32, is_top_level: bool) -> AttributeKey {
    let ident = |from: usize, to: usize, name: &str| Identifier {
        name: name.to_string(),
        span: Span::new(start + from as u32, start + to as u32),
    };

    let first = raw.chars().next();
    let is_directive = !is_top_level
        && (matches!(first, Some(':' | '@' | '#'))
            || (first == Some('.') && raw.len() > 1)
            || (raw.starts_with("v-") && raw.len() > 2));
    if !is_directive {
        return AttributeKey::Plain(ident(0, raw.len(), raw));
    }

    let (name, shorthand, mut rest) = match first {
        Some(':') => (ident(0, 1, "bind"), Some(':'), 1),
        Some('.') => (ident(0, 1, "bind"), Some('.'), 1),
        Some('@') => (ident(0, 1, "on"), Some('@'), 1),
        Some('#') => (ident(0, 1, "slot"), Some('#'), 1),
        _ => {
            let end = raw[2..].find([':', '.']).map_or(raw.len(), |i| i + 2);
            let name = ident(0, end, &raw[2..end]);
            let rest = if raw[end..].starts_with(':') { end + 1 } else { end };
            (name, None, rest)
        }
    };

    let has_argument = shorthand.is_some() || raw[..rest].ends_with(':');
    let mut argument = None;
    if has_argument {
        if raw[rest..].starts_with('[') {
            let close = raw[rest..].find(']').map_or(raw.len(), |i| rest + i + 1);
            let inner_end = if close > rest + 1 && raw[..close].ends_with(']') {
                close - 1
            } else {
                close
            };
            argument = Some(DirectiveArgument::Dynamic {
                span: Span::new(start + rest as u32, start + close as u32),
                raw: raw[rest + 1..inner_end].to_string(),
            });
            rest = close;
        } else {
            let end = raw[rest..].find('.').map_or(raw.len(), |i| rest + i);
            if end > rest {
                argument = Some(DirectiveArgument::Static(ident(rest, end, &raw[rest..end])));
            }
            rest = end;
        }
    }

    let mut modifiers = Vec::new();
    if shorthand == Some('.') {
        modifiers.push(ident(0, 0, "prop"));
    }
    let mut offset = rest;
    for part in raw[rest..].split('.') {
        if !part.is_empty() {
            modifiers.push(ident(offset, offset + part.len(), part));
        }
        offset += part.len() + 1;
    }

    AttributeKey::Directive(DirectiveKey {
        span: Span::new(start, start + raw.len() as u32),
        name,
        shorthand,
        argument,
        modifiers,
    })
}
