//! Template AST arena
//!
//! Nodes live in a flat `Vec` owned by [`TemplateAst`] and refer to each other
//! through [`NodeId`]. Parent links are plain indices, so rules can walk
//! upwards without holding borrows into the tree. Embedded expressions are oxc
//! AST nodes allocated in the caller's [`oxc_allocator::Allocator`]; their spans
//! are absolute offsets into the component source.

use oxc_allocator::{Box as ArenaBox, Vec as ArenaVec};
use oxc_ast::ast::{ArrowFunctionExpression, Expression, Statement};
use oxc_span::Span;

/// Index of a node inside a [`TemplateAst`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Element namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Namespace {
    #[default]
    Html,
    Svg,
    MathMl,
}

#[derive(Debug)]
pub struct Node<'a> {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub span: Span,
    pub kind: NodeKind<'a>,
}

#[derive(Debug)]
pub enum NodeKind<'a> {
    /// The whole file
    Root(Vec<NodeId>),
    Element(Element<'a>),
    Text,
    Interpolation(Interpolation<'a>),
    Comment,
}

#[derive(Debug)]
pub struct Element<'a> {
    /// Lowercased for HTML-namespace elements, raw otherwise
    pub name: String,
    pub raw_name: &'a str,
    pub namespace: Namespace,
    pub start_tag: StartTag<'a>,
    pub end_tag: Option<Span>,
    pub children: Vec<NodeId>,
}

#[derive(Debug)]
pub struct StartTag<'a> {
    pub span: Span,
    pub attributes: Vec<Attribute<'a>>,
    pub self_closing: bool,
}

#[derive(Debug)]
pub struct Attribute<'a> {
    pub span: Span,
    pub key: AttributeKey,
    pub value: Option<AttributeValue<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum AttributeKey {
    Plain(Identifier),
    Directive(DirectiveKey),
}

/// Key of a directive attribute, e.g. `v-on:click.stop` or `@click.stop`
#[derive(Debug, Clone)]
pub struct DirectiveKey {
    pub span: Span,
    /// Normalized directive name without the `v-` prefix (`bind`, `on`, `if`, ...)
    pub name: Identifier,
    /// `:`, `@`, `#` or `.` when written in shorthand form
    pub shorthand: Option<char>,
    pub argument: Option<DirectiveArgument>,
    pub modifiers: Vec<Identifier>,
}

#[derive(Debug, Clone)]
pub enum DirectiveArgument {
    Static(Identifier),
    /// `[expr]`; `raw` is the text between the brackets
    Dynamic { span: Span, raw: String },
}

impl DirectiveArgument {
    pub fn span(&self) -> Span {
        match self {
            Self::Static(ident) => ident.span,
            Self::Dynamic { span, .. } => *span,
        }
    }

    pub fn static_name(&self) -> Option<&str> {
        match self {
            Self::Static(ident) => Some(&ident.name),
            Self::Dynamic { .. } => None,
        }
    }
}

#[derive(Debug)]
pub struct AttributeValue<'a> {
    /// Including quotes
    pub span: Span,
    /// Text between the quotes
    pub value_span: Span,
    pub raw: &'a str,
    pub quote: Option<char>,
    pub expression: Option<DirectiveExpression<'a>>,
}

#[derive(Debug)]
pub enum DirectiveExpression<'a> {
    Expression(Expression<'a>),
    For(ForExpression<'a>),
    /// `v-on` value that is a statement list rather than a single expression
    Handler(ArenaVec<'a, Statement<'a>>),
    /// `v-slot` parameters, parsed as the parameters of an arrow function
    SlotScope(ArenaBox<'a, ArrowFunctionExpression<'a>>),
    Invalid,
}

impl<'a> DirectiveExpression<'a> {
    pub fn as_expression(&self) -> Option<&Expression<'a>> {
        match self {
            Self::Expression(expr) => Some(expr),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForOperator {
    In,
    Of,
}

/// `v-for="(item, index) in items"`
#[derive(Debug)]
pub struct ForExpression<'a> {
    /// Aliases, parsed as the parameters of an arrow function
    pub left: ArenaBox<'a, ArrowFunctionExpression<'a>>,
    pub right: Expression<'a>,
    pub operator: ForOperator,
}

/// `{{ expression }}`
#[derive(Debug)]
pub struct Interpolation<'a> {
    pub open: Span,
    pub close: Span,
    pub expression: Option<Expression<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `<div`
    TagOpen,
    /// `</div`
    EndTagOpen,
    /// `>`
    TagClose,
    /// `/>`
    TagSelfClose,
    AttrName,
    AttrEquals,
    AttrValue,
    Text,
    Whitespace,
    MustacheOpen,
    MustacheClose,
    Comment,
    /// Unparsed content: `<script>` bodies, interpolation bodies
    RawText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }
}

/// Arena holding every template node and token of one file
#[derive(Debug)]
pub struct TemplateAst<'a> {
    source: &'a str,
    nodes: Vec<Node<'a>>,
    tokens: Vec<Token>,
}

impl<'a> TemplateAst<'a> {
    pub(crate) fn new(source: &'a str, nodes: Vec<Node<'a>>, tokens: Vec<Token>) -> Self {
        Self {
            source,
            nodes,
            tokens,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node<'a> {
        &self.nodes[id.index()]
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node<'a>> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn element(&self, id: NodeId) -> Option<&Element<'a>> {
        match &self.node(id).kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.node(id).kind {
            NodeKind::Root(children) => children,
            NodeKind::Element(element) => &element.children,
            _ => &[],
        }
    }

    /// Ancestors from the parent up to the root
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    /// All descendants of `id` in document order, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    pub fn text(&self, span: Span) -> &'a str {
        self.source
            .get(span.start as usize..span.end as usize)
            .unwrap_or("")
    }

    pub fn node_text(&self, id: NodeId) -> &'a str {
        self.text(self.node(id).span)
    }

    /// Text or comment nodes that contain nothing but whitespace, and comments
    pub fn is_trivia(&self, id: NodeId) -> bool {
        match self.node(id).kind {
            NodeKind::Text => self.node_text(id).trim().is_empty(),
            NodeKind::Comment => true,
            _ => false,
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Index of the first token starting at or after `offset`
    pub fn token_index_at(&self, offset: u32) -> usize {
        self.tokens.partition_point(|token| token.span.start < offset)
    }

    /// First token at or after `offset` that is not whitespace
    pub fn first_token_after(&self, offset: u32) -> Option<&Token> {
        self.tokens[self.token_index_at(offset)..]
            .iter()
            .find(|token| !token.is_whitespace())
    }

    /// Last token ending at or before `offset` that is not whitespace
    pub fn last_token_before(&self, offset: u32) -> Option<&Token> {
        let end = self.tokens.partition_point(|token| token.span.end <= offset);
        self.tokens[..end].iter().rev().find(|token| !token.is_whitespace())
    }

    /// Tokens fully contained in `span`
    pub fn tokens_in(&self, span: Span) -> &[Token] {
        let start = self.token_index_at(span.start);
        let end = self.tokens.partition_point(|token| token.span.end <= span.end);
        if end < start {
            return &[];
        }
        &self.tokens[start..end]
    }
}

impl<'a> Element<'a> {
    pub fn attribute(&self, name: &str) -> Option<&Attribute<'a>> {
        self.start_tag.attributes.iter().find(|attr| {
            matches!(&attr.key, AttributeKey::Plain(ident) if ident.name == name)
        })
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Finds a directive by name and, optionally, static argument
    pub fn directive(&self, name: &str, argument: Option<&str>) -> Option<&Attribute<'a>> {
        self.start_tag.attributes.iter().find(|attr| {
            attr.directive_key().is_some_and(|key| {
                key.name.name == name
                    && argument.is_none_or(|arg| {
                        key.argument.as_ref().and_then(DirectiveArgument::static_name) == Some(arg)
                    })
            })
        })
    }

    pub fn has_directive(&self, name: &str) -> bool {
        self.directive(name, None).is_some()
    }

    pub fn is_self_closing(&self) -> bool {
        self.start_tag.self_closing
    }
}

impl<'a> Attribute<'a> {
    pub fn directive_key(&self) -> Option<&DirectiveKey> {
        match &self.key {
            AttributeKey::Directive(key) => Some(key),
            AttributeKey::Plain(_) => None,
        }
    }

    pub fn is_directive(&self) -> bool {
        matches!(self.key, AttributeKey::Directive(_))
    }

    pub fn key_span(&self) -> Span {
        match &self.key {
            AttributeKey::Plain(ident) => ident.span,
            AttributeKey::Directive(key) => key.span,
        }
    }

    /// Parsed directive value, if any
    pub fn expression(&self) -> Option<&DirectiveExpression<'a>> {
        self.value.as_ref().and_then(|value| value.expression.as_ref())
    }
}
