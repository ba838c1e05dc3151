//! Compiled node patterns and structural queries over the template tree
//!
//! Rules declare the nodes they care about as [`Selector`]s built from
//! [`Pattern`]s once, when the rule is created. The runner evaluates them
//! against each node as it walks the tree. Evaluation is pure: a pattern can
//! be matched against the same node any number of times.

use sfc::{
    is_custom_component, Attribute, AttributeKey, DirectiveArgument, Element, NodeId, NodeKind,
    TemplateAst,
};

/// Constraint on a directive's argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentPattern {
    Any,
    /// No argument at all
    None,
    /// A static argument with this name
    Static(&'static str),
    /// A `[dynamic]` argument
    Dynamic,
}

/// Matches directive attributes such as `v-on:click.stop`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectivePattern {
    pub name: &'static str,
    pub argument: ArgumentPattern,
    /// Modifiers that must all be present
    pub modifiers: &'static [&'static str],
}

impl DirectivePattern {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            argument: ArgumentPattern::Any,
            modifiers: &[],
        }
    }

    pub const fn with_argument(mut self, argument: ArgumentPattern) -> Self {
        self.argument = argument;
        self
    }

    pub const fn with_modifiers(mut self, modifiers: &'static [&'static str]) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn matches_attribute(&self, attribute: &Attribute<'_>) -> bool {
        let Some(key) = attribute.directive_key() else {
            return false;
        };
        if key.name.name != self.name {
            return false;
        }
        let argument_ok = match (self.argument, &key.argument) {
            (ArgumentPattern::Any, _) => true,
            (ArgumentPattern::None, argument) => argument.is_none(),
            (ArgumentPattern::Static(name), Some(DirectiveArgument::Static(ident))) => {
                ident.name == name
            }
            (ArgumentPattern::Dynamic, Some(DirectiveArgument::Dynamic { .. })) => true,
            _ => false,
        };
        argument_ok
            && self
                .modifiers
                .iter()
                .all(|required| key.modifiers.iter().any(|m| m.name == *required))
    }
}

/// Matches plain (non-directive) attributes by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributePattern {
    pub name: &'static str,
}

impl AttributePattern {
    pub fn matches_attribute(&self, attribute: &Attribute<'_>) -> bool {
        matches!(&attribute.key, AttributeKey::Plain(ident) if ident.name == self.name)
    }
}

/// Matches elements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementPattern {
    /// Element names to accept; empty accepts any element
    pub names: &'static [&'static str],
    /// Directive the element must carry
    pub directive: Option<&'static str>,
    /// Plain attribute the element must carry
    pub attribute: Option<&'static str>,
    pub exclude_components: bool,
}

impl ElementPattern {
    pub const fn any() -> Self {
        Self {
            names: &[],
            directive: None,
            attribute: None,
            exclude_components: false,
        }
    }

    pub const fn named(names: &'static [&'static str]) -> Self {
        Self {
            names,
            ..Self::any()
        }
    }

    pub const fn with_directive(mut self, name: &'static str) -> Self {
        self.directive = Some(name);
        self
    }

    pub const fn with_attribute(mut self, name: &'static str) -> Self {
        self.attribute = Some(name);
        self
    }

    pub const fn excluding_components(mut self) -> Self {
        self.exclude_components = true;
        self
    }

    pub fn matches_element(&self, element: &Element<'_>) -> bool {
        (self.names.is_empty() || self.names.contains(&element.name.as_str()))
            && self.directive.is_none_or(|name| element.has_directive(name))
            && self.attribute.is_none_or(|name| element.has_attribute(name))
            && !(self.exclude_components && is_custom_component(element))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Element(ElementPattern),
    /// Each directive attribute of an element
    Directive(DirectivePattern),
    /// Each plain attribute of an element
    Attribute(AttributePattern),
    Interpolation,
}

/// A node matched by a selector, with the captured attribute if the pattern
/// targets attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub node: NodeId,
    /// Index into the element's attribute list
    pub attribute: Option<usize>,
    /// Index of the selector in the rule's selector list
    pub selector: usize,
}

impl Match {
    pub fn element<'t, 'a>(&self, ast: &'t TemplateAst<'a>) -> Option<&'t Element<'a>> {
        ast.element(self.node)
    }

    pub fn attribute<'t, 'a>(&self, ast: &'t TemplateAst<'a>) -> Option<&'t Attribute<'a>> {
        let element = ast.element(self.node)?;
        element.start_tag.attributes.get(self.attribute?)
    }
}

impl Pattern {
    /// First match of the pattern on `node`
    pub fn matches(&self, ast: &TemplateAst<'_>, node: NodeId) -> Option<Match> {
        self.matches_all(ast, node).into_iter().next()
    }

    /// Every match on `node`; attribute patterns yield one match per
    /// matching attribute, in source order
    pub fn matches_all(&self, ast: &TemplateAst<'_>, node: NodeId) -> Vec<Match> {
        let single = |attribute| {
            vec![Match {
                node,
                attribute,
                selector: 0,
            }]
        };
        match (self, &ast.node(node).kind) {
            (Self::Element(pattern), NodeKind::Element(element)) => {
                if pattern.matches_element(element) {
                    single(None)
                } else {
                    Vec::new()
                }
            }
            (Self::Directive(pattern), NodeKind::Element(element)) => {
                attribute_matches(node, element, |attr| pattern.matches_attribute(attr))
            }
            (Self::Attribute(pattern), NodeKind::Element(element)) => {
                attribute_matches(node, element, |attr| pattern.matches_attribute(attr))
            }
            (Self::Interpolation, NodeKind::Interpolation(_)) => single(None),
            _ => Vec::new(),
        }
    }
}

fn attribute_matches(
    node: NodeId,
    element: &Element<'_>,
    predicate: impl Fn(&Attribute<'_>) -> bool,
) -> Vec<Match> {
    element
        .start_tag
        .attributes
        .iter()
        .enumerate()
        .filter(|(_, attr)| predicate(attr))
        .map(|(index, _)| Match {
            node,
            attribute: Some(index),
            selector: 0,
        })
        .collect()
}

/// When a selector's callback fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Before the node's descendants are visited
    Enter,
    /// After all of the node's descendants are visited
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selector {
    pub pattern: Pattern,
    pub phase: Phase,
}

impl Selector {
    pub const fn enter(pattern: Pattern) -> Self {
        Self {
            pattern,
            phase: Phase::Enter,
        }
    }

    pub const fn exit(pattern: Pattern) -> Self {
        Self {
            pattern,
            phase: Phase::Exit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conditional {
    If,
    ElseIf,
    Else,
}

/// Which branch of a conditional chain an element is
pub fn conditional_of(element: &Element<'_>) -> Option<Conditional> {
    if element.has_directive("if") {
        Some(Conditional::If)
    } else if element.has_directive("else-if") {
        Some(Conditional::ElseIf)
    } else if element.has_directive("else") {
        Some(Conditional::Else)
    } else {
        None
    }
}

fn sibling_element(ast: &TemplateAst<'_>, node: NodeId, forward: bool) -> Option<NodeId> {
    let parent = ast.parent(node)?;
    let siblings = ast.children(parent);
    let index = siblings.iter().position(|&id| id == node)?;
    let candidates: Box<dyn Iterator<Item = &NodeId>> = if forward {
        Box::new(siblings[index + 1..].iter())
    } else {
        Box::new(siblings[..index].iter().rev())
    };
    for &candidate in candidates {
        if ast.is_trivia(candidate) {
            continue;
        }
        return ast.element(candidate).map(|_| candidate);
    }
    None
}

/// Previous sibling element, skipping whitespace-only text and comments.
/// Any other node in between means there is none.
pub fn prev_element_sibling(ast: &TemplateAst<'_>, node: NodeId) -> Option<NodeId> {
    sibling_element(ast, node, false)
}

/// Next sibling element, skipping whitespace-only text and comments
pub fn next_element_sibling(ast: &TemplateAst<'_>, node: NodeId) -> Option<NodeId> {
    sibling_element(ast, node, true)
}

/// Earlier branches of the conditional chain `node` belongs to, nearest
/// first, ending at the chain's `v-if`. Empty when the chain is broken.
pub fn conditional_chain_before(ast: &TemplateAst<'_>, node: NodeId) -> Vec<NodeId> {
    let mut chain = Vec::new();
    let mut current = node;
    while let Some(prev) = prev_element_sibling(ast, current) {
        let Some(element) = ast.element(prev) else { break };
        match conditional_of(element) {
            Some(Conditional::ElseIf) => chain.push(prev),
            Some(Conditional::If) => {
                chain.push(prev);
                return chain;
            }
            _ => break,
        }
        current = prev;
    }
    Vec::new()
}

/// Where an upward search stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// The document root
    Root,
    /// The nearest enclosing `<template>` element
    Template,
    /// A specific ancestor, which is itself not searched
    Element(NodeId),
}

/// Nearest proper ancestor of `node` satisfying `predicate`, never looking
/// past `boundary`
pub fn find_ancestor(
    ast: &TemplateAst<'_>,
    node: NodeId,
    predicate: impl Fn(NodeId) -> bool,
    boundary: Boundary,
) -> Option<NodeId> {
    for ancestor in ast.ancestors(node) {
        let at_boundary = match boundary {
            Boundary::Root => ancestor == ast.root(),
            Boundary::Template => ast.element(ancestor).is_some_and(|e| e.name == "template"),
            Boundary::Element(id) => ancestor == id,
        };
        if at_boundary {
            return None;
        }
        if predicate(ancestor) {
            return Some(ancestor);
        }
    }
    None
}
