//! Single-file component parser
//!
//! Splits a component into its blocks, builds an arena AST for the markup
//! with a source-ordered token stream, and parses every embedded script
//! fragment (directive values, interpolations, `<script>` blocks) with oxc.

pub mod ast;
pub mod check;
mod descriptor;
mod expression;
mod line_index;
mod parser;

use oxc_span::Span;

pub use ast::*;
pub use check::*;
pub use descriptor::{parse_sfc, ScriptBlock, SfcDescriptor, SfcParseResult};
pub use line_index::{LineCol, LineIndex};

/// A recoverable problem found while parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}..{}", self.message, self.span.start, self.span.end)
    }
}
