//! Lint context for rule execution

use oxc_span::Span;
use sfc::{LineCol, LineIndex, SfcDescriptor, TemplateAst};

use crate::fixer::FixBuilder;
use crate::scope::ScopeTracker;
use crate::Diagnostic;

/// Context passed to rules during linting.
///
/// Accessors hand out references that outlive the borrow of the context, so a
/// rule can hold on to nodes while it reports.
pub struct LintContext<'c, 'a> {
    /// Source code being linted
    source_text: &'a str,
    ast: &'c TemplateAst<'a>,
    descriptor: &'c SfcDescriptor<'a>,
    scopes: &'c ScopeTracker,
    line_index: &'c LineIndex,
    /// Collected diagnostics
    diagnostics: Vec<Diagnostic>,
}

impl<'c, 'a> LintContext<'c, 'a> {
    pub fn new(
        ast: &'c TemplateAst<'a>,
        descriptor: &'c SfcDescriptor<'a>,
        scopes: &'c ScopeTracker,
        line_index: &'c LineIndex,
    ) -> Self {
        Self {
            source_text: ast.source(),
            ast,
            descriptor,
            scopes,
            line_index,
            diagnostics: Vec::new(),
        }
    }

    /// Get the source text
    pub fn source_text(&self) -> &'a str {
        self.source_text
    }

    pub fn ast(&self) -> &'c TemplateAst<'a> {
        self.ast
    }

    pub fn descriptor(&self) -> &'c SfcDescriptor<'a> {
        self.descriptor
    }

    pub fn scopes(&self) -> &'c ScopeTracker {
        self.scopes
    }

    /// Get a slice of source text for a span
    pub fn span_text(&self, span: Span) -> &'a str {
        self.source_text
            .get(span.start as usize..span.end as usize)
            .unwrap_or("")
    }

    pub fn line_col(&self, offset: u32) -> LineCol {
        self.line_index.line_col(offset)
    }

    /// Zero-based line of an offset
    pub fn line(&self, offset: u32) -> u32 {
        self.line_index.line(offset)
    }

    /// A fix builder bounded by this file's source
    pub fn fixer(&self) -> FixBuilder {
        FixBuilder::new(self.source_text)
    }

    /// Report a diagnostic
    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Get reference to diagnostics
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub(crate) fn diagnostics_mut(&mut self) -> &mut [Diagnostic] {
        &mut self.diagnostics
    }

    /// Consume the context and return all diagnostics
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
