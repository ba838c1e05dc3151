//! Fix synthesis and application
//!
//! Rules describe a correction as a list of edits against the original,
//! unmodified source. [`FixBuilder`] validates that the edits are in bounds and
//! pairwise disjoint; anything else yields no fix, and the diagnostic is
//! reported without one.

use oxc_span::Span;

use crate::diagnostic::{Diagnostic, Edit, Fix};

/// Collects edits for one fix
#[derive(Debug)]
pub struct FixBuilder {
    source_len: u32,
    edits: Vec<Edit>,
    message: Option<String>,
    invalid: bool,
}

impl FixBuilder {
    pub fn new(source: &str) -> Self {
        Self {
            source_len: source.len() as u32,
            edits: Vec::new(),
            message: None,
            invalid: false,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn insert_text_before(&mut self, span: Span, text: impl Into<String>) -> &mut Self {
        self.push(Span::empty(span.start), text.into())
    }

    pub fn insert_text_after(&mut self, span: Span, text: impl Into<String>) -> &mut Self {
        self.push(Span::empty(span.end), text.into())
    }

    pub fn insert_text_before_range(
        &mut self,
        range: [u32; 2],
        text: impl Into<String>,
    ) -> &mut Self {
        self.push(Span::empty(range[0]), text.into())
    }

    pub fn insert_text_after_range(
        &mut self,
        range: [u32; 2],
        text: impl Into<String>,
    ) -> &mut Self {
        self.push(Span::empty(range[1]), text.into())
    }

    pub fn remove(&mut self, span: Span) -> &mut Self {
        self.push(span, String::new())
    }

    pub fn remove_range(&mut self, range: [u32; 2]) -> &mut Self {
        self.replace_range(range, "")
    }

    pub fn replace(&mut self, span: Span, text: impl Into<String>) -> &mut Self {
        self.push(span, text.into())
    }

    pub fn replace_range(&mut self, range: [u32; 2], text: impl Into<String>) -> &mut Self {
        if range[0] > range[1] {
            self.invalid = true;
            return self;
        }
        self.push(Span::new(range[0], range[1]), text.into())
    }

    fn push(&mut self, span: Span, text: String) -> &mut Self {
        if span.end > self.source_len {
            self.invalid = true;
        }
        self.edits.push(Edit::new(span, text));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Sorts the edits and checks them. Returns `None` when the fix would be
    /// unsafe to apply.
    pub fn build(self) -> Option<Fix> {
        if self.invalid || self.edits.is_empty() {
            return None;
        }
        let mut edits = self.edits;
        edits.sort_by_key(|edit| (edit.start, edit.end));
        let disjoint = edits.windows(2).all(|pair| pair[0].end <= pair[1].start);
        if !disjoint {
            tracing::trace!("dropping fix with overlapping edits");
            return None;
        }
        Some(Fix {
            edits,
            message: self.message,
        })
    }
}

/// Output of [`apply_fixes`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedSource {
    pub output: String,
    /// Number of fixes spliced into the output
    pub applied: usize,
    /// Fixes skipped because they overlapped an earlier one
    pub remaining: usize,
}

impl FixedSource {
    pub fn changed(&self) -> bool {
        self.applied > 0
    }
}

/// Applies every diagnostic's fix in one pass.
///
/// Fixes are taken in order of their start position; a fix that touches or
/// overlaps the range of an already accepted fix is skipped and left for a
/// later pass.
pub fn apply_fixes(source: &str, diagnostics: &[Diagnostic]) -> FixedSource {
    let mut fixes: Vec<&Fix> = diagnostics.iter().filter_map(|d| d.fix.as_ref()).collect();
    fixes.sort_by_key(|fix| {
        let span = fix.span();
        (span.start, span.end)
    });

    let mut output = String::with_capacity(source.len());
    let mut cursor = 0usize;
    let mut last_end: Option<u32> = None;
    let mut applied = 0;
    let mut remaining = 0;

    for fix in fixes {
        let span = fix.span();
        let in_bounds = span.end as usize <= source.len();
        if !in_bounds || last_end.is_some_and(|end| end >= span.start) {
            remaining += 1;
            continue;
        }
        for edit in &fix.edits {
            output.push_str(source.get(cursor..edit.start as usize).unwrap_or(""));
            output.push_str(&edit.replacement);
            cursor = edit.end as usize;
        }
        last_end = Some(span.end);
        applied += 1;
    }
    output.push_str(source.get(cursor..).unwrap_or(""));

    FixedSource {
        output,
        applied,
        remaining,
    }
}

/// Number of line breaks in `source[start..end]`
pub fn line_breaks_between(source: &str, start: u32, end: u32) -> usize {
    source
        .get(start as usize..end as usize)
        .map_or(0, |text| text.matches('\n').count())
}

/// "no line breaks", "1 line break", "2 line breaks"
pub fn line_break_phrase(count: usize) -> String {
    match count {
        0 => "no line breaks".to_string(),
        1 => "1 line break".to_string(),
        n => format!("{n} line breaks"),
    }
}
