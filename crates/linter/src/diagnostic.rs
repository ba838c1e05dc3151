//! Diagnostic types for lint results

use oxc_span::Span;
use serde::Serialize;

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// A single text replacement over the original source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edit {
    /// Start position of the span to replace
    pub start: u32,
    /// End position of the span to replace
    pub end: u32,
    /// The replacement text
    pub replacement: String,
}

impl Edit {
    pub fn new(span: Span, replacement: impl Into<String>) -> Self {
        Self {
            start: span.start,
            end: span.end,
            replacement: replacement.into(),
        }
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

/// A fix for a diagnostic: pairwise disjoint edits sorted by position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fix {
    pub edits: Vec<Edit>,
    /// Description of what the fix does
    pub message: Option<String>,
}

impl Fix {
    /// A fix made of a single replacement
    pub fn new(span: Span, replacement: impl Into<String>) -> Self {
        Self {
            edits: vec![Edit::new(span, replacement)],
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Smallest span covering every edit
    pub fn span(&self) -> Span {
        let start = self.edits.iter().map(|e| e.start).min().unwrap_or(0);
        let end = self.edits.iter().map(|e| e.end).max().unwrap_or(0);
        Span::new(start, end)
    }
}

/// A named candidate fix that is never applied automatically
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub message: String,
    pub fix: Fix,
}

/// A lint diagnostic
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// The rule that produced this diagnostic
    pub rule: String,
    /// Key of the message template the message was rendered from
    pub message_id: Option<String>,
    /// Start position of the span
    pub start: u32,
    /// End position of the span
    pub end: u32,
    /// Primary message
    pub message: String,
    /// Optional help text
    pub help: Option<String>,
    /// Severity level
    pub severity: DiagnosticSeverity,
    /// Optional labels pointing to related locations
    pub labels: Vec<(u32, u32, String)>,
    /// Automatic fix
    pub fix: Option<Fix>,
    /// Mutually exclusive manual fixes
    pub suggestions: Vec<Suggestion>,
}

impl Diagnostic {
    pub fn new(rule: impl Into<String>, span: Span, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            message_id: None,
            start: span.start,
            end: span.end,
            message: message.into(),
            help: None,
            severity: DiagnosticSeverity::Warning,
            labels: Vec::new(),
            fix: None,
            suggestions: Vec::new(),
        }
    }

    /// Builds a diagnostic from a message template with `{{name}}` placeholders
    pub fn from_template(
        rule: &str,
        message_id: &str,
        template: &str,
        span: Span,
        data: &[(&str, &str)],
    ) -> Self {
        let mut diagnostic = Self::new(rule, span, render_message(template, data));
        diagnostic.message_id = Some(message_id.to_string());
        diagnostic
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn with_severity(mut self, severity: DiagnosticSeverity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push((span.start, span.end, message.into()));
        self
    }

    /// Attaches a fix. `None` keeps the diagnostic unfixed, which is how an
    /// unsafe fix is suppressed.
    pub fn with_fix(mut self, fix: Option<Fix>) -> Self {
        self.fix = fix;
        self
    }

    pub fn with_suggestion(mut self, message: impl Into<String>, fix: Option<Fix>) -> Self {
        if let Some(fix) = fix {
            self.suggestions.push(Suggestion {
                message: message.into(),
                fix,
            });
        }
        self
    }

    pub fn error(rule: impl Into<String>, span: Span, message: impl Into<String>) -> Self {
        Self::new(rule, span, message).with_severity(DiagnosticSeverity::Error)
    }

    pub fn warning(rule: impl Into<String>, span: Span, message: impl Into<String>) -> Self {
        Self::new(rule, span, message).with_severity(DiagnosticSeverity::Warning)
    }
}

/// Replaces `{{name}}` placeholders; unknown placeholders are kept verbatim
pub fn render_message(template: &str, data: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };
        let key = after[..close].trim();
        match data.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..open + 2 + close + 2]),
        }
        rest = &after[close + 2..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_message() {
        assert_eq!(
            render_message("Duplicate attribute '{{name}}'.", &[("name", "class")]),
            "Duplicate attribute 'class'."
        );
        assert_eq!(render_message("{{ a }}-{{b}}", &[("a", "1")]), "1-{{b}}");
        assert_eq!(render_message("open {{ only", &[]), "open {{ only");
    }

    #[test]
    fn test_suppressed_fix() {
        let diagnostic = Diagnostic::warning("r", Span::new(0, 1), "m").with_fix(None);
        assert!(diagnostic.fix.is_none());
        let diagnostic = diagnostic.with_suggestion("s", None);
        assert!(diagnostic.suggestions.is_empty());
    }
}
