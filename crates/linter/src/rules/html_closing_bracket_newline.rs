//! vue/html-closing-bracket-newline
//!
//! Require or disallow a line break before the `>` or `/>` of a tag.

use oxc_span::Span;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sfc::TokenKind;

use crate::context::LintContext;
use crate::fixer::line_break_phrase;
use crate::matcher::{ElementPattern, Match, Pattern, Selector};
use crate::rule::{option, Rule, RuleCategory, RuleMeta};
use crate::schema::OptionSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineBreak {
    Always,
    Never,
}

impl LineBreak {
    fn count(self) -> u32 {
        match self {
            Self::Always => 1,
            Self::Never => 0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfClosingTagConfig {
    pub singleline: Option<LineBreak>,
    pub multiline: Option<LineBreak>,
}

/// Configuration for html-closing-bracket-newline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HtmlClosingBracketNewlineConfig {
    /// Tags whose last attribute ends on the line the tag starts on
    pub singleline: LineBreak,
    pub multiline: LineBreak,
    /// Overrides for tags closed with `/>`
    pub self_closing_tag: SelfClosingTagConfig,
}

impl Default for HtmlClosingBracketNewlineConfig {
    fn default() -> Self {
        Self {
            singleline: LineBreak::Never,
            multiline: LineBreak::Always,
            self_closing_tag: SelfClosingTagConfig::default(),
        }
    }
}

/// html-closing-bracket-newline rule
#[derive(Debug, Clone, Default)]
pub struct HtmlClosingBracketNewline {
    pub config: HtmlClosingBracketNewlineConfig,
}

impl RuleMeta for HtmlClosingBracketNewline {
    const NAME: &'static str = "html-closing-bracket-newline";
    const CATEGORY: RuleCategory = RuleCategory::StronglyRecommended;
    const DESCRIPTION: &'static str =
        "require or disallow a line break before tag's closing brackets";
    const FIXABLE: bool = true;
    const MESSAGES: &'static [(&'static str, &'static str)] = &[(
        "expectedBeforeClosingBracket",
        "Expected {{expected}} before closing bracket, but {{actual}} found.",
    )];

    fn schema() -> OptionSchema {
        const MODE: OptionSchema = OptionSchema::Enum(&["always", "never"]);
        OptionSchema::Tuple(&[OptionSchema::Object(&[
            ("singleline", MODE),
            ("multiline", MODE),
            (
                "selfClosingTag",
                OptionSchema::Object(&[("singleline", MODE), ("multiline", MODE)]),
            ),
        ])])
    }

    fn from_options(options: &[Value]) -> Result<Self, serde_json::Error> {
        Ok(Self::with_config(option(options, 0)?))
    }
}

impl HtmlClosingBracketNewline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: HtmlClosingBracketNewlineConfig) -> Self {
        Self { config }
    }

    fn expected(&self, multiline: bool, self_closing: bool) -> LineBreak {
        let overrides = &self.config.self_closing_tag;
        match (multiline, self_closing) {
            (false, true) => overrides.singleline.unwrap_or(self.config.singleline),
            (true, true) => overrides.multiline.unwrap_or(self.config.multiline),
            (false, false) => self.config.singleline,
            (true, false) => self.config.multiline,
        }
    }

    fn check_tag(&self, tag: Span, ctx: &mut LintContext<'_, '_>) {
        let ast = ctx.ast();
        let Some(close) = ast.tokens_in(tag).last().copied() else {
            return;
        };
        if !matches!(close.kind, TokenKind::TagClose | TokenKind::TagSelfClose) {
            return;
        }
        let Some(prev) = ast.last_token_before(close.span.start).copied() else {
            return;
        };
        let prev_line = ctx.line(prev.span.end);
        let multiline = ctx.line(tag.start) != prev_line;
        let self_closing = close.kind == TokenKind::TagSelfClose;
        let expected = self.expected(multiline, self_closing).count();
        let actual = ctx.line(close.span.start) - prev_line;
        if actual == expected {
            return;
        }

        let expected_phrase = line_break_phrase(expected as usize);
        let actual_phrase = line_break_phrase(actual as usize);
        let mut fixer = ctx.fixer();
        fixer.replace_range([prev.span.end, close.span.start], "\n".repeat(expected as usize));
        ctx.report(
            Self::diagnostic(
                "expectedBeforeClosingBracket",
                Span::new(prev.span.end, close.span.end),
                &[("expected", expected_phrase.as_str()), ("actual", actual_phrase.as_str())],
            )
            .with_fix(fixer.build()),
        );
    }
}

impl Rule for HtmlClosingBracketNewline {
    fn selectors(&self) -> Vec<Selector> {
        vec![Selector::enter(Pattern::Element(ElementPattern::any()))]
    }

    fn enter(&mut self, matched: &Match, ctx: &mut LintContext<'_, '_>) {
        let Some(element) = matched.element(ctx.ast()) else {
            return;
        };
        self.check_tag(element.start_tag.span, ctx);
        if let Some(end_tag) = element.end_tag {
            self.check_tag(end_tag, ctx);
        }
    }
}
