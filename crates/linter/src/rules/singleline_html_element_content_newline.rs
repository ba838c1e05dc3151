//! vue/singleline-html-element-content-newline
//!
//! Require a line break after the opening tag and before the closing tag of
//! an element written on one line.

use oxc_span::Span;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sfc::{Element, NodeId};

use crate::context::LintContext;
use crate::matcher::{ElementPattern, Match, Pattern, Selector};
use crate::rule::{option, Rule, RuleCategory, RuleMeta};
use crate::schema::OptionSchema;
use crate::utils::to_pascal_case;

/// Inline elements whose content is left alone by default
pub const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "audio", "b", "bdi", "bdo", "canvas", "cite", "code", "data", "del", "dfn", "em",
    "i", "iframe", "ins", "kbd", "label", "map", "mark", "noscript", "object", "output",
    "picture", "q", "ruby", "s", "samp", "small", "span", "strong", "sub", "sup", "svg", "time",
    "u", "var", "video",
];

/// Configuration for singleline-html-element-content-newline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SinglelineHtmlElementContentNewlineConfig {
    pub ignore_when_no_attributes: bool,
    pub ignore_when_empty: bool,
    /// Elements whose content is not checked; replaces the defaults
    pub ignores: Vec<String>,
    /// Elements ignored in addition to `ignores`
    pub external_ignores: Vec<String>,
}

impl Default for SinglelineHtmlElementContentNewlineConfig {
    fn default() -> Self {
        let mut ignores = vec!["pre".to_string(), "textarea".to_string()];
        ignores.extend(INLINE_ELEMENTS.iter().map(|name| name.to_string()));
        Self {
            ignore_when_no_attributes: true,
            ignore_when_empty: true,
            ignores,
            external_ignores: Vec::new(),
        }
    }
}

/// singleline-html-element-content-newline rule
#[derive(Debug, Clone, Default)]
pub struct SinglelineHtmlElementContentNewline {
    pub config: SinglelineHtmlElementContentNewlineConfig,
    /// Ignored element currently being walked
    inside_ignored: Option<NodeId>,
}

impl RuleMeta for SinglelineHtmlElementContentNewline {
    const NAME: &'static str = "singleline-html-element-content-newline";
    const CATEGORY: RuleCategory = RuleCategory::StronglyRecommended;
    const DESCRIPTION: &'static str =
        "require a line break before and after the contents of a singleline element";
    const FIXABLE: bool = true;
    const MESSAGES: &'static [(&'static str, &'static str)] = &[
        (
            "unexpectedAfterClosingBracket",
            "Expected 1 line break after opening tag (`<{{name}}>`), but no line breaks found.",
        ),
        (
            "unexpectedBeforeClosingBracket",
            "Expected 1 line break before closing tag (`</{{name}}>`), but no line breaks found.",
        ),
    ];

    fn schema() -> OptionSchema {
        OptionSchema::Tuple(&[OptionSchema::Object(&[
            ("ignoreWhenNoAttributes", OptionSchema::Bool),
            ("ignoreWhenEmpty", OptionSchema::Bool),
            ("ignores", OptionSchema::StringArray),
            ("externalIgnores", OptionSchema::StringArray),
        ])])
    }

    fn from_options(options: &[Value]) -> Result<Self, serde_json::Error> {
        Ok(Self::with_config(option(options, 0)?))
    }
}

impl SinglelineHtmlElementContentNewline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SinglelineHtmlElementContentNewlineConfig) -> Self {
        Self {
            config,
            inside_ignored: None,
        }
    }

    fn is_ignored(&self, element: &Element<'_>) -> bool {
        let pascal = to_pascal_case(element.raw_name);
        self.config
            .ignores
            .iter()
            .chain(&self.config.external_ignores)
            .any(|name| *name == element.name || name == element.raw_name || *name == pascal)
    }
}

impl Rule for SinglelineHtmlElementContentNewline {
    fn selectors(&self) -> Vec<Selector> {
        let element = Pattern::Element(ElementPattern::any());
        vec![Selector::enter(element), Selector::exit(element)]
    }

    fn enter(&mut self, matched: &Match, ctx: &mut LintContext<'_, '_>) {
        if self.inside_ignored.is_some() {
            return;
        }
        let ast = ctx.ast();
        let Some(element) = ast.element(matched.node) else {
            return;
        };
        if self.is_ignored(element) {
            self.inside_ignored = Some(matched.node);
            return;
        }
        let Some(end_tag) = element.end_tag else {
            return;
        };
        let start_tag = element.start_tag.span;
        if element.is_self_closing() || ctx.line(start_tag.start) != ctx.line(end_tag.start) {
            return;
        }
        if self.config.ignore_when_no_attributes && element.start_tag.attributes.is_empty() {
            return;
        }

        let content = Span::new(start_tag.end, end_tag.start);
        let has_content = ast.tokens_in(content).iter().any(|token| !token.is_whitespace());
        if self.config.ignore_when_empty && !has_content {
            return;
        }
        let content_first = ast
            .first_token_after(start_tag.end)
            .map_or(end_tag.start, |token| token.span.start.min(end_tag.start));
        let content_last = ast
            .last_token_before(end_tag.start)
            .map_or(start_tag.end, |token| token.span.end.max(start_tag.end));
        let data = [("name", element.raw_name)];

        let mut fixer = ctx.fixer();
        fixer.replace_range([start_tag.end, content_first], "\n");
        ctx.report(
            Self::diagnostic(
                "unexpectedAfterClosingBracket",
                Span::new(start_tag.end, content_first),
                &data,
            )
            .with_fix(fixer.build()),
        );

        // an empty element needs a single break, already requested above
        if !has_content {
            return;
        }
        let mut fixer = ctx.fixer();
        fixer.replace_range([content_last, end_tag.start], "\n");
        ctx.report(
            Self::diagnostic(
                "unexpectedBeforeClosingBracket",
                Span::new(content_last, end_tag.start),
                &data,
            )
            .with_fix(fixer.build()),
        );
    }

    fn exit(&mut self, matched: &Match, _ctx: &mut LintContext<'_, '_>) {
        if self.inside_ignored == Some(matched.node) {
            self.inside_ignored = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_utils::{fix_rule, lint_rule, messages};
    use serde_json::json;

    #[test]
    fn test_config_deserialize() {
        let json = r#"{"ignoreWhenNoAttributes": false, "externalIgnores": ["MyText"]}"#;
        let config: SinglelineHtmlElementContentNewlineConfig = serde_json::from_str(json).unwrap();
        assert!(!config.ignore_when_no_attributes);
        assert!(config.ignore_when_empty);
        assert!(config.ignores.iter().any(|name| name == "span"));
        assert_eq!(config.external_ignores, ["MyText"]);
    }

    #[test]
    fn test_breaks_around_content() {
        let source = "<template>\n<div class=\"panel\">content</div>\n</template>";
        let diagnostics = lint_rule::<SinglelineHtmlElementContentNewline>(source, json!([]));
        assert_eq!(
            messages(&diagnostics),
            [
                "Expected 1 line break after opening tag (`<div>`), but no line breaks found.",
                "Expected 1 line break before closing tag (`</div>`), but no line breaks found.",
            ]
        );
        assert_eq!(
            fix_rule::<SinglelineHtmlElementContentNewline>(source, json!([])),
            "<template>\n<div class=\"panel\">\ncontent\n</div>\n</template>"
        );
    }

    #[test]
    fn test_spacing_is_replaced() {
        let source = "<template>\n<div id=\"a\">  {{ msg }} </div>\n</template>";
        assert_eq!(
            fix_rule::<SinglelineHtmlElementContentNewline>(source, json!([])),
            "<template>\n<div id=\"a\">\n{{ msg }}\n</div>\n</template>"
        );
    }

    #[test]
    fn test_ignored_elements() {
        let source = concat!(
            "<template>\n<div>content</div>\n<p class=\"a\">",
            "<span class=\"b\"><i class=\"c\">x</i></span></p>\n",
            "<pre class=\"a\"><div class=\"b\">x</div></pre>\n</template>",
        );
        let diagnostics = lint_rule::<SinglelineHtmlElementContentNewline>(source, json!([]));
        assert_eq!(diagnostics.len(), 2, "{:?}", messages(&diagnostics));
        assert!(diagnostics
            .iter()
            .all(|d| d.message.contains("`<p>`") || d.message.contains("`</p>`")));
    }

    #[test]
    fn test_empty_elements() {
        let source = "<template>\n<div class=\"a\"></div>\n</template>";
        assert!(lint_rule::<SinglelineHtmlElementContentNewline>(source, json!([])).is_empty());
        let options = json!([{ "ignoreWhenEmpty": false }]);
        assert_eq!(
            fix_rule::<SinglelineHtmlElementContentNewline>(source, options),
            "<template>\n<div class=\"a\">\n</div>\n</template>"
        );
    }

    #[test]
    fn test_multiline_elements_are_skipped() {
        let source = "<template>\n<div class=\"a\">\n  content</div>\n</template>";
        assert!(lint_rule::<SinglelineHtmlElementContentNewline>(source, json!([])).is_empty());
    }
}
