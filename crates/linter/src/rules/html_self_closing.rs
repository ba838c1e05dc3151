//! vue/html-self-closing
//!
//! Enforce self-closing style per element kind: HTML void elements, other
//! HTML elements, custom components, SVG and MathML.

use oxc_span::Span;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sfc::{is_custom_component, is_void_element, Element, Namespace, NodeKind};

use crate::context::LintContext;
use crate::matcher::{ElementPattern, Match, Pattern, Selector};
use crate::rule::{option, Rule, RuleCategory, RuleMeta};
use crate::schema::OptionSchema;

/// Whether a kind of element should self-close when it has no content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelfClosingMode {
    Always,
    Never,
    /// Either style is accepted
    Any,
}

/// Settings for elements in the HTML namespace
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HtmlSelfClosingHtmlConfig {
    pub void: SelfClosingMode,
    pub normal: SelfClosingMode,
    pub component: SelfClosingMode,
}

impl Default for HtmlSelfClosingHtmlConfig {
    fn default() -> Self {
        Self {
            void: SelfClosingMode::Never,
            normal: SelfClosingMode::Always,
            component: SelfClosingMode::Always,
        }
    }
}

/// Configuration for html-self-closing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HtmlSelfClosingConfig {
    pub html: HtmlSelfClosingHtmlConfig,
    pub svg: SelfClosingMode,
    pub math: SelfClosingMode,
}

impl Default for HtmlSelfClosingConfig {
    fn default() -> Self {
        Self {
            html: HtmlSelfClosingHtmlConfig::default(),
            svg: SelfClosingMode::Always,
            math: SelfClosingMode::Always,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementKind {
    Component,
    Void,
    Normal,
    Svg,
    Math,
}

impl ElementKind {
    fn of(element: &Element<'_>) -> Self {
        if is_custom_component(element) {
            return Self::Component;
        }
        match element.namespace {
            Namespace::Html if is_void_element(&element.name) => Self::Void,
            Namespace::Html => Self::Normal,
            Namespace::Svg => Self::Svg,
            Namespace::MathMl => Self::Math,
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::Component => "Vue.js custom components",
            Self::Void => "HTML void elements",
            Self::Normal => "HTML elements",
            Self::Svg => "SVG elements",
            Self::Math => "MathML elements",
        }
    }
}

const MODE: OptionSchema = OptionSchema::Enum(&["always", "never", "any"]);

/// html-self-closing rule
#[derive(Debug, Clone, Default)]
pub struct HtmlSelfClosing {
    pub config: HtmlSelfClosingConfig,
}

impl RuleMeta for HtmlSelfClosing {
    const NAME: &'static str = "html-self-closing";
    const CATEGORY: RuleCategory = RuleCategory::StronglyRecommended;
    const DESCRIPTION: &'static str = "enforce self-closing style";
    const FIXABLE: bool = true;
    const MESSAGES: &'static [(&'static str, &'static str)] = &[
        ("requireSelfClosing", "Require self-closing on {{elementType}} (<{{name}}>)."),
        ("disallowSelfClosing", "Disallow self-closing on {{elementType}} (<{{name}}/>)."),
    ];

    fn schema() -> OptionSchema {
        OptionSchema::Tuple(&[OptionSchema::Object(&[
            (
                "html",
                OptionSchema::Object(&[("normal", MODE), ("void", MODE), ("component", MODE)]),
            ),
            ("svg", MODE),
            ("math", MODE),
        ])])
    }

    fn from_options(options: &[Value]) -> Result<Self, serde_json::Error> {
        Ok(Self::with_config(option(options, 0)?))
    }
}

impl HtmlSelfClosing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: HtmlSelfClosingConfig) -> Self {
        Self { config }
    }

    fn mode(&self, kind: ElementKind) -> SelfClosingMode {
        match kind {
            ElementKind::Component => self.config.html.component,
            ElementKind::Void => self.config.html.void,
            ElementKind::Normal => self.config.html.normal,
            ElementKind::Svg => self.config.svg,
            ElementKind::Math => self.config.math,
        }
    }
}

impl Rule for HtmlSelfClosing {
    fn selectors(&self) -> Vec<Selector> {
        vec![Selector::enter(Pattern::Element(ElementPattern::any()))]
    }

    fn enter(&mut self, matched: &Match, ctx: &mut LintContext<'_, '_>) {
        let ast = ctx.ast();
        let node = ast.node(matched.node);
        let NodeKind::Element(element) = &node.kind else {
            return;
        };
        // top-level blocks are never self-closed
        if node.parent == Some(ast.root()) {
            return;
        }
        let kind = ElementKind::of(element);
        let data = [("elementType", kind.description()), ("name", element.raw_name)];
        let start_tag = element.start_tag.span;

        match self.mode(kind) {
            SelfClosingMode::Always if !element.is_self_closing() => {
                let Some(end_tag) = element.end_tag else {
                    // unterminated or an implicitly closed void element
                    return;
                };
                if !ast.text(Span::new(start_tag.end, end_tag.start)).trim().is_empty() {
                    return;
                }
                let mut fixer = ctx.fixer().with_message("Make self-closing");
                if ast.text(Span::new(start_tag.end - 1, start_tag.end)) == ">" {
                    fixer.replace(Span::new(start_tag.end - 1, node.span.end), "/>");
                }
                let diagnostic = Self::diagnostic("requireSelfClosing", end_tag, &data);
                ctx.report(diagnostic.with_fix(fixer.build()));
            }
            SelfClosingMode::Never if element.is_self_closing() => {
                let close = Span::new(start_tag.end - 2, start_tag.end);
                let mut fixer = ctx.fixer().with_message("Add closing tag");
                if ast.text(close) == "/>" {
                    if kind == ElementKind::Void {
                        fixer.replace(close, ">");
                    } else {
                        let element_part = ast.text(Span::new(node.span.start, close.start));
                        fixer.replace(node.span, format!("{element_part}></{}>", element.raw_name));
                    }
                }
                let diagnostic = Self::diagnostic("disallowSelfClosing", node.span, &data);
                ctx.report(diagnostic.with_fix(fixer.build()));
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_utils::{fix_rule, lint_rule, messages};
    use serde_json::json;

    #[test]
    fn test_config_defaults() {
        let config = HtmlSelfClosingConfig::default();
        assert_eq!(config.html.void, SelfClosingMode::Never);
        assert_eq!(config.html.normal, SelfClosingMode::Always);
        assert_eq!(config.svg, SelfClosingMode::Always);
    }

    #[test]
    fn test_config_deserialize() {
        let json = r#"{"html": {"void": "always"}, "math": "any"}"#;
        let config: HtmlSelfClosingConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.html.void, SelfClosingMode::Always);
        assert_eq!(config.html.normal, SelfClosingMode::Always);
        assert_eq!(config.math, SelfClosingMode::Any);
    }

    #[test]
    fn test_default_options() {
        let source = concat!(
            "<template><div><div></div><img/><MyComp>  </MyComp><svg><path>",
            "</path></svg><p>x</p></div></template>",
        );
        let diagnostics = lint_rule::<HtmlSelfClosing>(source, json!([]));
        assert_eq!(
            messages(&diagnostics),
            [
                "Require self-closing on HTML elements (<div>).",
                "Disallow self-closing on HTML void elements (<img/>).",
                "Require self-closing on Vue.js custom components (<MyComp>).",
                "Require self-closing on SVG elements (<path>).",
            ]
        );
        assert_eq!(
            fix_rule::<HtmlSelfClosing>(source, json!([])),
            r#"<template><div><div/><img><MyComp/><svg><path/></svg><p>x</p></div></template>"#
        );
    }

    #[test]
    fn test_never() {
        let source = r#"<template><div><div class="a"/><br /><x-foo/></div></template>"#;
        let options = json!([{
            "html": { "normal": "never", "void": "always", "component": "never" }
        }]);
        assert_eq!(
            fix_rule::<HtmlSelfClosing>(source, options),
            r#"<template><div><div class="a"></div><br /><x-foo></x-foo></div></template>"#
        );
    }

    #[test]
    fn test_any_and_top_level() {
        let source = r#"<template><div><div></div><div/></div></template><style></style>"#;
        let options = json!([{ "html": { "normal": "any" } }]);
        assert!(lint_rule::<HtmlSelfClosing>(source, options).is_empty());
    }
}
