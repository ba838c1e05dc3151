//! Single-file component blocks

use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_span::{SourceType, Span};

use crate::ast::{NodeId, NodeKind, TemplateAst};
use crate::expression::ExpressionParser;
use crate::parser::TemplateParser;
use crate::ParseError;

/// A parsed `<script>` or `<script setup>` block
#[derive(Debug)]
pub struct ScriptBlock<'a> {
    pub element: NodeId,
    pub setup: bool,
    pub lang: Option<String>,
    /// Content between the tags
    pub content: Span,
    pub program: Program<'a>,
    /// The parser gave up; the program is partial
    pub panicked: bool,
}

impl ScriptBlock<'_> {
    pub fn is_typescript(&self) -> bool {
        matches!(self.lang.as_deref(), Some("ts" | "tsx"))
    }
}

#[derive(Debug, Default)]
pub struct SfcDescriptor<'a> {
    /// The top-level `<template>` element
    pub template: Option<NodeId>,
    pub scripts: Vec<ScriptBlock<'a>>,
    pub styles: Vec<NodeId>,
}

impl<'a> SfcDescriptor<'a> {
    pub fn script_setup(&self) -> Option<&ScriptBlock<'a>> {
        self.scripts.iter().find(|script| script.setup)
    }

    pub fn script(&self) -> Option<&ScriptBlock<'a>> {
        self.scripts.iter().find(|script| !script.setup)
    }
}

#[derive(Debug)]
pub struct SfcParseResult<'a> {
    pub ast: TemplateAst<'a>,
    pub descriptor: SfcDescriptor<'a>,
    pub errors: Vec<ParseError>,
}

/// Parses a whole single-file component.
///
/// Never fails: malformed markup is recovered from and every problem is
/// collected into [`SfcParseResult::errors`].
pub fn parse_sfc<'a>(allocator: &'a Allocator, source: &'a str) -> SfcParseResult<'a> {
    let span = tracing::debug_span!("parse_sfc", len = source.len());
    let _enter = span.enter();

    let source_type = if detect_typescript(source) {
        SourceType::ts()
    } else {
        SourceType::mjs()
    };
    let expressions = ExpressionParser::new(allocator, source_type);
    let (ast, mut errors) = TemplateParser::new(source, &expressions).parse();

    let mut descriptor = SfcDescriptor::default();
    for &id in ast.children(ast.root()) {
        let NodeKind::Element(element) = &ast.node(id).kind else {
            continue;
        };
        match element.name.as_str() {
            "template" if descriptor.template.is_none() => descriptor.template = Some(id),
            "style" => descriptor.styles.push(id),
            "script" => {
                let lang = element
                    .attribute("lang")
                    .and_then(|attr| attr.value.as_ref())
                    .map(|value| value.raw.to_string());
                let setup = element.has_attribute("setup");
                let content = match element.end_tag {
                    Some(end_tag) => Span::new(element.start_tag.span.end, end_tag.start),
                    None => Span::new(element.start_tag.span.end, ast.node(id).span.end),
                };
                let source_type = match lang.as_deref() {
                    Some("ts") => SourceType::ts(),
                    Some("tsx") => SourceType::tsx(),
                    Some("jsx") => SourceType::jsx(),
                    _ => SourceType::mjs(),
                };
                let parser = ExpressionParser::new(allocator, source_type);
                let parsed = parser.program(content.start, ast.text(content));
                errors.extend(
                    parsed
                        .errors
                        .into_iter()
                        .map(|message| ParseError::new(message, content)),
                );
                tracing::trace!(setup, panicked = parsed.panicked, "parsed script block");
                descriptor.scripts.push(ScriptBlock {
                    element: id,
                    setup,
                    lang,
                    content,
                    program: parsed.program,
                    panicked: parsed.panicked,
                });
            }
            _ => {}
        }
    }

    SfcParseResult {
        ast,
        descriptor,
        errors,
    }
}

/// Template expressions follow the language of the component's scripts
fn detect_typescript(source: &str) -> bool {
    source.match_indices("<script").any(|(at, _)| {
        let tag_end = source[at..].find('>').map_or(source.len(), |i| at + i);
        let tag = &source[at..tag_end];
        tag.contains("lang=\"ts\"")
            || tag.contains("lang='ts'")
            || tag.contains("lang=\"tsx\"")
            || tag.contains("lang='tsx'")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks() {
        let allocator = Allocator::default();
        let source = r#"<template><div /></template>
<script setup lang="ts">
const a: number = 1
</script>
<script>
export default {}
</script>
<style scoped>.a { color: red }</style>"#;
        let result = parse_sfc(&allocator, source);
        assert!(result.errors.is_empty(), "{:?}", result.errors);
        assert!(result.descriptor.template.is_some());
        assert_eq!(result.descriptor.scripts.len(), 2);
        assert_eq!(result.descriptor.styles.len(), 1);

        let setup = result.descriptor.script_setup().expect("setup block");
        assert!(setup.is_typescript());
        assert_eq!(setup.program.body.len(), 1);
        let text = result.ast.text(setup.content);
        assert!(text.contains("const a: number = 1"));
    }

    #[test]
    fn test_detect_typescript() {
        assert!(detect_typescript("<script lang=\"ts\">"));
        assert!(!detect_typescript("<script>const lang = \"ts\"</script>"));
    }
}
