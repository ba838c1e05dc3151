//! Integration tests for vue-linter

use oxc_allocator::Allocator;
use serde_json::{json, Value};
use sfc::parse_sfc;

use vue_linter::fixer::apply_fixes;
use vue_linter::scope::{BindingKind, ScopeTracker};
use vue_linter::visitor::MAX_FIX_PASSES;
use vue_linter::{
    fix_until_stable, lint_with_config, Diagnostic, LintConfig, RuleRegistry, RuleSetting, Severity,
};

/// A component that trips most of the fixable rules at once
const CORPUS: &str = r#"<script>
export default {
  destroyed() {},
}
</script>
<script setup>
import { ref } from 'vue'
const count = ref(0)
const next = count + 1
</script>
<template>
  <div class="panel">content</div>
  <MyComp v-bind:title="next"></MyComp>
  <button v-on:click="inc()" @keyup.13="submit">{{count}}</button>
  <Child :foo.sync="value" />
  <ul><li v-for="item in items" :key="item.id" v-if="this.shown">{{ this.label }}</li></ul>
  <input
    id="a"
    >
</template>"#;

fn config_for(rule: &str, options: Value) -> LintConfig {
    let setting = match options {
        Value::Array(items) if !items.is_empty() => {
            let mut setting = vec![json!("warn")];
            setting.extend(items);
            Value::Array(setting)
        }
        _ => json!("warn"),
    };
    LintConfig::from_value(json!({ "rules": { format!("vue/{rule}"): setting } })).unwrap()
}

fn all_rules() -> LintConfig {
    let mut config = LintConfig::empty();
    for entry in RuleRegistry::all() {
        config.set_rule(entry.name, RuleSetting::new(Severity::Warn)).unwrap();
    }
    config
}

fn lint(source: &str, config: &LintConfig) -> Vec<Diagnostic> {
    let result = lint_with_config(source, config).unwrap();
    assert!(result.parse_errors.is_empty(), "{:?}", result.parse_errors);
    result.diagnostics
}

fn text<'s>(source: &'s str, diagnostic: &Diagnostic) -> &'s str {
    &source[diagnostic.start as usize..diagnostic.end as usize]
}

#[test]
fn test_line_breaks_around_content() {
    let source = "<template>\n<div class=\"panel\">content</div>\n</template>";
    let config = config_for("singleline-html-element-content-newline", json!([]));
    let diagnostics = lint(source, &config);
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(
        apply_fixes(source, &diagnostics).output,
        "<template>\n<div class=\"panel\">\ncontent\n</div>\n</template>"
    );
}

#[test]
fn test_ref_used_as_condition() {
    let source = r#"<script setup>
import { ref } from 'vue'
const foo = ref(false)
if (foo) {}
</script>"#;
    let diagnostics = lint(source, &config_for("no-ref-as-operand", json!([])));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(text(source, &diagnostics[0]), "foo");
    assert!(apply_fixes(source, &diagnostics).output.contains("if (foo.value) {}"));
}

#[test]
fn test_negated_condition_swaps_branches() {
    let source = concat!(
        r#"<template><div><template v-if="!a">X</template>"#,
        "<template v-else>Y</template></div></template>",
    );
    let diagnostics = lint(source, &config_for("no-negated-v-if-condition", json!([])));
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].fix.is_none());
    let fix = diagnostics[0].suggestions[0].fix.clone();
    let applied = apply_fixes(
        source,
        &[Diagnostic::warning("suggestion", fix.span(), "").with_fix(Some(fix))],
    );
    assert_eq!(
        applied.output,
        concat!(
            r#"<template><div><template v-if="a">Y</template>"#,
            "<template v-else>X</template></div></template>",
        )
    );
}

#[test]
fn test_redundant_else_if_branch() {
    let source = r#"<template><div><p v-if="a">1</p><p v-else-if="a || b">2</p></div></template>"#;
    let diagnostics = lint(source, &config_for("no-dupe-v-else-if", json!([])));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(text(source, &diagnostics[0]), "a || b");
    assert!(diagnostics[0].fix.is_none());
    assert!(diagnostics[0].suggestions.is_empty());
}

#[test]
fn test_fixes_are_idempotent() {
    for entry in RuleRegistry::all().iter().filter(|entry| entry.metadata().fixable) {
        let config = config_for(entry.name, json!([]));
        let fixed = fix_until_stable(CORPUS, &config).unwrap();
        assert!(fixed.passes < MAX_FIX_PASSES, "{} did not converge", entry.name);
        let leftover: Vec<_> =
            fixed.result.diagnostics.iter().filter(|d| d.fix.is_some()).collect();
        assert!(leftover.is_empty(), "{} still fixable: {leftover:?}", entry.name);
    }
}

#[test]
fn test_all_rules_converge() {
    let fixed = fix_until_stable(CORPUS, &all_rules()).unwrap();
    assert!(fixed.passes > 0 && fixed.passes < MAX_FIX_PASSES);
    assert!(fixed.result.parse_errors.is_empty());
    assert!(fixed.result.diagnostics.iter().all(|d| d.fix.is_none()));
    for expected in [
        "unmounted() {}",
        "count.value + 1",
        "<MyComp :title=\"next\"/>",
        "@click=\"inc\"",
        "@keyup.enter=\"submit\"",
        "{{ count }}",
        "v-model:foo=\"value\"",
        "v-if=\"shown\"",
        "{{ label }}",
    ] {
        assert!(fixed.output.contains(expected), "missing {expected} in\n{}", fixed.output);
    }
}

#[test]
fn test_fix_edits_are_disjoint_and_in_bounds() {
    for diagnostic in lint(CORPUS, &all_rules()) {
        let fixes = diagnostic
            .fix
            .iter()
            .chain(diagnostic.suggestions.iter().map(|s| &s.fix));
        for fix in fixes {
            assert!(!fix.edits.is_empty(), "{}: empty fix", diagnostic.rule);
            for pair in fix.edits.windows(2) {
                assert!(pair[0].end <= pair[1].start, "{}: overlapping edits", diagnostic.rule);
            }
            for edit in &fix.edits {
                assert!(edit.start <= edit.end && edit.end as usize <= CORPUS.len());
            }
        }
    }
}

#[test]
fn test_fix_order_does_not_matter() {
    let diagnostics = lint(CORPUS, &all_rules());
    let mut fixes: Vec<_> = diagnostics.iter().filter_map(|d| d.fix.as_ref()).collect();
    fixes.sort_by_key(|fix| (fix.span().start, fix.span().end));
    let mut accepted = Vec::new();
    let mut last_end = None;
    for fix in fixes {
        if last_end.is_some_and(|end| end >= fix.span().start) {
            continue;
        }
        last_end = Some(fix.span().end);
        accepted.push(fix);
    }

    // back to front, so earlier offsets stay valid
    let mut reversed = CORPUS.to_string();
    for fix in accepted.iter().rev() {
        for edit in fix.edits.iter().rev() {
            reversed.replace_range(edit.start as usize..edit.end as usize, &edit.replacement);
        }
    }
    assert_eq!(reversed, apply_fixes(CORPUS, &diagnostics).output);
}

#[test]
fn test_inner_binding_wins() {
    let source = r#"<script setup>
const item = 1
</script>
<template><div v-for="item in list" :key="item">{{ item }}</div>{{ item }}</template>"#;
    let allocator = Allocator::default();
    let parsed = parse_sfc(&allocator, source);
    let scopes = ScopeTracker::build(&parsed.ast, &parsed.descriptor);
    let kinds: Vec<_> = scopes
        .all_references()
        .filter(|r| r.in_template && r.name == "item")
        .map(|r| r.resolved.map(|id| scopes.binding(id).kind.clone()))
        .collect();
    assert_eq!(
        kinds,
        [
            Some(BindingKind::VForAlias),
            Some(BindingKind::VForAlias),
            Some(BindingKind::Const),
        ]
    );
}

#[test]
fn test_closing_bracket_anchor_ignores_whitespace() {
    let config = config_for("html-closing-bracket-newline", json!([]));
    for source in [
        "<template>\n  <div\n    id=\"a\"></div>\n</template>",
        "<template>\n  <div\n    id=\"a\"   \n\n\n   ></div>\n</template>",
    ] {
        let diagnostics = lint(source, &config);
        let anchor = source.find("\"a\"").unwrap() as u32 + 3;
        let starts: Vec<_> = diagnostics.iter().map(|d| d.start).collect();
        assert!(starts.contains(&anchor), "{source:?}: {starts:?}");
    }
}
