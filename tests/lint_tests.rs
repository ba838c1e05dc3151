//! End-to-end lint tests
//!
//! These tests run whole components through the recommended preset and
//! through hand-written configs, the way a host would.

use vue_lint_oxc::{fix, fix_located, lint, lint_located, load_config, ConfigError};

/// Rule ids reported for `source` under `config_json`
fn rule_ids(source: &str, config_json: Option<&str>) -> Vec<String> {
    lint_located(source, config_json)
        .unwrap()
        .diagnostics
        .into_iter()
        .map(|d| d.rule_id)
        .collect()
}

// ============================================================================
// Recommended preset
// ============================================================================

#[test]
fn test_clean_component() {
    let source = r#"<script setup>
import { ref } from 'vue'
const count = ref(0)
function inc() {
  count.value++
}
</script>

<template>
  <button
    class="counter"
    @click="inc"
  >
    {{ count }}
  </button>
</template>
"#;
    let result = lint(source);
    assert!(result.parse_errors.is_empty());
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
}

#[test]
fn test_recommended_reports_essential_as_errors() {
    let source = r#"<template>
  <ul>
    <li v-for="item in items">{{ item }}</li>
  </ul>
</template>"#;
    let output = lint_located(source, None).unwrap();
    let diagnostic = output
        .diagnostics
        .iter()
        .find(|d| d.rule_id == "vue/require-v-for-key")
        .unwrap();
    assert_eq!(diagnostic.severity, "error");
    assert_eq!((diagnostic.line, diagnostic.column), (3, 5));
}

#[test]
fn test_style_rules_are_warnings() {
    let source = "<template>\n  <div v-bind:id=\"a\" />\n</template>";
    let output = lint_located(source, None).unwrap();
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.diagnostics[0].rule_id, "vue/v-bind-style");
    assert_eq!(output.diagnostics[0].severity, "warning");
    assert!(output.diagnostics[0].fix.is_some());
}

#[test]
fn test_parse_errors_are_reported() {
    let output = lint_located("<script setup>\nconst = 1\n</script>", None).unwrap();
    assert!(!output.parse_errors.is_empty());
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_turning_a_rule_off() {
    let source = "<template>\n  <div v-bind:id=\"a\" />\n</template>";
    let config = r#"{
        "extends": "plugin:vue/recommended",
        "rules": { "vue/v-bind-style": "off" }
    }"#;
    assert!(rule_ids(source, Some(config)).is_empty());
}

#[test]
fn test_flat_config_array() {
    let source = r#"<template><div><p v-if="!a">1</p><p v-else>2</p></div></template>"#;
    let config = r#"["flat/essential", { "rules": { "vue/no-negated-v-if-condition": "warn" } }]"#;
    assert_eq!(rule_ids(source, Some(config)), ["vue/no-negated-v-if-condition"]);
}

#[test]
fn test_invalid_options_are_rejected() {
    let config = r#"{ "rules": { "vue/v-on-style": ["warn", "sometimes"] } }"#;
    assert!(matches!(load_config(Some(config)), Err(ConfigError::InvalidOptions { .. })));
}

#[test]
fn test_blank_config_uses_recommended() {
    let source = "<template>\n  <div v-bind:id=\"a\" />\n</template>";
    assert_eq!(rule_ids(source, Some("  ")), ["vue/v-bind-style"]);
}

// ============================================================================
// Fixing
// ============================================================================

#[test]
fn test_fix_whole_component() {
    let source = r#"<script>
export default {
  beforeDestroy() {},
}
</script>

<template>
  <div>
    <Child v-bind:title="title" v-on:close="close()"></Child>
    <input @keyup.13="submit">
    <p>{{text}}</p>
  </div>
</template>
"#;
    let config = r#"["recommended", { "rules": { "vue/v-on-function-call": "warn" } }]"#;
    let fixed = fix(source, Some(config)).unwrap();
    insta::assert_snapshot!(fixed.output.trim_end(), @r#"
    <script>
    export default {
      beforeUnmount() {},
    }
    </script>

    <template>
      <div>
        <Child :title="title" @close="close"/>
        <input @keyup.enter="submit">
        <p>{{ text }}</p>
      </div>
    </template>
    "#);
    assert!(fixed.result.diagnostics.is_empty());
}

#[test]
fn test_multi_statement_handler_is_kept() {
    let source = r#"<template>
  <div>
    <button @click="open(); track()">a</button>
    <button @click="close();">b</button>
  </div>
</template>"#;
    let config = r#"{ "rules": { "vue/v-on-function-call": "warn" } }"#;
    let fixed = fix(source, Some(config)).unwrap();
    assert!(fixed.result.parse_errors.is_empty());
    assert!(fixed.output.contains(r#"@click="open(); track()">a"#));
    assert!(fixed.output.contains(r#"@click="close">b"#));
    assert!(fixed.result.diagnostics.is_empty());
}

#[test]
fn test_unfixable_diagnostics_remain() {
    let source = r#"<template>
  <div>
    <p v-if="a">
      1
    </p>
    <p v-else-if="a">
      2
    </p>
  </div>
</template>"#;
    let output = fix_located(source, None).unwrap();
    assert_eq!(output.output.as_deref(), Some(source));
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.diagnostics[0].rule_id, "vue/no-dupe-v-else-if");
    assert!(output.diagnostics[0].fix.is_none());
}

#[test]
fn test_suggestions_are_not_applied() {
    let source = r#"<template><button @click="$emit('my-event')" /></template>"#;
    let config = r#"{ "rules": { "vue/custom-event-name-casing": "warn" } }"#;
    let output = fix_located(source, Some(config)).unwrap();
    assert_eq!(output.output.as_deref(), Some(source));
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.diagnostics[0].suggestions.len(), 1);
    assert!(output.diagnostics[0].suggestions[0].contains("myEvent"));
}
