//! Single-pass runner for all enabled rules
//!
//! `LintRunner` walks the template once, depth first, and dispatches every
//! node to the rules whose selectors match it: enter callbacks on the way
//! down, exit callbacks after the node's descendants. Script checks and
//! finalizers run after the walk.

use oxc_allocator::Allocator;
use sfc::{parse_sfc, LineIndex, NodeId, ParseError, SfcParseResult};

use crate::configs::{ConfigError, LintConfig};
use crate::context::LintContext;
use crate::diagnostic::{Diagnostic, DiagnosticSeverity};
use crate::fixer::apply_fixes;
use crate::matcher::{Match, Phase, Selector};
use crate::rule::Rule;
use crate::scope::ScopeTracker;

struct ActiveRule {
    rule: Box<dyn Rule>,
    severity: DiagnosticSeverity,
    selectors: Vec<Selector>,
}

/// Runs a set of rule instances over one parsed file
pub struct LintRunner {
    rules: Vec<ActiveRule>,
}

impl LintRunner {
    /// Instantiates every enabled rule of `config`
    pub fn new(config: &LintConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_rules(config.instantiate()?))
    }

    pub fn from_rules(rules: Vec<(Box<dyn Rule>, DiagnosticSeverity)>) -> Self {
        let rules = rules
            .into_iter()
            .map(|(rule, severity)| {
                let selectors = rule.selectors();
                ActiveRule {
                    rule,
                    severity,
                    selectors,
                }
            })
            .collect();
        Self { rules }
    }

    /// Run all rules on a parsed file
    pub fn run(mut self, parsed: &SfcParseResult<'_>) -> LintResult {
        let _span = tracing::debug_span!("lint", rules = self.rules.len()).entered();
        let scopes = ScopeTracker::build(&parsed.ast, &parsed.descriptor);
        let line_index = LineIndex::new(parsed.ast.source());
        let mut ctx = LintContext::new(&parsed.ast, &parsed.descriptor, &scopes, &line_index);

        if let Some(template) = parsed.descriptor.template {
            self.walk(template, &mut ctx);
        }
        for index in 0..self.rules.len() {
            self.dispatch(index, &mut ctx, |rule, ctx| rule.check_script(ctx));
            self.dispatch(index, &mut ctx, |rule, ctx| rule.finish(ctx));
        }

        let mut diagnostics = ctx.into_diagnostics();
        diagnostics.sort_by_key(|d| (d.start, d.end));
        if tracing::enabled!(tracing::Level::DEBUG) {
            for active in &self.rules {
                let name = active.rule.name();
                let count = diagnostics.iter().filter(|d| d.rule == name).count();
                tracing::debug!(rule = name, count, "rule finished");
            }
        }

        LintResult {
            diagnostics,
            parse_errors: parsed.errors.clone(),
        }
    }

    fn walk(&mut self, node: NodeId, ctx: &mut LintContext<'_, '_>) {
        self.visit_node(node, Phase::Enter, ctx);
        let ast = ctx.ast();
        for &child in ast.children(node) {
            self.walk(child, ctx);
        }
        self.visit_node(node, Phase::Exit, ctx);
    }

    fn visit_node(&mut self, node: NodeId, phase: Phase, ctx: &mut LintContext<'_, '_>) {
        let ast = ctx.ast();
        for index in 0..self.rules.len() {
            let mut matches = Vec::new();
            for (selector_index, selector) in self.rules[index].selectors.iter().enumerate() {
                if selector.phase != phase {
                    continue;
                }
                matches.extend(selector.pattern.matches_all(ast, node).into_iter().map(|m| Match {
                    selector: selector_index,
                    ..m
                }));
            }
            for matched in matches {
                self.dispatch(index, ctx, |rule, ctx| match phase {
                    Phase::Enter => rule.enter(&matched, ctx),
                    Phase::Exit => rule.exit(&matched, ctx),
                });
            }
        }
    }

    /// Invokes one rule callback and stamps what it reported with the rule's
    /// name and configured severity
    fn dispatch(
        &mut self,
        index: usize,
        ctx: &mut LintContext<'_, '_>,
        callback: impl FnOnce(&mut Box<dyn Rule>, &mut LintContext<'_, '_>),
    ) {
        let active = &mut self.rules[index];
        let before = ctx.diagnostics().len();
        callback(&mut active.rule, ctx);
        let name = active.rule.name();
        for diagnostic in &mut ctx.diagnostics_mut()[before..] {
            diagnostic.rule = name.to_string();
            diagnostic.severity = active.severity;
        }
    }
}

/// Result of running the linter
#[derive(Debug)]
pub struct LintResult {
    /// Sorted by position
    pub diagnostics: Vec<Diagnostic>,
    /// Problems the parser recovered from; rules still ran on the partial tree
    pub parse_errors: Vec<ParseError>,
}

impl LintResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d.severity, DiagnosticSeverity::Error))
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d.severity, DiagnosticSeverity::Warning))
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, DiagnosticSeverity::Error))
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, DiagnosticSeverity::Warning))
            .count()
    }

    pub fn fixable_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.fix.is_some()).count()
    }
}

/// Lints a single-file component with the `recommended` preset
pub fn lint(source_text: &str) -> LintResult {
    let allocator = Allocator::default();
    let parsed = parse_sfc(&allocator, source_text);
    // presets carry no rule options, so instantiation cannot fail
    let rules = LintConfig::default().instantiate().unwrap_or_default();
    LintRunner::from_rules(rules).run(&parsed)
}

/// Lints a single-file component with a custom configuration
pub fn lint_with_config(source_text: &str, config: &LintConfig) -> Result<LintResult, ConfigError> {
    let allocator = Allocator::default();
    let parsed = parse_sfc(&allocator, source_text);
    Ok(LintRunner::new(config)?.run(&parsed))
}

/// Upper bound on lint-and-fix rounds in [`fix_until_stable`]
pub const MAX_FIX_PASSES: usize = 10;

/// Output of [`fix_until_stable`]
#[derive(Debug)]
pub struct FixResult {
    pub output: String,
    /// Rounds that changed the text
    pub passes: usize,
    /// Fixes applied over all rounds
    pub fixed: usize,
    /// Lint result for `output`
    pub result: LintResult,
}

/// Lints and applies fixes until the text stops changing or
/// [`MAX_FIX_PASSES`] rounds have run. Files with parse errors are left as
/// they are.
pub fn fix_until_stable(source_text: &str, config: &LintConfig) -> Result<FixResult, ConfigError> {
    let _span = tracing::debug_span!("fix", len = source_text.len()).entered();
    let mut output = source_text.to_string();
    let mut passes = 0;
    let mut fixed = 0;
    loop {
        let result = lint_with_config(&output, config)?;
        if passes == MAX_FIX_PASSES || !result.parse_errors.is_empty() {
            if passes == MAX_FIX_PASSES {
                tracing::debug!(passes, "fix loop did not converge");
            }
            return Ok(FixResult {
                output,
                passes,
                fixed,
                result,
            });
        }
        let pass = apply_fixes(&output, &result.diagnostics);
        if !pass.changed() {
            return Ok(FixResult {
                output,
                passes,
                fixed,
                result,
            });
        }
        passes += 1;
        fixed += pass.applied;
        tracing::debug!(
            pass = passes,
            applied = pass.applied,
            deferred = pass.remaining,
            "applied fixes"
        );
        output = pass.output;
    }
}
