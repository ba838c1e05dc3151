//! The rule contract

use indexmap::IndexMap;
use oxc_span::Span;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::context::LintContext;
use crate::diagnostic::Diagnostic;
use crate::matcher::{Match, Selector};
use crate::schema::OptionSchema;

/// Rule category; each category maps to the preset that first enables it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleCategory {
    /// Rules that prevent errors or unintended behavior
    Essential,
    /// Rules that considerably improve readability
    StronglyRecommended,
    /// Rules that enforce community defaults where several choices exist
    Recommended,
    /// Rules enabled only by explicit configuration
    Uncategorized,
}

impl RuleCategory {
    /// Preset that enables rules of this category, if any
    pub fn preset(self) -> Option<&'static str> {
        match self {
            Self::Essential => Some("essential"),
            Self::StronglyRecommended => Some("strongly-recommended"),
            Self::Recommended => Some("recommended"),
            Self::Uncategorized => None,
        }
    }
}

/// Static description of a rule, for hosts and documentation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleMetadata {
    pub name: &'static str,
    pub category: RuleCategory,
    pub description: &'static str,
    pub fixable: bool,
    pub has_suggestions: bool,
    pub docs_url: String,
    pub messages: IndexMap<&'static str, &'static str>,
    pub schema: Value,
}

/// Static rule metadata
pub trait RuleMeta {
    const NAME: &'static str;
    const CATEGORY: RuleCategory;
    const DESCRIPTION: &'static str;
    const FIXABLE: bool = false;
    const HAS_SUGGESTIONS: bool = false;
    /// Message templates keyed by message id
    const MESSAGES: &'static [(&'static str, &'static str)];

    /// URL to documentation
    fn docs_url() -> String {
        format!("https://eslint.vuejs.org/rules/{}.html", Self::NAME)
    }

    fn schema() -> OptionSchema {
        OptionSchema::NONE
    }

    /// Creates the rule from its positional options. Options have already
    /// been validated against [`RuleMeta::schema`].
    fn from_options(options: &[Value]) -> Result<Self, serde_json::Error>
    where
        Self: Sized;

    fn metadata() -> RuleMetadata {
        RuleMetadata {
            name: Self::NAME,
            category: Self::CATEGORY,
            description: Self::DESCRIPTION,
            fixable: Self::FIXABLE,
            has_suggestions: Self::HAS_SUGGESTIONS,
            docs_url: Self::docs_url(),
            messages: Self::MESSAGES.iter().copied().collect(),
            schema: Self::schema().to_json(),
        }
    }

    /// Renders the message template `message_id` with `data`
    fn diagnostic(message_id: &str, span: Span, data: &[(&str, &str)]) -> Diagnostic {
        let template = Self::MESSAGES
            .iter()
            .find(|(id, _)| *id == message_id)
            .map_or(message_id, |(_, template)| template);
        Diagnostic::from_template(Self::NAME, message_id, template, span, data)
    }
}

/// Object-safe access to [`RuleMeta`]
pub trait RuleInfo {
    fn name(&self) -> &'static str;
    fn metadata(&self) -> RuleMetadata;
}

impl<T: RuleMeta> RuleInfo for T {
    fn name(&self) -> &'static str {
        T::NAME
    }

    fn metadata(&self) -> RuleMetadata {
        T::metadata()
    }
}

/// A rule instance for one file.
///
/// The runner walks the template once, calling [`Rule::enter`] and
/// [`Rule::exit`] for every node matching one of the rule's selectors, then
/// calls [`Rule::check_script`] and [`Rule::finish`]. A rule instance is its
/// own accumulator and is dropped when the file is done.
pub trait Rule: RuleInfo {
    fn selectors(&self) -> Vec<Selector> {
        Vec::new()
    }

    fn enter(&mut self, _matched: &Match, _ctx: &mut LintContext<'_, '_>) {}

    fn exit(&mut self, _matched: &Match, _ctx: &mut LintContext<'_, '_>) {}

    /// Inspect the script blocks
    fn check_script(&mut self, _ctx: &mut LintContext<'_, '_>) {}

    /// Report anything accumulated during the walk
    fn finish(&mut self, _ctx: &mut LintContext<'_, '_>) {}
}

/// Deserializes positional option `index`, falling back to the default
pub fn option<T: DeserializeOwned + Default>(
    options: &[Value],
    index: usize,
) -> Result<T, serde_json::Error> {
    match options.get(index) {
        Some(value) => T::deserialize(value),
        None => Ok(T::default()),
    }
}
