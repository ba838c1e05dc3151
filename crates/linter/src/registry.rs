//! Registry of every rule the plugin ships

use serde_json::Value;

use crate::rule::{Rule, RuleCategory, RuleMeta, RuleMetadata};
use crate::rules::*;
use crate::schema::OptionSchema;

/// Namespace rule names carry in user configuration
pub const PLUGIN_PREFIX: &str = "vue/";

/// Factory and static description of one rule
pub struct RuleEntry {
    pub name: &'static str,
    pub category: RuleCategory,
    metadata: fn() -> RuleMetadata,
    schema: fn() -> OptionSchema,
    create: fn(&[Value]) -> Result<Box<dyn Rule>, serde_json::Error>,
}

impl RuleEntry {
    const fn of<R: RuleMeta + Rule + 'static>() -> Self {
        Self {
            name: R::NAME,
            category: R::CATEGORY,
            metadata: <R as RuleMeta>::metadata,
            schema: R::schema,
            create: create::<R>,
        }
    }

    pub fn metadata(&self) -> RuleMetadata {
        (self.metadata)()
    }

    pub fn schema(&self) -> OptionSchema {
        (self.schema)()
    }

    /// A fresh rule instance for one file
    pub fn create(&self, options: &[Value]) -> Result<Box<dyn Rule>, serde_json::Error> {
        (self.create)(options)
    }

    /// `vue/<name>`
    pub fn qualified_name(&self) -> String {
        format!("{PLUGIN_PREFIX}{}", self.name)
    }
}

fn create<R: RuleMeta + Rule + 'static>(
    options: &[Value],
) -> Result<Box<dyn Rule>, serde_json::Error> {
    Ok(Box::new(R::from_options(options)?))
}

static RULES: [RuleEntry; 22] = [
    RuleEntry::of::<CustomEventNameCasing>(),
    RuleEntry::of::<HtmlClosingBracketNewline>(),
    RuleEntry::of::<HtmlSelfClosing>(),
    RuleEntry::of::<MustacheInterpolationSpacing>(),
    RuleEntry::of::<NoDeprecatedDestroyedLifecycle>(),
    RuleEntry::of::<NoDeprecatedVBindSync>(),
    RuleEntry::of::<NoDeprecatedVOnNumberModifiers>(),
    RuleEntry::of::<NoDupeVElseIf>(),
    RuleEntry::of::<NoDuplicateAttributes>(),
    RuleEntry::of::<NoNegatedVIfCondition>(),
    RuleEntry::of::<NoRefAsOperand>(),
    RuleEntry::of::<NoSetupPropsReactivityLoss>(),
    RuleEntry::of::<NoTemplateShadow>(),
    RuleEntry::of::<NoUnusedVars>(),
    RuleEntry::of::<NoUseVIfWithVFor>(),
    RuleEntry::of::<RequireVForKey>(),
    RuleEntry::of::<SinglelineHtmlElementContentNewline>(),
    RuleEntry::of::<ThisInTemplate>(),
    RuleEntry::of::<VBindStyle>(),
    RuleEntry::of::<VOnFunctionCall>(),
    RuleEntry::of::<VOnStyle>(),
    RuleEntry::of::<ValidVElse>(),
];

/// Lookup over the static rule table
pub struct RuleRegistry;

impl RuleRegistry {
    /// Every rule, sorted by name
    pub fn all() -> &'static [RuleEntry] {
        &RULES
    }

    /// Finds a rule by bare (`html-self-closing`) or qualified
    /// (`vue/html-self-closing`) name
    pub fn get(name: &str) -> Option<&'static RuleEntry> {
        let bare = name.strip_prefix(PLUGIN_PREFIX).unwrap_or(name);
        RULES.iter().find(|entry| entry.name == bare)
    }

    pub fn in_category(category: RuleCategory) -> impl Iterator<Item = &'static RuleEntry> {
        RULES.iter().filter(move |entry| entry.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_are_sorted_and_unique() {
        let names: Vec<_> = RuleRegistry::all().iter().map(|entry| entry.name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_lookup() {
        let entry = RuleRegistry::get("vue/html-self-closing").expect("registered");
        assert_eq!(entry.name, "html-self-closing");
        assert_eq!(entry.qualified_name(), "vue/html-self-closing");
        assert!(RuleRegistry::get("html-self-closing").is_some());
        assert!(RuleRegistry::get("vue/no-such-rule").is_none());
    }

    #[test]
    fn test_metadata() {
        for entry in RuleRegistry::all() {
            let metadata = entry.metadata();
            assert_eq!(metadata.name, entry.name);
            assert!(!metadata.messages.is_empty(), "{} has no messages", entry.name);
            assert!(metadata.docs_url.ends_with(&format!("{}.html", entry.name)));
            assert!(entry.create(&[]).is_ok(), "{} rejects default options", entry.name);
        }
        let fixable: Vec<_> = RuleRegistry::all()
            .iter()
            .filter(|entry| entry.metadata().fixable)
            .map(|entry| entry.name)
            .collect();
        assert!(fixable.contains(&"html-self-closing"));
        assert!(!fixable.contains(&"no-dupe-v-else-if"));
    }
}
