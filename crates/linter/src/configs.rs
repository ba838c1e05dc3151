//! Rule settings, presets and user configuration
//!
//! Presets are generated from rule categories and compose by extending the
//! previous preset: `base` < `essential` < `strongly-recommended` <
//! `recommended`. They are exposed in two dialects, a legacy object with an
//! `extends` pointer (`plugin:vue/recommended`) and a flat array of config
//! objects (`flat/recommended`). Both resolve to the same rule map.

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::diagnostic::DiagnosticSeverity;
use crate::registry::{RuleRegistry, PLUGIN_PREFIX};
use crate::rule::{Rule, RuleCategory};
use crate::schema::SchemaError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown rule `{0}`")]
    UnknownRule(String),
    #[error("unknown config `{0}`")]
    UnknownPreset(String),
    #[error("invalid setting for rule `{rule}`: {message}")]
    InvalidSetting { rule: String, message: String },
    #[error("invalid options for rule `{rule}`: {source}")]
    InvalidOptions {
        rule: String,
        #[source]
        source: SchemaError,
    },
    #[error("cannot read options of rule `{rule}`: {source}")]
    Options {
        rule: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Shape(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Off,
    Warn,
    Error,
}

impl Severity {
    /// `"off" | "warn" | "error"` or `0 | 1 | 2`
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => match s.as_str() {
                "off" => Some(Self::Off),
                "warn" => Some(Self::Warn),
                "error" => Some(Self::Error),
                _ => None,
            },
            Value::Number(n) => match n.as_u64() {
                Some(0) => Some(Self::Off),
                Some(1) => Some(Self::Warn),
                Some(2) => Some(Self::Error),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn to_diagnostic(self) -> Option<DiagnosticSeverity> {
        match self {
            Self::Off => None,
            Self::Warn => Some(DiagnosticSeverity::Warning),
            Self::Error => Some(DiagnosticSeverity::Error),
        }
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value)
            .ok_or_else(|| D::Error::custom(format!("invalid severity {value}")))
    }
}

/// Severity plus positional rule options
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSetting {
    pub severity: Severity,
    pub options: Vec<Value>,
}

impl RuleSetting {
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            options: Vec::new(),
        }
    }

    pub fn with_options(severity: Severity, options: Vec<Value>) -> Self {
        Self { severity, options }
    }

    pub fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Array(items) => {
                let (first, rest) = items
                    .split_first()
                    .ok_or_else(|| "expected a severity as the first entry".to_string())?;
                let severity = Severity::from_value(first)
                    .ok_or_else(|| format!("invalid severity {first}"))?;
                Ok(Self::with_options(severity, rest.to_vec()))
            }
            other => Severity::from_value(other)
                .map(Self::new)
                .ok_or_else(|| format!("invalid severity {other}")),
        }
    }
}

impl<'de> Deserialize<'de> for RuleSetting {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(D::Error::custom)
    }
}

impl Serialize for RuleSetting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.options.is_empty() {
            return self.severity.serialize(serializer);
        }
        let severity = serde_json::to_value(self.severity).map_err(serde::ser::Error::custom)?;
        let mut items = vec![severity];
        items.extend(self.options.iter().cloned());
        items.serialize(serializer)
    }
}

pub type RuleMap = IndexMap<String, RuleSetting>;

/// Preset names, each extending the one before it
pub const PRESETS: [&str; 4] = ["base", "essential", "strongly-recommended", "recommended"];

fn preset_parent(name: &str) -> Option<&'static str> {
    let index = PRESETS.iter().position(|preset| *preset == name)?;
    index.checked_sub(1).map(|parent| PRESETS[parent])
}

/// Rules a preset adds on top of its parent, keyed `vue/<rule>`
fn own_rules(name: &str) -> Option<RuleMap> {
    let category = match name {
        "base" => return Some(RuleMap::new()),
        "essential" => RuleCategory::Essential,
        "strongly-recommended" => RuleCategory::StronglyRecommended,
        "recommended" => RuleCategory::Recommended,
        _ => return None,
    };
    let severity = if category == RuleCategory::Essential {
        Severity::Error
    } else {
        Severity::Warn
    };
    Some(
        RuleRegistry::in_category(category)
            .map(|entry| (entry.qualified_name(), RuleSetting::new(severity)))
            .collect(),
    )
}

/// A legacy config object: an optional `extends` pointer and a rule map
#[derive(Debug, Clone, Serialize)]
pub struct LegacyConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    pub rules: RuleMap,
}

/// One object of a flat config array
#[derive(Debug, Clone, Serialize)]
pub struct FlatConfig {
    pub name: String,
    pub rules: RuleMap,
}

/// `plugin:vue/<preset>`
pub fn legacy_config(name: &str) -> Option<LegacyConfig> {
    let preset = name.strip_prefix("plugin:vue/")?;
    Some(LegacyConfig {
        extends: preset_parent(preset).map(|parent| format!("plugin:vue/{parent}")),
        rules: own_rules(preset)?,
    })
}

/// `flat/<preset>`: the parent's array followed by this preset's object
pub fn flat_config(name: &str) -> Option<Vec<FlatConfig>> {
    let preset = name.strip_prefix("flat/")?;
    let rules = own_rules(preset)?;
    let mut configs = match preset_parent(preset) {
        Some(parent) => flat_config(&format!("flat/{parent}"))?,
        None => Vec::new(),
    };
    configs.push(FlatConfig {
        name: format!("vue/{preset}/rules"),
        rules,
    });
    Some(configs)
}

fn resolve_legacy(name: &str, into: &mut RuleMap) -> Result<(), ConfigError> {
    let config = legacy_config(name).ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))?;
    if let Some(parent) = &config.extends {
        resolve_legacy(parent, into)?;
    }
    into.extend(config.rules);
    Ok(())
}

/// Effective rule map of a preset, given in either dialect or as a bare
/// preset name. Later entries win.
pub fn resolve_preset(name: &str) -> Result<RuleMap, ConfigError> {
    let mut rules = RuleMap::new();
    if name.starts_with("plugin:vue/") {
        resolve_legacy(name, &mut rules)?;
    } else if let Some(configs) = flat_config(name) {
        for config in configs {
            rules.extend(config.rules);
        }
    } else if PRESETS.contains(&name) {
        resolve_legacy(&format!("plugin:vue/{name}"), &mut rules)?;
    } else {
        return Err(ConfigError::UnknownPreset(name.to_string()));
    }
    Ok(rules)
}

/// Validated rule configuration for a lint run, keyed by bare rule name
#[derive(Debug, Clone)]
pub struct LintConfig {
    rules: RuleMap,
}

impl Default for LintConfig {
    /// The `recommended` preset
    fn default() -> Self {
        let mut config = Self::empty();
        for preset in PRESETS {
            for (name, setting) in own_rules(preset).unwrap_or_default() {
                let bare = name.strip_prefix(PLUGIN_PREFIX).unwrap_or(&name).to_string();
                config.rules.insert(bare, setting);
            }
        }
        config
    }
}

impl LintConfig {
    /// No rules enabled
    pub fn empty() -> Self {
        Self {
            rules: RuleMap::new(),
        }
    }

    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        let mut config = Self::empty();
        config.apply(resolve_preset(name)?)?;
        Ok(config)
    }

    /// Parses user configuration, in either dialect:
    ///
    /// - `{ "extends": "plugin:vue/recommended", "rules": { ... } }`
    /// - `["flat/recommended", { "rules": { ... } }]`
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::from_value(serde_json::from_str(json)?)
    }

    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let mut config = Self::empty();
        match value {
            Value::Array(items) => {
                for item in items {
                    match item {
                        Value::String(name) => config.apply(resolve_preset(&name)?)?,
                        Value::Object(_) => config.apply_object(item)?,
                        other => {
                            return Err(ConfigError::Shape(format!(
                                "expected a config name or object, got {other}"
                            )));
                        }
                    }
                }
            }
            Value::Object(_) => config.apply_object(value)?,
            other => {
                return Err(ConfigError::Shape(format!("expected an object or array, got {other}")));
            }
        }
        tracing::debug!(rules = config.rules.len(), "loaded lint config");
        Ok(config)
    }

    fn apply_object(&mut self, value: Value) -> Result<(), ConfigError> {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Object {
            #[serde(default)]
            extends: Option<Extends>,
            #[serde(default)]
            rules: IndexMap<String, Value>,
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Extends {
            One(String),
            Many(Vec<String>),
        }

        let object: Object = serde_json::from_value(value)?;
        let extends = match object.extends {
            Some(Extends::One(name)) => vec![name],
            Some(Extends::Many(names)) => names,
            None => Vec::new(),
        };
        for name in extends {
            self.apply(resolve_preset(&name)?)?;
        }
        for (name, raw) in object.rules {
            let setting = RuleSetting::from_value(&raw).map_err(|message| {
                ConfigError::InvalidSetting {
                    rule: name.clone(),
                    message,
                }
            })?;
            self.set_rule(&name, setting)?;
        }
        Ok(())
    }

    fn apply(&mut self, rules: RuleMap) -> Result<(), ConfigError> {
        for (name, setting) in rules {
            self.set_rule(&name, setting)?;
        }
        Ok(())
    }

    /// Sets one rule after checking that it exists and that its options fit
    /// the rule's schema
    pub fn set_rule(&mut self, name: &str, setting: RuleSetting) -> Result<(), ConfigError> {
        let entry =
            RuleRegistry::get(name).ok_or_else(|| ConfigError::UnknownRule(name.to_string()))?;
        entry
            .schema()
            .validate(&Value::Array(setting.options.clone()))
            .map_err(|source| ConfigError::InvalidOptions {
                rule: entry.name.to_string(),
                source,
            })?;
        self.rules.insert(entry.name.to_string(), setting);
        Ok(())
    }

    pub fn rule(&self, name: &str) -> Option<&RuleSetting> {
        let bare = name.strip_prefix(PLUGIN_PREFIX).unwrap_or(name);
        self.rules.get(bare)
    }

    pub fn rules(&self) -> impl Iterator<Item = (&str, &RuleSetting)> {
        self.rules.iter().map(|(name, setting)| (name.as_str(), setting))
    }

    /// Creates one instance of every enabled rule
    pub fn instantiate(&self) -> Result<Vec<(Box<dyn Rule>, DiagnosticSeverity)>, ConfigError> {
        let mut rules = Vec::new();
        for (name, setting) in &self.rules {
            let Some(severity) = setting.severity.to_diagnostic() else {
                continue;
            };
            let entry =
                RuleRegistry::get(name).ok_or_else(|| ConfigError::UnknownRule(name.clone()))?;
            let rule = entry.create(&setting.options).map_err(|source| ConfigError::Options {
                rule: name.clone(),
                source,
            })?;
            rules.push((rule, severity));
        }
        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rule_setting_forms() {
        let cases = [
            (json!("off"), Severity::Off, 0),
            (json!(1), Severity::Warn, 0),
            (json!(["error", "always", { "x": 1 }]), Severity::Error, 2),
        ];
        for (value, severity, options) in cases {
            let setting: RuleSetting = serde_json::from_value(value).unwrap();
            assert_eq!(setting.severity, severity);
            assert_eq!(setting.options.len(), options);
        }
        assert!(serde_json::from_value::<RuleSetting>(json!("fatal")).is_err());
        assert!(serde_json::from_value::<RuleSetting>(json!([])).is_err());
        assert!(serde_json::from_value::<RuleSetting>(json!(3)).is_err());
        assert_eq!(Severity::Off.to_diagnostic(), None);
    }

    #[test]
    fn test_rule_setting_serialize() {
        let setting = RuleSetting::with_options(Severity::Warn, vec![json!("never")]);
        assert_eq!(serde_json::to_value(&setting).unwrap(), json!(["warn", "never"]));
        assert_eq!(serde_json::to_value(RuleSetting::new(Severity::Off)).unwrap(), json!("off"));
    }

    #[test]
    fn test_dialects_agree() {
        for preset in PRESETS {
            let legacy = resolve_preset(&format!("plugin:vue/{preset}")).unwrap();
            let flat = resolve_preset(&format!("flat/{preset}")).unwrap();
            assert_eq!(legacy, flat, "{preset}");
        }
    }

    #[test]
    fn test_presets_compose() {
        let essential = resolve_preset("essential").unwrap();
        let recommended = resolve_preset("recommended").unwrap();
        assert!(resolve_preset("base").unwrap().is_empty());
        assert_eq!(
            essential.get("vue/no-dupe-v-else-if"),
            Some(&RuleSetting::new(Severity::Error))
        );
        assert!(essential.get("vue/html-self-closing").is_none());
        for name in essential.keys() {
            assert!(recommended.contains_key(name));
        }
        assert_eq!(
            recommended.get("vue/this-in-template"),
            Some(&RuleSetting::new(Severity::Warn))
        );
        assert!(recommended.get("vue/v-on-function-call").is_none());
        assert!(matches!(resolve_preset("flat/unknown"), Err(ConfigError::UnknownPreset(_))));
    }

    #[test]
    fn test_legacy_extends_pointer() {
        let config = legacy_config("plugin:vue/strongly-recommended").unwrap();
        assert_eq!(config.extends.as_deref(), Some("plugin:vue/essential"));
        assert!(legacy_config("plugin:vue/base").unwrap().extends.is_none());
        assert_eq!(flat_config("flat/recommended").unwrap().len(), 4);
    }

    #[test]
    fn test_from_json_legacy() {
        let config = LintConfig::from_json(
            r#"{
                "extends": "plugin:vue/essential",
                "rules": {
                    "vue/no-dupe-v-else-if": "off",
                    "vue/html-self-closing": ["warn", { "html": { "void": "always" } }]
                }
            }"#,
        )
        .unwrap();
        assert_eq!(config.rule("no-dupe-v-else-if").unwrap().severity, Severity::Off);
        assert_eq!(config.rule("vue/html-self-closing").unwrap().options.len(), 1);
        let names: Vec<_> = config.instantiate().unwrap().iter().map(|(r, _)| r.name()).collect();
        assert!(!names.contains(&"no-dupe-v-else-if"));
        assert!(names.contains(&"html-self-closing"));
    }

    #[test]
    fn test_from_json_flat() {
        let config = LintConfig::from_json(
            r#"["flat/strongly-recommended", {
                "rules": { "vue/v-on-style": ["error", "longform"] }
            }]"#,
        )
        .unwrap();
        let setting = config.rule("v-on-style").unwrap();
        assert_eq!(setting.severity, Severity::Error);
        assert_eq!(setting.options, vec![json!("longform")]);
    }

    #[test]
    fn test_config_errors() {
        let err = LintConfig::from_json(r#"{ "rules": { "vue/nope": "error" } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownRule(name) if name == "vue/nope"));

        let err =
            LintConfig::from_json(r#"{ "rules": { "vue/v-on-style": "loud" } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSetting { .. }));

        let err =
            LintConfig::from_json(r#"{ "rules": { "vue/v-on-style": ["warn", "sideways"] } }"#)
                .unwrap_err();
        assert_eq!(
            err.to_string(),
            concat!(
                "invalid options for rule `v-on-style`: ",
                r#"`options[0]` must be one of "shorthand", "longform""#,
            )
        );

        let err = LintConfig::from_json(r#"{ "plugins": ["vue"] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_default_is_recommended() {
        let default: Vec<_> = LintConfig::default()
            .rules()
            .map(|(n, s)| (n.to_string(), s.clone()))
            .collect();
        let preset: Vec<_> = LintConfig::from_preset("recommended")
            .unwrap()
            .rules()
            .map(|(n, s)| (n.to_string(), s.clone()))
            .collect();
        assert_eq!(default, preset);
    }
}
