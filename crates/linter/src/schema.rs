//! Declarative option schemas
//!
//! Every rule describes the options it accepts as an [`OptionSchema`]. User
//! configuration is validated against it before any rule is created, so rule
//! constructors can deserialize their options without re-checking shapes.

use serde_json::Value;

/// Shape of an option value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OptionSchema {
    /// One of a fixed set of strings
    Enum(&'static [&'static str]),
    Bool,
    Integer { minimum: Option<i64> },
    String,
    /// Array of strings, each unique
    StringArray,
    /// Object with a fixed set of optional keys; unknown keys are rejected
    Object(&'static [(&'static str, OptionSchema)]),
    /// Positional array; trailing entries may be omitted
    Tuple(&'static [OptionSchema]),
    /// Accepts a value matching any of the alternatives
    AnyOf(&'static [OptionSchema]),
    Any,
}

/// An option value that does not fit its schema
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{path}` {message}")]
pub struct SchemaError {
    /// Location of the offending value, like `options[0].html.void`
    pub path: String,
    pub message: String,
}

impl SchemaError {
    fn new(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

impl OptionSchema {
    /// A rule that takes no options
    pub const NONE: OptionSchema = OptionSchema::Tuple(&[]);

    pub fn validate(&self, value: &Value) -> Result<(), SchemaError> {
        self.validate_at(value, "options")
    }

    fn validate_at(&self, value: &Value, path: &str) -> Result<(), SchemaError> {
        match self {
            Self::Any => Ok(()),
            Self::Bool => match value {
                Value::Bool(_) => Ok(()),
                _ => Err(SchemaError::new(path, "must be a boolean")),
            },
            Self::String => match value {
                Value::String(_) => Ok(()),
                _ => Err(SchemaError::new(path, "must be a string")),
            },
            Self::Integer { minimum } => {
                let Some(n) = value.as_i64() else {
                    return Err(SchemaError::new(path, "must be an integer"));
                };
                match minimum {
                    Some(min) if n < *min => {
                        Err(SchemaError::new(path, format!("must be >= {min}")))
                    }
                    _ => Ok(()),
                }
            }
            Self::Enum(allowed) => match value.as_str() {
                Some(s) if allowed.contains(&s) => Ok(()),
                _ => Err(SchemaError::new(
                    path,
                    format!("must be one of {}", quoted_list(allowed)),
                )),
            },
            Self::StringArray => {
                let Some(items) = value.as_array() else {
                    return Err(SchemaError::new(path, "must be an array of strings"));
                };
                for (index, item) in items.iter().enumerate() {
                    if !item.is_string() {
                        let path = format!("{path}[{index}]");
                        return Err(SchemaError::new(&path, "must be a string"));
                    }
                    if items[..index].contains(item) {
                        return Err(SchemaError::new(&format!("{path}[{index}]"), "is a duplicate"));
                    }
                }
                Ok(())
            }
            Self::Object(properties) => {
                let Some(object) = value.as_object() else {
                    return Err(SchemaError::new(path, "must be an object"));
                };
                for (key, item) in object {
                    let child = format!("{path}.{key}");
                    match properties.iter().find(|(name, _)| name == key) {
                        Some((_, schema)) => schema.validate_at(item, &child)?,
                        None => {
                            return Err(SchemaError::new(&child, "is not an allowed property"));
                        }
                    }
                }
                Ok(())
            }
            Self::Tuple(items) => {
                let Some(values) = value.as_array() else {
                    return Err(SchemaError::new(path, "must be an array"));
                };
                if values.len() > items.len() {
                    return Err(SchemaError::new(
                        path,
                        format!("accepts at most {} entries, got {}", items.len(), values.len()),
                    ));
                }
                for (index, (schema, item)) in items.iter().zip(values).enumerate() {
                    schema.validate_at(item, &format!("{path}[{index}]"))?;
                }
                Ok(())
            }
            Self::AnyOf(alternatives) => {
                let mut first_error = None;
                for schema in alternatives.iter() {
                    match schema.validate_at(value, path) {
                        Ok(()) => return Ok(()),
                        Err(err) => {
                            first_error.get_or_insert(err);
                        }
                    }
                }
                Err(first_error.unwrap_or_else(|| SchemaError::new(path, "matches no alternative")))
            }
        }
    }

    /// JSON-schema-like description, for documentation and host tooling
    pub fn to_json(&self) -> Value {
        use serde_json::json;
        match self {
            Self::Any => json!({}),
            Self::Bool => json!({ "type": "boolean" }),
            Self::String => json!({ "type": "string" }),
            Self::Integer { minimum: Some(min) } => json!({ "type": "integer", "minimum": min }),
            Self::Integer { minimum: None } => json!({ "type": "integer" }),
            Self::Enum(allowed) => json!({ "enum": allowed }),
            Self::StringArray => {
                json!({ "type": "array", "items": { "type": "string" }, "uniqueItems": true })
            }
            Self::Object(properties) => {
                let props: serde_json::Map<String, Value> = properties
                    .iter()
                    .map(|(name, schema)| (name.to_string(), schema.to_json()))
                    .collect();
                json!({ "type": "object", "properties": props, "additionalProperties": false })
            }
            Self::Tuple(items) => json!({
                "type": "array",
                "items": items.iter().map(Self::to_json).collect::<Vec<_>>(),
                "maxItems": items.len(),
            }),
            Self::AnyOf(alternatives) => {
                json!({ "anyOf": alternatives.iter().map(Self::to_json).collect::<Vec<_>>() })
            }
        }
    }
}

fn quoted_list(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("\"{item}\""))
        .collect::<Vec<_>>()
        .join(", ")
}
