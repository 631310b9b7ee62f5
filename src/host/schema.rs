//! Resource schema declarations
//!
//! Each resource declares its attributes once: type, whether the user must
//! set it, whether the provider computes it, sensitivity, plan-time
//! validators and plan modifiers. The schema also drives plan validation,
//! log redaction and the restoration of values the server masks.

use super::Diagnostics;
use serde::Serialize;
use serde_json::Value;

/// Placeholder written in place of sensitive values in logs and CLI output
pub const REDACTED: &str = "(sensitive)";

/// Value the server returns in place of stored secrets
pub const SERVER_MASK: &str = "********";

/// Attribute value types
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    Bool,
    Int64,
    String,
    SetOfInt64,
    SetOfString,
    MapOfString,
    /// Ordered list of nested objects
    ListOfObject(Vec<Attribute>),
}

impl AttributeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::Bool => "bool",
            AttributeType::Int64 => "int64",
            AttributeType::String => "string",
            AttributeType::SetOfInt64 => "set(int64)",
            AttributeType::SetOfString => "set(string)",
            AttributeType::MapOfString => "map(string)",
            AttributeType::ListOfObject(_) => "list(object)",
        }
    }
}

/// Plan-time value validators
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Validator {
    /// String (or every string of a set) must be one of the given values
    OneOf(&'static [&'static str]),
    /// Integer (or every integer of a set) must lie in the inclusive range
    Between(i64, i64),
    /// String must not contain uppercase characters
    Lowercase,
}

impl Validator {
    /// Check one scalar value, returning a human readable reason on failure
    fn check_scalar(&self, value: &Value) -> Result<(), String> {
        match (self, value) {
            (Validator::OneOf(allowed), Value::String(s)) => {
                if allowed.contains(&s.as_str()) {
                    Ok(())
                } else {
                    Err(format!(
                        "value must be one of: {}, got: {:?}",
                        allowed
                            .iter()
                            .map(|a| format!("{:?}", a))
                            .collect::<Vec<_>>()
                            .join(", "),
                        s
                    ))
                }
            }
            (Validator::Between(min, max), Value::Number(n)) => match n.as_i64() {
                Some(i) if i >= *min && i <= *max => Ok(()),
                _ => Err(format!(
                    "value must be between {} and {}, got: {}",
                    min, max, n
                )),
            },
            (Validator::Lowercase, Value::String(s)) => {
                if s.chars().any(char::is_uppercase) {
                    Err(format!("value must be lowercase, got: {:?}", s))
                } else {
                    Ok(())
                }
            }
            _ => Ok(()),
        }
    }

    fn check(&self, value: &Value) -> Result<(), String> {
        match value {
            Value::Array(items) => items.iter().try_for_each(|v| self.check_scalar(v)),
            other => self.check_scalar(other),
        }
    }
}

/// Plan modifiers applied by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanModifier {
    /// Carry the prior state value forward instead of planning unknown
    UseStateForUnknown,
    /// A change forces destroy and re-create
    RequiresReplace,
}

/// A single schema attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub description: String,
    pub attr_type: AttributeType,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    pub validators: Vec<Validator>,
    pub plan_modifiers: Vec<PlanModifier>,
}

/// Builder for [`Attribute`]
///
/// Attributes start out optional; `required()` and `computed()` adjust that.
pub struct AttributeBuilder {
    attribute: Attribute,
}

impl AttributeBuilder {
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        Self {
            attribute: Attribute {
                name: name.into(),
                description: String::new(),
                attr_type,
                required: false,
                optional: true,
                computed: false,
                sensitive: false,
                validators: Vec::new(),
                plan_modifiers: Vec::new(),
            },
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.attribute.description = description.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.attribute.required = true;
        self.attribute.optional = false;
        self
    }

    pub fn optional(mut self) -> Self {
        self.attribute.required = false;
        self.attribute.optional = true;
        self
    }

    pub fn computed(mut self) -> Self {
        self.attribute.computed = true;
        self
    }

    /// Computed only: the user cannot set it
    pub fn computed_only(mut self) -> Self {
        self.attribute.computed = true;
        self.attribute.optional = false;
        self.attribute.required = false;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.attribute.sensitive = true;
        self
    }

    pub fn one_of(mut self, allowed: &'static [&'static str]) -> Self {
        self.attribute.validators.push(Validator::OneOf(allowed));
        self
    }

    pub fn between(mut self, min: i64, max: i64) -> Self {
        self.attribute.validators.push(Validator::Between(min, max));
        self
    }

    pub fn lowercase(mut self) -> Self {
        self.attribute.validators.push(Validator::Lowercase);
        self
    }

    pub fn use_state_for_unknown(mut self) -> Self {
        self.attribute
            .plan_modifiers
            .push(PlanModifier::UseStateForUnknown);
        self
    }

    pub fn requires_replace(mut self) -> Self {
        self.attribute
            .plan_modifiers
            .push(PlanModifier::RequiresReplace);
        self
    }

    pub fn build(self) -> Attribute {
        self.attribute
    }
}

/// Schema of one resource (or of the provider block)
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Schema {
    pub version: i64,
    pub description: String,
    pub attributes: Vec<Attribute>,
}

/// Builder for [`Schema`]
#[derive(Default)]
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(mut self, version: i64) -> Self {
        self.schema.version = version;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.schema.description = description.into();
        self
    }

    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.schema.attributes.push(attribute);
        self
    }

    pub fn build(self) -> Schema {
        self.schema
    }
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Names of all sensitive top-level attributes
    pub fn sensitive_attributes(&self) -> Vec<&str> {
        self.attributes
            .iter()
            .filter(|a| a.sensitive)
            .map(|a| a.name.as_str())
            .collect()
    }

    /// Validate a planned configuration object
    ///
    /// Unknown values are skipped: they are validated once known.
    pub fn validate(&self, config: &Value, diags: &mut Diagnostics) {
        validate_object(&self.attributes, config, "", diags);
    }

    /// Copy of `value` with every sensitive attribute replaced by [`REDACTED`]
    pub fn redact(&self, value: &Value) -> Value {
        redact_object(&self.attributes, value)
    }

    /// Put back sensitive values the server returned masked
    ///
    /// The server never echoes secrets; it answers with [`SERVER_MASK`].
    /// Keeping the masked value would make every plan show a diff.
    pub fn restore_masked(&self, new_state: &mut Value, prior: &Value) {
        let (Some(new_obj), Some(prior_obj)) = (new_state.as_object_mut(), prior.as_object())
        else {
            return;
        };
        for attribute in self.attributes.iter().filter(|a| a.sensitive) {
            let masked = matches!(
                new_obj.get(&attribute.name),
                Some(Value::String(s)) if s == SERVER_MASK
            );
            if masked {
                let prior_value = prior_obj.get(&attribute.name).cloned().unwrap_or(Value::Null);
                new_obj.insert(attribute.name.clone(), prior_value);
            }
        }
    }
}

fn validate_object(attributes: &[Attribute], config: &Value, prefix: &str, diags: &mut Diagnostics) {
    let Some(obj) = config.as_object() else {
        diags.add_error(
            "Invalid Configuration",
            format!("expected an object at {:?}", prefix_or_root(prefix)),
        );
        return;
    };

    for attribute in attributes {
        let path = if prefix.is_empty() {
            attribute.name.clone()
        } else {
            format!("{}.{}", prefix, attribute.name)
        };
        let value = obj.get(&attribute.name).unwrap_or(&Value::Null);

        if value.is_null() {
            if attribute.required {
                diags.add_error(
                    "Missing Configuration for Required Attribute",
                    format!("The attribute {:?} is required but no value was set.", path),
                );
            }
            continue;
        }

        for validator in &attribute.validators {
            if let Err(reason) = validator.check(value) {
                diags.add_error(
                    "Invalid Attribute Value",
                    format!("Attribute {} {}", path, reason),
                );
            }
        }

        if let AttributeType::ListOfObject(nested) = &attribute.attr_type {
            if let Some(items) = value.as_array() {
                for (i, item) in items.iter().enumerate() {
                    validate_object(nested, item, &format!("{}[{}]", path, i), diags);
                }
            }
        }
    }
}

fn prefix_or_root(prefix: &str) -> &str {
    if prefix.is_empty() { "<root>" } else { prefix }
}

fn redact_object(attributes: &[Attribute], value: &Value) -> Value {
    let Some(obj) = value.as_object() else {
        return value.clone();
    };
    let mut out = obj.clone();
    for attribute in attributes {
        let Some(current) = obj.get(&attribute.name) else {
            continue;
        };
        if current.is_null() {
            continue;
        }
        if attribute.sensitive {
            out.insert(attribute.name.clone(), Value::String(REDACTED.to_string()));
        } else if let AttributeType::ListOfObject(nested) = &attribute.attr_type {
            if let Some(items) = current.as_array() {
                let redacted = items.iter().map(|i| redact_object(nested, i)).collect();
                out.insert(attribute.name.clone(), Value::Array(redacted));
            }
        }
    }
    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Schema {
        Schema::builder()
            .description("test")
            .attribute(
                AttributeBuilder::new("name", AttributeType::String)
                    .required()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("password", AttributeType::String)
                    .sensitive()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("monitor", AttributeType::String)
                    .one_of(&["movieOnly", "movieAndCollection", "none"])
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("label", AttributeType::String)
                    .lowercase()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("grab_fields", AttributeType::SetOfInt64)
                    .between(0, 11)
                    .build(),
            )
            .build()
    }

    #[test]
    fn test_validate_required() {
        let mut diags = Diagnostics::new();
        schema().validate(&json!({}), &mut diags);
        assert_eq!(diags.len(), 1);
        let d = diags.iter().next().unwrap();
        assert_eq!(d.summary, "Missing Configuration for Required Attribute");
        assert!(d.detail.contains("name"));
    }

    #[test]
    fn test_validate_one_of() {
        let mut diags = Diagnostics::new();
        schema().validate(&json!({"name": "x", "monitor": "always"}), &mut diags);
        assert!(diags.has_error());

        let mut diags = Diagnostics::new();
        schema().validate(&json!({"name": "x", "monitor": "none"}), &mut diags);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_validate_lowercase_and_range() {
        let mut diags = Diagnostics::new();
        schema().validate(
            &json!({"name": "x", "label": "HD", "grab_fields": [0, 12]}),
            &mut diags,
        );
        assert_eq!(diags.errors().count(), 2);
    }

    #[test]
    fn test_redact() {
        let redacted = schema().redact(&json!({"name": "x", "password": "hunter2"}));
        assert_eq!(redacted["password"], REDACTED);
        assert_eq!(redacted["name"], "x");
        assert!(!redacted.to_string().contains("hunter2"));
    }

    #[test]
    fn test_redact_skips_null() {
        let redacted = schema().redact(&json!({"name": "x", "password": null}));
        assert!(redacted["password"].is_null());
    }

    #[test]
    fn test_restore_masked() {
        let mut new_state = json!({"name": "x", "password": SERVER_MASK});
        let prior = json!({"name": "x", "password": "hunter2"});
        schema().restore_masked(&mut new_state, &prior);
        assert_eq!(new_state["password"], "hunter2");
    }
}
