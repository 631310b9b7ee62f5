//! Custom formats (`/api/v3/customformat`)
//!
//! A custom format is not a polymorphic record: its `specifications` are a
//! top-level ordered list. Each specification carries its own small
//! `fields[]` bag with `value`, `min` and `max`.

use super::Resource;
use crate::fields::codec::narrow;
use crate::fields::{ConversionError, Field};
use crate::host::{Attr, AttributeBuilder, AttributeType, Schema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Specification kinds whose `value` is an integer on the wire
pub const INTEGER_VALUED: &[&str] = &[
    "LanguageSpecification",
    "SourceSpecification",
    "ResolutionSpecification",
    "QualityModifierSpecification",
    "IndexerFlagSpecification",
];

pub const SPECIFICATION_KINDS: &[&str] = &[
    "ReleaseTitleSpecification",
    "EditionSpecification",
    "ReleaseGroupSpecification",
    "LanguageSpecification",
    "SourceSpecification",
    "ResolutionSpecification",
    "QualityModifierSpecification",
    "IndexerFlagSpecification",
    "SizeSpecification",
    "YearSpecification",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomFormat {
    pub id: Attr<i64>,
    pub name: Attr<String>,
    pub include_custom_format_when_renaming: Attr<bool>,
    pub specifications: Attr<Vec<Specification>>,
}

/// One matching condition of a custom format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Specification {
    pub name: Attr<String>,
    pub implementation: Attr<String>,
    pub negate: Attr<bool>,
    pub required: Attr<bool>,
    /// Regex for text specifications, enum value for integer ones
    pub value: Attr<String>,
    pub min: Attr<i64>,
    pub max: Attr<i64>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CustomFormatRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    #[serde(default)]
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    include_custom_format_when_renaming: Option<bool>,
    #[serde(default)]
    specifications: Vec<SpecificationRecord>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SpecificationRecord {
    #[serde(default)]
    name: String,
    #[serde(default)]
    implementation: String,
    #[serde(default)]
    negate: bool,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    fields: Vec<Field>,
}

impl Specification {
    fn to_record(&self) -> Result<SpecificationRecord, ConversionError> {
        let implementation = self
            .implementation
            .as_known()
            .ok_or(ConversionError::MissingAttribute("implementation"))?
            .clone();

        let mut fields = Vec::new();
        if let Some(value) = self.value.as_known() {
            let encoded = if INTEGER_VALUED.contains(&implementation.as_str()) {
                let parsed: i64 =
                    value
                        .trim()
                        .parse()
                        .map_err(|_| ConversionError::NotAnInteger {
                            attribute: "value".to_string(),
                            value: value.clone(),
                        })?;
                Value::from(narrow("value", parsed)?)
            } else {
                Value::String(value.clone())
            };
            fields.push(Field {
                name: "value".to_string(),
                value: encoded,
            });
        }
        for (name, bound) in [("min", &self.min), ("max", &self.max)] {
            if let Some(bound) = bound.as_known() {
                fields.push(Field {
                    name: name.to_string(),
                    value: Value::from(narrow(name, *bound)?),
                });
            }
        }

        Ok(SpecificationRecord {
            name: self.name.as_known().cloned().unwrap_or_default(),
            implementation,
            negate: self.negate.as_known().copied().unwrap_or_default(),
            required: self.required.as_known().copied().unwrap_or_default(),
            fields,
        })
    }

    fn from_record(record: SpecificationRecord) -> Self {
        let mut spec = Specification {
            name: Attr::Known(record.name),
            implementation: Attr::Known(record.implementation),
            negate: Attr::Known(record.negate),
            required: Attr::Known(record.required),
            ..Default::default()
        };
        for field in record.fields {
            match field.name.as_str() {
                "value" => spec.value = read_value(&field.value),
                "min" => spec.min = read_bound(&field.value),
                "max" => spec.max = read_bound(&field.value),
                other => tracing::trace!("ignoring unrecognised specification field {}", other),
            }
        }
        spec
    }
}

/// Text and integer values both land in the string attribute
fn read_value(value: &Value) -> Attr<String> {
    match value {
        Value::String(s) => Attr::Known(s.clone()),
        Value::Number(n) => Attr::Known(n.to_string()),
        _ => Attr::Null,
    }
}

/// Whole numbers only; a fractional bound reads as absent
fn read_bound(value: &Value) -> Attr<i64> {
    if let Some(n) = value.as_i64() {
        return Attr::Known(n);
    }
    match value.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < (1u64 << 53) as f64 => Attr::Known(f as i64),
        Some(f) => {
            tracing::debug!("ignoring fractional specification bound {}", f);
            Attr::Null
        }
        None => Attr::Null,
    }
}

impl Resource for CustomFormat {
    const TYPE_NAME: &'static str = "custom_format";
    const PATH: &'static str = "/api/v3/customformat";

    fn schema() -> Schema {
        let specification = vec![
            AttributeBuilder::new("name", AttributeType::String)
                .required()
                .build(),
            AttributeBuilder::new("implementation", AttributeType::String)
                .required()
                .one_of(SPECIFICATION_KINDS)
                .build(),
            AttributeBuilder::new("negate", AttributeType::Bool)
                .computed()
                .build(),
            AttributeBuilder::new("required", AttributeType::Bool)
                .computed()
                .build(),
            AttributeBuilder::new("value", AttributeType::String)
                .description("Match value; integer kinds take the enum value as text.")
                .computed()
                .build(),
            AttributeBuilder::new("min", AttributeType::Int64)
                .computed()
                .build(),
            AttributeBuilder::new("max", AttributeType::Int64)
                .computed()
                .build(),
        ];

        Schema::builder()
            .description("Custom format.")
            .attribute(
                AttributeBuilder::new("id", AttributeType::Int64)
                    .description("Custom format ID.")
                    .computed_only()
                    .use_state_for_unknown()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("name", AttributeType::String)
                    .required()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("include_custom_format_when_renaming", AttributeType::Bool)
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new(
                    "specifications",
                    AttributeType::ListOfObject(specification),
                )
                .required()
                .build(),
            )
            .build()
    }

    fn id(&self) -> &Attr<i64> {
        &self.id
    }

    fn with_id(id: i64) -> Self {
        Self {
            id: Attr::Known(id),
            ..Default::default()
        }
    }

    fn to_request(&self) -> Result<Value, ConversionError> {
        let name = self
            .name
            .as_known()
            .ok_or(ConversionError::MissingAttribute("name"))?;
        let specifications = match self.specifications.as_known() {
            Some(specs) => specs
                .iter()
                .map(Specification::to_record)
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };
        let id = match self.id.as_known() {
            Some(id) => Some(i64::from(narrow("id", *id)?)),
            None => None,
        };
        let record = CustomFormatRecord {
            id,
            name: name.clone(),
            include_custom_format_when_renaming: self
                .include_custom_format_when_renaming
                .as_known()
                .copied(),
            specifications,
        };
        serde_json::to_value(record).map_err(ConversionError::Encode)
    }

    fn from_response(value: Value) -> Result<Self, ConversionError> {
        let record: CustomFormatRecord =
            serde_json::from_value(value).map_err(ConversionError::Decode)?;
        Ok(Self {
            id: Attr::from_option(record.id),
            name: Attr::Known(record.name),
            include_custom_format_when_renaming: Attr::Known(
                record.include_custom_format_when_renaming.unwrap_or_default(),
            ),
            specifications: Attr::Known(
                record
                    .specifications
                    .into_iter()
                    .map(Specification::from_record)
                    .collect(),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(implementation: &str, value: &str) -> Specification {
        Specification {
            name: Attr::known(implementation),
            implementation: Attr::known(implementation),
            value: Attr::known(value),
            ..Default::default()
        }
    }

    #[test]
    fn test_integer_valued_specification() {
        let record = spec("ResolutionSpecification", "2160").to_record().unwrap();
        assert_eq!(record.fields[0].value, json!(2160));

        let record = spec("ReleaseTitleSpecification", "2160").to_record().unwrap();
        assert_eq!(record.fields[0].value, json!("2160"));

        let err = spec("SourceSpecification", "bluray").to_record().unwrap_err();
        assert!(matches!(err, ConversionError::NotAnInteger { .. }));
    }

    #[test]
    fn test_read_value_accepts_numbers() {
        let spec = Specification::from_record(SpecificationRecord {
            name: "2160p".into(),
            implementation: "ResolutionSpecification".into(),
            fields: vec![Field {
                name: "value".into(),
                value: json!(2160),
            }],
            ..Default::default()
        });
        assert_eq!(spec.value, Attr::known("2160"));
        assert!(spec.min.is_null());
    }

    #[test]
    fn test_fractional_bounds_are_not_truncated() {
        let spec = Specification::from_record(SpecificationRecord {
            name: "size".into(),
            implementation: "SizeSpecification".into(),
            fields: vec![
                Field {
                    name: "min".into(),
                    value: json!(1.5),
                },
                Field {
                    name: "max".into(),
                    value: json!(40.0),
                },
            ],
            ..Default::default()
        });
        assert!(spec.min.is_null());
        assert_eq!(spec.max, Attr::Known(40));
    }

    #[test]
    fn test_missing_name() {
        let format = CustomFormat::default();
        assert!(matches!(
            format.to_request(),
            Err(ConversionError::MissingAttribute("name"))
        ));
    }
}
