//! Tags (`/api/v3/tag`)

use super::Resource;
use crate::fields::ConversionError;
use crate::fields::codec::narrow;
use crate::host::{Attr, AttributeBuilder, AttributeType, Schema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tag label; families reference tags by id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub id: Attr<i64>,
    pub label: Attr<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TagRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    #[serde(default)]
    label: String,
}

impl Resource for Tag {
    const TYPE_NAME: &'static str = "tag";
    const PATH: &'static str = "/api/v3/tag";

    fn schema() -> Schema {
        Schema::builder()
            .description("Tag.")
            .attribute(
                AttributeBuilder::new("id", AttributeType::Int64)
                    .description("Tag ID.")
                    .computed_only()
                    .use_state_for_unknown()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("label", AttributeType::String)
                    .description("Tag label. It must be lowercase.")
                    .required()
                    .lowercase()
                    .requires_replace()
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
            label: Attr::Null,
        }
    }

    fn to_request(&self) -> Result<Value, ConversionError> {
        let label = self
            .label
            .as_known()
            .ok_or(ConversionError::MissingAttribute("label"))?;
        let id = match self.id.as_known() {
            Some(id) => Some(i64::from(narrow("id", *id)?)),
            None => None,
        };
        let record = TagRecord {
            id,
            label: label.clone(),
        };
        serde_json::to_value(record).map_err(ConversionError::Encode)
    }

    fn from_response(value: Value) -> Result<Self, ConversionError> {
        let record: TagRecord = serde_json::from_value(value).map_err(ConversionError::Decode)?;
        Ok(Self {
            id: Attr::from_option(record.id),
            label: Attr::Known(record.label),
        })
    }
}
