//! Field codec
//!
//! Translates one wire value (`fields[].value` or a top-level envelope
//! scalar) to and from a [`FieldValue`] of a known shape. Reads never fail:
//! a null or a value of the wrong shape reads as absent. Writes fail only
//! when an integer does not fit the server's 32-bit integers.

use super::value::{FieldShape, FieldValue, IntSet, StringSet};
use serde_json::Value;
use thiserror::Error;

/// Errors raised while turning a view into a wire request
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("attribute {attribute} value {value} does not fit a 32-bit integer")]
    IntegerOutOfRange { attribute: String, value: i64 },

    #[error("attribute {attribute} value {value:?} is not an integer")]
    NotAnInteger { attribute: String, value: String },

    #[error("attribute {0} is required")]
    MissingAttribute(&'static str),

    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
}

pub fn read_bool(value: &Value) -> Option<bool> {
    value.as_bool()
}

pub fn read_int(value: &Value) -> Option<i64> {
    value.as_i64()
}

pub fn read_string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

/// Read a list of integers as a set; duplicates collapse, order is dropped
pub fn read_int_set(value: &Value) -> Option<IntSet> {
    value
        .as_array()?
        .iter()
        .map(Value::as_i64)
        .collect::<Option<IntSet>>()
}

pub fn read_string_set(value: &Value) -> Option<StringSet> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect::<Option<StringSet>>()
}

/// Decode a wire value as the given shape
pub fn decode(shape: FieldShape, value: &Value) -> Option<FieldValue> {
    match shape {
        FieldShape::Bool => read_bool(value).map(FieldValue::Bool),
        FieldShape::Int => read_int(value).map(FieldValue::Int),
        FieldShape::String => read_string(value).map(FieldValue::String),
        FieldShape::IntSet => read_int_set(value).map(FieldValue::IntSet),
        FieldShape::StringSet => read_string_set(value).map(FieldValue::StringSet),
    }
}

/// Encode a value for the wire
///
/// Empty collections return `None` so the server keeps its own default.
/// Sets come out in ascending order.
pub fn encode(name: &str, value: &FieldValue) -> Result<Option<Value>, ConversionError> {
    if value.is_empty_collection() {
        return Ok(None);
    }
    let encoded = match value {
        FieldValue::Bool(b) => Value::Bool(*b),
        FieldValue::Int(i) => Value::from(narrow(name, *i)?),
        FieldValue::String(s) => Value::String(s.clone()),
        FieldValue::IntSet(set) => set
            .iter()
            .map(|i| narrow(name, *i).map(Value::from))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)?,
        FieldValue::StringSet(set) => {
            Value::Array(set.iter().cloned().map(Value::String).collect())
        }
    };
    Ok(Some(encoded))
}

/// Narrow to the server's 32-bit integers
pub fn narrow(name: &str, value: i64) -> Result<i32, ConversionError> {
    i32::try_from(value).map_err(|_| ConversionError::IntegerOutOfRange {
        attribute: name.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_mismatch_is_absent() {
        assert_eq!(decode(FieldShape::Bool, &json!("true")), None);
        assert_eq!(decode(FieldShape::Int, &json!("9091")), None);
        assert_eq!(decode(FieldShape::String, &json!(1)), None);
        assert_eq!(decode(FieldShape::IntSet, &json!([1, "2"])), None);
        assert_eq!(decode(FieldShape::StringSet, &json!("a")), None);
        assert_eq!(decode(FieldShape::String, &Value::Null), None);
    }

    #[test]
    fn test_read_int_set_drops_duplicates_and_order() {
        let value = decode(FieldShape::IntSet, &json!([3, 1, 3, 2])).unwrap();
        assert_eq!(value, FieldValue::IntSet([1, 2, 3].into_iter().collect()));
    }

    #[test]
    fn test_encode_sorted() {
        let set: StringSet = ["b", "a", "c"].iter().map(|s| s.to_string()).collect();
        let encoded = encode("devices", &FieldValue::StringSet(set)).unwrap();
        assert_eq!(encoded, Some(json!(["a", "b", "c"])));
    }

    #[test]
    fn test_encode_empty_collection_is_omitted() {
        assert_eq!(encode("tagIds", &FieldValue::IntSet(IntSet::new())).unwrap(), None);
        assert_eq!(
            encode("devices", &FieldValue::StringSet(StringSet::new())).unwrap(),
            None
        );
    }

    #[test]
    fn test_encode_scalars_keep_zero_values() {
        assert_eq!(encode("useSsl", &FieldValue::Bool(false)).unwrap(), Some(json!(false)));
        assert_eq!(encode("port", &FieldValue::Int(0)).unwrap(), Some(json!(0)));
        assert_eq!(
            encode("urlBase", &FieldValue::String(String::new())).unwrap(),
            Some(json!(""))
        );
    }

    #[test]
    fn test_integer_range() {
        assert_eq!(
            encode("port", &FieldValue::Int(i32::MAX as i64)).unwrap(),
            Some(json!(i32::MAX))
        );
        assert_eq!(
            encode("port", &FieldValue::Int(i32::MIN as i64)).unwrap(),
            Some(json!(i32::MIN))
        );

        let err = encode("port", &FieldValue::Int(i32::MAX as i64 + 1)).unwrap_err();
        assert!(matches!(err, ConversionError::IntegerOutOfRange { .. }));
        assert!(err.to_string().contains("port"));

        let set: IntSet = [1, i64::MIN].into_iter().collect();
        assert!(encode("profileIds", &FieldValue::IntSet(set)).is_err());
    }
}
