//! Typed field values
//!
//! Every polymorphic field carries one of five value shapes. `FieldType`
//! maps the Rust type of a typed-view attribute onto its shape.

use crate::host::AttributeType;
use std::collections::BTreeSet;

pub type IntSet = BTreeSet<i64>;
pub type StringSet = BTreeSet<String>;

/// Value shape of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldShape {
    Bool,
    Int,
    String,
    IntSet,
    StringSet,
}

impl FieldShape {
    /// Registry order: serialisation walks shapes in this sequence
    pub const ALL: &'static [FieldShape] = &[
        FieldShape::Bool,
        FieldShape::Int,
        FieldShape::String,
        FieldShape::IntSet,
        FieldShape::StringSet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldShape::Bool => "bool",
            FieldShape::Int => "int",
            FieldShape::String => "string",
            FieldShape::IntSet => "int set",
            FieldShape::StringSet => "string set",
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, FieldShape::IntSet | FieldShape::StringSet)
    }

    /// Known-empty value for collection shapes
    pub fn empty(&self) -> Option<FieldValue> {
        match self {
            FieldShape::IntSet => Some(FieldValue::IntSet(IntSet::new())),
            FieldShape::StringSet => Some(FieldValue::StringSet(StringSet::new())),
            _ => None,
        }
    }

    pub fn attribute_type(&self) -> AttributeType {
        match self {
            FieldShape::Bool => AttributeType::Bool,
            FieldShape::Int => AttributeType::Int64,
            FieldShape::String => AttributeType::String,
            FieldShape::IntSet => AttributeType::SetOfInt64,
            FieldShape::StringSet => AttributeType::SetOfString,
        }
    }
}

/// A decoded field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    String(String),
    IntSet(IntSet),
    StringSet(StringSet),
}

impl FieldValue {
    pub fn shape(&self) -> FieldShape {
        match self {
            FieldValue::Bool(_) => FieldShape::Bool,
            FieldValue::Int(_) => FieldShape::Int,
            FieldValue::String(_) => FieldShape::String,
            FieldValue::IntSet(_) => FieldShape::IntSet,
            FieldValue::StringSet(_) => FieldShape::StringSet,
        }
    }

    pub fn is_empty_collection(&self) -> bool {
        match self {
            FieldValue::IntSet(s) => s.is_empty(),
            FieldValue::StringSet(s) => s.is_empty(),
            _ => false,
        }
    }
}

/// Rust types usable as typed-view attributes
pub trait FieldType: Sized + Clone {
    const SHAPE: FieldShape;

    fn into_value(self) -> FieldValue;

    fn from_value(value: FieldValue) -> Option<Self>;
}

impl FieldType for bool {
    const SHAPE: FieldShape = FieldShape::Bool;

    fn into_value(self) -> FieldValue {
        FieldValue::Bool(self)
    }

    fn from_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Bool(v) => Some(v),
            _ => None,
        }
    }
}

impl FieldType for i64 {
    const SHAPE: FieldShape = FieldShape::Int;

    fn into_value(self) -> FieldValue {
        FieldValue::Int(self)
    }

    fn from_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Int(v) => Some(v),
            _ => None,
        }
    }
}

impl FieldType for String {
    const SHAPE: FieldShape = FieldShape::String;

    fn into_value(self) -> FieldValue {
        FieldValue::String(self)
    }

    fn from_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::String(v) => Some(v),
            _ => None,
        }
    }
}

impl FieldType for IntSet {
    const SHAPE: FieldShape = FieldShape::IntSet;

    fn into_value(self) -> FieldValue {
        FieldValue::IntSet(self)
    }

    fn from_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::IntSet(v) => Some(v),
            _ => None,
        }
    }
}

impl FieldType for StringSet {
    const SHAPE: FieldShape = FieldShape::StringSet;

    fn into_value(self) -> FieldValue {
        FieldValue::StringSet(self)
    }

    fn from_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::StringSet(v) => Some(v),
            _ => None,
        }
    }
}
