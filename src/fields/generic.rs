//! Generic view of a polymorphic record
//!
//! A family group (download clients, import lists, ...) shares one REST
//! resource: a fixed envelope, a few group-specific top-level scalars and an
//! open `fields[]` bag. [`GenericView`] holds the superset of attributes any
//! family in the group can carry and is the only code that touches
//! `fields[]`.

use super::codec::{self, ConversionError};
use super::registry::FieldRegistry;
use super::value::{FieldType, FieldValue, IntSet};
use crate::host::Attr;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::marker::PhantomData;

/// A family group sharing one polymorphic endpoint
pub trait Group: Debug + Clone + Copy + PartialEq + Default + Send + Sync + 'static {
    /// Human readable group name
    const NAME: &'static str;
    /// Collection path on the server
    const PATH: &'static str;
    /// Group-specific top-level scalars (enable flags, triggers, category tag)
    const ENVELOPE: FieldRegistry;
    /// Names carried in `fields[]`
    const FIELDS: FieldRegistry;
    /// Top-level key holding the family category tag, if the group has one
    const CATEGORY: Option<&'static str>;
}

/// Where an attribute lives on the wire record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Top-level key of the record
    Envelope,
    /// Entry of `fields[]`
    Field,
}

/// One `fields[]` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

/// Polymorphic API record as sent to and received from the server
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub implementation: String,
    #[serde(default, deserialize_with = "nullable")]
    pub config_contract: String,
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Vec<i64>,
    #[serde(default, deserialize_with = "nullable")]
    pub fields: Vec<Field>,
    /// Remaining top-level keys
    #[serde(flatten)]
    pub envelope: Map<String, Value>,
}

fn is_zero(id: &i64) -> bool {
    *id == 0
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

pub type FieldMap = BTreeMap<&'static str, Attr<FieldValue>>;

/// Superset view of one record of group `G`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenericView<G> {
    pub id: Attr<i64>,
    pub name: Attr<String>,
    pub implementation: Attr<String>,
    pub config_contract: Attr<String>,
    pub tags: Attr<IntSet>,
    pub envelope: FieldMap,
    pub fields: FieldMap,
    group: PhantomData<G>,
}

impl<G: Group> GenericView<G> {
    pub fn new() -> Self {
        Self {
            id: Attr::Null,
            name: Attr::Null,
            implementation: Attr::Null,
            config_contract: Attr::Null,
            tags: Attr::Null,
            envelope: FieldMap::new(),
            fields: FieldMap::new(),
            group: PhantomData,
        }
    }

    fn map(&self, location: Location) -> &FieldMap {
        match location {
            Location::Envelope => &self.envelope,
            Location::Field => &self.fields,
        }
    }

    fn map_mut(&mut self, location: Location) -> &mut FieldMap {
        match location {
            Location::Envelope => &mut self.envelope,
            Location::Field => &mut self.fields,
        }
    }

    /// Attribute `name` as a typed value; absent names read as null
    pub fn get<T: FieldType>(&self, location: Location, name: &str) -> Attr<T> {
        match self.map(location).get(name) {
            Some(attr) => attr.clone().and_then(T::from_value),
            None => Attr::Null,
        }
    }

    pub fn set<T: FieldType>(&mut self, location: Location, name: &'static str, value: Attr<T>) {
        self.map_mut(location)
            .insert(name, value.map(FieldType::into_value));
    }

    /// Category tag, for groups that carry one
    pub fn category(&self) -> Attr<String> {
        match G::CATEGORY {
            Some(key) => self.get(Location::Envelope, key),
            None => Attr::Null,
        }
    }

    /// Overwrite the family identity with the family constants
    pub fn stamp(
        &mut self,
        implementation: &'static str,
        config_contract: &'static str,
        category: Option<&'static str>,
    ) {
        self.implementation = Attr::Known(implementation.to_string());
        self.config_contract = Attr::Known(config_contract.to_string());
        if let (Some(key), Some(value)) = (G::CATEGORY, category) {
            self.envelope
                .insert(key, Attr::Known(FieldValue::String(value.to_string())));
        }
    }

    /// Serialise to a wire record
    ///
    /// Envelope scalars go to the top level, registry fields to `fields[]`
    /// in registry order. Null and unknown attributes are omitted.
    pub fn to_record(&self) -> Result<Record, ConversionError> {
        let mut record = Record {
            id: self.id.as_known().copied().unwrap_or_default(),
            name: self.name.as_known().cloned().unwrap_or_default(),
            implementation: self.implementation.as_known().cloned().unwrap_or_default(),
            config_contract: self.config_contract.as_known().cloned().unwrap_or_default(),
            tags: self
                .tags
                .as_known()
                .map(|tags| tags.iter().copied().collect())
                .unwrap_or_default(),
            fields: Vec::new(),
            envelope: Map::new(),
        };

        for name in record.tags.iter() {
            codec::narrow("tags", *name)?;
        }

        for (name, shape) in G::ENVELOPE.iter() {
            if let Some(value) = known_of_shape(&self.envelope, name, shape) {
                if let Some(encoded) = codec::encode(name, value)? {
                    record.envelope.insert(name.to_string(), encoded);
                }
            }
        }

        for (name, shape) in G::FIELDS.iter() {
            if let Some(value) = known_of_shape(&self.fields, name, shape) {
                if let Some(encoded) = codec::encode(name, value)? {
                    record.fields.push(Field {
                        name: name.to_string(),
                        value: encoded,
                    });
                }
            }
        }

        Ok(record)
    }

    /// Serialise straight to a JSON request body
    pub fn to_request(&self) -> Result<Value, ConversionError> {
        serde_json::to_value(self.to_record()?).map_err(ConversionError::Encode)
    }

    /// Deserialise a wire record
    ///
    /// Every collection comes back known, empty when the server sent
    /// nothing, so the host never sees an unknown collection after apply.
    pub fn from_record(record: &Record) -> Self {
        let mut view = Self::new();
        view.id = Attr::Known(record.id);
        view.name = Attr::Known(record.name.clone());
        view.implementation = Attr::Known(record.implementation.clone());
        view.config_contract = Attr::Known(record.config_contract.clone());
        view.tags = Attr::Known(record.tags.iter().copied().collect());

        for (name, shape) in G::ENVELOPE.iter() {
            if let Some(empty) = shape.empty() {
                view.envelope.insert(name, Attr::Known(empty));
            }
        }
        for (name, shape) in G::FIELDS.iter() {
            if let Some(empty) = shape.empty() {
                view.fields.insert(name, Attr::Known(empty));
            }
        }

        for (key, value) in &record.envelope {
            if let Some((shape, name)) = G::ENVELOPE.lookup(key) {
                if let Some(decoded) = codec::decode(shape, value) {
                    view.envelope.insert(name, Attr::Known(decoded));
                }
            }
        }

        for field in &record.fields {
            match G::FIELDS.lookup(&field.name) {
                Some((shape, name)) => {
                    if let Some(decoded) = codec::decode(shape, &field.value) {
                        view.fields.insert(name, Attr::Known(decoded));
                    }
                }
                None => {
                    tracing::trace!("ignoring unrecognised {} field {}", G::NAME, field.name);
                }
            }
        }

        view
    }

    /// Deserialise a JSON response body
    pub fn from_response(value: Value) -> Result<Self, ConversionError> {
        let record: Record = serde_json::from_value(value).map_err(ConversionError::Decode)?;
        Ok(Self::from_record(&record))
    }
}

fn known_of_shape<'a>(
    map: &'a FieldMap,
    name: &str,
    shape: super::value::FieldShape,
) -> Option<&'a FieldValue> {
    match map.get(name) {
        Some(Attr::Known(value)) if value.shape() == shape => Some(value),
        Some(Attr::Known(value)) => {
            tracing::warn!(
                "dropping attribute {}: expected {}, got {}",
                name,
                shape.as_str(),
                value.shape().as_str()
            );
            None
        }
        _ => None,
    }
}
