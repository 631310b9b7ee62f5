//! Polymorphic settings-bag adapter
//!
//! The server models every family group as one REST resource with an
//! `implementation` tag and an open `fields[]` array. This module turns that
//! bag into typed views:
//!
//! - [`value`] - the five value shapes and the Rust types carrying them
//! - [`codec`] - one wire value to and from a [`FieldValue`]
//! - [`registry`] - per-group classification of wire names by shape
//! - [`generic`] - superset view of a group record, the only code touching `fields[]`
//! - [`family`] - typed family views declared with `family!`

pub mod codec;
pub mod family;
pub mod generic;
pub mod registry;
pub mod value;

pub use codec::ConversionError;
pub use family::{Declared, Family, family_from_response};
pub use generic::{Field, FieldMap, GenericView, Group, Location, Record};
pub use registry::FieldRegistry;
pub use value::{FieldShape, FieldType, FieldValue, IntSet, StringSet};

pub(crate) use family::{family, group_kind};
