//! Host runtime boundary
//!
//! The declarative host (planning, state storage, RPC transport) lives outside
//! this crate. These types model the parts of its contract the resources need:
//! tri-state attribute values, diagnostics, schemas and state transitions.

mod attr;
mod diagnostics;
pub mod schema;
mod state;

pub use attr::Attr;
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use schema::{
    AttributeBuilder, AttributeType, PlanModifier, Schema, SchemaBuilder, Validator,
};
pub use state::{Response, StateChange};
