//! Resources exposed to the host
//!
//! Every resource is a typed view implementing [`Resource`]; the lifecycle in
//! [`ResourceHandler`] is shared. The host addresses resources by type name
//! through the object-safe [`DynResource`], which speaks JSON state.

pub mod custom_format;
pub mod download_clients;
pub mod errors;
pub mod import_lists;
pub mod indexers;
mod lifecycle;
pub mod listing;
pub mod metadata;
pub mod notifications;
pub mod tag;

pub use errors::Verb;
pub use lifecycle::ResourceHandler;

use crate::fields::ConversionError;
use crate::host::{
    Attr, AttributeBuilder, AttributeType, Diagnostics, Response, Schema, SchemaBuilder,
    StateChange,
};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::any::Any;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// A resource type managed through one REST collection
pub trait Resource:
    Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Host type name, e.g. `download_client_transmission`
    const TYPE_NAME: &'static str;
    /// Collection path on the server
    const PATH: &'static str;

    fn schema() -> Schema;

    fn id(&self) -> &Attr<i64>;

    /// State holding nothing but an id, as left by import
    fn with_id(id: i64) -> Self;

    fn to_request(&self) -> Result<Value, ConversionError>;

    fn from_response(value: Value) -> Result<Self, ConversionError>;
}

/// Schema attributes every family carries: id, name and tags
pub fn family_schema_builder(implementation: &str, group: &str) -> SchemaBuilder {
    Schema::builder()
        .description(format!("{} {}.", implementation, group))
        .attribute(
            AttributeBuilder::new("id", AttributeType::Int64)
                .description("Identifier assigned by the server.")
                .computed_only()
                .use_state_for_unknown()
                .build(),
        )
        .attribute(
            AttributeBuilder::new("name", AttributeType::String)
                .description("Display name.")
                .required()
                .build(),
        )
        .attribute(
            AttributeBuilder::new("tags", AttributeType::SetOfInt64)
                .description("Tag ids.")
                .optional()
                .computed()
                .build(),
        )
}

/// Type-erased resource, addressed by type name
#[async_trait]
pub trait DynResource: Send + Sync {
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    fn configure(
        &mut self,
        provider_data: Option<Arc<dyn Any + Send + Sync>>,
        diags: &mut Diagnostics,
    );

    /// Plan-time validation of a configuration object
    fn validate(&self, config: &Value, diags: &mut Diagnostics);

    async fn create(&self, plan: Value, cancel: &CancellationToken) -> Response<Value>;

    async fn read(&self, state: Value, cancel: &CancellationToken) -> Response<Value>;

    async fn update(&self, plan: Value, prior: Value, cancel: &CancellationToken)
    -> Response<Value>;

    async fn delete(&self, state: Value, cancel: &CancellationToken) -> Response<Value>;

    fn import(&self, id: &str) -> Response<Value>;
}

fn decode<R: Resource>(value: Value, diags: &mut Diagnostics) -> Option<R> {
    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            diags.add_error(
                "Invalid Configuration",
                format!("Unable to decode {}: {}", R::TYPE_NAME, err),
            );
            None
        }
    }
}

fn encode<R: Resource>(response: Response<R>) -> Response<Value> {
    let Response {
        state,
        mut diagnostics,
    } = response;
    let state = match state {
        StateChange::Set(value) => match serde_json::to_value(&value) {
            Ok(json) => StateChange::Set(json),
            Err(err) => {
                diagnostics.add_error(
                    errors::CLIENT_ERROR,
                    format!("Unable to encode {} state: {}", R::TYPE_NAME, err),
                );
                StateChange::Unchanged
            }
        },
        StateChange::Removed => StateChange::Removed,
        StateChange::Unchanged => StateChange::Unchanged,
    };
    Response { state, diagnostics }
}

fn rejected(diagnostics: Diagnostics) -> Response<Value> {
    Response {
        state: StateChange::Unchanged,
        diagnostics,
    }
}

#[async_trait]
impl<R: Resource> DynResource for ResourceHandler<R> {
    fn type_name(&self) -> &'static str {
        R::TYPE_NAME
    }

    fn schema(&self) -> Schema {
        R::schema()
    }

    fn configure(
        &mut self,
        provider_data: Option<Arc<dyn Any + Send + Sync>>,
        diags: &mut Diagnostics,
    ) {
        ResourceHandler::configure(self, provider_data, diags)
    }

    fn validate(&self, config: &Value, diags: &mut Diagnostics) {
        R::schema().validate(config, diags)
    }

    async fn create(&self, plan: Value, cancel: &CancellationToken) -> Response<Value> {
        let mut diags = Diagnostics::new();
        R::schema().validate(&plan, &mut diags);
        if diags.has_error() {
            return rejected(diags);
        }
        let Some(plan) = decode::<R>(plan, &mut diags) else {
            return rejected(diags);
        };
        encode(ResourceHandler::create(self, &plan, cancel).await)
    }

    async fn read(&self, state: Value, cancel: &CancellationToken) -> Response<Value> {
        let mut diags = Diagnostics::new();
        let Some(state) = decode::<R>(state, &mut diags) else {
            return rejected(diags);
        };
        encode(ResourceHandler::read(self, &state, cancel).await)
    }

    async fn update(
        &self,
        plan: Value,
        prior: Value,
        cancel: &CancellationToken,
    ) -> Response<Value> {
        let mut diags = Diagnostics::new();
        R::schema().validate(&plan, &mut diags);
        if diags.has_error() {
            return rejected(diags);
        }
        let (Some(plan), Some(prior)) = (
            decode::<R>(plan, &mut diags),
            decode::<R>(prior, &mut diags),
        ) else {
            return rejected(diags);
        };
        encode(ResourceHandler::update(self, &plan, &prior, cancel).await)
    }

    async fn delete(&self, state: Value, cancel: &CancellationToken) -> Response<Value> {
        let mut diags = Diagnostics::new();
        let Some(state) = decode::<R>(state, &mut diags) else {
            return rejected(diags);
        };
        encode(ResourceHandler::delete(self, &state, cancel).await)
    }

    fn import(&self, id: &str) -> Response<Value> {
        encode(ResourceHandler::import(self, id))
    }
}

/// Every resource type the provider serves
pub fn all() -> Vec<Box<dyn DynResource>> {
    let mut resources: Vec<Box<dyn DynResource>> = Vec::new();
    resources.extend(download_clients::resources());
    resources.extend(import_lists::resources());
    resources.extend(indexers::resources());
    resources.extend(notifications::resources());
    resources.extend(metadata::resources());
    resources.push(Box::new(ResourceHandler::<tag::Tag>::new()));
    resources.push(Box::new(ResourceHandler::<custom_format::CustomFormat>::new()));
    resources
}

/// Look up a resource type by name
pub fn find(type_name: &str) -> Option<Box<dyn DynResource>> {
    all().into_iter().find(|r| r.type_name() == type_name)
}

/// Boxed handlers for a list of resource types
macro_rules! handlers {
    ($($resource:ty),* $(,)?) => {
        vec![
            $( Box::new($crate::resources::ResourceHandler::<$resource>::new())
                as Box<dyn $crate::resources::DynResource>, )*
        ]
    };
}

pub(crate) use handlers;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_type_names_unique() {
        let resources = all();
        let names: HashSet<_> = resources.iter().map(|r| r.type_name()).collect();
        assert_eq!(names.len(), resources.len());
        assert!(find("download_client_transmission").is_some());
        assert!(find("no_such_resource").is_none());
    }

    #[test]
    fn test_common_schema_attributes() {
        for resource in all() {
            let schema = resource.schema();
            let id = schema.attribute("id").unwrap();
            assert!(id.computed && !id.optional, "{}", resource.type_name());
            assert!(!schema.description.is_empty(), "{}", resource.type_name());
        }
    }
}
