//! CRUD lifecycle shared by every resource
//!
//! Each operation is a straight translation: typed view to request, one
//! HTTP round-trip, response back to a typed view. Failures become
//! diagnostics and leave state alone, except for a read that finds the
//! record gone, which drops it from state.

use super::Resource;
use super::errors::{self, Verb};
use crate::client::{ApiRequest, Transport, send_cancellable};
use crate::fields::codec::narrow;
use crate::host::{Attr, Diagnostics, Response};
use crate::provider::ProviderData;
use serde_json::Value;
use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Runs the lifecycle of resource type `R`
pub struct ResourceHandler<R> {
    transport: Option<Arc<dyn Transport>>,
    resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Default for ResourceHandler<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> ResourceHandler<R> {
    pub fn new() -> Self {
        Self {
            transport: None,
            resource: PhantomData,
        }
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport: Some(transport),
            resource: PhantomData,
        }
    }

    /// Pick up the client the provider configured
    ///
    /// The host may call this before the provider is configured, with no
    /// data; that is not an error.
    pub fn configure(
        &mut self,
        provider_data: Option<Arc<dyn Any + Send + Sync>>,
        diags: &mut Diagnostics,
    ) {
        let Some(data) = provider_data else {
            return;
        };
        match data.downcast::<ProviderData>() {
            Ok(data) => self.transport = Some(data.transport.clone()),
            Err(_) => diags.add_error(
                errors::UNEXPECTED_CONFIGURE_TYPE,
                format!(
                    "Expected ProviderData, got another type while configuring {}. \
                     Please report this issue to the provider developers.",
                    R::TYPE_NAME
                ),
            ),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.transport.is_some()
    }

    fn transport(&self, diags: &mut Diagnostics) -> Option<&dyn Transport> {
        let transport = self.transport.as_deref();
        if transport.is_none() {
            diags.add_error(
                errors::UNCONFIGURED,
                format!(
                    "{} was used before the provider was configured.",
                    R::TYPE_NAME
                ),
            );
        }
        transport
    }

    /// Log a typed view with sensitive attributes redacted
    fn log_state(&self, what: &str, value: &R) {
        if let Ok(json) = serde_json::to_value(value) {
            tracing::debug!("{} {}: {}", what, R::TYPE_NAME, R::schema().redact(&json));
        }
    }

    /// Parse a response and put back secrets the server masked
    fn settle(&self, body: Value, prior: &R, verb: Verb, diags: &mut Diagnostics) -> Option<R> {
        let parsed = match R::from_response(body) {
            Ok(parsed) => parsed,
            Err(err) => {
                errors::conversion_error(diags, verb, R::TYPE_NAME, &err);
                return None;
            }
        };

        let (Ok(mut state), Ok(prior)) = (serde_json::to_value(&parsed), serde_json::to_value(prior))
        else {
            return Some(parsed);
        };
        R::schema().restore_masked(&mut state, &prior);
        match serde_json::from_value(state) {
            Ok(restored) => Some(restored),
            Err(_) => Some(parsed),
        }
    }

    fn item_path(id: i64) -> String {
        format!("{}/{}", R::PATH, id)
    }

    fn state_id(value: &R, diags: &mut Diagnostics) -> Option<i64> {
        let id = value.id().as_known().copied();
        if id.is_none() {
            diags.add_error(
                errors::MISSING_IDENTIFIER,
                format!("{} has no id in state.", R::TYPE_NAME),
            );
        }
        id
    }

    pub async fn create(&self, plan: &R, cancel: &CancellationToken) -> Response<R> {
        let mut diags = Diagnostics::new();
        let Some(transport) = self.transport(&mut diags) else {
            return unchanged(diags);
        };

        let body = match plan.to_request() {
            Ok(body) => body,
            Err(err) => {
                errors::conversion_error(&mut diags, Verb::Create, R::TYPE_NAME, &err);
                return unchanged(diags);
            }
        };
        self.log_state("creating", plan);

        let response =
            match send_cancellable(transport, ApiRequest::post(R::PATH, body), cancel).await {
                Ok(response) => response,
                Err(err) => {
                    errors::client_error(&mut diags, Verb::Create, R::TYPE_NAME, &err);
                    return unchanged(diags);
                }
            };

        let Some(created) = self.settle(response, plan, Verb::Create, &mut diags) else {
            return unchanged(diags);
        };
        tracing::trace!(
            "created {}: {}",
            R::TYPE_NAME,
            created.id().as_known().copied().unwrap_or_default()
        );
        Response::set(created)
    }

    /// Refresh state; a record gone from the server is dropped silently
    pub async fn read(&self, state: &R, cancel: &CancellationToken) -> Response<R> {
        let mut diags = Diagnostics::new();
        let Some(transport) = self.transport(&mut diags) else {
            return unchanged(diags);
        };
        let Some(id) = Self::state_id(state, &mut diags) else {
            return unchanged(diags);
        };

        let response =
            match send_cancellable(transport, ApiRequest::get(Self::item_path(id)), cancel).await {
                Ok(response) => response,
                Err(err) if err.is_not_found() => {
                    tracing::warn!("{} {} not found, removing from state", R::TYPE_NAME, id);
                    return Response::removed();
                }
                Err(err) => {
                    errors::client_error(&mut diags, Verb::Read, R::TYPE_NAME, &err);
                    return unchanged(diags);
                }
            };

        let Some(read) = self.settle(response, state, Verb::Read, &mut diags) else {
            return unchanged(diags);
        };
        tracing::trace!("read {}: {}", R::TYPE_NAME, id);
        Response::set(read)
    }

    pub async fn update(&self, plan: &R, prior: &R, cancel: &CancellationToken) -> Response<R> {
        let mut diags = Diagnostics::new();
        let Some(transport) = self.transport(&mut diags) else {
            return unchanged(diags);
        };

        // id is computed; the plan carries it unknown and the state has it
        let id = match plan.id().clone().or_prior(prior.id()) {
            Attr::Known(id) => Some(id),
            _ => prior.id().as_known().copied(),
        };
        let Some(id) = id else {
            diags.add_error(
                errors::MISSING_IDENTIFIER,
                format!("{} has no id in plan or state.", R::TYPE_NAME),
            );
            return unchanged(diags);
        };

        let body = narrow("id", id).and_then(|wire_id| {
            let mut body = plan.to_request()?;
            if let Some(obj) = body.as_object_mut() {
                obj.insert("id".to_string(), Value::from(wire_id));
            }
            Ok(body)
        });
        let body = match body {
            Ok(body) => body,
            Err(err) => {
                errors::conversion_error(&mut diags, Verb::Update, R::TYPE_NAME, &err);
                return unchanged(diags);
            }
        };
        self.log_state("updating", plan);

        let request = ApiRequest::put(Self::item_path(id), body);
        let response = match send_cancellable(transport, request, cancel).await {
            Ok(response) => response,
            Err(err) => {
                errors::client_error(&mut diags, Verb::Update, R::TYPE_NAME, &err);
                return unchanged(diags);
            }
        };

        let Some(updated) = self.settle(response, plan, Verb::Update, &mut diags) else {
            return unchanged(diags);
        };
        tracing::trace!("updated {}: {}", R::TYPE_NAME, id);
        Response::set(updated)
    }

    pub async fn delete(&self, state: &R, cancel: &CancellationToken) -> Response<R> {
        let mut diags = Diagnostics::new();
        let Some(transport) = self.transport(&mut diags) else {
            return unchanged(diags);
        };
        let Some(id) = Self::state_id(state, &mut diags) else {
            return unchanged(diags);
        };

        let request = ApiRequest::delete(Self::item_path(id));
        if let Err(err) = send_cancellable(transport, request, cancel).await {
            errors::client_error(&mut diags, Verb::Delete, R::TYPE_NAME, &err);
            return unchanged(diags);
        }
        tracing::trace!("deleted {}: {}", R::TYPE_NAME, id);
        Response::removed()
    }

    /// Seed state with only the id; the following read fills the rest
    pub fn import(&self, raw_id: &str) -> Response<R> {
        let mut diags = Diagnostics::new();
        match errors::parse_import_id(raw_id, &mut diags) {
            Some(id) => {
                tracing::trace!("imported {}: {}", R::TYPE_NAME, id);
                Response::set(R::with_id(id))
            }
            None => unchanged(diags),
        }
    }
}

fn unchanged<R>(diagnostics: Diagnostics) -> Response<R> {
    let mut response = Response::unchanged();
    response.diagnostics = diagnostics;
    response
}
