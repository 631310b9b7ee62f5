//! Provider entry point
//!
//! Configuring the provider builds one HTTP client; every resource receives
//! it as [`ProviderData`] through its `configure` call and shares it
//! read-only from then on.

use crate::client::{RadarrClient, Transport};
use crate::config::ProviderConfig;
use crate::host::{AttributeBuilder, AttributeType, Diagnostics, Schema};
use crate::resources::{self, DynResource};
use std::any::Any;
use std::sync::Arc;

/// Handle passed from the provider to every resource
#[derive(Clone)]
pub struct ProviderData {
    pub transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ProviderData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderData").finish_non_exhaustive()
    }
}

/// The Radarr provider
#[derive(Debug, Default)]
pub struct RadarrProvider {
    data: Option<Arc<ProviderData>>,
}

impl RadarrProvider {
    pub const TYPE_NAME: &'static str = "radarr";

    pub fn new() -> Self {
        Self::default()
    }

    /// Provider backed by an existing transport
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            data: Some(Arc::new(ProviderData { transport })),
        }
    }

    /// Schema of the provider block
    pub fn schema() -> Schema {
        Schema::builder()
            .description("Interact with Radarr.")
            .attribute(
                AttributeBuilder::new("url", AttributeType::String)
                    .description("Full Radarr URL with protocol and port (e.g. `https://test.radarr.tv:7878`).")
                    .required()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("api_key", AttributeType::String)
                    .description("API key for Radarr authentication.")
                    .required()
                    .sensitive()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("extra_headers", AttributeType::MapOfString)
                    .description("Extra headers sent with every request.")
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("timeout_seconds", AttributeType::Int64)
                    .description("Request timeout in seconds.")
                    .between(1, 3600)
                    .build(),
            )
            .build()
    }

    /// Build the shared client from the provider block
    pub fn configure(&mut self, config: &ProviderConfig, diags: &mut Diagnostics) {
        if config.url.trim().is_empty() {
            diags.add_error(
                "Missing Radarr URL",
                "The provider cannot create the Radarr API client as there is a missing or empty value for the Radarr URL.",
            );
        }
        if config.api_key.trim().is_empty() {
            diags.add_error(
                "Missing Radarr API Key",
                "The provider cannot create the Radarr API client as there is a missing or empty value for the Radarr API key.",
            );
        }
        if diags.has_error() {
            return;
        }

        match RadarrClient::new(&config.client_settings()) {
            Ok(client) => {
                tracing::info!("configured provider for {}", client.base_url());
                self.data = Some(Arc::new(ProviderData {
                    transport: Arc::new(client),
                }));
            }
            Err(err) => diags.add_error(
                "Unable to Create Radarr API Client",
                format!("An unexpected error occurred when creating the Radarr API client: {}", err),
            ),
        }
    }

    /// Data handed to resource `configure` calls
    pub fn provider_data(&self) -> Option<Arc<dyn Any + Send + Sync>> {
        self.data
            .clone()
            .map(|data| data as Arc<dyn Any + Send + Sync>)
    }

    /// Every resource type, configured with this provider's client
    pub fn resources(&self, diags: &mut Diagnostics) -> Vec<Box<dyn DynResource>> {
        let mut all = resources::all();
        for resource in all.iter_mut() {
            resource.configure(self.provider_data(), diags);
        }
        all
    }

    /// One configured resource type
    pub fn resource(&self, type_name: &str, diags: &mut Diagnostics) -> Option<Box<dyn DynResource>> {
        let mut resource = resources::find(type_name)?;
        resource.configure(self.provider_data(), diags);
        Some(resource)
    }

    pub fn transport(&self) -> Option<Arc<dyn Transport>> {
        self.data.as_ref().map(|data| data.transport.clone())
    }
}
