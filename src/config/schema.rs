//! Configuration schema definitions
//!
//! The provider block, as read from `config.yaml` or handed over by the host.

use crate::client::ClientSettings;
use crate::host::schema::REDACTED;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Provider configuration
#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    /// Server url, including any url base (e.g. `http://localhost:7878/radarr`)
    #[serde(default = "default_url")]
    pub url: String,

    /// API key sent in `X-Api-Key`
    #[serde(default)]
    pub api_key: String,

    /// Additional headers sent with every request
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra_headers: BTreeMap<String, String>,

    /// Request timeout
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

// Default value functions
fn default_url() -> String {
    "http://localhost:7878".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            api_key: String::new(),
            extra_headers: BTreeMap::new(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("url", &self.url)
            .field("api_key", &REDACTED)
            .field("extra_headers", &self.extra_headers.keys().collect::<Vec<_>>())
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl ProviderConfig {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            url: self.url.clone(),
            api_key: self.api_key.clone(),
            extra_headers: self.extra_headers.clone(),
            timeout: Some(Duration::from_secs(self.timeout_seconds)),
        }
    }

    /// Copy with the api key replaced, for printing
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if !config.api_key.is_empty() {
            config.api_key = REDACTED.to_string();
        }
        config
    }
}
