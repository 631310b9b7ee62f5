//! reqwest transport

use super::{ApiError, ApiRequest, ApiResult, Method, Transport};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Header carrying the api key (`X-Api-Key`)
pub const API_KEY_HEADER: &str = "x-api-key";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`RadarrClient`]
#[derive(Clone, Default)]
pub struct ClientSettings {
    pub url: String,
    pub api_key: String,
    pub extra_headers: BTreeMap<String, String>,
    pub timeout: Option<Duration>,
}

impl fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSettings")
            .field("url", &self.url)
            .field("api_key", &crate::host::schema::REDACTED)
            .field("extra_headers", &self.extra_headers.keys().collect::<Vec<_>>())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// HTTP transport talking to one Radarr server
pub struct RadarrClient {
    client: reqwest::Client,
    base: Url,
}

impl fmt::Debug for RadarrClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadarrClient")
            .field("base", &self.base.as_str())
            .finish_non_exhaustive()
    }
}

impl RadarrClient {
    pub fn new(settings: &ClientSettings) -> ApiResult<Self> {
        let base = parse_base(&settings.url)?;

        let mut headers = HeaderMap::new();
        let mut api_key = HeaderValue::from_str(&settings.api_key)
            .map_err(|_| ApiError::Transport("api key is not a valid header value".into()))?;
        api_key.set_sensitive(true);
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);

        for (name, value) in &settings.extra_headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::Transport(format!("invalid header name {:?}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ApiError::Transport(format!("invalid value for header {}: {}", name, e)))?;
            headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()?;

        tracing::debug!("Created Radarr client for: {}", base);

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Url(format!("{}: {}", path, e)))
    }
}

/// Parse the server url, keeping any path prefix joinable
fn parse_base(raw: &str) -> ApiResult<Url> {
    let mut base = Url::parse(raw).map_err(|e| ApiError::Url(format!("{}: {}", raw, e)))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(ApiError::Url(format!("{}: scheme must be http or https", raw)));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

#[async_trait]
impl Transport for RadarrClient {
    async fn send(&self, request: ApiRequest) -> ApiResult<Value> {
        let url = self.endpoint(&request.path)?;
        tracing::debug!("{} {}", request.method.as_str(), url);

        let builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
            Method::Delete => self.client.delete(url),
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let resp = builder.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                path: request.path,
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Decode {
            path: request.path,
            message: e.to_string(),
        })
    }
}
