//! Radarr API client
//!
//! [`Transport`] is the seam between resources and the network: resources
//! only build [`ApiRequest`]s and read JSON back. [`RadarrClient`] is the
//! reqwest implementation; unit tests mock the trait.

mod error;
mod http;

pub use error::{ApiError, ApiResult};
pub use http::{API_KEY_HEADER, ClientSettings, RadarrClient};

use async_trait::async_trait;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

/// HTTP method of an API call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// One API call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the server root, e.g. `/api/v3/tag/1`
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Put,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            body: None,
        }
    }
}

/// Sends API requests
///
/// Implementations return the decoded JSON body, or `Value::Null` for an
/// empty body.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> ApiResult<Value>;
}

/// Send a request, giving up as soon as `cancel` fires
pub async fn send_cancellable(
    transport: &dyn Transport,
    request: ApiRequest,
    cancel: &CancellationToken,
) -> ApiResult<Value> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ApiError::Cancelled),
        result = transport.send(request) => result,
    }
}
