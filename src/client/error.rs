//! API error type

use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by a [`Transport`](super::Transport)
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("{path} returned {status}")]
    Status {
        status: StatusCode,
        path: String,
        body: String,
    },

    #[error("failed to decode response from {path}: {message}")]
    Decode { path: String, message: String },

    #[error("invalid url: {0}")]
    Url(String),

    #[error("request cancelled")]
    Cancelled,
}

/// Result type for API calls
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// 401 and 403 both mean the api key was rejected
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN)
        )
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }

    /// Response body, for errors that carry one
    pub fn details(&self) -> Option<&str> {
        match self {
            ApiError::Status { body, .. } if !body.is_empty() => Some(body),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> ApiError {
        ApiError::Status {
            status: StatusCode::from_u16(code).unwrap(),
            path: "/api/v3/tag/1".to_string(),
            body: String::new(),
        }
    }

    #[test]
    fn test_classification() {
        assert!(status(404).is_not_found());
        assert!(status(401).is_unauthorized());
        assert!(status(403).is_unauthorized());
        assert!(!status(500).is_unauthorized());
        assert!(!ApiError::Transport("connection refused".into()).is_not_found());
        assert!(ApiError::Cancelled.is_cancelled());
    }

    #[test]
    fn test_display() {
        assert_eq!(status(401).to_string(), "/api/v3/tag/1 returned 401 Unauthorized");
        assert_eq!(status(401).details(), None);
    }
}
