//! Diagnostics shared by every resource

use crate::client::ApiError;
use crate::fields::ConversionError;
use crate::host::Diagnostics;

pub const CLIENT_ERROR: &str = "Client Error";
pub const UNEXPECTED_IMPORT_IDENTIFIER: &str = "Unexpected Import Identifier";
pub const UNEXPECTED_CONFIGURE_TYPE: &str = "Unexpected Resource Configure Type";
pub const INVALID_ATTRIBUTE_VALUE: &str = "Invalid Attribute Value";
pub const MISSING_IDENTIFIER: &str = "Missing Resource Identifier";
pub const UNCONFIGURED: &str = "Unconfigured Client";

/// Lifecycle step a failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Create,
    Read,
    Update,
    Delete,
    List,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Create => "create",
            Verb::Read => "read",
            Verb::Update => "update",
            Verb::Delete => "delete",
            Verb::List => "list",
        }
    }
}

/// Report an API failure as `Client Error`
///
/// Cancellation is not an error: nothing is reported.
pub fn client_error(diags: &mut Diagnostics, verb: Verb, type_name: &str, err: &ApiError) {
    if err.is_cancelled() {
        return;
    }
    let mut detail = format!(
        "Unable to {} {}, got error: {}",
        verb.as_str(),
        type_name,
        err
    );
    if err.is_unauthorized() {
        detail.push_str("\nThe server rejected the api key.");
    }
    if let Some(body) = err.details() {
        detail.push_str("\nDetails:\n");
        detail.push_str(body);
    }
    diags.add_error(CLIENT_ERROR, detail);
}

/// Report a failed conversion between a typed view and the wire
pub fn conversion_error(
    diags: &mut Diagnostics,
    verb: Verb,
    type_name: &str,
    err: &ConversionError,
) {
    match err {
        ConversionError::IntegerOutOfRange { .. }
        | ConversionError::NotAnInteger { .. }
        | ConversionError::MissingAttribute(_) => {
            diags.add_error(INVALID_ATTRIBUTE_VALUE, err.to_string());
        }
        ConversionError::Encode(_) | ConversionError::Decode(_) => {
            diags.add_error(
                CLIENT_ERROR,
                format!("Unable to {} {}, got error: {}", verb.as_str(), type_name, err),
            );
        }
    }
}

/// Parse an import identifier: a decimal integer
pub fn parse_import_id(raw: &str, diags: &mut Diagnostics) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(id) => Some(id),
        Err(_) => {
            diags.add_error(
                UNEXPECTED_IMPORT_IDENTIFIER,
                format!("Expected import identifier with format: ID. Got: {:?}", raw),
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_parse_import_id() {
        let mut diags = Diagnostics::new();
        assert_eq!(parse_import_id("42", &mut diags), Some(42));
        assert!(diags.is_empty());

        assert_eq!(parse_import_id("abc", &mut diags), None);
        assert_eq!(diags.len(), 1);
        let d = diags.iter().next().unwrap();
        assert_eq!(d.summary, UNEXPECTED_IMPORT_IDENTIFIER);
        assert!(d.detail.contains("\"abc\""));
    }

    #[test]
    fn test_client_error_detail() {
        let mut diags = Diagnostics::new();
        let err = ApiError::Status {
            status: StatusCode::UNAUTHORIZED,
            path: "/api/v3/downloadclient".into(),
            body: "Unauthorized".into(),
        };
        client_error(&mut diags, Verb::Create, "download_client_transmission", &err);
        let d = diags.iter().next().unwrap();
        assert_eq!(d.summary, CLIENT_ERROR);
        assert!(
            d.detail
                .starts_with("Unable to create download_client_transmission, got error:")
        );
        assert!(d.detail.contains("api key"));
    }

    #[test]
    fn test_cancelled_is_silent() {
        let mut diags = Diagnostics::new();
        client_error(&mut diags, Verb::Read, "tag", &ApiError::Cancelled);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_out_of_range_is_invalid_value() {
        let mut diags = Diagnostics::new();
        let err = ConversionError::IntegerOutOfRange {
            attribute: "port".into(),
            value: 1 << 40,
        };
        conversion_error(&mut diags, Verb::Create, "download_client_transmission", &err);
        assert_eq!(diags.iter().next().unwrap().summary, INVALID_ATTRIBUTE_VALUE);
    }
}
