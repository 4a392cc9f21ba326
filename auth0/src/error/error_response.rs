//! Error payload returned by the Management API.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The structured error body the remote service sends with a non-success
/// status.
///
/// Only `statusCode` and `message` are guaranteed; Auth0 usually adds the
/// reason phrase as `error` and a machine-readable `errorCode`.
///
/// ## Examples
///
/// ```rust
/// use auth0::ErrorResponse;
///
/// let body = r#"{"statusCode":400,"error":"Bad Request","message":"The user already exists"}"#;
/// let err: ErrorResponse = serde_json::from_str(body).unwrap();
/// assert_eq!(err.to_string(), "error code 400: The user already exists");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("error code {status_code}: {message}")]
pub struct ErrorResponse {
    /// Status code as reported in the payload.
    #[serde(rename = "statusCode", default)]
    pub status_code: u16,

    /// Human-readable description of the failure.
    #[serde(default)]
    pub message: String,

    /// HTTP reason phrase, e.g. `"Bad Request"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Machine-readable error code, e.g. `"auth0_idp_error"`.
    #[serde(rename = "errorCode", default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl ErrorResponse {
    /// Creates an error payload from a status code and message.
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            error: None,
            error_code: None,
        }
    }

    /// Returns `true` if the remote service rejected the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status_code, 401 | 403)
    }

    /// Returns `true` for 4xx statuses.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_payload() {
        let body = r#"{
            "statusCode": 400,
            "error": "Bad Request",
            "message": "The user already exists",
            "errorCode": "auth0_idp_error"
        }"#;
        let err: ErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(err.status_code, 400);
        assert_eq!(err.message, "The user already exists");
        assert_eq!(err.error.as_deref(), Some("Bad Request"));
        assert_eq!(err.error_code.as_deref(), Some("auth0_idp_error"));
    }

    #[test]
    fn test_deserialize_minimal_payload() {
        let err: ErrorResponse =
            serde_json::from_str(r#"{"statusCode":404,"message":"Not Found"}"#).unwrap();
        assert_eq!(err, ErrorResponse::new(404, "Not Found"));
    }

    #[test]
    fn test_serialize_skips_absent_optionals() {
        let json = serde_json::to_value(ErrorResponse::new(429, "Too Many Requests")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"statusCode": 429, "message": "Too Many Requests"})
        );
    }

    #[test]
    fn test_display() {
        let err = ErrorResponse::new(401, "Invalid token");
        assert_eq!(err.to_string(), "error code 401: Invalid token");
    }

    #[test]
    fn test_classification() {
        assert!(ErrorResponse::new(401, "").is_unauthorized());
        assert!(ErrorResponse::new(403, "").is_unauthorized());
        assert!(!ErrorResponse::new(400, "").is_unauthorized());
        assert!(ErrorResponse::new(409, "").is_client_error());
        assert!(!ErrorResponse::new(503, "").is_client_error());
    }
}
