//! HTTP client and request construction errors.

use thiserror::Error;

/// Errors from the HTTP client layer.
///
/// These cover network-level failures and requests that could not be
/// assembled in the first place.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed due to a network or protocol error.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The request body could not be serialized to JSON.
    #[error("Failed to serialize request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// A header name or value was rejected.
    #[error("Invalid header {name}: {message}")]
    InvalidHeader {
        /// The header name.
        name: String,
        /// Why the header was rejected.
        message: String,
    },

    /// An endpoint path parameter was not given a value.
    #[error("Endpoint {endpoint} is missing path parameter {param}")]
    MissingPathParam {
        /// The endpoint being executed.
        endpoint: &'static str,
        /// The placeholder left without a value.
        param: &'static str,
    },
}

impl ClientError {
    /// Returns `true` if the request exceeded the configured timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Request(e) if e.is_timeout())
    }

    /// Returns `true` if the connection to the server could not be made.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Request(e) if e.is_connect())
    }

    /// Returns the HTTP status code attached to the underlying error, if any.
    ///
    /// Transport failures never carry one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
