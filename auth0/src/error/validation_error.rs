//! Error-response reading and parsing errors.

use thiserror::Error;

/// Errors raised while reading the body of a non-success response.
///
/// Both variants keep the HTTP status, so callers can still branch on it
/// when the payload itself is unusable.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A non-success response carried a body that is not an error payload.
    #[error("Malformed error response (HTTP {status}): {source}")]
    MalformedErrorResponse {
        /// HTTP status of the response.
        status: u16,
        /// The raw body, lossily decoded as UTF-8.
        body: String,
        /// The parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// The body of a non-success response could not be read.
    #[error("Unreadable error response (HTTP {status}): {source}")]
    UnreadableErrorBody {
        /// HTTP status of the response.
        status: u16,
        /// The read failure.
        #[source]
        source: reqwest::Error,
    },
}

impl ValidationError {
    /// Returns the HTTP status of the response that failed to read or parse.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MalformedErrorResponse { status, .. }
            | Self::UnreadableErrorBody { status, .. } => *status,
        }
    }
}
