//! Response handling module.
//!
//! Success bodies are parsed through a [`ResponseFormat`]; error bodies are
//! parsed into an [`ErrorResponse`](crate::ErrorResponse) by
//! [`remote_error`].

mod format;

pub use format::{EmptyFormat, JsonFormat, ResponseFormat};

use crate::error::{ApiError, ErrorResponse, ValidationError};

/// Converts a non-success response body into an [`ApiError`].
///
/// A body that is not an error payload yields
/// [`ValidationError::MalformedErrorResponse`]. When the payload omits its
/// `statusCode`, the HTTP status is filled in.
pub fn remote_error(status: u16, body: &[u8]) -> ApiError {
    match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(mut payload) => {
            if payload.status_code == 0 {
                payload.status_code = status;
            }
            ApiError::Remote(payload)
        }
        Err(source) => ValidationError::MalformedErrorResponse {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
            source,
        }
        .into(),
    }
}
