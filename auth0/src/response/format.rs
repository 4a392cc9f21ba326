//! Response format trait and implementations.
//!
//! The [`ResponseFormat`] trait defines how a successful response body is
//! turned into a typed value. A format only runs once the status code has
//! already matched, so parsing never turns a success into an error.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use tracing::warn;

/// Trait for success-body parsing strategies.
///
/// ## Examples
///
/// ```rust,ignore
/// use auth0::response::{JsonFormat, ResponseFormat};
///
/// // The format type encodes both the parsing strategy and output type
/// type UserResponse = JsonFormat<User>;
/// ```
pub trait ResponseFormat: Send + Sync {
    /// The output type after parsing.
    type Output: Send;

    /// Parse a success body into the output type.
    fn parse(body: bytes::Bytes) -> Self::Output;
}

/// JSON response format with typed deserialization.
///
/// Yields `None` when the body is empty or does not decode as `T`; the
/// request itself still counts as successful.
#[derive(Debug, Clone, Copy)]
pub struct JsonFormat<T>(PhantomData<T>);

impl<T: DeserializeOwned + Send + Sync> ResponseFormat for JsonFormat<T> {
    type Output = Option<T>;

    fn parse(body: bytes::Bytes) -> Self::Output {
        if body.is_empty() {
            return None;
        }
        match serde_json::from_slice(&body) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(error = %e, body_bytes = body.len(), "Discarding undecodable success body");
                None
            }
        }
    }
}

/// Format for endpoints whose success body carries nothing the caller needs.
///
/// The body is discarded without inspection.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyFormat;

impl ResponseFormat for EmptyFormat {
    type Output = ();

    fn parse(_body: bytes::Bytes) -> Self::Output {}
}
