//! Top-level API error type.

use super::{ClientError, ConfigError, ErrorResponse, ValidationError};
use thiserror::Error;

/// Top-level error type for all client operations.
///
/// Every variant can be reduced to the structured pair callers usually
/// want: [`status_code`](Self::status_code) and [`message`](Self::message).
///
/// ## Examples
///
/// ```rust,ignore
/// use auth0::ApiError;
///
/// match client.create_user(request).await {
///     Ok(Some(user)) => println!("created {}", user.user_id),
///     Ok(None) => println!("created"),
///     Err(ApiError::Remote(e)) if e.status_code == 409 => println!("exists"),
///     Err(e) => eprintln!("{:?}: {}", e.status_code(), e.message()),
/// }
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failures and request construction errors.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Response bodies that could not be read or parsed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Client configuration errors.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The remote service answered with an error payload.
    #[error(transparent)]
    Remote(#[from] ErrorResponse),
}

impl ApiError {
    /// Returns the HTTP status code associated with this error.
    ///
    /// `None` for transport, serialization and configuration failures.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Remote(e) => Some(e.status_code),
            Self::Validation(e) => Some(e.status_code()),
            Self::Client(e) => e.status_code(),
            Self::Config(_) => None,
        }
    }

    /// Returns the error message.
    ///
    /// For remote errors this is the message from the payload; otherwise it
    /// is the display text of the underlying error.
    pub fn message(&self) -> String {
        match self {
            Self::Remote(e) => e.message.clone(),
            other => other.to_string(),
        }
    }

    /// Returns the remote error payload, if the service sent one.
    pub fn remote(&self) -> Option<&ErrorResponse> {
        match self {
            Self::Remote(e) => Some(e),
            _ => None,
        }
    }
}
