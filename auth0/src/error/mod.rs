//! Layered error types for the Management API client.
//!
//! The error hierarchy is structured for actionable diagnostics:
//! - [`ApiError`] - Top-level error type for all client operations
//! - [`ClientError`] - Transport failures and request construction errors
//! - [`ValidationError`] - Response bodies that could not be read or parsed
//! - [`ConfigError`] - Client configuration errors
//! - [`ErrorResponse`] - The error payload returned by the remote service

mod api_error;
mod client_error;
mod config_error;
mod error_response;
mod validation_error;

pub use api_error::ApiError;
pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use error_response::ErrorResponse;
pub use validation_error::ValidationError;
