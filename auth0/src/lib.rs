//! Typed client for the Auth0 Management API v2.
//!
//! The crate covers the user lifecycle calls an application backend needs:
//! creating users, updating them, and triggering verification emails. Each
//! call serializes a typed request, sends it with bearer authentication, and
//! translates the response into a typed value or a structured [`ApiError`].
//!
//! ## Features
//!
//! - **Explicit handle**: [`ApiClient`] holds the base URL, token and default
//!   connection; there is no process-wide state
//! - **Exact status contracts**: each [`Endpoint`] declares the one status
//!   that counts as success, and a matching status is never undone by an
//!   unexpected body
//! - **Structured errors**: every failure exposes `status_code()` and
//!   `message()`, and malformed error bodies are errors rather than panics
//! - **Tracing**: requests run inside `api_request` spans with OpenTelemetry
//!   style HTTP fields
//!
//! ## Example
//!
//! ```rust,ignore
//! use auth0::{ApiClient, ClientConfig, CreateUserRequest, UpdateUserRequest};
//!
//! let client = ApiClient::from_config(ClientConfig::from_env()?)?;
//!
//! // The status code alone decides success; the record comes back when the
//! // response body decodes.
//! if let Some(user) = client
//!     .create_user(CreateUserRequest::new("jane@example.com", "hunter2!"))
//!     .await?
//! {
//!     client
//!         .update_user(UpdateUserRequest::new(&user.user_id).with_email("jane@example.org"))
//!         .await?;
//!
//!     client.send_verification_email(&user.user_id).await?;
//! }
//! ```

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod method;
pub mod response;
pub mod users;

// Re-exports for convenience
pub use client::{ApiClient, ApiClientBuilder};
pub use config::ClientConfig;
pub use endpoint::Endpoint;
pub use error::{ApiError, ClientError, ConfigError, ErrorResponse, ValidationError};
pub use method::RestMethod;
pub use response::ResponseFormat;
pub use users::{
    CreateUserRequest, Identity, SendVerificationEmailRequest, UpdateUserRequest, User,
    UserCreator,
};
