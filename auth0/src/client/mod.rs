//! HTTP client module.
//!
//! This module provides the [`ApiClient`] handle for executing Management API
//! requests with bearer authentication and tracing instrumentation.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use auth0::{ApiClient, RestMethod};
//!
//! let client = ApiClient::builder("https://tenant.auth0.com", "token")
//!     .default_connection("Username-Password-Authentication")
//!     .build()?;
//!
//! // Raw dispatch: the caller inspects the response
//! let response = client
//!     .send(RestMethod::Post, "/api/v2/tickets/password-change", &body)
//!     .await?;
//! ```

mod executor;

pub use executor::{ApiClient, ApiClientBuilder, JSON_CONTENT_TYPE};
