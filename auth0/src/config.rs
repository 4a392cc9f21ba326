//! Client configuration.
//!
//! A [`ClientConfig`] is a plain value: build it explicitly, or read it from
//! the environment with [`ClientConfig::from_env`].
//!
//! ## Environment
//!
//! - `AUTH0_URL` (required): tenant base URL, e.g. `https://tenant.eu.auth0.com`
//! - `AUTH0_TOKEN` (required): Management API access token
//! - `AUTH0_DEFAULT_CONNECTION` (optional): connection used when a request
//!   does not name one

use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

/// Environment variable holding the tenant base URL.
pub const ENV_URL: &str = "AUTH0_URL";
/// Environment variable holding the Management API token.
pub const ENV_TOKEN: &str = "AUTH0_TOKEN";
/// Environment variable holding the default connection name.
pub const ENV_DEFAULT_CONNECTION: &str = "AUTH0_DEFAULT_CONNECTION";

/// Configuration for an [`ApiClient`](crate::ApiClient).
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Tenant base URL.
    pub base_url: String,
    /// Management API bearer token.
    pub token: String,
    /// Connection substituted when a request leaves it empty.
    pub default_connection: Option<String>,
    /// Per-request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create configuration with explicit values.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            default_connection: None,
            timeout: None,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::MissingEnv`] if `AUTH0_URL` or `AUTH0_TOKEN` is
    /// unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |var: &'static str| lookup(var).filter(|value| !value.trim().is_empty());

        let base_url = read(ENV_URL).ok_or(ConfigError::MissingEnv { var: ENV_URL })?;
        let token = read(ENV_TOKEN).ok_or(ConfigError::MissingEnv { var: ENV_TOKEN })?;

        Ok(Self {
            base_url,
            token,
            default_connection: read(ENV_DEFAULT_CONNECTION),
            timeout: None,
        })
    }

    /// Set the connection used when a request does not name one.
    #[must_use]
    pub fn with_default_connection(mut self, connection: impl Into<String>) -> Self {
        self.default_connection = Some(connection.into());
        self
    }

    /// Set a per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("default_connection", &self.default_connection)
            .field("timeout", &self.timeout)
            .finish()
    }
}
