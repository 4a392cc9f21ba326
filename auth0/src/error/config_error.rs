//! Client configuration errors.

use thiserror::Error;

/// Errors in client configuration.
///
/// These are raised while building an [`ApiClient`](crate::ApiClient), so a
/// misconfigured client never reaches the network.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A required configuration field is missing or empty.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A required environment variable is unset or empty.
    #[error("Missing environment variable: {var}")]
    MissingEnv {
        /// The variable that was read.
        var: &'static str,
    },

    /// The base URL uses a scheme other than `http` or `https`.
    #[error("Unsupported URL scheme: {scheme}")]
    UnsupportedScheme {
        /// The scheme found in the base URL.
        scheme: String,
    },

    /// The base URL carries a query string or fragment, which endpoint
    /// paths cannot be appended to.
    #[error("Base URL must not have a query or fragment: {url}")]
    BaseUrlHasQuery {
        /// The rejected base URL.
        url: String,
    },
}

impl ConfigError {
    /// Creates a missing field error.
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field() {
        let err = ConfigError::missing_field("base_url");
        assert_eq!(err.to_string(), "Missing required field: base_url");
    }

    #[test]
    fn test_invalid_url() {
        let url_err = url::Url::parse("not-a-url").unwrap_err();
        let err = ConfigError::InvalidUrl(url_err);
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_missing_env() {
        let err = ConfigError::MissingEnv { var: "AUTH0_TOKEN" };
        assert_eq!(err.to_string(), "Missing environment variable: AUTH0_TOKEN");
    }

    #[test]
    fn test_base_url_has_query() {
        let err = ConfigError::BaseUrlHasQuery {
            url: "https://tenant.auth0.com/?x=1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Base URL must not have a query or fragment: https://tenant.auth0.com/?x=1"
        );
    }
}
