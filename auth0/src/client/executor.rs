//! Request execution with tracing instrumentation.
//!
//! This module provides the [`ApiClient`] handle: the dispatch primitive
//! ([`ApiClient::send`]) and status translation ([`ApiClient::execute`]).

use std::fmt;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use tracing::{debug, info, instrument, warn, Span};
use url::Url;

use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::{ApiError, ClientError, ConfigError, ValidationError};
use crate::method::RestMethod;
use crate::response::{self, ResponseFormat};

/// Content type sent with every request body.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Builder for configuring an [`ApiClient`].
pub struct ApiClientBuilder {
    base_url: String,
    token: String,
    default_connection: String,
    timeout: Option<Duration>,
    default_headers: HeaderMap,
}

impl ApiClientBuilder {
    fn new(base_url: String, token: String) -> Self {
        Self {
            base_url,
            token,
            default_connection: String::new(),
            timeout: None,
            default_headers: HeaderMap::new(),
        }
    }

    /// Sets the connection substituted when a request leaves it empty.
    pub fn default_connection(mut self, connection: impl Into<String>) -> Self {
        self.default_connection = connection.into();
        self
    }

    /// Sets a per-request timeout. Requests are unbounded by default.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// use std::time::Duration;
    ///
    /// let client = ApiClient::builder(base_url, token)
    ///     .timeout(Duration::from_secs(10))
    ///     .build()?;
    /// ```
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds a default header to all requests.
    ///
    /// ## Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ApiError> {
        let invalid = |message: String| ClientError::InvalidHeader {
            name: name.as_ref().to_string(),
            message,
        };
        let header_name =
            HeaderName::try_from(name.as_ref()).map_err(|e| invalid(e.to_string()))?;
        let header_value =
            HeaderValue::try_from(value.as_ref()).map_err(|e| invalid(e.to_string()))?;
        self.default_headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Builds the [`ApiClient`].
    ///
    /// ## Errors
    ///
    /// Returns a [`ConfigError`] if the base URL or token is empty, the base
    /// URL does not parse, its scheme is not `http`/`https`, or it carries a
    /// query string or fragment. Returns a
    /// [`ClientError`] if the token cannot be used as a header value or the
    /// HTTP client cannot be constructed.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::missing_field("base_url").into());
        }
        if self.token.is_empty() {
            return Err(ConfigError::missing_field("token").into());
        }

        let base_url = Url::parse(base_url).map_err(ConfigError::InvalidUrl)?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme {
                scheme: base_url.scheme().to_string(),
            }
            .into());
        }
        if base_url.query().is_some() || base_url.fragment().is_some() {
            return Err(ConfigError::BaseUrlHasQuery {
                url: base_url.to_string(),
            }
            .into());
        }

        let mut authorization = HeaderValue::try_from(format!("Bearer {}", self.token))
            .map_err(|e| ClientError::InvalidHeader {
                name: AUTHORIZATION.to_string(),
                message: e.to_string(),
            })?;
        authorization.set_sensitive(true);

        // No idle connections are kept: each call gets its own connection.
        let mut builder = reqwest::Client::builder()
            .default_headers(self.default_headers)
            .pool_max_idle_per_host(0);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ClientError::Request)?;

        Ok(ApiClient {
            client,
            base_url,
            authorization,
            default_connection: self.default_connection,
        })
    }
}

/// Handle for the Management API.
///
/// Holds the base URL, bearer token and default connection. The handle is
/// immutable once built and cheap to clone; every call is independent.
///
/// ## Examples
///
/// ```rust,ignore
/// use auth0::{ApiClient, CreateUserRequest};
///
/// let client = ApiClient::builder("https://tenant.auth0.com", token)
///     .default_connection("Username-Password-Authentication")
///     .build()?;
///
/// let created = client
///     .create_user(CreateUserRequest::new("jane@example.com", "hunter2!"))
///     .await?;
/// ```
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
    authorization: HeaderValue,
    default_connection: String,
}

impl ApiClient {
    /// Creates a new builder for configuring an API client.
    ///
    /// ## Arguments
    ///
    /// * `base_url` - The tenant URL all endpoint paths are appended to.
    /// * `token` - The Management API bearer token.
    pub fn builder(base_url: impl Into<String>, token: impl Into<String>) -> ApiClientBuilder {
        ApiClientBuilder::new(base_url.into(), token.into())
    }

    /// Creates a client from a [`ClientConfig`].
    ///
    /// ## Errors
    ///
    /// Same as [`ApiClientBuilder::build`].
    pub fn from_config(config: ClientConfig) -> Result<Self, ApiError> {
        let mut builder = Self::builder(config.base_url, config.token);
        if let Some(connection) = config.default_connection {
            builder = builder.default_connection(connection);
        }
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    /// Returns the base URL for this client.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the connection substituted when a request leaves it empty.
    pub fn default_connection(&self) -> &str {
        &self.default_connection
    }

    /// Joins the base URL and an endpoint path.
    ///
    /// The path is appended to the base URL as-is, so a base URL with a path
    /// prefix keeps it.
    fn endpoint_url(&self, path: &str) -> Result<Url, ApiError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let joined = if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        };
        Url::parse(&joined).map_err(|e| ConfigError::InvalidUrl(e).into())
    }

    /// Sends a JSON body to `base_url + path` and returns the raw response.
    ///
    /// Every request carries `Authorization: Bearer <token>` and
    /// `Content-Type: application/json; charset=utf-8`. The status code is
    /// not inspected.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - The body cannot be serialized ([`ClientError::Serialization`])
    /// - The path does not form a valid URL
    /// - The request fails in transit ([`ClientError::Request`])
    #[instrument(
        name = "api_request",
        skip(self, body),
        fields(
            http.method = %method,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn send<B>(
        &self,
        method: RestMethod,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let payload = serde_json::to_vec(body).map_err(ClientError::Serialization)?;
        let url = self.endpoint_url(path)?;
        Span::current().record("http.url", url.as_str());

        debug!(body_bytes = payload.len(), "Dispatching request");

        let result = self
            .client
            .request(method.to_reqwest(), url)
            .header(AUTHORIZATION, self.authorization.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))
            .body(payload)
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                Span::current().record("otel.status_code", "ERROR");
                warn!(error = %e, "Request failed");
                return Err(ClientError::Request(e).into());
            }
        };

        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());
        let otel_status = if status.is_server_error() {
            "ERROR"
        } else if status.is_success() {
            "OK"
        } else {
            "UNSET"
        };
        Span::current().record("otel.status_code", otel_status);

        Ok(response)
    }

    /// Executes an endpoint and translates the response.
    ///
    /// Path parameters are substituted into the endpoint's template, the body
    /// is sent with [`send`](Self::send), and the response is accepted only if
    /// its status equals the endpoint's success status. Any other status is
    /// read as an [`ErrorResponse`](crate::ErrorResponse).
    ///
    /// Once the status matches the call succeeds; the body is handed to the
    /// endpoint's [`ResponseFormat`] as-is, and a body that cannot be read
    /// is treated as empty.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - A path parameter of the endpoint has no value in `params`
    ///   ([`ClientError::MissingPathParam`])
    /// - The request cannot be sent (see [`send`](Self::send))
    /// - The server answers with any other status ([`ApiError::Remote`])
    /// - An error body is not an error payload
    ///   ([`ValidationError::MalformedErrorResponse`])
    #[instrument(
        name = "api_operation",
        skip_all,
        fields(endpoint = endpoint.id())
    )]
    pub async fn execute<F, B>(
        &self,
        endpoint: &Endpoint<F>,
        params: &[(&str, &str)],
        body: &B,
    ) -> Result<F::Output, ApiError>
    where
        F: ResponseFormat,
        B: Serialize + ?Sized,
    {
        if let Some(param) = endpoint
            .path_params()
            .into_iter()
            .find(|name| !params.iter().any(|(key, _)| key == name))
        {
            return Err(ClientError::MissingPathParam {
                endpoint: endpoint.id(),
                param,
            }
            .into());
        }

        let path = endpoint.substitute_params(params);
        let response = self.send(endpoint.method(), &path, body).await?;
        let status = response.status().as_u16();

        if status != endpoint.success_status() {
            let body = response
                .bytes()
                .await
                .map_err(|source| ValidationError::UnreadableErrorBody { status, source })?;
            let err = response::remote_error(status, &body);
            warn!(status, error = %err, "API returned error");
            return Err(err);
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                warn!(status, error = %e, "Success body could not be read");
                bytes::Bytes::new()
            }
        };
        let parsed = F::parse(body);

        info!(status, "Request completed");
        Ok(parsed)
    }
}

impl fmt::Debug for ApiClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClientBuilder")
            .field("base_url", &self.base_url)
            .field("default_connection", &self.default_connection)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("default_connection", &self.default_connection)
            .finish_non_exhaustive()
    }
}
