//! User management operations.
//!
//! Request and response models for the `/api/v2/users` and
//! `/api/v2/jobs/post_verification_email` endpoints, and the operations on
//! [`ApiClient`] that call them.

use std::fmt;
use std::future::Future;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::client::ApiClient;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::method::RestMethod;
use crate::response::{EmptyFormat, JsonFormat};

/// `POST /api/v2/users`, success on 201.
pub const CREATE_USER: Endpoint<JsonFormat<User>> =
    Endpoint::new("create_user", RestMethod::Post, "/api/v2/users", 201);

/// `PATCH /api/v2/users/{id}`, success on 200.
pub const UPDATE_USER: Endpoint<JsonFormat<User>> =
    Endpoint::new("update_user", RestMethod::Patch, "/api/v2/users/{id}", 200);

/// `POST /api/v2/jobs/post_verification_email`, success on 201.
pub const SEND_VERIFICATION_EMAIL: Endpoint<EmptyFormat> = Endpoint::new(
    "send_verification_email",
    RestMethod::Post,
    "/api/v2/jobs/post_verification_email",
    201,
);

/// Body of a create-user call.
///
/// An empty `connection` is replaced by the client's default connection
/// before the request is sent.
///
/// ## Examples
///
/// ```rust
/// use auth0::CreateUserRequest;
/// use serde_json::json;
///
/// let request = CreateUserRequest::new("jane@example.com", "hunter2!")
///     .with_app_metadata(json!({"userId": 342}).as_object().cloned().unwrap());
///
/// let body = serde_json::to_value(&request).unwrap();
/// assert_eq!(body["connection"], "");
/// assert_eq!(body["app_metadata"]["userId"], 342);
/// ```
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub connection: String,
    pub email: String,
    pub password: String,
    pub email_verified: bool,
    pub user_metadata: Map<String, Value>,
    pub app_metadata: Map<String, Value>,
}

impl CreateUserRequest {
    /// Creates a request with empty metadata on the default connection.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_connection(mut self, connection: impl Into<String>) -> Self {
        self.connection = connection.into();
        self
    }

    #[must_use]
    pub fn with_email_verified(mut self, verified: bool) -> Self {
        self.email_verified = verified;
        self
    }

    #[must_use]
    pub fn with_user_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.user_metadata = metadata;
        self
    }

    #[must_use]
    pub fn with_app_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.app_metadata = metadata;
        self
    }
}

impl fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("connection", &self.connection)
            .field("email", &self.email)
            .field("email_verified", &self.email_verified)
            .finish_non_exhaustive()
    }
}

/// Body of an update-user call.
///
/// `id` selects the user and is placed in the path, never in the body.
/// Unset optional fields are left out of the JSON so the remote service
/// keeps their current values.
#[derive(Clone, Default, PartialEq, Serialize)]
pub struct UpdateUserRequest {
    #[serde(skip)]
    pub id: String,
    pub connection: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
}

impl UpdateUserRequest {
    /// Creates an update for the given user id that changes nothing yet.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_connection(mut self, connection: impl Into<String>) -> Self {
        self.connection = connection.into();
        self
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    #[must_use]
    pub fn with_email_verified(mut self, verified: bool) -> Self {
        self.email_verified = Some(verified);
        self
    }
}

impl fmt::Debug for UpdateUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateUserRequest")
            .field("id", &self.id)
            .field("connection", &self.connection)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("email_verified", &self.email_verified)
            .finish()
    }
}

/// Body of a send-verification-email call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendVerificationEmailRequest {
    pub user_id: String,
}

/// A user as returned by the Management API.
///
/// Every field tolerates being absent or `null`; either way it takes its
/// default value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email_verified: bool,
    pub username: Option<String>,
    pub phone_number: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub phone_verified: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub identities: Vec<Identity>,
    #[serde(deserialize_with = "null_as_default")]
    pub app_metadata: Map<String, Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub user_metadata: Map<String, Value>,
    pub picture: Option<String>,
    pub name: Option<String>,
    pub nickname: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub multifactor: Vec<String>,
    pub last_ip: Option<String>,
    pub last_login: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub logins_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub blocked: bool,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
}

/// A linked identity of a [`User`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Identity {
    #[serde(deserialize_with = "null_as_default")]
    pub connection: String,
    /// The id at the identity provider. Some social providers send it as a
    /// number; it is kept in its decimal form.
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub provider: String,
    #[serde(rename = "isSocial", deserialize_with = "null_as_default")]
    pub is_social: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(Number),
    }

    Ok(match Option::<StringOrNumber>::deserialize(deserializer)? {
        Some(StringOrNumber::String(s)) => s,
        Some(StringOrNumber::Number(n)) => n.to_string(),
        None => String::new(),
    })
}

/// Anything that can create users.
///
/// Lets callers depend on the capability instead of [`ApiClient`], e.g. to
/// substitute an in-memory fake in their own tests.
pub trait UserCreator {
    /// Creates a user, returning the stored record when the service sent
    /// one back.
    fn create_user(
        &self,
        request: CreateUserRequest,
    ) -> impl Future<Output = Result<Option<User>, ApiError>> + Send;
}

impl ApiClient {
    /// Creates a user.
    ///
    /// An empty `connection` is replaced by the client's default connection.
    /// A 201 is a success whatever its body; the stored record is returned
    /// when the body decodes as a [`User`], and `None` otherwise.
    ///
    /// ## Errors
    ///
    /// Returns [`ApiError::Remote`] for any status other than 201, e.g. 409
    /// or 400 when the user already exists, and the errors described on
    /// [`ApiClient::execute`].
    pub async fn create_user(
        &self,
        mut request: CreateUserRequest,
    ) -> Result<Option<User>, ApiError> {
        if request.connection.is_empty() {
            request.connection = self.default_connection().to_string();
        }
        debug!(connection = %request.connection, "Creating user");
        self.execute(&CREATE_USER, &[], &request).await
    }

    /// Updates the user named by `request.id`.
    ///
    /// An empty `connection` is replaced by the client's default connection.
    /// As with [`create_user`](Self::create_user), the status alone decides
    /// success and the record is returned only if it decodes.
    ///
    /// ## Errors
    ///
    /// Returns [`ApiError::Remote`] for any status other than 200, and the
    /// errors described on [`ApiClient::execute`].
    pub async fn update_user(
        &self,
        mut request: UpdateUserRequest,
    ) -> Result<Option<User>, ApiError> {
        if request.connection.is_empty() {
            request.connection = self.default_connection().to_string();
        }
        debug!(user_id = %request.id, connection = %request.connection, "Updating user");
        self.execute(&UPDATE_USER, &[("id", request.id.as_str())], &request)
            .await
    }

    /// Queues a job that sends the verification email to a user.
    ///
    /// ## Errors
    ///
    /// Returns [`ApiError::Remote`] for any status other than 201, and the
    /// errors described on [`ApiClient::execute`].
    pub async fn send_verification_email(
        &self,
        user_id: impl Into<String>,
    ) -> Result<(), ApiError> {
        let request = SendVerificationEmailRequest {
            user_id: user_id.into(),
        };
        debug!(user_id = %request.user_id, "Requesting verification email");
        self.execute(&SEND_VERIFICATION_EMAIL, &[], &request).await
    }
}

impl UserCreator for ApiClient {
    fn create_user(
        &self,
        request: CreateUserRequest,
    ) -> impl Future<Output = Result<Option<User>, ApiError>> + Send {
        ApiClient::create_user(self, request)
    }
}
