//! HTTP method types for the Management API.

use strum::Display;

/// HTTP methods used by the user endpoints.
///
/// The `Display` form is the uppercase verb and is what request spans
/// record as `http.method`.
///
/// ## Examples
///
/// ```rust
/// use auth0::RestMethod;
///
/// assert_eq!(RestMethod::Patch.to_string(), "PATCH");
/// assert_eq!(RestMethod::Post.to_reqwest(), reqwest::Method::POST);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    /// HTTP POST - Create a resource or trigger a job.
    Post,
    /// HTTP PATCH - Partially update a resource.
    Patch,
}

impl RestMethod {
    /// Converts to the equivalent `reqwest::Method`.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Post => reqwest::Method::POST,
            Self::Patch => reqwest::Method::PATCH,
        }
    }
}
