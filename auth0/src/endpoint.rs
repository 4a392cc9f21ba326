//! Endpoint descriptors for the Management API.
//!
//! An [`Endpoint`] pairs an HTTP method and path template with the single
//! status code that counts as success and the [`ResponseFormat`] used to
//! read a successful body. Any other status, 2xx included, is an error.

use std::marker::PhantomData;

use crate::method::RestMethod;
use crate::response::ResponseFormat;

/// A Management API endpoint definition.
///
/// ## Examples
///
/// ```rust
/// use auth0::{Endpoint, RestMethod};
/// use auth0::response::EmptyFormat;
///
/// const UNBLOCK_USER: Endpoint<EmptyFormat> =
///     Endpoint::new("unblock_user", RestMethod::Patch, "/api/v2/users/{id}", 200);
///
/// assert_eq!(UNBLOCK_USER.path_params(), vec!["id"]);
/// assert_eq!(UNBLOCK_USER.substitute_params(&[("id", "abc")]), "/api/v2/users/abc");
/// ```
#[derive(Debug)]
pub struct Endpoint<F: ResponseFormat> {
    id: &'static str,
    method: RestMethod,
    /// URL path template (may contain `{param}` placeholders).
    path: &'static str,
    success_status: u16,
    _format: PhantomData<F>,
}

// Manual impls - PhantomData<F> is always Copy
impl<F: ResponseFormat> Clone for Endpoint<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: ResponseFormat> Copy for Endpoint<F> {}

impl<F: ResponseFormat> Endpoint<F> {
    /// Creates an endpoint definition.
    pub const fn new(
        id: &'static str,
        method: RestMethod,
        path: &'static str,
        success_status: u16,
    ) -> Self {
        Self {
            id,
            method,
            path,
            success_status,
            _format: PhantomData,
        }
    }

    /// Returns the endpoint's identifier, used in logs.
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Returns the HTTP method for this endpoint.
    pub fn method(&self) -> RestMethod {
        self.method
    }

    /// Returns the path template for this endpoint.
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Returns the only status code treated as success.
    pub fn success_status(&self) -> u16 {
        self.success_status
    }

    /// Substitutes path parameters in the template.
    ///
    /// Values are inserted verbatim; no escaping is applied.
    pub fn substitute_params(&self, params: &[(&str, &str)]) -> String {
        let mut path = self.path.to_string();
        for (key, value) in params {
            path = path.replace(&format!("{{{key}}}"), value);
        }
        path
    }

    /// Extracts path parameter names from the template, in order.
    ///
    /// [`ApiClient::execute`](crate::ApiClient::execute) refuses to send a
    /// request unless every one of these has a value.
    pub fn path_params(&self) -> Vec<&'static str> {
        self.path
            .split('{')
            .skip(1)
            .filter_map(|segment| segment.split_once('}').map(|(name, _)| name))
            .filter(|name| !name.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{EmptyFormat, JsonFormat};

    const GET_JOB: Endpoint<JsonFormat<serde_json::Value>> =
        Endpoint::new("get_job", RestMethod::Post, "/api/v2/jobs/{id}", 200);

    #[test]
    fn test_accessors() {
        assert_eq!(GET_JOB.id(), "get_job");
        assert_eq!(GET_JOB.method(), RestMethod::Post);
        assert_eq!(GET_JOB.path(), "/api/v2/jobs/{id}");
        assert_eq!(GET_JOB.success_status(), 200);
    }

    #[test]
    fn test_path_params() {
        let endpoint: Endpoint<EmptyFormat> = Endpoint::new(
            "unlink",
            RestMethod::Patch,
            "/api/v2/users/{id}/identities/{provider}/{user_id}",
            200,
        );
        assert_eq!(endpoint.path_params(), vec!["id", "provider", "user_id"]);
        assert_eq!(GET_JOB.path_params(), vec!["id"]);
    }

    #[test]
    fn test_path_params_without_placeholders() {
        let endpoint: Endpoint<EmptyFormat> =
            Endpoint::new("create", RestMethod::Post, "/api/v2/users", 201);
        assert!(endpoint.path_params().is_empty());
    }

    #[test]
    fn test_substitute_params_keeps_value_verbatim() {
        let path = GET_JOB.substitute_params(&[("id", "auth0|5457edea1b8f22891a000004")]);
        assert_eq!(path, "/api/v2/jobs/auth0|5457edea1b8f22891a000004");
    }

    #[test]
    fn test_substitute_params_ignores_unknown_keys() {
        let path = GET_JOB.substitute_params(&[("other", "x")]);
        assert_eq!(path, "/api/v2/jobs/{id}");
    }

    #[test]
    fn test_copy() {
        let copied = GET_JOB;
        assert_eq!(copied.id(), GET_JOB.id());
    }
}
