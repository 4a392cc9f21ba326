//! Integration tests for the user operations.
//!
//! These tests use wiremock to stand in for the Management API and verify
//! the requests the client sends and how it reads the answers.

use auth0::{
    ApiClient, ApiError, CreateUserRequest, ErrorResponse, Identity, UpdateUserRequest, User,
    ValidationError,
};
use serde_json::{json, Map, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "valid_token";

fn client(server: &MockServer) -> ApiClient {
    ApiClient::builder(server.uri(), TOKEN).build().unwrap()
}

fn client_with_default_connection(server: &MockServer, connection: &str) -> ApiClient {
    ApiClient::builder(server.uri(), TOKEN)
        .default_connection(connection)
        .build()
        .unwrap()
}

fn app_metadata() -> Map<String, Value> {
    json!({"userId": 342, "userType": "client"})
        .as_object()
        .cloned()
        .unwrap()
}

fn sample_user(email: &str, connection: &str) -> User {
    User {
        email: email.to_string(),
        user_id: "usr_5457edea1b8f33391a000004".to_string(),
        identities: vec![Identity {
            connection: connection.to_string(),
            user_id: "5457edea1b8f22891a000004".to_string(),
            provider: "auth0".to_string(),
            is_social: false,
        }],
        app_metadata: app_metadata(),
        ..Default::default()
    }
}

/// Mounts a mock that only answers requests carrying the exact auth and
/// content-type headers.
async fn mount_authenticated(
    server: &MockServer,
    http_method: &str,
    endpoint: &str,
    response: ResponseTemplate,
) {
    Mock::given(method(http_method))
        .and(path(endpoint))
        .and(header("authorization", "Bearer valid_token"))
        .and(header("content-type", "application/json; charset=utf-8"))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_create_user_success() {
    let server = MockServer::start().await;
    mount_authenticated(
        &server,
        "POST",
        "/api/v2/users",
        ResponseTemplate::new(201).set_body_json(sample_user("test@example.com", "test")),
    )
    .await;

    let request = CreateUserRequest::new("test@example.com", "test_password")
        .with_connection("test")
        .with_app_metadata(app_metadata());

    let user = client(&server).create_user(request).await.unwrap().unwrap();

    assert_eq!(user.email, "test@example.com");
    assert_eq!(user.identities[0].connection, "test");
}

#[tokio::test]
async fn test_create_user_uses_default_connection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/users"))
        .and(body_json(json!({
            "connection": "Username-Password-Authentication",
            "email": "test_email@gmail.com",
            "password": "test_password",
            "email_verified": false,
            "user_metadata": {},
            "app_metadata": {"userId": 342, "userType": "client"}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(sample_user(
            "test_email@gmail.com",
            "Username-Password-Authentication",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let request = CreateUserRequest::new("test_email@gmail.com", "test_password")
        .with_app_metadata(app_metadata());

    client_with_default_connection(&server, "Username-Password-Authentication")
        .create_user(request)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_user_explicit_connection_wins() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/users"))
        .and(body_json(json!({
            "connection": "test",
            "email": "test@example.com",
            "password": "pw",
            "email_verified": true,
            "user_metadata": {},
            "app_metadata": {}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(sample_user("test@example.com", "test")))
        .expect(1)
        .mount(&server)
        .await;

    let request = CreateUserRequest::new("test@example.com", "pw")
        .with_connection("test")
        .with_email_verified(true);

    client_with_default_connection(&server, "Username-Password-Authentication")
        .create_user(request)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_user_email_already_exists() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/users"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "statusCode": 400,
            "error": "Bad Request",
            "message": "The user already exists",
            "errorCode": "auth0_idp_error"
        })))
        .mount(&server)
        .await;

    let request = CreateUserRequest::new("mail_exists@test.com", "test_password")
        .with_app_metadata(app_metadata());

    let err = client_with_default_connection(&server, "Username-Password-Authentication")
        .create_user(request)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(400));
    assert_eq!(err.message(), "The user already exists");
    let remote = err.remote().unwrap();
    assert_eq!(remote.error_code.as_deref(), Some("auth0_idp_error"));
    assert_eq!(err.to_string(), "error code 400: The user already exists");
}

#[tokio::test]
async fn test_create_user_malformed_error_body_is_recoverable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/users"))
        .respond_with(ResponseTemplate::new(503).set_body_string("<h1>Service Unavailable</h1>"))
        .mount(&server)
        .await;

    let err = client(&server)
        .create_user(CreateUserRequest::new("test@example.com", "pw"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ApiError::Validation(ValidationError::MalformedErrorResponse { status: 503, .. })
    ));
    assert_eq!(err.status_code(), Some(503));
}

#[tokio::test]
async fn test_update_user_success() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v2/users/test_id"))
        .and(header("authorization", "Bearer valid_token"))
        .and(header("content-type", "application/json; charset=utf-8"))
        .and(body_json(json!({
            "connection": "test",
            "email": "updated_email@gmail.com",
            "password": "updated_password",
            "email_verified": true
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sample_user("updated_email@gmail.com", "test")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let request = UpdateUserRequest::new("test_id")
        .with_connection("test")
        .with_email("updated_email@gmail.com")
        .with_password("updated_password")
        .with_email_verified(true);

    let user = client(&server).update_user(request).await.unwrap().unwrap();
    assert_eq!(user.email, "updated_email@gmail.com");
}

#[tokio::test]
async fn test_create_user_empty_201_is_success() {
    let server = MockServer::start().await;
    mount_authenticated(&server, "POST", "/api/v2/users", ResponseTemplate::new(201)).await;

    let created = client_with_default_connection(&server, "Username-Password-Authentication")
        .create_user(CreateUserRequest::new("test@example.com", "pw"))
        .await
        .unwrap();

    assert_eq!(created, None);
}

#[tokio::test]
async fn test_update_user_numeric_identity_id() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v2/users/test_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user_id": "github|1234567",
            "email": "octo@example.com",
            "email_verified": null,
            "identities": [{
                "connection": "github",
                "user_id": 1234567,
                "provider": "github",
                "isSocial": true
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = client(&server)
        .update_user(UpdateUserRequest::new("test_id").with_connection("github"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(user.identities[0].user_id, "1234567");
    assert!(!user.email_verified);
}

#[tokio::test]
async fn test_update_user_undecodable_body_is_still_success() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v2/users/test_id"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&server)
        .await;

    let updated = client(&server)
        .update_user(UpdateUserRequest::new("test_id").with_connection("test"))
        .await
        .unwrap();

    assert_eq!(updated, None);
}

#[tokio::test]
async fn test_update_user_path_contains_id_and_default_connection() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v2/users/usr_5457edea1b8f33391a000004"))
        .and(body_json(json!({
            "connection": "Username-Password-Authentication",
            "password": "new_password"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let request =
        UpdateUserRequest::new("usr_5457edea1b8f33391a000004").with_password("new_password");

    client_with_default_connection(&server, "Username-Password-Authentication")
        .update_user(request)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_user_unknown_id() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v2/users/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(ErrorResponse {
            status_code: 404,
            message: "The user does not exist.".to_string(),
            error: Some("Not Found".to_string()),
            error_code: Some("inexistent_user".to_string()),
        }))
        .mount(&server)
        .await;

    let err = client(&server)
        .update_user(UpdateUserRequest::new("missing").with_connection("test"))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.message(), "The user does not exist.");
}

#[tokio::test]
async fn test_send_verification_email() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/jobs/post_verification_email"))
        .and(header("authorization", "Bearer valid_token"))
        .and(header("content-type", "application/json; charset=utf-8"))
        .and(body_json(json!({"user_id": "auth0|testststststs"})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .send_verification_email("auth0|testststststs")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_send_verification_email_ignores_job_body() {
    let server = MockServer::start().await;
    mount_authenticated(
        &server,
        "POST",
        "/api/v2/jobs/post_verification_email",
        ResponseTemplate::new(201).set_body_json(json!({
            "status": "pending",
            "type": "verification_email",
            "id": "job_0000000000000001"
        })),
    )
    .await;

    assert!(client(&server).send_verification_email("auth0|1").await.is_ok());
}

#[tokio::test]
async fn test_unrecognized_path_yields_structured_error() {
    let server = MockServer::start().await;

    // Only the users collection exists; every other path answers 404
    Mock::given(method("POST"))
        .and(path("/api/v2/users"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let err = client(&server)
        .send_verification_email("auth0|1")
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn test_transport_failure_carries_message_without_status() {
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };

    let err = ApiClient::builder(uri, TOKEN)
        .build()
        .unwrap()
        .create_user(CreateUserRequest::new("test@example.com", "pw"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Client(_)));
    assert_eq!(err.status_code(), None);
    assert!(!err.message().is_empty());
}

#[tokio::test]
async fn test_every_operation_sends_auth_and_content_type() {
    let server = MockServer::start().await;
    mount_authenticated(
        &server,
        "POST",
        "/api/v2/users",
        ResponseTemplate::new(201).set_body_json(sample_user("a@b.c", "test")),
    )
    .await;
    mount_authenticated(
        &server,
        "PATCH",
        "/api/v2/users/test_id",
        ResponseTemplate::new(200).set_body_json(sample_user("a@b.c", "test")),
    )
    .await;
    mount_authenticated(
        &server,
        "POST",
        "/api/v2/jobs/post_verification_email",
        ResponseTemplate::new(201),
    )
    .await;

    let api = client_with_default_connection(&server, "test");
    api.create_user(CreateUserRequest::new("a@b.c", "pw"))
        .await
        .unwrap();
    api.update_user(UpdateUserRequest::new("test_id").with_email("a@b.c"))
        .await
        .unwrap();
    api.send_verification_email("test_id").await.unwrap();
}

#[test]
fn test_missing_base_url_is_rejected_at_construction() {
    let err = ApiClient::builder("", TOKEN).build().unwrap_err();
    assert!(matches!(err, ApiError::Config(_)));
}
