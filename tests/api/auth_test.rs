//! Token handling and login input validation.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;

use ledgerdesk_entity::user::UserRole;

use crate::helpers::{TestApp, assert_error};

#[tokio::test]
async fn test_me_requires_token() {
    let app = TestApp::new();
    let (status, body) = app.send("GET", "/api/auth/me", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_error(&body, "UNAUTHORIZED");
}

#[tokio::test]
async fn test_non_bearer_header_rejected() {
    let app = TestApp::new();
    let request = Request::builder()
        .uri("/api/users/me")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();
    let (status, body) = app.send_request(request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_error(&body, "UNAUTHORIZED");
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let app = TestApp::new();
    let (status, body) = app
        .send("GET", "/api/notifications", Some("not.a.jwt"), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_error(&body, "UNAUTHORIZED");
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let (_, token) = app.signed_in(UserRole::Client).await;

    let (status, body) = app.send("GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "client");

    let (status, _) = app.send("POST", "/api/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.send("GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_error(&body, "UNAUTHORIZED");
}

#[tokio::test]
async fn test_login_validates_body() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "not-an-email", "password": "" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "VALIDATION");
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("email"));
    assert!(message.contains("password"));
}

#[tokio::test]
async fn test_login_rejects_malformed_json() {
    let app = TestApp::new();
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"email\": "))
        .unwrap();
    let (status, body) = app.send_request(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "VALIDATION");
}

#[tokio::test]
async fn test_unknown_oauth_provider() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            "POST",
            "/api/auth/oauth/myspace",
            None,
            Some(json!({ "access_token": "ya29.token" })),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "NOT_FOUND");
}
