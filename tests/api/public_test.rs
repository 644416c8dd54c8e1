//! Public endpoints reject bad input before touching storage.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{TestApp, assert_error};

#[tokio::test]
async fn test_contact_requires_valid_email() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            "POST",
            "/api/contact",
            None,
            Some(json!({
                "name": "Jane Doe",
                "email": "jane-at-example",
                "message": "Do you handle payroll?"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "VALIDATION");
    assert!(body["error"].as_str().unwrap().contains("email"));
}

#[tokio::test]
async fn test_contact_requires_message() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            "POST",
            "/api/contact",
            None,
            Some(json!({ "name": "Jane Doe", "email": "jane@example.com" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "VALIDATION");
}
