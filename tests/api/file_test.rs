//! Signed upload URLs and upload registration.

use axum::http::StatusCode;
use serde_json::json;

use ledgerdesk_entity::user::UserRole;

use crate::helpers::{MAX_UPLOAD_BYTES, TestApp, assert_error};

#[tokio::test]
async fn test_upload_url_under_caller_prefix() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let (user, token) = app.signed_in(UserRole::Client).await;

    let (status, body) = app
        .send(
            "POST",
            "/api/files/upload-url",
            Some(&token),
            Some(json!({ "name": "W-2 2024.pdf", "mime_type": "application/pdf", "size_bytes": 2048 })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let key = body["object_key"].as_str().unwrap();
    assert!(key.starts_with(&format!("uploads/{}/", user.id)), "{key}");
    assert_eq!(body["method"], "PUT");
    assert!(body["url"].is_string());
}

#[tokio::test]
async fn test_upload_url_too_large() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let (_, token) = app.signed_in(UserRole::Client).await;

    let (status, body) = app
        .send(
            "POST",
            "/api/files/upload-url",
            Some(&token),
            Some(json!({ "name": "scan.tiff", "size_bytes": 10 * 1024 * 1024 })),
        )
        .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_error(&body, "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn test_register_rejects_foreign_key() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let (_, token) = app.signed_in(UserRole::Client).await;

    let (status, body) = app
        .send(
            "POST",
            "/api/files",
            Some(&token),
            Some(json!({
                "object_key": "uploads/00000000-0000-0000-0000-000000000000/x.pdf",
                "name": "x.pdf",
                "size_bytes": 10
            })),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_error(&body, "FORBIDDEN");
}

#[tokio::test]
async fn test_register_records_stored_size() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let (_, token) = app.signed_in(UserRole::Client).await;

    let (_, ticket) = app
        .send(
            "POST",
            "/api/files/upload-url",
            Some(&token),
            Some(json!({ "name": "1099.pdf", "size_bytes": 2048 })),
        )
        .await;
    let key = ticket["object_key"].as_str().unwrap();

    let (status, body) = app
        .send(
            "POST",
            "/api/files",
            Some(&token),
            Some(json!({ "object_key": key, "name": "1099.pdf", "size_bytes": 1 })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["size_bytes"], 2048);
}

#[tokio::test]
async fn test_register_rejects_object_over_limit() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let (_, token) = app.signed_in(UserRole::Client).await;

    let (_, ticket) = app
        .send(
            "POST",
            "/api/files/upload-url",
            Some(&token),
            Some(json!({ "name": "ledger.xlsx", "size_bytes": 10 })),
        )
        .await;
    let key = ticket["object_key"].as_str().unwrap().to_string();

    // The client sent far more than it declared.
    app.store.insert(&key, MAX_UPLOAD_BYTES * 4).await;

    let (status, body) = app
        .send(
            "POST",
            "/api/files",
            Some(&token),
            Some(json!({ "object_key": key, "name": "ledger.xlsx", "size_bytes": 10 })),
        )
        .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_error(&body, "PAYLOAD_TOO_LARGE");
    assert!(app.store.is_empty().await, "oversized object should be discarded");
}

#[tokio::test]
async fn test_register_requires_uploaded_object() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let (user, token) = app.signed_in(UserRole::Client).await;

    let (status, body) = app
        .send(
            "POST",
            "/api/files",
            Some(&token),
            Some(json!({
                "object_key": format!("uploads/{}/never-sent.pdf", user.id),
                "name": "never-sent.pdf"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "VALIDATION");
}

#[tokio::test]
async fn test_invalid_file_id() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let (_, token) = app.signed_in(UserRole::Client).await;

    let (status, body) = app
        .send("GET", "/api/files/not-a-uuid/download-url", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "VALIDATION");
}
