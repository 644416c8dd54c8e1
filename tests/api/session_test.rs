//! Tokens only carry the authority their account has right now.

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;

use ledgerdesk_entity::user::UserRole;

use crate::helpers::{TEST_PASSWORD, TestApp, assert_error};

#[tokio::test]
async fn test_token_for_missing_account_is_unauthorized() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let (_, token) = app.token_without_account(UserRole::Admin);

    let (status, body) = app
        .send(
            "PUT",
            "/api/admin/folders/rename",
            Some(&token),
            Some(json!({ "path": "Clients/Acme", "new_path": "Clients/Acme/2024" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_error(&body, "UNAUTHORIZED");

    let (status, _) = app.send("GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_role_comes_from_the_account() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let client = app.create_user(UserRole::Client).await;
    let mut forged = client.clone();
    forged.role = UserRole::Admin;
    let token = app.token_for_user(&forged);

    let (status, body) = app.send("GET", "/api/admin/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_error(&body, "FORBIDDEN");

    let (status, body) = app.send("GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "client");
}

#[tokio::test]
async fn test_demoted_admin_loses_access() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let (_, admin_token) = app.signed_in(UserRole::Admin).await;
    let (colleague, colleague_token) = app.signed_in(UserRole::Admin).await;

    let (status, _) = app
        .send("GET", "/api/admin/users", Some(&colleague_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send(
            "PUT",
            &format!("/api/admin/users/{}", colleague.id),
            Some(&admin_token),
            Some(json!({ "role": "client" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["role"], "client");

    let (status, body) = app
        .send("GET", "/api/admin/users", Some(&colleague_token), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_error(&body, "UNAUTHORIZED");
}

#[tokio::test]
async fn test_profile_edit_keeps_sessions() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let (_, admin_token) = app.signed_in(UserRole::Admin).await;
    let (client, client_token) = app.signed_in(UserRole::Client).await;

    let (status, _) = app
        .send(
            "PUT",
            &format!("/api/admin/users/{}", client.id),
            Some(&admin_token),
            Some(json!({ "company": "Acme Bookkeeping" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.send("GET", "/api/auth/me", Some(&client_token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_deleted_user_token_is_unauthorized() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let (_, admin_token) = app.signed_in(UserRole::Admin).await;
    let (client, client_token) = app.signed_in(UserRole::Client).await;

    let (status, _) = app.send("GET", "/api/notifications", Some(&client_token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send(
            "DELETE",
            &format!("/api/admin/users/{}", client.id),
            Some(&admin_token),
            None,
        )
        .await;
    assert!(status.is_success(), "{status}");

    let (status, body) = app.send("GET", "/api/notifications", Some(&client_token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_error(&body, "UNAUTHORIZED");
}

#[tokio::test]
async fn test_password_reset_ends_old_sessions() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let (_, admin_token) = app.signed_in(UserRole::Admin).await;
    let (client, client_token) = app.signed_in(UserRole::Client).await;
    let new_password = "Amended-Return-Filing-7731";

    let (status, body) = app
        .send(
            "PUT",
            &format!("/api/admin/users/{}/password", client.id),
            Some(&admin_token),
            Some(json!({ "password": new_password })),
        )
        .await;
    assert!(status.is_success(), "{status} {body}");

    let (status, body) = app.send("GET", "/api/auth/me", Some(&client_token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_error(&body, "UNAUTHORIZED");

    let (status, _) = app.login(&client.email, TEST_PASSWORD).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Tokens are honored from the second after the reset.
    tokio::time::sleep(Duration::from_millis(1100)).await;
    let (status, body) = app.login(&client.email, new_password).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let fresh = body["access_token"].as_str().unwrap();

    let (status, _) = app.send("GET", "/api/auth/me", Some(fresh), None).await;
    assert_eq!(status, StatusCode::OK);
}
