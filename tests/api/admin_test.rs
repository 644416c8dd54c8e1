//! The admin route tree is guarded before any handler runs.

use axum::http::StatusCode;
use serde_json::json;

use ledgerdesk_entity::user::UserRole;

use crate::helpers::{TestApp, assert_error};

#[tokio::test]
async fn test_admin_routes_require_token() {
    let app = TestApp::new();
    for uri in [
        "/api/admin/users",
        "/api/admin/files",
        "/api/admin/folders/tree",
        "/api/admin/forms",
        "/api/admin/contacts",
        "/api/admin/blog",
    ] {
        let (status, body) = app.send("GET", uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_error(&body, "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn test_clients_are_forbidden() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let (_, token) = app.signed_in(UserRole::Client).await;

    for uri in [
        "/api/admin/users",
        "/api/admin/testimonials",
        "/api/admin/links",
        "/api/admin/folders/contents?path=Clients",
    ] {
        let (status, body) = app.send("GET", uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
        assert_error(&body, "FORBIDDEN");
    }

    let (status, body) = app
        .send(
            "POST",
            "/api/admin/users",
            Some(&token),
            Some(json!({ "name": "Eve", "email": "eve@example.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_error(&body, "FORBIDDEN");
}

#[tokio::test]
async fn test_admin_create_user_validates_body() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let (_, token) = app.signed_in(UserRole::Admin).await;

    let (status, body) = app
        .send(
            "POST",
            "/api/admin/users",
            Some(&token),
            Some(json!({ "name": "", "email": "nope" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "VALIDATION");
}

#[tokio::test]
async fn test_root_folder_cannot_be_archived() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let (_, token) = app.signed_in(UserRole::Admin).await;

    let (status, body) = app
        .send(
            "POST",
            "/api/admin/folders/archive",
            Some(&token),
            Some(json!({ "path": "/", "archived": true })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "VALIDATION");
}

#[tokio::test]
async fn test_folder_rename_into_own_subtree() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let (_, token) = app.signed_in(UserRole::Admin).await;

    let (status, body) = app
        .send(
            "PUT",
            "/api/admin/folders/rename",
            Some(&token),
            Some(json!({ "path": "Clients/Acme", "new_path": "Clients/Acme/2024" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "VALIDATION");
}

#[tokio::test]
async fn test_blog_draft_get_and_delete() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let (_, token) = app.signed_in(UserRole::Admin).await;

    let (status, post) = app
        .send(
            "POST",
            "/api/admin/blog",
            Some(&token),
            Some(json!({ "title": "Estimated taxes for freelancers", "content": "Pay quarterly." })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{post}");
    let uri = format!("/api/admin/blog/{}", post["id"].as_str().unwrap());

    // Drafts are visible to admins by id but not on the public site.
    let (status, body) = app.send("GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_published"], false);
    let (status, _) = app
        .send("GET", &format!("/api/blog/{}", post["slug"].as_str().unwrap()), None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send("DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.send("GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "NOT_FOUND");
    let (status, _) = app.send("DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
