//! Folder operations act on a subtree and never on a sibling that merely
//! shares a name prefix.

use axum::http::StatusCode;
use serde_json::json;

use ledgerdesk_entity::user::UserRole;

use crate::helpers::{TestApp, assert_error, unique_root};

/// `{root}/Tax` holds two files (one nested), `{root}/Taxes` holds one.
async fn seed_tax_folders(app: &TestApp, uploader: uuid::Uuid) -> String {
    let root = unique_root();
    app.insert_file(uploader, &format!("{root}/Tax")).await;
    app.insert_file(uploader, &format!("{root}/Tax/2024")).await;
    app.insert_file(uploader, &format!("{root}/Taxes")).await;
    root
}

async fn folder_file_count(app: &TestApp, token: &str, path: &str) -> usize {
    let (status, body) = app
        .send(
            "GET",
            &format!("/api/admin/folders/contents?path={path}"),
            Some(token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{path}: {body}");
    body["files"].as_array().map_or(0, Vec::len)
}

#[tokio::test]
async fn test_rename_leaves_prefix_sibling() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let (admin, token) = app.signed_in(UserRole::Admin).await;
    let root = seed_tax_folders(&app, admin.id).await;

    let (status, body) = app
        .send(
            "PUT",
            "/api/admin/folders/rename",
            Some(&token),
            Some(json!({ "path": format!("{root}/Tax"), "new_path": format!("{root}/Returns") })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["count"], 2);

    assert_eq!(folder_file_count(&app, &token, &format!("{root}/Returns")).await, 1);
    assert_eq!(folder_file_count(&app, &token, &format!("{root}/Returns/2024")).await, 1);
    assert_eq!(folder_file_count(&app, &token, &format!("{root}/Taxes")).await, 1);
}

#[tokio::test]
async fn test_rename_onto_existing_folder_conflicts() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let (admin, token) = app.signed_in(UserRole::Admin).await;
    let root = seed_tax_folders(&app, admin.id).await;

    let (status, body) = app
        .send(
            "PUT",
            "/api/admin/folders/rename",
            Some(&token),
            Some(json!({ "path": format!("{root}/Tax"), "new_path": format!("{root}/Taxes") })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_error(&body, "CONFLICT");
}

#[tokio::test]
async fn test_delete_leaves_prefix_sibling() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let (admin, token) = app.signed_in(UserRole::Admin).await;
    let root = seed_tax_folders(&app, admin.id).await;
    assert_eq!(app.store.len().await, 3);

    let (status, body) = app
        .send(
            "DELETE",
            &format!("/api/admin/folders?path={root}/Tax"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["count"], 2);
    assert_eq!(app.store.len().await, 1);

    assert_eq!(folder_file_count(&app, &token, &format!("{root}/Taxes")).await, 1);
    let (status, _) = app
        .send(
            "GET",
            &format!("/api/admin/folders/contents?path={root}/Tax"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_archive_leaves_prefix_sibling() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let (admin, token) = app.signed_in(UserRole::Admin).await;
    let root = seed_tax_folders(&app, admin.id).await;

    let (status, body) = app
        .send(
            "POST",
            "/api/admin/folders/archive",
            Some(&token),
            Some(json!({ "path": format!("{root}/Tax"), "archived": true })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["count"], 2);

    // Archiving again changes nothing.
    let (_, body) = app
        .send(
            "POST",
            "/api/admin/folders/archive",
            Some(&token),
            Some(json!({ "path": format!("{root}/Tax"), "archived": true })),
        )
        .await;
    assert_eq!(body["count"], 0);

    let (status, body) = app
        .send(
            "GET",
            &format!("/api/admin/folders/contents?path={root}/Taxes&archived=false"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["files"].as_array().map_or(0, Vec::len), 1);
}
