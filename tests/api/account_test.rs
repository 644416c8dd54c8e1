//! Lockout state and account removal as stored in the database.

use axum::http::StatusCode;
use serde_json::json;

use ledgerdesk_core::traits::ObjectStore;
use ledgerdesk_database::repositories::{FormResponseRepository, NotificationRepository};
use ledgerdesk_entity::user::UserRole;

use crate::helpers::{TEST_PASSWORD, TestApp, assert_error, unique_root};

#[tokio::test]
async fn test_lockout_persists_across_instances() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let client = app.create_user(UserRole::Client).await;
    let max = app.config.auth.max_failed_attempts;

    for _ in 0..max {
        let (status, body) = app.login(&client.email, "wrong-password").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_error(&body, "UNAUTHORIZED");
    }

    let stored = app.users().find_by_id(client.id).await.unwrap().unwrap();
    assert_eq!(stored.failed_login_attempts, max);
    assert!(stored.is_locked());

    // A fresh process sees the same lock, even with the right password.
    let Some(restarted) = TestApp::with_database().await else {
        return;
    };
    let (status, body) = restarted.login(&client.email, TEST_PASSWORD).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(
        body["error"].as_str().unwrap().contains("locked"),
        "unexpected body: {body}"
    );
}

#[tokio::test]
async fn test_successful_login_resets_failures() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let client = app.create_user(UserRole::Client).await;

    app.login(&client.email, "wrong-password").await;
    app.login(&client.email, "wrong-password").await;
    let (status, body) = app.login(&client.email, TEST_PASSWORD).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body["access_token"].is_string());

    let stored = app.users().find_by_id(client.id).await.unwrap().unwrap();
    assert_eq!(stored.failed_login_attempts, 0);
    assert!(stored.last_login_at.is_some());
}

#[tokio::test]
async fn test_delete_user_cascades() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let (admin, admin_token) = app.signed_in(UserRole::Admin).await;
    let (client, client_token) = app.signed_in(UserRole::Client).await;
    let root = unique_root();

    // The client's own upload.
    let upload = app.insert_file(client.id, &root).await;

    // A file addressed to the client, which notifies them.
    let (_, ticket) = app
        .send(
            "POST",
            "/api/admin/files/upload-url",
            Some(&admin_token),
            Some(json!({ "name": "Engagement letter.pdf", "size_bytes": 512 })),
        )
        .await;
    let (status, shared) = app
        .send(
            "POST",
            "/api/admin/files",
            Some(&admin_token),
            Some(json!({
                "object_key": ticket["object_key"],
                "name": "Engagement letter.pdf",
                "folder_name": root,
                "receiver_id": client.id
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{shared}");

    // A form response.
    let (_, form) = app
        .send(
            "POST",
            "/api/admin/forms",
            Some(&admin_token),
            Some(json!({ "title": "Feedback" })),
        )
        .await;
    let form_id = form["id"].as_str().unwrap().to_string();
    let (_, field) = app
        .send(
            "POST",
            &format!("/api/admin/forms/{form_id}/fields"),
            Some(&admin_token),
            Some(json!({ "type": "input", "label": "Comments" })),
        )
        .await;
    app.send(
        "POST",
        &format!("/api/admin/forms/{form_id}/publish"),
        Some(&admin_token),
        None,
    )
    .await;
    let (status, _) = app
        .send(
            "POST",
            &format!("/api/forms/{form_id}/responses"),
            Some(&client_token),
            Some(json!({ "answers": { field["id"].as_str().unwrap(): "Great service" } })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let pool = app.db_pool.pool().clone();
    let notifications = NotificationRepository::new(pool.clone());
    let responses = FormResponseRepository::new(pool);
    assert_eq!(notifications.count_unread(client.id).await.unwrap(), 1);
    let form_uuid = form_id.parse().unwrap();
    assert!(
        responses
            .find_by_form_and_user(form_uuid, client.id)
            .await
            .unwrap()
            .is_some()
    );

    let (status, _) = app
        .send(
            "DELETE",
            &format!("/api/admin/users/{}", client.id),
            Some(&admin_token),
            None,
        )
        .await;
    assert!(status.is_success(), "{status}");

    assert!(app.users().find_by_id(client.id).await.unwrap().is_none());
    assert!(app.files().find_by_id(upload.id).await.unwrap().is_none());
    assert!(app.store.object_size(&upload.object_key).await.unwrap().is_none());
    assert_eq!(notifications.count_unread(client.id).await.unwrap(), 0);
    assert!(
        responses
            .find_by_form_and_user(form_uuid, client.id)
            .await
            .unwrap()
            .is_none()
    );

    // The firm's file to the client stays, with the receiver cleared.
    let shared_id = shared["id"].as_str().unwrap().parse().unwrap();
    let kept = app.files().find_by_id(shared_id).await.unwrap().unwrap();
    assert_eq!(kept.uploader_id, admin.id);
    assert_eq!(kept.receiver_id, None);
}
