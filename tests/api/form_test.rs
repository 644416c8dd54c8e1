//! One response per client per form.

use axum::http::StatusCode;
use serde_json::{Value, json};

use ledgerdesk_entity::user::UserRole;

use crate::helpers::{TestApp, assert_error};

/// Create and publish a form with one required choice. Returns (form id, field id).
async fn published_form(app: &TestApp, admin_token: &str) -> (String, String) {
    let (status, form) = app
        .send(
            "POST",
            "/api/admin/forms",
            Some(admin_token),
            Some(json!({ "title": "2024 Intake", "description": "Tell us about your year" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{form}");
    let form_id = form["id"].as_str().unwrap().to_string();

    let (status, field) = app
        .send(
            "POST",
            &format!("/api/admin/forms/{form_id}/fields"),
            Some(admin_token),
            Some(json!({
                "type": "selection",
                "label": "Filing status",
                "required": true,
                "options": ["Single", "Married filing jointly"]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{field}");
    let field_id = field["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .send(
            "POST",
            &format!("/api/admin/forms/{form_id}/publish"),
            Some(admin_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    (form_id, field_id)
}

fn answer(field_id: &str, value: &str) -> Value {
    json!({ "answers": { field_id: value } })
}

#[tokio::test]
async fn test_second_response_conflicts() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let (_, admin_token) = app.signed_in(UserRole::Admin).await;
    let (_, client_token) = app.signed_in(UserRole::Client).await;
    let (form_id, field_id) = published_form(&app, &admin_token).await;
    let uri = format!("/api/forms/{form_id}/responses");

    let (status, body) = app
        .send("POST", &uri, Some(&client_token), Some(answer(&field_id, " Single ")))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (status, body) = app
        .send(
            "POST",
            &uri,
            Some(&client_token),
            Some(answer(&field_id, "Married filing jointly")),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_error(&body, "CONFLICT");

    let (status, mine) = app
        .send("GET", &format!("{uri}/me"), Some(&client_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine["answers"][0]["value"], "Single");
}

#[tokio::test]
async fn test_concurrent_responses_store_one() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let (_, admin_token) = app.signed_in(UserRole::Admin).await;
    let (_, client_token) = app.signed_in(UserRole::Client).await;
    let (form_id, field_id) = published_form(&app, &admin_token).await;
    let uri = format!("/api/forms/{form_id}/responses");

    let first = app.send("POST", &uri, Some(&client_token), Some(answer(&field_id, "Single")));
    let second = app.send("POST", &uri, Some(&client_token), Some(answer(&field_id, "Single")));
    let ((a, _), (b, _)) = tokio::join!(first, second);

    let mut statuses = [a.as_u16(), b.as_u16()];
    statuses.sort_unstable();
    assert_eq!(statuses, [201, 409]);

    let (status, responses) = app
        .send("GET", &uri.replace("/api/", "/api/admin/"), Some(&admin_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(responses.as_array().map_or(0, Vec::len), 1);
}
