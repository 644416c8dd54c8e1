//! Liveness and readiness.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_reports_version() {
    let app = TestApp::new();
    let (status, body) = app.send("GET", "/api/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_ready_is_unavailable_without_database() {
    let app = TestApp::new();
    let (status, body) = app.send("GET", "/api/health/ready", None, None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unavailable");
    assert_eq!(body["database"], "down");
    assert_eq!(body["storage"], "up");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new();
    let (status, _) = app.send("GET", "/api/nope", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
