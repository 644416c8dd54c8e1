//! Access log.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, info, warn};

/// One line per request. Health checks are logged at debug so load
/// balancer polling does not drown the log.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        warn!(%method, %path, status = status.as_u16(), duration_ms, "request failed");
    } else if path.starts_with("/api/health") {
        debug!(%method, %path, status = status.as_u16(), duration_ms, "health check");
    } else {
        info!(%method, %path, status = status.as_u16(), duration_ms, "request");
    }

    response
}
