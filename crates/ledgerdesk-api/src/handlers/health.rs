//! Health check handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use crate::dto::response::{HealthResponse, ReadyResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/health/ready
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let database = match state.db_pool.health_check().await {
        Ok(up) => up,
        Err(e) => {
            warn!(error = %e, "Database readiness check failed");
            false
        }
    };
    let storage = match state.store.health_check().await {
        Ok(up) => up,
        Err(e) => {
            warn!(provider = state.store.provider_type(), error = %e, "Storage readiness check failed");
            false
        }
    };

    let ready = database && storage;
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ReadyResponse {
            status: if ready { "ok" } else { "unavailable" }.to_string(),
            database: up_down(database),
            storage: up_down(storage),
        }),
    )
}

fn up_down(up: bool) -> String {
    if up { "up" } else { "down" }.to_string()
}
