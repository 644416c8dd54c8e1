//! Admin resource link handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use ledgerdesk_entity::contact::{CreateLink, Link, UpdateLink};

use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiPath, AuthUser};
use crate::state::AppState;

/// GET /api/admin/links
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Link>>, ApiError> {
    Ok(Json(state.link_service.list_all(&auth).await?))
}

/// POST /api/admin/links
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(data): ApiJson<CreateLink>,
) -> Result<(StatusCode, Json<Link>), ApiError> {
    let link = state.link_service.create(&auth, data).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

/// PUT /api/admin/links/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(data): ApiJson<UpdateLink>,
) -> Result<Json<Link>, ApiError> {
    Ok(Json(state.link_service.update(&auth, id, data).await?))
}

/// DELETE /api/admin/links/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.link_service.delete(&auth, id).await?;
    Ok(Json(MessageResponse::new("Link deleted")))
}
