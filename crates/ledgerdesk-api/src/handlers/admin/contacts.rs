//! Admin contact request handlers.

use axum::Json;
use axum::extract::State;
use uuid::Uuid;

use ledgerdesk_core::types::pagination::PageResponse;
use ledgerdesk_entity::contact::ContactRequest;

use crate::dto::request::ContactListQuery;
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::{ApiPath, ApiQuery, AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/admin/contacts
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<ContactListQuery>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<Json<PageResponse<ContactRequest>>, ApiError> {
    let requests = state
        .contact_service
        .list(&auth, query.is_open, params.into_page_request())
        .await?;
    Ok(Json(requests))
}

/// POST /api/admin/contacts/{id}/close
pub async fn close(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ContactRequest>, ApiError> {
    Ok(Json(state.contact_service.set_open(&auth, id, false).await?))
}

/// POST /api/admin/contacts/{id}/reopen
pub async fn reopen(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ContactRequest>, ApiError> {
    Ok(Json(state.contact_service.set_open(&auth, id, true).await?))
}

/// DELETE /api/admin/contacts/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.contact_service.delete(&auth, id).await?;
    Ok(Json(MessageResponse::new("Contact request deleted")))
}
