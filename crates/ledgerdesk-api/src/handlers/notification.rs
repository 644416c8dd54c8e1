//! Notification handlers.

use axum::Json;
use axum::extract::State;
use uuid::Uuid;

use ledgerdesk_service::notification::NotificationPage;

use crate::dto::response::{CountResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{ApiPath, ApiQuery, AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<Json<NotificationPage>, ApiError> {
    let page = state
        .notification_service
        .list(&auth, params.into_page_request())
        .await?;
    Ok(Json(page))
}

/// POST /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.notification_service.mark_read(&auth, id).await?;
    Ok(Json(MessageResponse::new("Notification marked as read")))
}

/// POST /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<CountResponse>, ApiError> {
    let count = state.notification_service.mark_all_read(&auth).await?;
    Ok(Json(CountResponse { count }))
}

/// DELETE /api/notifications/{id}
pub async fn delete_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.notification_service.delete(&auth, id).await?;
    Ok(Json(MessageResponse::new("Notification deleted")))
}
