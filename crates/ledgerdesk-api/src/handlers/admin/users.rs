//! Admin user management handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use ledgerdesk_core::types::pagination::PageResponse;
use ledgerdesk_entity::user::User;
use ledgerdesk_service::user::CreatedUser;

use crate::dto::request::{CreateUserRequest, SetPasswordRequest, UpdateUserRequest, UserSearchQuery};
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::{ApiPath, ApiQuery, AuthUser, PaginationParams, ValidJson};
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<UserSearchQuery>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<Json<PageResponse<User>>, ApiError> {
    let users = state
        .admin_user_service
        .list_users(
            &auth,
            query.search.as_deref().filter(|s| !s.trim().is_empty()),
            query.role,
            params.into_page_request(),
        )
        .await?;
    Ok(Json(users))
}

/// POST /api/admin/users
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreatedUser>), ApiError> {
    let created = state
        .admin_user_service
        .create_user(&auth, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.admin_user_service.get_user(&auth, id).await?))
}

/// PUT /api/admin/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ValidJson(req): ValidJson<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .admin_user_service
        .update_user(&auth, id, req.into())
        .await?;
    Ok(Json(user))
}

/// PUT /api/admin/users/{id}/password
pub async fn set_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ValidJson(req): ValidJson<SetPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .admin_user_service
        .set_password(&auth, id, &req.password)
        .await?;
    Ok(Json(MessageResponse::new("Password updated")))
}

/// DELETE /api/admin/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.admin_user_service.delete_user(&auth, id).await?;
    Ok(Json(MessageResponse::new("User deleted")))
}
