//! Admin blog handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use ledgerdesk_core::types::pagination::PageResponse;
use ledgerdesk_entity::blog::{BlogPost, UpdateBlogPost};
use ledgerdesk_service::blog::CreatePostRequest;

use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiPath, ApiQuery, AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/admin/blog
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<Json<PageResponse<BlogPost>>, ApiError> {
    let posts = state
        .blog_service
        .list_all(&auth, params.into_page_request())
        .await?;
    Ok(Json(posts))
}

/// POST /api/admin/blog
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<BlogPost>), ApiError> {
    let post = state.blog_service.create(&auth, req).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /api/admin/blog/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<BlogPost>, ApiError> {
    Ok(Json(state.blog_service.get(&auth, id).await?))
}

/// PUT /api/admin/blog/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(data): ApiJson<UpdateBlogPost>,
) -> Result<Json<BlogPost>, ApiError> {
    Ok(Json(state.blog_service.update(&auth, id, data).await?))
}

/// DELETE /api/admin/blog/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.blog_service.delete(&auth, id).await?;
    Ok(Json(MessageResponse::new("Post deleted")))
}
