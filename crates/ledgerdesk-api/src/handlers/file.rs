//! Client file exchange handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use ledgerdesk_core::traits::PresignedUrl;
use ledgerdesk_core::types::pagination::PageResponse;
use ledgerdesk_entity::file::{File, FileWithOwners};
use ledgerdesk_service::file::{RegisterFileRequest, UploadTicket, UploadUrlRequest};

use crate::dto::request::FileScopeQuery;
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiPath, ApiQuery, AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /api/files/upload-url
pub async fn upload_url(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<UploadUrlRequest>,
) -> Result<Json<UploadTicket>, ApiError> {
    Ok(Json(state.file_service.request_upload(&auth, req).await?))
}

/// POST /api/files
pub async fn register_file(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<RegisterFileRequest>,
) -> Result<(StatusCode, Json<File>), ApiError> {
    let file = state.file_service.register(&auth, req).await?;
    Ok((StatusCode::CREATED, Json(file)))
}

/// GET /api/files
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(scope): ApiQuery<FileScopeQuery>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<Json<PageResponse<FileWithOwners>>, ApiError> {
    let files = state
        .file_service
        .list_files(&auth, scope.scope, params.into_page_request())
        .await?;
    Ok(Json(files))
}

/// GET /api/files/{id}/download-url
pub async fn download_url(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<PresignedUrl>, ApiError> {
    Ok(Json(state.file_service.download_url(&auth, id).await?))
}

/// DELETE /api/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.file_service.delete_own(&auth, id).await?;
    Ok(Json(MessageResponse::new("File deleted")))
}
