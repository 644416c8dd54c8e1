//! Admin file handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use ledgerdesk_core::types::pagination::PageResponse;
use ledgerdesk_entity::file::{File, FileWithOwners};
use ledgerdesk_service::file::{
    AdminFileQuery, AdminRegisterFileRequest, AdminUpdateFileRequest, UploadTicket,
    UploadUrlRequest,
};

use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiPath, ApiQuery, AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/admin/files
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<AdminFileQuery>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<Json<PageResponse<FileWithOwners>>, ApiError> {
    let files = state
        .file_service
        .admin_list(&auth, query, params.into_page_request())
        .await?;
    Ok(Json(files))
}

/// POST /api/admin/files/upload-url
pub async fn upload_url(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<UploadUrlRequest>,
) -> Result<Json<UploadTicket>, ApiError> {
    Ok(Json(state.file_service.request_upload(&auth, req).await?))
}

/// POST /api/admin/files
pub async fn register_file(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<AdminRegisterFileRequest>,
) -> Result<(StatusCode, Json<File>), ApiError> {
    let file = state.file_service.admin_register(&auth, req).await?;
    Ok((StatusCode::CREATED, Json(file)))
}

/// PUT /api/admin/files/{id}
pub async fn update_file(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<AdminUpdateFileRequest>,
) -> Result<Json<File>, ApiError> {
    Ok(Json(state.file_service.admin_update(&auth, id, req).await?))
}

/// POST /api/admin/files/{id}/archive
pub async fn archive_file(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<File>, ApiError> {
    Ok(Json(
        state.file_service.admin_set_archived(&auth, id, true).await?,
    ))
}

/// POST /api/admin/files/{id}/unarchive
pub async fn unarchive_file(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<File>, ApiError> {
    Ok(Json(
        state.file_service.admin_set_archived(&auth, id, false).await?,
    ))
}

/// GET /api/admin/files/{id}/download-url
pub async fn download_url(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ledgerdesk_core::traits::PresignedUrl>, ApiError> {
    Ok(Json(state.file_service.download_url(&auth, id).await?))
}

/// DELETE /api/admin/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.file_service.admin_delete(&auth, id).await?;
    Ok(Json(MessageResponse::new("File deleted")))
}
