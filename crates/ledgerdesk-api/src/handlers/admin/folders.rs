//! Admin virtual folder handlers.

use axum::Json;
use axum::extract::State;

use ledgerdesk_entity::folder::{FolderListing, FolderTree};

use crate::dto::request::{ArchiveFolderRequest, ArchivedQuery, FolderPathQuery, RenameFolderRequest};
use crate::dto::response::CountResponse;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiQuery, AuthUser};
use crate::state::AppState;

/// GET /api/admin/folders/tree
pub async fn tree(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<ArchivedQuery>,
) -> Result<Json<FolderTree>, ApiError> {
    Ok(Json(state.folder_service.tree(&auth, query.archived).await?))
}

/// GET /api/admin/folders/contents
pub async fn contents(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<FolderPathQuery>,
) -> Result<Json<FolderListing>, ApiError> {
    let listing = state
        .folder_service
        .contents(&auth, &query.path, query.archived)
        .await?;
    Ok(Json(listing))
}

/// PUT /api/admin/folders/rename
pub async fn rename(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<RenameFolderRequest>,
) -> Result<Json<CountResponse>, ApiError> {
    let count = state
        .folder_service
        .rename(&auth, &req.path, &req.new_path)
        .await?;
    Ok(Json(CountResponse { count }))
}

/// DELETE /api/admin/folders
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<FolderPathQuery>,
) -> Result<Json<CountResponse>, ApiError> {
    let count = state.folder_service.delete(&auth, &query.path).await?;
    Ok(Json(CountResponse { count }))
}

/// POST /api/admin/folders/archive
pub async fn archive(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<ArchiveFolderRequest>,
) -> Result<Json<CountResponse>, ApiError> {
    let count = state
        .folder_service
        .set_archived(&auth, &req.path, req.archived)
        .await?;
    Ok(Json(CountResponse { count }))
}
