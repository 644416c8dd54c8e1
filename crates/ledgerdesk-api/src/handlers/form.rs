//! Client form handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use ledgerdesk_entity::form::{ClientFormSummary, FormDetail, ResponseDetail};

use crate::dto::request::SubmitResponseRequest;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiPath, AuthUser};
use crate::state::AppState;

/// GET /api/forms
pub async fn list_forms(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<ClientFormSummary>>, ApiError> {
    Ok(Json(state.form_fill_service.list_published(&auth).await?))
}

/// GET /api/forms/{id}
pub async fn get_form(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<FormDetail>, ApiError> {
    Ok(Json(state.form_fill_service.get_published(id).await?))
}

/// POST /api/forms/{id}/responses
pub async fn submit_response(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<SubmitResponseRequest>,
) -> Result<(StatusCode, Json<ResponseDetail>), ApiError> {
    let detail = state
        .form_fill_service
        .submit(&auth, id, req.answers)
        .await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /api/forms/{id}/responses/me
pub async fn my_response(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ResponseDetail>, ApiError> {
    Ok(Json(state.form_fill_service.my_response(&auth, id).await?))
}
