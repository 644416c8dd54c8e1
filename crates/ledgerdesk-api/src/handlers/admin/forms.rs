//! Admin form builder and response handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use ledgerdesk_entity::form::{
    FieldDefinition, Form, FormDetail, FormField, FormSummary, ResponseDetail, ResponseWithUser,
};
use ledgerdesk_service::form::{CreateFormRequest, UpdateFormRequest};

use crate::dto::request::ReorderFieldsRequest;
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiPath, AuthUser};
use crate::state::AppState;

/// GET /api/admin/forms
pub async fn list_forms(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<FormSummary>>, ApiError> {
    Ok(Json(state.form_builder_service.list_forms(&auth).await?))
}

/// POST /api/admin/forms
pub async fn create_form(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateFormRequest>,
) -> Result<(StatusCode, Json<Form>), ApiError> {
    let form = state.form_builder_service.create_form(&auth, req).await?;
    Ok((StatusCode::CREATED, Json(form)))
}

/// GET /api/admin/forms/{id}
pub async fn get_form(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<FormDetail>, ApiError> {
    Ok(Json(state.form_builder_service.get_form(&auth, id).await?))
}

/// PUT /api/admin/forms/{id}
pub async fn update_form(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateFormRequest>,
) -> Result<Json<Form>, ApiError> {
    Ok(Json(
        state.form_builder_service.update_form(&auth, id, req).await?,
    ))
}

/// POST /api/admin/forms/{id}/publish
pub async fn publish_form(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Form>, ApiError> {
    Ok(Json(
        state.form_builder_service.set_published(&auth, id, true).await?,
    ))
}

/// POST /api/admin/forms/{id}/unpublish
pub async fn unpublish_form(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Form>, ApiError> {
    Ok(Json(
        state.form_builder_service.set_published(&auth, id, false).await?,
    ))
}

/// DELETE /api/admin/forms/{id}
pub async fn delete_form(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.form_builder_service.delete_form(&auth, id).await?;
    Ok(Json(MessageResponse::new("Form deleted")))
}

/// POST /api/admin/forms/{id}/fields
pub async fn add_field(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(definition): ApiJson<FieldDefinition>,
) -> Result<(StatusCode, Json<FormField>), ApiError> {
    let field = state
        .form_builder_service
        .add_field(&auth, id, definition)
        .await?;
    Ok((StatusCode::CREATED, Json(field)))
}

/// PUT /api/admin/forms/{id}/fields/{field_id}
pub async fn update_field(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath((id, field_id)): ApiPath<(Uuid, Uuid)>,
    ApiJson(definition): ApiJson<FieldDefinition>,
) -> Result<Json<FormField>, ApiError> {
    let field = state
        .form_builder_service
        .update_field(&auth, id, field_id, definition)
        .await?;
    Ok(Json(field))
}

/// DELETE /api/admin/forms/{id}/fields/{field_id}
pub async fn delete_field(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath((id, field_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .form_builder_service
        .delete_field(&auth, id, field_id)
        .await?;
    Ok(Json(MessageResponse::new("Field deleted")))
}

/// PUT /api/admin/forms/{id}/field-order
pub async fn reorder_fields(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<ReorderFieldsRequest>,
) -> Result<Json<FormDetail>, ApiError> {
    let detail = state
        .form_builder_service
        .reorder_fields(&auth, id, &req.field_ids)
        .await?;
    Ok(Json(detail))
}

/// GET /api/admin/forms/{id}/responses
pub async fn list_responses(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Vec<ResponseWithUser>>, ApiError> {
    Ok(Json(state.form_builder_service.responses(&auth, id).await?))
}

/// GET /api/admin/responses/{id}
pub async fn get_response(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ResponseDetail>, ApiError> {
    Ok(Json(state.form_builder_service.get_response(&auth, id).await?))
}

/// DELETE /api/admin/responses/{id}
pub async fn delete_response(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.form_builder_service.delete_response(&auth, id).await?;
    Ok(Json(MessageResponse::new("Response deleted")))
}
