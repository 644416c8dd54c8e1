//! Admin testimonial handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use ledgerdesk_entity::testimonial::{CreateTestimonial, Testimonial, UpdateTestimonial};

use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiPath, AuthUser};
use crate::state::AppState;

/// GET /api/admin/testimonials
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Testimonial>>, ApiError> {
    Ok(Json(state.testimonial_service.list_all(&auth).await?))
}

/// POST /api/admin/testimonials
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(data): ApiJson<CreateTestimonial>,
) -> Result<(StatusCode, Json<Testimonial>), ApiError> {
    let testimonial = state.testimonial_service.create(&auth, data).await?;
    Ok((StatusCode::CREATED, Json(testimonial)))
}

/// GET /api/admin/testimonials/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Testimonial>, ApiError> {
    Ok(Json(state.testimonial_service.get(&auth, id).await?))
}

/// PUT /api/admin/testimonials/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(data): ApiJson<UpdateTestimonial>,
) -> Result<Json<Testimonial>, ApiError> {
    Ok(Json(state.testimonial_service.update(&auth, id, data).await?))
}

/// DELETE /api/admin/testimonials/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.testimonial_service.delete(&auth, id).await?;
    Ok(Json(MessageResponse::new("Testimonial deleted")))
}
