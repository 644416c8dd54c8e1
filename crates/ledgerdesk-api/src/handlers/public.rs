//! Unauthenticated endpoints for the marketing site.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use ledgerdesk_core::types::pagination::PageResponse;
use ledgerdesk_entity::blog::BlogPost;
use ledgerdesk_entity::contact::{ContactRequest, Link};
use ledgerdesk_entity::testimonial::Testimonial;

use crate::dto::request::ContactFormRequest;
use crate::error::ApiError;
use crate::extractors::{ApiPath, ApiQuery, PaginationParams, ValidJson};
use crate::state::AppState;

/// GET /api/testimonials
pub async fn list_testimonials(
    State(state): State<AppState>,
) -> Result<Json<Vec<Testimonial>>, ApiError> {
    Ok(Json(state.testimonial_service.list_published().await?))
}

/// POST /api/contact
pub async fn submit_contact(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<ContactFormRequest>,
) -> Result<(StatusCode, Json<ContactRequest>), ApiError> {
    let request = state.contact_service.submit(req.into()).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /api/links
pub async fn list_links(State(state): State<AppState>) -> Result<Json<Vec<Link>>, ApiError> {
    Ok(Json(state.link_service.list_active().await?))
}

/// GET /api/blog
pub async fn list_posts(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<Json<PageResponse<BlogPost>>, ApiError> {
    let posts = state
        .blog_service
        .list_published(params.into_page_request())
        .await?;
    Ok(Json(posts))
}

/// GET /api/blog/{slug}
pub async fn get_post(
    State(state): State<AppState>,
    ApiPath(slug): ApiPath<String>,
) -> Result<Json<BlogPost>, ApiError> {
    Ok(Json(state.blog_service.get_published(&slug).await?))
}
