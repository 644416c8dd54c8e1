//! Authentication handlers.

use axum::Json;
use axum::extract::State;

use ledgerdesk_entity::user::User;
use ledgerdesk_service::auth::LoginResponse;

use crate::dto::request::{LoginRequest, OAuthLoginRequest};
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::{ApiPath, AuthUser, ValidJson};
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let response = state.auth_service.login(&req.email, &req.password).await?;
    Ok(Json(response))
}

/// POST /api/auth/oauth/{provider}
pub async fn oauth_login(
    State(state): State<AppState>,
    ApiPath(provider): ApiPath<String>,
    ValidJson(req): ValidJson<OAuthLoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let response = state
        .auth_service
        .oauth_login(&provider, &req.access_token)
        .await?;
    Ok(Json(response))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MessageResponse>, ApiError> {
    state.auth_service.logout(&auth).await?;
    Ok(Json(MessageResponse::new("Logged out")))
}

/// GET /api/auth/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> Result<Json<User>, ApiError> {
    Ok(Json(state.auth_service.me(&auth).await?))
}
