//! Role guard for the admin route tree.

use axum::extract::{FromRequestParts, Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Checks that the authenticated user is an admin.
pub fn require_admin(auth: &AuthUser) -> Result<(), ApiError> {
    auth.require_admin()?;
    Ok(())
}

/// Middleware for `/api/admin`: 401 without a valid token, 403 for clients.
pub async fn admin_only(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (mut parts, body) = request.into_parts();
    let auth = AuthUser::from_request_parts(&mut parts, &state).await?;
    require_admin(&auth)?;
    Ok(next.run(Request::from_parts(parts, body)).await)
}
