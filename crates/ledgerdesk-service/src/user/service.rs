//! Self-service profile and password management.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use ledgerdesk_auth::{PasswordHasher, PasswordValidator};
use ledgerdesk_core::error::AppError;
use ledgerdesk_database::repositories::UserRepository;
use ledgerdesk_entity::user::{UpdateUser, User};

use crate::auth::SessionValidator;
use crate::context::RequestContext;

/// Fields a user may change on their own profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// Display name.
    pub name: Option<String>,
    /// Company name.
    pub company: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Avatar URL.
    pub image_url: Option<String>,
}

/// Handles the current user's own account.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    validator: Arc<PasswordValidator>,
    /// Session cache to clear after a password change.
    sessions: Arc<SessionValidator>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        sessions: Arc<SessionValidator>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            validator,
            sessions,
        }
    }

    /// Gets the current user's profile.
    pub async fn get_profile(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Updates the current user's profile.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        req: UpdateProfileRequest,
    ) -> Result<User, AppError> {
        let name = match req.name {
            Some(name) if name.trim().is_empty() => {
                return Err(AppError::validation("Name cannot be empty"));
            }
            Some(name) => Some(name.trim().to_string()),
            None => None,
        };

        let user = self
            .user_repo
            .update(
                ctx.user_id,
                &UpdateUser {
                    name,
                    company: req.company,
                    phone: req.phone,
                    image_url: req.image_url,
                    ..UpdateUser::default()
                },
            )
            .await?;

        info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }

    /// Changes the current user's password after checking the old one.
    ///
    /// Every token issued so far, including the caller's, stops working.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user = self.get_profile(ctx).await?;

        let Some(hash) = user.password_hash.as_deref() else {
            return Err(AppError::validation(
                "This account signs in with an external provider and has no password",
            ));
        };

        if !self.hasher.verify_password(current_password, hash)? {
            return Err(AppError::validation("Current password is incorrect"));
        }

        self.validator.validate_not_same(current_password, new_password)?;
        self.validator.validate(new_password)?;

        let new_hash = self.hasher.hash_password(new_password)?;
        self.user_repo.update_password(user.id, &new_hash).await?;
        self.sessions.forget(user.id).await;

        info!(user_id = %user.id, "Password changed");
        Ok(())
    }
}
