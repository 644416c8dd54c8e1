//! Admin user management: provisioning, edits, password resets, removal.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use ledgerdesk_auth::{PasswordHasher, PasswordValidator, generate_temporary_password};
use ledgerdesk_core::error::AppError;
use ledgerdesk_core::traits::{Mailer, ObjectStore};
use ledgerdesk_core::types::pagination::{PageRequest, PageResponse};
use ledgerdesk_database::repositories::{FileRepository, UserRepository};
use ledgerdesk_entity::user::{CreateUser, UpdateUser, User, UserRole};

use crate::auth::SessionValidator;
use crate::cleanup::delete_objects;
use crate::context::RequestContext;
use crate::mail::templates;

/// Request to provision a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    /// Display name.
    pub name: String,
    /// Email (unique, case-insensitive).
    pub email: String,
    /// Role assignment.
    pub role: UserRole,
    /// Company name.
    pub company: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Initial password. Generated when absent.
    pub password: Option<String>,
}

/// Request to update a user (admin).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminUpdateUserRequest {
    /// New display name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New role.
    pub role: Option<UserRole>,
    /// New company.
    pub company: Option<String>,
    /// New phone.
    pub phone: Option<String>,
}

/// A newly created user and the outcome of the welcome email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedUser {
    /// The created user.
    pub user: User,
    /// Whether the welcome email was delivered.
    pub email_sent: bool,
}

/// Handles administrative user management operations.
#[derive(Debug, Clone)]
pub struct AdminUserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// File repository, for cleaning up a removed user's uploads.
    file_repo: Arc<FileRepository>,
    /// Object store.
    store: Arc<dyn ObjectStore>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    validator: Arc<PasswordValidator>,
    /// Outbound mail.
    mailer: Arc<dyn Mailer>,
    /// Session cache to clear when an account changes.
    sessions: Arc<SessionValidator>,
    /// Portal URL used in welcome emails.
    portal_url: String,
}

impl AdminUserService {
    /// Creates a new admin user service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<UserRepository>,
        file_repo: Arc<FileRepository>,
        store: Arc<dyn ObjectStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        mailer: Arc<dyn Mailer>,
        sessions: Arc<SessionValidator>,
        portal_url: String,
    ) -> Self {
        Self {
            user_repo,
            file_repo,
            store,
            hasher,
            validator,
            mailer,
            sessions,
            portal_url,
        }
    }

    /// Lists users, optionally filtered by a search term and role.
    pub async fn list_users(
        &self,
        ctx: &RequestContext,
        search: Option<&str>,
        role: Option<UserRole>,
        page: PageRequest,
    ) -> Result<PageResponse<User>, AppError> {
        ctx.require_admin()?;
        self.user_repo.search(search, role, &page).await
    }

    /// Gets a single user by ID.
    pub async fn get_user(&self, ctx: &RequestContext, user_id: Uuid) -> Result<User, AppError> {
        ctx.require_admin()?;
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Creates a user and sends the welcome email.
    ///
    /// A failed email is logged and reported through `email_sent`; the
    /// account is still created.
    pub async fn create_user(
        &self,
        ctx: &RequestContext,
        req: CreateUserRequest,
    ) -> Result<CreatedUser, AppError> {
        ctx.require_admin()?;

        let name = req.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Name is required"));
        }
        let email = req.email.trim();

        let (password, generated) = match req.password {
            Some(password) => {
                self.validator.validate(&password)?;
                (password, false)
            }
            None => (generate_temporary_password(), true),
        };
        let password_hash = self.hasher.hash_password(&password)?;

        let user = self
            .user_repo
            .create(&CreateUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash: Some(password_hash),
                role: req.role,
                company: req.company,
                phone: req.phone,
                created_by: Some(ctx.user_id),
            })
            .await?;

        info!(
            admin_id = %ctx.user_id,
            new_user_id = %user.id,
            role = %user.role,
            "User created by admin"
        );

        let message = templates::welcome(
            &user,
            generated.then_some(password.as_str()),
            &self.portal_url,
        );
        let email_sent = match self.mailer.send(&message).await {
            Ok(()) => true,
            Err(e) => {
                warn!(user_id = %user.id, error = %e, "Welcome email failed");
                false
            }
        };

        Ok(CreatedUser { user, email_sent })
    }

    /// Updates a user's profile fields and role.
    ///
    /// A role change signs the user out of every session.
    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        req: AdminUpdateUserRequest,
    ) -> Result<User, AppError> {
        ctx.require_admin()?;

        if user_id == ctx.user_id && req.role.is_some_and(|r| !r.is_admin()) {
            return Err(AppError::forbidden("You cannot remove your own admin role"));
        }
        if req.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(AppError::validation("Name cannot be empty"));
        }

        let user = self
            .user_repo
            .update(
                user_id,
                &UpdateUser {
                    name: req.name.map(|n| n.trim().to_string()),
                    email: req.email.map(|e| e.trim().to_string()),
                    role: req.role,
                    company: req.company,
                    phone: req.phone,
                    image_url: None,
                },
            )
            .await?;
        self.sessions.forget(user.id).await;

        info!(admin_id = %ctx.user_id, user_id = %user.id, "User updated by admin");
        Ok(user)
    }

    /// Sets a user's password (admin reset). Clears any lockout and signs
    /// the user out of every session.
    pub async fn set_password(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        new_password: &str,
    ) -> Result<(), AppError> {
        ctx.require_admin()?;
        self.validator.validate(new_password)?;

        let hash = self.hasher.hash_password(new_password)?;
        self.user_repo.update_password(user_id, &hash).await?;
        self.sessions.forget(user_id).await;

        info!(admin_id = %ctx.user_id, user_id = %user_id, "Password reset by admin");
        Ok(())
    }

    /// Deletes a user together with their uploaded files.
    ///
    /// File rows, responses, notifications, and identities go with the
    /// user row; the uploaded objects are removed afterwards.
    pub async fn delete_user(&self, ctx: &RequestContext, user_id: Uuid) -> Result<(), AppError> {
        ctx.require_admin()?;

        if user_id == ctx.user_id {
            return Err(AppError::forbidden("You cannot delete your own account"));
        }

        let keys = self.file_repo.object_keys_for_uploader(user_id).await?;
        if !self.user_repo.delete(user_id).await? {
            return Err(AppError::not_found("User not found"));
        }
        self.sessions.forget(user_id).await;

        let removed = delete_objects(self.store.as_ref(), &keys).await;
        info!(
            admin_id = %ctx.user_id,
            user_id = %user_id,
            objects_removed = removed,
            "User deleted by admin"
        );
        Ok(())
    }
}
