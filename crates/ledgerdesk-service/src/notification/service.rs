//! Notification inbox and best-effort delivery.

use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use ledgerdesk_core::error::AppError;
use ledgerdesk_core::types::pagination::{PageRequest, PageResponse};
use ledgerdesk_database::repositories::{NotificationRepository, UserRepository};
use ledgerdesk_entity::notification::{CreateNotification, Notification};

use crate::context::RequestContext;

/// A page of notifications plus the caller's unread count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPage {
    /// Requested page, newest first.
    #[serde(flatten)]
    pub page: PageResponse<Notification>,
    /// Unread notifications across all pages.
    pub unread: i64,
}

/// Manages user notifications.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification repository.
    notif_repo: Arc<NotificationRepository>,
    /// User repository, for resolving admin recipients.
    user_repo: Arc<UserRepository>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(notif_repo: Arc<NotificationRepository>, user_repo: Arc<UserRepository>) -> Self {
        Self {
            notif_repo,
            user_repo,
        }
    }

    /// Lists notifications for the current user.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<NotificationPage, AppError> {
        let items = self.notif_repo.find_by_user(ctx.user_id, &page).await?;
        let unread = self.notif_repo.count_unread(ctx.user_id).await?;
        Ok(NotificationPage {
            page: items,
            unread,
        })
    }

    /// Marks one of the caller's notifications as read.
    pub async fn mark_read(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        if !self.notif_repo.mark_read(id, ctx.user_id).await? {
            return Err(AppError::not_found("Notification not found"));
        }
        Ok(())
    }

    /// Marks all of the caller's notifications as read.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> Result<u64, AppError> {
        self.notif_repo.mark_all_read(ctx.user_id).await
    }

    /// Deletes one of the caller's notifications.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        if !self.notif_repo.delete(id, ctx.user_id).await? {
            return Err(AppError::not_found("Notification not found"));
        }
        Ok(())
    }

    /// Deliver a notification. Failures are logged, never returned.
    pub async fn notify(&self, notification: CreateNotification) {
        match self.notif_repo.create(&notification).await {
            Ok(created) => {
                debug!(user_id = %created.user_id, notification_id = %created.id, "Notification created");
            }
            Err(e) => {
                warn!(user_id = %notification.user_id, error = %e, "Failed to create notification");
            }
        }
    }

    /// Notify every admin. Failures are logged, never returned.
    pub async fn notify_admins(&self, title: &str, message: &str, link: Option<&str>) {
        let admins = match self.user_repo.find_admins().await {
            Ok(admins) => admins,
            Err(e) => {
                warn!(error = %e, "Failed to resolve admins for notification");
                return;
            }
        };

        join_all(admins.into_iter().map(|admin| {
            self.notify(CreateNotification {
                user_id: admin.id,
                title: title.to_string(),
                message: message.to_string(),
                link: link.map(str::to_string),
            })
        }))
        .await;
    }
}
