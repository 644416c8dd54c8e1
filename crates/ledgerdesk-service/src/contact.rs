//! Contact requests submitted from the public site.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use ledgerdesk_core::error::AppError;
use ledgerdesk_core::types::pagination::{PageRequest, PageResponse};
use ledgerdesk_database::repositories::ContactRepository;
use ledgerdesk_entity::contact::{ContactRequest, CreateContactRequest};

use crate::context::RequestContext;
use crate::notification::NotificationService;

const MAX_MESSAGE_LEN: usize = 5000;

/// Accepts contact requests and lets admins work through them.
#[derive(Debug, Clone)]
pub struct ContactService {
    repo: Arc<ContactRepository>,
    notifications: Arc<NotificationService>,
}

impl ContactService {
    /// Creates a new contact service.
    pub fn new(repo: Arc<ContactRepository>, notifications: Arc<NotificationService>) -> Self {
        Self {
            repo,
            notifications,
        }
    }

    /// Store a request from the public site and alert the admins.
    pub async fn submit(&self, data: CreateContactRequest) -> Result<ContactRequest, AppError> {
        let data = clean(data)?;
        let request = self.repo.create(&data).await?;

        info!(contact_id = %request.id, "Contact request received");
        self.notifications
            .notify_admins(
                "New contact request",
                &format!("{} <{}> sent a message", request.name, request.email),
                Some(&format!("/admin/contacts/{}", request.id)),
            )
            .await;

        Ok(request)
    }

    /// Requests, optionally only open or only closed ones.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        is_open: Option<bool>,
        page: PageRequest,
    ) -> Result<PageResponse<ContactRequest>, AppError> {
        ctx.require_admin()?;
        self.repo.find_all(is_open, &page).await
    }

    /// Close or reopen a request.
    pub async fn set_open(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        open: bool,
    ) -> Result<ContactRequest, AppError> {
        ctx.require_admin()?;
        let request = self.repo.set_open(id, open).await?;
        info!(admin_id = %ctx.user_id, contact_id = %id, open, "Contact request updated");
        Ok(request)
    }

    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        ctx.require_admin()?;
        if !self.repo.delete(id).await? {
            return Err(AppError::not_found("Contact request not found"));
        }
        Ok(())
    }
}

fn clean(data: CreateContactRequest) -> Result<CreateContactRequest, AppError> {
    let name = data.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::validation("Name is required"));
    }

    let email = data.email.trim().to_string();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => {}
        _ => return Err(AppError::validation("A valid email address is required")),
    }

    let message = data.message.trim().to_string();
    if message.is_empty() {
        return Err(AppError::validation("Message is required"));
    }
    if message.chars().count() > MAX_MESSAGE_LEN {
        return Err(AppError::validation(format!(
            "Message cannot exceed {MAX_MESSAGE_LEN} characters"
        )));
    }

    let optional = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

    Ok(CreateContactRequest {
        name,
        email,
        phone: optional(data.phone),
        company: optional(data.company),
        service: optional(data.service),
        message,
    })
}

#[cfg(test)]
mod tests {
    use ledgerdesk_core::error::ErrorKind;

    use super::*;

    fn request(email: &str, message: &str) -> CreateContactRequest {
        CreateContactRequest {
            name: " Riley ".into(),
            email: email.into(),
            phone: Some("  ".into()),
            company: Some(" Acme ".into()),
            service: None,
            message: message.into(),
        }
    }

    #[test]
    fn test_clean_trims_and_drops_blanks() {
        let cleaned = clean(request("riley@acme.test", " Need help with payroll ")).unwrap();
        assert_eq!(cleaned.name, "Riley");
        assert_eq!(cleaned.phone, None);
        assert_eq!(cleaned.company.as_deref(), Some("Acme"));
        assert_eq!(cleaned.message, "Need help with payroll");
    }

    #[test]
    fn test_clean_rejects_bad_input() {
        let err = clean(request("not-an-email", "hi")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = clean(request("riley@acme.test", "   ")).unwrap_err();
        assert_eq!(err.message, "Message is required");
    }
}
