//! Curated resource links.

use std::sync::Arc;

use uuid::Uuid;

use ledgerdesk_core::error::AppError;
use ledgerdesk_database::repositories::LinkRepository;
use ledgerdesk_entity::contact::{CreateLink, Link, UpdateLink};

use crate::context::RequestContext;

/// Public listing and admin CRUD for links.
#[derive(Debug, Clone)]
pub struct LinkService {
    repo: Arc<LinkRepository>,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(repo: Arc<LinkRepository>) -> Self {
        Self { repo }
    }

    /// Active links in display order.
    pub async fn list_active(&self) -> Result<Vec<Link>, AppError> {
        self.repo.find_all(true).await
    }

    pub async fn list_all(&self, ctx: &RequestContext) -> Result<Vec<Link>, AppError> {
        ctx.require_admin()?;
        self.repo.find_all(false).await
    }

    pub async fn create(&self, ctx: &RequestContext, mut data: CreateLink) -> Result<Link, AppError> {
        ctx.require_admin()?;
        data.title = data.title.trim().to_string();
        if data.title.is_empty() {
            return Err(AppError::validation("Link title is required"));
        }
        data.url = check_url(&data.url)?;
        self.repo.create(&data).await
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        mut data: UpdateLink,
    ) -> Result<Link, AppError> {
        ctx.require_admin()?;
        if data.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(AppError::validation("Link title cannot be empty"));
        }
        data.title = data.title.map(|t| t.trim().to_string());
        data.url = data.url.as_deref().map(check_url).transpose()?;
        self.repo.update(id, &data).await
    }

    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        ctx.require_admin()?;
        if !self.repo.delete(id).await? {
            return Err(AppError::not_found("Link not found"));
        }
        Ok(())
    }
}

/// Only absolute http(s) URLs are accepted.
fn check_url(url: &str) -> Result<String, AppError> {
    let url = url.trim();
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| AppError::validation("Link URL must start with http:// or https://"))?;
    if rest.is_empty() || rest.starts_with('/') || url.chars().any(char::is_whitespace) {
        return Err(AppError::validation("Link URL is not valid"));
    }
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_url() {
        assert_eq!(check_url(" https://irs.gov/forms ").unwrap(), "https://irs.gov/forms");
        assert!(check_url("http://example.test").is_ok());
        assert!(check_url("javascript:alert(1)").is_err());
        assert!(check_url("https://").is_err());
        assert!(check_url("https://bad host").is_err());
    }
}
