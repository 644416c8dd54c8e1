//! Client testimonials shown on the public site.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use ledgerdesk_core::error::AppError;
use ledgerdesk_database::repositories::TestimonialRepository;
use ledgerdesk_entity::testimonial::{
    CreateTestimonial, MAX_RATING, MIN_RATING, Testimonial, UpdateTestimonial,
};

use crate::context::RequestContext;

/// Public listing and admin CRUD for testimonials.
#[derive(Debug, Clone)]
pub struct TestimonialService {
    repo: Arc<TestimonialRepository>,
}

impl TestimonialService {
    /// Creates a new testimonial service.
    pub fn new(repo: Arc<TestimonialRepository>) -> Self {
        Self { repo }
    }

    /// Published testimonials in display order.
    pub async fn list_published(&self) -> Result<Vec<Testimonial>, AppError> {
        self.repo.find_all(true).await
    }

    /// Every testimonial, for the admin console.
    pub async fn list_all(&self, ctx: &RequestContext) -> Result<Vec<Testimonial>, AppError> {
        ctx.require_admin()?;
        self.repo.find_all(false).await
    }

    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Testimonial, AppError> {
        ctx.require_admin()?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Testimonial not found"))
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        mut data: CreateTestimonial,
    ) -> Result<Testimonial, AppError> {
        ctx.require_admin()?;
        data.author_name = required(&data.author_name, "Author name")?;
        data.content = required(&data.content, "Content")?;
        check_rating(data.rating)?;

        let testimonial = self.repo.create(&data).await?;
        info!(admin_id = %ctx.user_id, testimonial_id = %testimonial.id, "Testimonial created");
        Ok(testimonial)
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        mut data: UpdateTestimonial,
    ) -> Result<Testimonial, AppError> {
        ctx.require_admin()?;
        data.author_name = data
            .author_name
            .as_deref()
            .map(|name| required(name, "Author name"))
            .transpose()?;
        data.content = data
            .content
            .as_deref()
            .map(|content| required(content, "Content"))
            .transpose()?;
        if let Some(rating) = data.rating {
            check_rating(rating)?;
        }
        self.repo.update(id, &data).await
    }

    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        ctx.require_admin()?;
        if !self.repo.delete(id).await? {
            return Err(AppError::not_found("Testimonial not found"));
        }
        Ok(())
    }
}

fn required(value: &str, field: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

fn check_rating(rating: i32) -> Result<(), AppError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(AppError::validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(check_rating(1).is_ok());
        assert!(check_rating(5).is_ok());
        assert!(check_rating(0).is_err());
        assert!(check_rating(6).is_err());
    }
}
