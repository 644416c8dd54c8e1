//! Testimonial repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use ledgerdesk_core::error::{AppError, ErrorKind};
use ledgerdesk_core::result::AppResult;
use ledgerdesk_entity::testimonial::{CreateTestimonial, Testimonial, UpdateTestimonial};

/// Repository for testimonials.
#[derive(Debug, Clone)]
pub struct TestimonialRepository {
    pool: PgPool,
}

impl TestimonialRepository {
    /// Create a new testimonial repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Testimonials in display order, optionally only published ones.
    pub async fn find_all(&self, published_only: bool) -> AppResult<Vec<Testimonial>> {
        sqlx::query_as::<_, Testimonial>(
            "SELECT * FROM testimonials WHERE (NOT $1 OR is_published) \
             ORDER BY display_order ASC, created_at ASC",
        )
        .bind(published_only)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list testimonials", e))
    }

    /// Find a testimonial by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Testimonial>> {
        sqlx::query_as::<_, Testimonial>("SELECT * FROM testimonials WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find testimonial", e))
    }

    /// Create a testimonial.
    pub async fn create(&self, data: &CreateTestimonial) -> AppResult<Testimonial> {
        sqlx::query_as::<_, Testimonial>(
            "INSERT INTO testimonials \
                 (id, author_name, author_title, company, content, rating, is_published, display_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.author_name)
        .bind(&data.author_title)
        .bind(&data.company)
        .bind(&data.content)
        .bind(data.rating)
        .bind(data.is_published)
        .bind(data.display_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create testimonial", e))
    }

    /// Update a testimonial.
    pub async fn update(&self, id: Uuid, data: &UpdateTestimonial) -> AppResult<Testimonial> {
        sqlx::query_as::<_, Testimonial>(
            "UPDATE testimonials SET author_name = COALESCE($2, author_name), \
                                     author_title = COALESCE($3, author_title), \
                                     company = COALESCE($4, company), \
                                     content = COALESCE($5, content), \
                                     rating = COALESCE($6, rating), \
                                     is_published = COALESCE($7, is_published), \
                                     display_order = COALESCE($8, display_order), \
                                     updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.author_name)
        .bind(&data.author_title)
        .bind(&data.company)
        .bind(&data.content)
        .bind(data.rating)
        .bind(data.is_published)
        .bind(data.display_order)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update testimonial", e))?
        .ok_or_else(|| AppError::not_found(format!("Testimonial {id} not found")))
    }

    /// Delete a testimonial.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete testimonial", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
