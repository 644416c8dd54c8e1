//! Resource link repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use ledgerdesk_core::error::{AppError, ErrorKind};
use ledgerdesk_core::result::AppResult;
use ledgerdesk_entity::contact::{CreateLink, Link, UpdateLink};

/// Repository for curated links.
#[derive(Debug, Clone)]
pub struct LinkRepository {
    pool: PgPool,
}

impl LinkRepository {
    /// Create a new link repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Links in display order, optionally only active ones.
    pub async fn find_all(&self, active_only: bool) -> AppResult<Vec<Link>> {
        sqlx::query_as::<_, Link>(
            "SELECT * FROM links WHERE (NOT $1 OR is_active) ORDER BY display_order ASC, title ASC",
        )
        .bind(active_only)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list links", e))
    }

    /// Create a link.
    pub async fn create(&self, data: &CreateLink) -> AppResult<Link> {
        sqlx::query_as::<_, Link>(
            "INSERT INTO links (id, title, url, description, display_order, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.title)
        .bind(&data.url)
        .bind(&data.description)
        .bind(data.display_order)
        .bind(data.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create link", e))
    }

    /// Update a link.
    pub async fn update(&self, id: Uuid, data: &UpdateLink) -> AppResult<Link> {
        sqlx::query_as::<_, Link>(
            "UPDATE links SET title = COALESCE($2, title), \
                              url = COALESCE($3, url), \
                              description = COALESCE($4, description), \
                              display_order = COALESCE($5, display_order), \
                              is_active = COALESCE($6, is_active), \
                              updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.url)
        .bind(&data.description)
        .bind(data.display_order)
        .bind(data.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update link", e))?
        .ok_or_else(|| AppError::not_found(format!("Link {id} not found")))
    }

    /// Delete a link.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete link", e))?;
        Ok(result.rows_affected() > 0)
    }
}
