//! Contact request repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use ledgerdesk_core::error::{AppError, ErrorKind};
use ledgerdesk_core::result::AppResult;
use ledgerdesk_core::types::pagination::{PageRequest, PageResponse};
use ledgerdesk_entity::contact::{ContactRequest, CreateContactRequest};

/// Repository for contact requests.
#[derive(Debug, Clone)]
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    /// Create a new contact repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List requests, newest first, optionally filtered by open state.
    pub async fn find_all(
        &self,
        is_open: Option<bool>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ContactRequest>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM contact_requests WHERE ($1::bool IS NULL OR is_open = $1)",
        )
        .bind(is_open)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count requests", e))?;

        let requests = sqlx::query_as::<_, ContactRequest>(
            "SELECT * FROM contact_requests WHERE ($1::bool IS NULL OR is_open = $1) \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(is_open)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list requests", e))?;

        Ok(PageResponse::new(requests, page, total as u64))
    }

    /// Record a new request.
    pub async fn create(&self, data: &CreateContactRequest) -> AppResult<ContactRequest> {
        sqlx::query_as::<_, ContactRequest>(
            "INSERT INTO contact_requests (id, name, email, phone, company, service, message) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.company)
        .bind(&data.service)
        .bind(&data.message)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create request", e))
    }

    /// Close or reopen a request.
    pub async fn set_open(&self, id: Uuid, open: bool) -> AppResult<ContactRequest> {
        sqlx::query_as::<_, ContactRequest>(
            "UPDATE contact_requests \
             SET is_open = $2, closed_at = CASE WHEN $2 THEN NULL ELSE now() END \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(open)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update request", e))?
        .ok_or_else(|| AppError::not_found(format!("Contact request {id} not found")))
    }

    /// Delete a request.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM contact_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete request", e))?;
        Ok(result.rows_affected() > 0)
    }
}
