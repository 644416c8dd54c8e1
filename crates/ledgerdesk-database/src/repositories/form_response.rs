//! Form response repository implementation.

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use ledgerdesk_core::error::{AppError, ErrorKind};
use ledgerdesk_core::result::AppResult;
use ledgerdesk_entity::form::{FormAnswer, FormResponse, ResponseDetail, ResponseWithUser};

const ONE_RESPONSE_PER_USER: &str = "form_responses_form_id_user_id_key";

/// Repository for form submissions.
#[derive(Debug, Clone)]
pub struct FormResponseRepository {
    pool: PgPool,
}

impl FormResponseRepository {
    /// Create a new response repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The response a user gave to a form, if any.
    pub async fn find_by_form_and_user(
        &self,
        form_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<FormResponse>> {
        sqlx::query_as::<_, FormResponse>(
            "SELECT * FROM form_responses WHERE form_id = $1 AND user_id = $2",
        )
        .bind(form_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find response", e))
    }

    /// IDs of every form the user has responded to.
    pub async fn form_ids_for_user(&self, user_id: Uuid) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar("SELECT form_id FROM form_responses WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list responded forms", e)
            })
    }

    /// Store a response and its answers atomically.
    ///
    /// A second response from the same user is rejected with a conflict.
    pub async fn submit(
        &self,
        form_id: Uuid,
        user_id: Uuid,
        answers: &[(Uuid, Value)],
    ) -> AppResult<ResponseDetail> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let response = sqlx::query_as::<_, FormResponse>(
            "INSERT INTO form_responses (id, form_id, user_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(form_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some(ONE_RESPONSE_PER_USER) =>
            {
                AppError::conflict("You have already responded to this form")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create response", e),
        })?;

        let mut stored = Vec::with_capacity(answers.len());
        for (field_id, value) in answers {
            let answer = sqlx::query_as::<_, FormAnswer>(
                "INSERT INTO form_answers (id, response_id, field_id, value) \
                 VALUES ($1, $2, $3, $4) RETURNING *",
            )
            .bind(Uuid::new_v4())
            .bind(response.id)
            .bind(field_id)
            .bind(value)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to store answer", e))?;
            stored.push(answer);
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit response", e)
        })?;

        Ok(ResponseDetail {
            response,
            answers: stored,
        })
    }

    /// Responses to a form with respondent details, newest first.
    pub async fn find_by_form(&self, form_id: Uuid) -> AppResult<Vec<ResponseWithUser>> {
        sqlx::query_as::<_, ResponseWithUser>(
            "SELECT r.*, u.name AS user_name, u.email AS user_email \
             FROM form_responses r JOIN users u ON u.id = r.user_id \
             WHERE r.form_id = $1 ORDER BY r.submitted_at DESC",
        )
        .bind(form_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list responses", e))
    }

    /// Find a response by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<FormResponse>> {
        sqlx::query_as::<_, FormResponse>("SELECT * FROM form_responses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find response", e))
    }

    /// Answers belonging to a response.
    pub async fn answers(&self, response_id: Uuid) -> AppResult<Vec<FormAnswer>> {
        sqlx::query_as::<_, FormAnswer>("SELECT * FROM form_answers WHERE response_id = $1")
            .bind(response_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load answers", e))
    }

    /// Delete a response and its answers.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM form_responses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete response", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
