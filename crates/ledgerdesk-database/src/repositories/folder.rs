//! Virtual folder queries over the `files` table.
//!
//! Folders have no table of their own. Every query here selects rows by
//! the subtree predicate below, which mirrors
//! `ledgerdesk_entity::folder::path::is_in_subtree`: exact, case-sensitive,
//! and aligned to `/` boundaries.

use sqlx::PgPool;

use ledgerdesk_core::error::{AppError, ErrorKind};
use ledgerdesk_core::result::AppResult;
use ledgerdesk_entity::file::File;
use ledgerdesk_entity::folder::FolderCount;

/// Rows whose `folder_name` is `$1` or lies below it.
const IN_SUBTREE: &str = "(folder_name = $1::text \
     OR left(folder_name, char_length($1::text) + 1) = ($1::text || '/'))";

/// Repository for folder-level operations.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Number of files directly in each folder.
    pub async fn counts(&self, archived: Option<bool>) -> AppResult<Vec<FolderCount>> {
        sqlx::query_as::<_, FolderCount>(
            "SELECT folder_name, COUNT(*) AS file_count FROM files \
             WHERE ($1::bool IS NULL OR is_archived = $1) \
             GROUP BY folder_name ORDER BY folder_name",
        )
        .bind(archived)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count folders", e))
    }

    /// Files sitting directly in `path`.
    pub async fn files_in(&self, path: &str, archived: Option<bool>) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE folder_name = $1 \
             AND ($2::bool IS NULL OR is_archived = $2) \
             ORDER BY name ASC",
        )
        .bind(path)
        .bind(archived)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folder files", e))
    }

    /// Whether any file lives in the subtree of `path`.
    pub async fn exists(&self, path: &str) -> AppResult<bool> {
        sqlx::query_scalar(&format!("SELECT EXISTS (SELECT 1 FROM files WHERE {IN_SUBTREE})"))
            .bind(path)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check folder", e))
    }

    /// Move every row under `from` to the same relative place under `to`.
    ///
    /// Fails with not-found when `from` has no rows and with conflict when
    /// `to` already has rows. Returns the number of rows rewritten.
    pub async fn rename(&self, from: &str, to: &str) -> AppResult<u64> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let source_ids: Vec<uuid::Uuid> = sqlx::query_scalar(&format!(
            "SELECT id FROM files WHERE {IN_SUBTREE} FOR UPDATE"
        ))
        .bind(from)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock folder", e))?;

        if source_ids.is_empty() {
            return Err(AppError::not_found(format!("Folder '{from}' not found")));
        }

        let target_taken: bool =
            sqlx::query_scalar(&format!("SELECT EXISTS (SELECT 1 FROM files WHERE {IN_SUBTREE})"))
                .bind(to)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to check target folder", e)
                })?;

        if target_taken {
            return Err(AppError::conflict(format!("Folder '{to}' already exists")));
        }

        let result = sqlx::query(&format!(
            "UPDATE files SET folder_name = $2 || substr(folder_name, char_length($1::text) + 1), \
                              updated_at = now() \
             WHERE {IN_SUBTREE}"
        ))
        .bind(from)
        .bind(to)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename folder", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit folder rename", e)
        })?;

        Ok(result.rows_affected())
    }

    /// Delete every row under `path` and return the object keys they held.
    pub async fn delete(&self, path: &str) -> AppResult<Vec<String>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let keys: Vec<String> = sqlx::query_scalar(&format!(
            "SELECT object_key FROM files WHERE {IN_SUBTREE} FOR UPDATE"
        ))
        .bind(path)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock folder", e))?;

        if keys.is_empty() {
            return Err(AppError::not_found(format!("Folder '{path}' not found")));
        }

        sqlx::query(&format!("DELETE FROM files WHERE {IN_SUBTREE}"))
            .bind(path)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete folder", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit folder delete", e)
        })?;

        Ok(keys)
    }

    /// Set the archive flag on every row under `path`.
    pub async fn set_archived(&self, path: &str, archived: bool) -> AppResult<u64> {
        let result = sqlx::query(&format!(
            "UPDATE files SET is_archived = $2, updated_at = now() \
             WHERE {IN_SUBTREE} AND is_archived <> $2"
        ))
        .bind(path)
        .bind(archived)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to archive folder", e))?;
        Ok(result.rows_affected())
    }
}
