//! File repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use ledgerdesk_core::error::{AppError, ErrorKind};
use ledgerdesk_core::result::AppResult;
use ledgerdesk_core::types::pagination::{PageRequest, PageResponse};
use ledgerdesk_entity::file::{CreateFile, File, FileScope, FileWithOwners, UpdateFile};

use super::user::escape_like;

const OBJECT_KEY_UNIQUE: &str = "files_object_key_key";

const SELECT_WITH_OWNERS: &str = "SELECT f.*, u.name AS uploader_name, r.name AS receiver_name \
     FROM files f \
     LEFT JOIN users u ON u.id = f.uploader_id \
     LEFT JOIN users r ON r.id = f.receiver_id";

/// Admin listing filters. `None` disables a filter.
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    /// Files uploaded by or addressed to this user.
    pub user_id: Option<Uuid>,
    /// Files in this folder's subtree (normalized, non-root).
    pub folder: Option<String>,
    /// Archive state.
    pub archived: Option<bool>,
    /// Case-insensitive name search.
    pub search: Option<String>,
}

/// Repository for file records.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a file by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    /// A client's non-archived files in the given scope, newest first.
    ///
    /// Received files marked private are never returned.
    pub async fn find_for_user(
        &self,
        user_id: Uuid,
        scope: FileScope,
        page: &PageRequest,
    ) -> AppResult<PageResponse<FileWithOwners>> {
        let visibility = match scope {
            FileScope::Uploaded => "f.uploader_id = $1",
            FileScope::Received => "(f.receiver_id = $1 AND NOT f.is_private)",
            FileScope::All => "(f.uploader_id = $1 OR (f.receiver_id = $1 AND NOT f.is_private))",
        };

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM files f WHERE NOT f.is_archived AND {visibility}"
        ))
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count files", e))?;

        let files = sqlx::query_as::<_, FileWithOwners>(&format!(
            "{SELECT_WITH_OWNERS} WHERE NOT f.is_archived AND {visibility} \
             ORDER BY f.created_at DESC LIMIT $2 OFFSET $3"
        ))
        .bind(user_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))?;

        Ok(PageResponse::new(files, page, total as u64))
    }

    /// Admin listing across all files.
    pub async fn search(
        &self,
        filter: &FileFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<FileWithOwners>> {
        const WHERE: &str = "($1::uuid IS NULL OR f.uploader_id = $1 OR f.receiver_id = $1) \
             AND ($2::text IS NULL OR f.folder_name = $2 \
                  OR left(f.folder_name, char_length($2) + 1) = ($2 || '/')) \
             AND ($3::bool IS NULL OR f.is_archived = $3) \
             AND ($4::text IS NULL OR f.name ILIKE $4)";

        let pattern = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", escape_like(s)));

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM files f WHERE {WHERE}"))
            .bind(filter.user_id)
            .bind(&filter.folder)
            .bind(filter.archived)
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count files", e))?;

        let files = sqlx::query_as::<_, FileWithOwners>(&format!(
            "{SELECT_WITH_OWNERS} WHERE {WHERE} ORDER BY f.created_at DESC LIMIT $5 OFFSET $6"
        ))
        .bind(filter.user_id)
        .bind(&filter.folder)
        .bind(filter.archived)
        .bind(&pattern)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search files", e))?;

        Ok(PageResponse::new(files, page, total as u64))
    }

    /// Register an uploaded object.
    pub async fn create(&self, data: &CreateFile) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "INSERT INTO files (id, name, object_key, mime_type, size_bytes, uploader_id, \
                                receiver_id, folder_name, is_private) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(&data.object_key)
        .bind(&data.mime_type)
        .bind(data.size_bytes)
        .bind(data.uploader_id)
        .bind(data.receiver_id)
        .bind(&data.folder_name)
        .bind(data.is_private)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(OBJECT_KEY_UNIQUE) => {
                AppError::conflict("This upload has already been registered")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create file", e),
        })
    }

    /// Apply admin edits.
    pub async fn update(&self, id: Uuid, data: &UpdateFile) -> AppResult<File> {
        let (set_receiver, receiver) = match data.receiver_id {
            Some(receiver) => (true, receiver),
            None => (false, None),
        };

        sqlx::query_as::<_, File>(
            "UPDATE files SET name = COALESCE($2, name), \
                              folder_name = COALESCE($3, folder_name), \
                              is_private = COALESCE($4, is_private), \
                              receiver_id = CASE WHEN $5 THEN $6 ELSE receiver_id END, \
                              updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.folder_name)
        .bind(data.is_private)
        .bind(set_receiver)
        .bind(receiver)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update file", e))?
        .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    /// Set the archive flag on one file.
    pub async fn set_archived(&self, id: Uuid, archived: bool) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "UPDATE files SET is_archived = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(archived)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to archive file", e))?
        .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    /// Delete a file row.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Object keys of every file a user uploaded.
    pub async fn object_keys_for_uploader(&self, user_id: Uuid) -> AppResult<Vec<String>> {
        sqlx::query_scalar("SELECT object_key FROM files WHERE uploader_id = $1")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list object keys", e)
            })
    }
}
