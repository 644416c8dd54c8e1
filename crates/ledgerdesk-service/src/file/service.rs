//! Client document exchange: signed uploads, registration, listing, download.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use ledgerdesk_core::config::StorageConfig;
use ledgerdesk_core::error::AppError;
use ledgerdesk_core::traits::{ObjectStore, PresignedUrl};
use ledgerdesk_core::types::pagination::{PageRequest, PageResponse};
use ledgerdesk_database::repositories::{FileRepository, UserRepository};
use ledgerdesk_entity::file::{CreateFile, File, FileScope, FileWithOwners};
use ledgerdesk_entity::folder::path;
use ledgerdesk_storage::keys;

use crate::cleanup::delete_objects;
use crate::context::RequestContext;
use crate::notification::NotificationService;

/// Request for a signed upload URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadUrlRequest {
    /// Display filename.
    pub name: String,
    /// MIME type the client will send.
    pub mime_type: Option<String>,
    /// Declared size in bytes.
    pub size_bytes: i64,
}

/// A signed upload URL and the key to register afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadTicket {
    /// Key the object will be stored under.
    pub object_key: String,
    /// Signed `PUT` URL.
    #[serde(flatten)]
    pub upload: PresignedUrl,
}

/// Request to register a completed upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterFileRequest {
    /// Key returned with the upload URL.
    pub object_key: String,
    /// Display filename.
    pub name: String,
    /// MIME type.
    pub mime_type: Option<String>,
    /// Size the client reports; the stored object's size is recorded instead.
    #[serde(default)]
    pub size_bytes: Option<i64>,
    /// Target folder path, root when absent.
    pub folder_name: Option<String>,
}

/// Size and URL lifetime limits.
#[derive(Debug, Clone, Copy)]
pub struct TransferLimits {
    /// Largest accepted upload.
    pub max_upload_size_bytes: u64,
    /// Lifetime of upload URLs.
    pub upload_url_ttl_seconds: u64,
    /// Lifetime of download URLs.
    pub download_url_ttl_seconds: u64,
}

impl From<&StorageConfig> for TransferLimits {
    fn from(config: &StorageConfig) -> Self {
        Self {
            max_upload_size_bytes: config.max_upload_size_bytes,
            upload_url_ttl_seconds: config.upload_url_ttl_seconds,
            download_url_ttl_seconds: config.download_url_ttl_seconds,
        }
    }
}

/// File exchange between clients and the firm.
#[derive(Debug, Clone)]
pub struct FileService {
    /// File repository.
    pub(super) file_repo: Arc<FileRepository>,
    /// User repository, for receiver checks.
    pub(super) user_repo: Arc<UserRepository>,
    /// Object store.
    pub(super) store: Arc<dyn ObjectStore>,
    /// Notification delivery.
    pub(super) notifications: Arc<NotificationService>,
    /// Transfer limits.
    pub(super) limits: TransferLimits,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        file_repo: Arc<FileRepository>,
        user_repo: Arc<UserRepository>,
        store: Arc<dyn ObjectStore>,
        notifications: Arc<NotificationService>,
        limits: TransferLimits,
    ) -> Self {
        Self {
            file_repo,
            user_repo,
            store,
            notifications,
            limits,
        }
    }

    /// Sign an upload URL under the caller's key prefix.
    pub async fn request_upload(
        &self,
        ctx: &RequestContext,
        req: UploadUrlRequest,
    ) -> Result<UploadTicket, AppError> {
        let name = required_name(&req.name)?;
        self.check_size(req.size_bytes)?;

        let object_key = keys::upload_key(ctx.user_id, name);
        let content_type = req
            .mime_type
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or("application/octet-stream");

        let upload = self
            .store
            .presign_upload(
                &object_key,
                content_type,
                req.size_bytes as u64,
                self.limits.upload_url_ttl_seconds,
            )
            .await?;

        Ok(UploadTicket { object_key, upload })
    }

    /// Register a completed client upload and tell the firm about it.
    pub async fn register(
        &self,
        ctx: &RequestContext,
        req: RegisterFileRequest,
    ) -> Result<File, AppError> {
        let folder_name = path::normalize(req.folder_name.as_deref().unwrap_or_default())?;
        let file = self
            .register_upload(
                ctx,
                CreateFile {
                    name: required_name(&req.name)?.to_string(),
                    object_key: req.object_key,
                    mime_type: req.mime_type,
                    size_bytes: req.size_bytes.unwrap_or_default(),
                    uploader_id: ctx.user_id,
                    receiver_id: None,
                    folder_name,
                    is_private: false,
                },
            )
            .await?;

        self.notifications
            .notify_admins(
                "New document uploaded",
                &format!("{} uploaded \"{}\"", ctx.email, file.name),
                Some(&format!("/admin/files/{}", file.id)),
            )
            .await;

        Ok(file)
    }

    /// The caller's non-archived files.
    pub async fn list_files(
        &self,
        ctx: &RequestContext,
        scope: FileScope,
        page: PageRequest,
    ) -> Result<PageResponse<FileWithOwners>, AppError> {
        self.file_repo.find_for_user(ctx.user_id, scope, &page).await
    }

    /// Sign a download URL for a file the caller may see.
    pub async fn download_url(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
    ) -> Result<PresignedUrl, AppError> {
        let file = self.visible_file(ctx, file_id).await?;
        self.store
            .presign_download(
                &file.object_key,
                &file.name,
                self.limits.download_url_ttl_seconds,
            )
            .await
    }

    /// Delete a file the caller uploaded.
    pub async fn delete_own(&self, ctx: &RequestContext, file_id: Uuid) -> Result<(), AppError> {
        let file = self.visible_file(ctx, file_id).await?;
        if file.uploader_id != ctx.user_id {
            return Err(AppError::forbidden("Only the uploader can delete this file"));
        }
        self.remove(ctx, file).await
    }

    /// Load a file, hiding files the caller may not see behind a 404.
    async fn visible_file(&self, ctx: &RequestContext, file_id: Uuid) -> Result<File, AppError> {
        let file = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .filter(|f| ctx.is_admin() || (f.is_visible_to(ctx.user_id) && !f.is_archived))
            .ok_or_else(|| AppError::not_found("File not found"))?;
        Ok(file)
    }

    /// Shared registration path: ownership, existence, and size checks.
    ///
    /// The recorded size is read back from the store. An object over the
    /// limit is deleted and rejected with 413.
    pub(super) async fn register_upload(
        &self,
        ctx: &RequestContext,
        mut data: CreateFile,
    ) -> Result<File, AppError> {
        if !keys::is_owned_by(&data.object_key, ctx.user_id) {
            return Err(AppError::forbidden(
                "Object key was not issued to this account",
            ));
        }
        let stored = self.store.object_size(&data.object_key).await?;
        data.size_bytes = match stored_size(stored, self.limits.max_upload_size_bytes) {
            Ok(size) => size,
            Err(e) => {
                if stored.is_some() {
                    warn!(
                        user_id = %ctx.user_id,
                        object_key = %data.object_key,
                        "Discarding oversized upload"
                    );
                    delete_objects(self.store.as_ref(), std::slice::from_ref(&data.object_key))
                        .await;
                }
                return Err(e);
            }
        };

        let file = self.file_repo.create(&data).await?;
        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            folder = %file.folder_name,
            size_bytes = file.size_bytes,
            "File registered"
        );
        Ok(file)
    }

    /// Delete the row, then the object.
    pub(super) async fn remove(&self, ctx: &RequestContext, file: File) -> Result<(), AppError> {
        if !self.file_repo.delete(file.id).await? {
            return Err(AppError::not_found("File not found"));
        }
        delete_objects(self.store.as_ref(), std::slice::from_ref(&file.object_key)).await;
        info!(user_id = %ctx.user_id, file_id = %file.id, "File deleted");
        Ok(())
    }

    pub(super) fn check_size(&self, size_bytes: i64) -> Result<(), AppError> {
        if size_bytes < 0 {
            return Err(AppError::validation("File size cannot be negative"));
        }
        if size_bytes as u64 > self.limits.max_upload_size_bytes {
            return Err(AppError::payload_too_large(format!(
                "File exceeds the maximum upload size of {} bytes",
                self.limits.max_upload_size_bytes
            )));
        }
        Ok(())
    }
}

/// Validate the size the store reports for an uploaded object.
fn stored_size(stored: Option<u64>, max_bytes: u64) -> Result<i64, AppError> {
    let size = stored.ok_or_else(|| {
        AppError::validation("Upload not found in storage. Upload the file before registering it.")
    })?;
    if size > max_bytes {
        return Err(AppError::payload_too_large(format!(
            "File exceeds the maximum upload size of {max_bytes} bytes"
        )));
    }
    i64::try_from(size).map_err(|_| AppError::validation("File size is out of range"))
}

pub(super) fn required_name(name: &str) -> Result<&str, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("File name is required"));
    }
    if name.chars().any(char::is_control) {
        return Err(AppError::validation(
            "File name may not contain control characters",
        ));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use ledgerdesk_core::error::ErrorKind;

    use super::*;

    #[test]
    fn test_required_name() {
        assert_eq!(required_name("  W-2 2024.pdf ").unwrap(), "W-2 2024.pdf");
        assert_eq!(required_name("   ").unwrap_err().kind, ErrorKind::Validation);
        assert_eq!(required_name("a\u{0}b").unwrap_err().kind, ErrorKind::Validation);
    }

    #[test]
    fn test_stored_size_is_authoritative() {
        assert_eq!(stored_size(Some(512), 1024).unwrap(), 512);
        assert_eq!(stored_size(Some(1024), 1024).unwrap(), 1024);
        assert_eq!(
            stored_size(Some(1025), 1024).unwrap_err().kind,
            ErrorKind::PayloadTooLarge
        );
        assert_eq!(stored_size(None, 1024).unwrap_err().kind, ErrorKind::Validation);
    }

    #[test]
    fn test_limits_from_config() {
        let limits = TransferLimits::from(&StorageConfig::default());
        assert_eq!(limits.max_upload_size_bytes, 104_857_600);
        assert_eq!(limits.upload_url_ttl_seconds, 900);
        assert_eq!(limits.download_url_ttl_seconds, 300);
    }
}
