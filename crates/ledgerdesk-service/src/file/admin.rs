//! Admin file management.

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use ledgerdesk_core::error::AppError;
use ledgerdesk_core::types::pagination::{PageRequest, PageResponse};
use ledgerdesk_database::repositories::FileFilter;
use ledgerdesk_entity::file::{CreateFile, File, FileWithOwners, UpdateFile};
use ledgerdesk_entity::folder::path;
use ledgerdesk_entity::notification::CreateNotification;

use super::service::{FileService, required_name};
use crate::context::RequestContext;

/// Admin file listing filters, as received from the query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminFileQuery {
    /// Files uploaded by or addressed to this user.
    pub user_id: Option<Uuid>,
    /// Folder subtree.
    pub folder: Option<String>,
    /// Archive state.
    pub archived: Option<bool>,
    /// Name search.
    pub search: Option<String>,
}

/// Request to register an upload on behalf of the firm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminRegisterFileRequest {
    /// Key returned with the upload URL.
    pub object_key: String,
    /// Display filename.
    pub name: String,
    /// MIME type.
    pub mime_type: Option<String>,
    /// Size the client reports; the stored object's size is recorded instead.
    #[serde(default)]
    pub size_bytes: Option<i64>,
    /// Target folder path.
    pub folder_name: Option<String>,
    /// Client the file is addressed to.
    pub receiver_id: Option<Uuid>,
    /// Hide the file from its receiver.
    #[serde(default)]
    pub is_private: bool,
}

/// Admin edits to a file record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminUpdateFileRequest {
    /// New display name.
    pub name: Option<String>,
    /// New folder path.
    pub folder_name: Option<String>,
    /// New privacy flag.
    pub is_private: Option<bool>,
    /// New receiver; `Some(None)` clears it.
    #[serde(default, with = "double_option")]
    pub receiver_id: Option<Option<Uuid>>,
}

impl FileService {
    /// Lists all files matching the filters.
    pub async fn admin_list(
        &self,
        ctx: &RequestContext,
        query: AdminFileQuery,
        page: PageRequest,
    ) -> Result<PageResponse<FileWithOwners>, AppError> {
        ctx.require_admin()?;

        let folder = match query.folder.as_deref() {
            Some(raw) => Some(path::normalize(raw)?).filter(|p| !path::is_root(p)),
            None => None,
        };

        let filter = FileFilter {
            user_id: query.user_id,
            folder,
            archived: query.archived,
            search: query.search,
        };
        self.file_repo.search(&filter, &page).await
    }

    /// Register an admin upload, optionally addressed to a client.
    pub async fn admin_register(
        &self,
        ctx: &RequestContext,
        req: AdminRegisterFileRequest,
    ) -> Result<File, AppError> {
        ctx.require_admin()?;

        let folder_name = path::normalize(req.folder_name.as_deref().unwrap_or_default())?;
        if let Some(receiver_id) = req.receiver_id {
            self.ensure_user_exists(receiver_id).await?;
        }

        let file = self
            .register_upload(
                ctx,
                CreateFile {
                    name: required_name(&req.name)?.to_string(),
                    object_key: req.object_key,
                    mime_type: req.mime_type,
                    size_bytes: req.size_bytes.unwrap_or_default(),
                    uploader_id: ctx.user_id,
                    receiver_id: req.receiver_id,
                    folder_name,
                    is_private: req.is_private,
                },
            )
            .await?;

        self.notify_receiver(&file).await;
        Ok(file)
    }

    /// Change a file's name, folder, privacy, or receiver.
    pub async fn admin_update(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        req: AdminUpdateFileRequest,
    ) -> Result<File, AppError> {
        ctx.require_admin()?;

        let before = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        let name = match req.name.as_deref() {
            Some(name) => Some(required_name(name)?.to_string()),
            None => None,
        };
        let folder_name = match req.folder_name.as_deref() {
            Some(raw) => Some(path::normalize(raw)?),
            None => None,
        };
        if let Some(Some(receiver_id)) = req.receiver_id {
            self.ensure_user_exists(receiver_id).await?;
        }

        let file = self
            .file_repo
            .update(
                file_id,
                &UpdateFile {
                    name,
                    folder_name,
                    is_private: req.is_private,
                    receiver_id: req.receiver_id,
                },
            )
            .await?;

        info!(admin_id = %ctx.user_id, file_id = %file.id, "File updated by admin");

        let newly_visible = file.receiver_id.is_some()
            && !file.is_private
            && (before.receiver_id != file.receiver_id || before.is_private);
        if newly_visible {
            self.notify_receiver(&file).await;
        }
        Ok(file)
    }

    /// Archive or restore a single file.
    pub async fn admin_set_archived(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        archived: bool,
    ) -> Result<File, AppError> {
        ctx.require_admin()?;
        let file = self.file_repo.set_archived(file_id, archived).await?;
        info!(admin_id = %ctx.user_id, file_id = %file.id, archived, "File archive state changed");
        Ok(file)
    }

    /// Delete any file.
    pub async fn admin_delete(&self, ctx: &RequestContext, file_id: Uuid) -> Result<(), AppError> {
        ctx.require_admin()?;
        let file = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;
        self.remove(ctx, file).await
    }

    async fn ensure_user_exists(&self, user_id: Uuid) -> Result<(), AppError> {
        if self.user_repo.find_by_id(user_id).await?.is_none() {
            return Err(AppError::validation(format!("Receiver {user_id} does not exist")));
        }
        Ok(())
    }

    /// Tell the receiver about a file they can now see.
    async fn notify_receiver(&self, file: &File) {
        let Some(receiver_id) = file.receiver_id else {
            return;
        };
        if file.is_private {
            return;
        }
        self.notifications
            .notify(CreateNotification {
                user_id: receiver_id,
                title: "New document available".to_string(),
                message: format!("\"{}\" has been shared with you", file.name),
                link: Some(format!("/dashboard/files/{}", file.id)),
            })
            .await;
    }
}

/// Distinguishes an absent field from an explicit `null`.
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T: Serialize, S: Serializer>(
        value: &Option<Option<T>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T: Deserialize<'de>, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Option<T>>, D::Error> {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receiver_null_vs_absent() {
        let absent: AdminUpdateFileRequest = serde_json::from_str(r#"{"name": "a.pdf"}"#).unwrap();
        assert_eq!(absent.receiver_id, None);

        let cleared: AdminUpdateFileRequest =
            serde_json::from_str(r#"{"receiver_id": null}"#).unwrap();
        assert_eq!(cleared.receiver_id, Some(None));

        let id = Uuid::new_v4();
        let set: AdminUpdateFileRequest =
            serde_json::from_str(&format!(r#"{{"receiver_id": "{id}"}}"#)).unwrap();
        assert_eq!(set.receiver_id, Some(Some(id)));
    }
}
