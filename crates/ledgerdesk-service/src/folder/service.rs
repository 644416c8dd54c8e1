//! Folder tree, listing, rename, delete, and archive.
//!
//! All operations take user-supplied paths, normalize them, and then
//! act on every file row in the folder's subtree.

use std::sync::Arc;

use tracing::info;

use ledgerdesk_core::error::AppError;
use ledgerdesk_core::traits::ObjectStore;
use ledgerdesk_database::repositories::FolderRepository;
use ledgerdesk_entity::folder::{FolderListing, FolderTree, path};

use crate::cleanup::delete_objects;
use crate::context::RequestContext;

/// Manages virtual folders. Admin only.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// Object store.
    store: Arc<dyn ObjectStore>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(folder_repo: Arc<FolderRepository>, store: Arc<dyn ObjectStore>) -> Self {
        Self { folder_repo, store }
    }

    /// The full folder tree.
    pub async fn tree(
        &self,
        ctx: &RequestContext,
        archived: Option<bool>,
    ) -> Result<FolderTree, AppError> {
        ctx.require_admin()?;
        let counts = self.folder_repo.counts(archived).await?;
        Ok(FolderTree::build(&counts))
    }

    /// Immediate subfolders and files of one folder.
    pub async fn contents(
        &self,
        ctx: &RequestContext,
        raw_path: &str,
        archived: Option<bool>,
    ) -> Result<FolderListing, AppError> {
        ctx.require_admin()?;
        let folder = path::normalize(raw_path)?;

        let tree = FolderTree::build(&self.folder_repo.counts(archived).await?);
        let folders = tree
            .subfolders(&folder)
            .ok_or_else(|| AppError::not_found(format!("Folder '{folder}' not found")))?;
        let files = self.folder_repo.files_in(&folder, archived).await?;

        Ok(FolderListing {
            parent: path::parent(&folder).map(str::to_string),
            path: folder,
            folders,
            files,
        })
    }

    /// Move a folder and everything below it. Returns rows updated.
    pub async fn rename(
        &self,
        ctx: &RequestContext,
        raw_from: &str,
        raw_to: &str,
    ) -> Result<u64, AppError> {
        ctx.require_admin()?;
        let from = path::normalize(raw_from)?;
        let to = path::normalize(raw_to)?;
        path::check_rename(&from, &to)?;

        let updated = self.folder_repo.rename(&from, &to).await?;
        info!(admin_id = %ctx.user_id, from = %from, to = %to, files = updated, "Folder renamed");
        Ok(updated)
    }

    /// Delete a folder's files and their objects. Returns rows deleted.
    pub async fn delete(&self, ctx: &RequestContext, raw_path: &str) -> Result<u64, AppError> {
        ctx.require_admin()?;
        let folder = non_root(raw_path, "deleted")?;

        let keys = self.folder_repo.delete(&folder).await?;
        let removed = delete_objects(self.store.as_ref(), &keys).await;

        info!(
            admin_id = %ctx.user_id,
            folder = %folder,
            files = keys.len(),
            objects_removed = removed,
            "Folder deleted"
        );
        Ok(keys.len() as u64)
    }

    /// Archive or restore every file in a folder. Returns rows changed.
    pub async fn set_archived(
        &self,
        ctx: &RequestContext,
        raw_path: &str,
        archived: bool,
    ) -> Result<u64, AppError> {
        ctx.require_admin()?;
        let folder = non_root(raw_path, "archived")?;

        if !self.folder_repo.exists(&folder).await? {
            return Err(AppError::not_found(format!("Folder '{folder}' not found")));
        }
        let changed = self.folder_repo.set_archived(&folder, archived).await?;

        info!(admin_id = %ctx.user_id, folder = %folder, archived, files = changed, "Folder archive state changed");
        Ok(changed)
    }
}

fn non_root(raw_path: &str, action: &str) -> Result<String, AppError> {
    let folder = path::normalize(raw_path)?;
    if path::is_root(&folder) {
        return Err(AppError::validation(format!(
            "The root folder cannot be {action}"
        )));
    }
    Ok(folder)
}
