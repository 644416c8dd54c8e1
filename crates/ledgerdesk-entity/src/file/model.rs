//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A document exchanged through the portal.
///
/// The bytes live in the object store under `object_key`; this row only
/// tracks who sent it, who it is for, and where it sits in the virtual
/// folder hierarchy (`folder_name`, `""` = root).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: Uuid,
    /// Display file name (including extension).
    pub name: String,
    /// Key of the object in the store.
    pub object_key: String,
    /// MIME type of the file.
    pub mime_type: Option<String>,
    /// File size in bytes.
    pub size_bytes: i64,
    /// The user who uploaded the file.
    pub uploader_id: Uuid,
    /// The client the file is addressed to. `None` = addressed to the firm.
    pub receiver_id: Option<Uuid>,
    /// Virtual folder path.
    pub folder_name: String,
    /// Hidden from the receiver.
    pub is_private: bool,
    /// Archived files are excluded from default listings.
    pub is_archived: bool,
    /// When the file was registered.
    pub created_at: DateTime<Utc>,
    /// When the file was last updated.
    pub updated_at: DateTime<Utc>,
}

impl File {
    /// Whether the given user may see this file (non-admin view).
    ///
    /// Uploaders always see their own files; receivers see them unless
    /// the file is private.
    pub fn is_visible_to(&self, user_id: Uuid) -> bool {
        self.uploader_id == user_id || (self.receiver_id == Some(user_id) && !self.is_private)
    }
}

/// A file joined with its uploader/receiver names for admin listings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FileWithOwners {
    /// The file row.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub file: File,
    /// Uploader name.
    pub uploader_name: Option<String>,
    /// Receiver name.
    pub receiver_name: Option<String>,
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// The file name.
    pub name: String,
    /// Object key in the store.
    pub object_key: String,
    /// MIME type.
    pub mime_type: Option<String>,
    /// File size in bytes.
    pub size_bytes: i64,
    /// Uploader.
    pub uploader_id: Uuid,
    /// Receiver.
    pub receiver_id: Option<Uuid>,
    /// Normalized folder path.
    pub folder_name: String,
    /// Privacy flag.
    pub is_private: bool,
}

/// Admin edits to a file. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFile {
    /// New display name.
    pub name: Option<String>,
    /// New (normalized) folder path.
    pub folder_name: Option<String>,
    /// New privacy flag.
    pub is_private: Option<bool>,
    /// New receiver; `Some(None)` clears it.
    pub receiver_id: Option<Option<Uuid>>,
}

/// Which of a client's files to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FileScope {
    /// Files the caller uploaded.
    Uploaded,
    /// Files addressed to the caller.
    Received,
    /// Both.
    #[default]
    All,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(uploader: Uuid, receiver: Option<Uuid>, private: bool) -> File {
        File {
            id: Uuid::new_v4(),
            name: "Return 2024.PDF".into(),
            object_key: "uploads/x/y".into(),
            mime_type: Some("application/pdf".into()),
            size_bytes: 10,
            uploader_id: uploader,
            receiver_id: receiver,
            folder_name: String::new(),
            is_private: private,
            is_archived: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_visibility() {
        let admin = Uuid::new_v4();
        let client = Uuid::new_v4();
        let other = Uuid::new_v4();

        let shared = sample(admin, Some(client), false);
        assert!(shared.is_visible_to(client));
        assert!(shared.is_visible_to(admin));
        assert!(!shared.is_visible_to(other));

        let private = sample(admin, Some(client), true);
        assert!(!private.is_visible_to(client));
        assert!(private.is_visible_to(admin));
    }
}
