//! Object store trait for signed-URL file transfer.
//!
//! File bytes never pass through the API server: clients upload and
//! download directly against the store using short-lived signed URLs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// A signed URL handed to a client for a direct transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresignedUrl {
    /// The signed URL.
    pub url: String,
    /// HTTP method the URL is valid for (`PUT` or `GET`).
    pub method: String,
    /// When the signature stops being valid.
    pub expires_at: DateTime<Utc>,
}

/// Trait for object storage backends.
///
/// Implementations live in `ledgerdesk-storage` (S3 and in-memory).
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "s3", "memory").
    fn provider_type(&self) -> &str;

    /// Check whether the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Sign a `PUT` URL for uploading exactly `content_length` bytes to `key`.
    async fn presign_upload(
        &self,
        key: &str,
        content_type: &str,
        content_length: u64,
        ttl_seconds: u64,
    ) -> AppResult<PresignedUrl>;

    /// Sign a `GET` URL for downloading `key` as an attachment named `filename`.
    async fn presign_download(
        &self,
        key: &str,
        filename: &str,
        ttl_seconds: u64,
    ) -> AppResult<PresignedUrl>;

    /// Stored size of an object in bytes, `None` when it does not exist.
    async fn object_size(&self, key: &str) -> AppResult<Option<u64>>;

    /// Delete an object. Deleting a missing object is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;
}
