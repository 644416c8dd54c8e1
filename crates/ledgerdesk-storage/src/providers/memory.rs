//! In-memory object store for development and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use ledgerdesk_core::result::AppResult;
use ledgerdesk_core::traits::{ObjectStore, PresignedUrl};

/// Object store that only tracks keys and their sizes.
///
/// Signing an upload URL records the key with its declared length,
/// standing in for the client's direct `PUT`.
#[derive(Debug, Clone, Default)]
pub struct MemoryObjectStore {
    objects: Arc<RwLock<HashMap<String, u64>>>,
}

impl MemoryObjectStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an object of `size` bytes, replacing any previous one.
    pub async fn insert(&self, key: &str, size: u64) {
        self.objects.write().await.insert(key.to_string(), size);
    }

    /// Number of stored objects.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    /// Whether the store holds no objects.
    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }

    fn signed(key: &str, method: &str, ttl_seconds: u64) -> PresignedUrl {
        let expires_at = Utc::now() + Duration::seconds(ttl_seconds as i64);
        PresignedUrl {
            url: format!(
                "memory://objects/{key}?method={method}&expires={}",
                expires_at.timestamp()
            ),
            method: method.to_string(),
            expires_at,
        }
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn presign_upload(
        &self,
        key: &str,
        _content_type: &str,
        content_length: u64,
        ttl_seconds: u64,
    ) -> AppResult<PresignedUrl> {
        self.insert(key, content_length).await;
        Ok(Self::signed(key, "PUT", ttl_seconds))
    }

    async fn presign_download(
        &self,
        key: &str,
        _filename: &str,
        ttl_seconds: u64,
    ) -> AppResult<PresignedUrl> {
        Ok(Self::signed(key, "GET", ttl_seconds))
    }

    async fn object_size(&self, key: &str) -> AppResult<Option<u64>> {
        Ok(self.objects.read().await.get(key).copied())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.objects.write().await.remove(key);
        Ok(())
    }
}
