//! # ledgerdesk-storage
//!
//! Object store providers behind the [`ObjectStore`] trait, plus the
//! object key layout shared by the upload and registration flows.

pub mod keys;
pub mod providers;

use std::sync::Arc;

use tracing::info;

use ledgerdesk_core::config::{StorageConfig, StorageProviderKind};
use ledgerdesk_core::result::AppResult;
use ledgerdesk_core::traits::ObjectStore;

pub use providers::{MemoryObjectStore, S3ObjectStore};

/// Build the configured object store.
pub async fn build_object_store(config: &StorageConfig) -> AppResult<Arc<dyn ObjectStore>> {
    let store: Arc<dyn ObjectStore> = match config.provider {
        StorageProviderKind::S3 => Arc::new(S3ObjectStore::new(&config.s3).await?),
        StorageProviderKind::Memory => Arc::new(MemoryObjectStore::new()),
    };
    info!(provider = store.provider_type(), "Object store ready");
    Ok(store)
}
