//! Best-effort object removal after rows are gone.

use futures::stream::{self, StreamExt};
use tracing::warn;

use ledgerdesk_core::traits::ObjectStore;

/// Upper bound on store deletes in flight at once.
pub const MAX_CONCURRENT_DELETES: usize = 16;

/// Delete objects from the store, logging failures.
///
/// Runs after the owning rows have been committed away, so a failure
/// here leaves an orphaned object rather than a dangling row. At most
/// [`MAX_CONCURRENT_DELETES`] requests run at a time. Returns the number
/// of objects removed.
pub async fn delete_objects(store: &dyn ObjectStore, keys: &[String]) -> usize {
    let deletes: Vec<_> = keys
        .iter()
        .map(|key| async move { (key, store.delete(key).await) })
        .collect();
    stream::iter(deletes)
        .buffer_unordered(MAX_CONCURRENT_DELETES)
        .fold(0, |removed, (key, result)| async move {
            match result {
                Ok(()) => removed + 1,
                Err(e) => {
                    warn!(object_key = %key, error = %e, "Failed to delete object");
                    removed
                }
            }
        })
        .await
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use ledgerdesk_core::error::AppError;
    use ledgerdesk_core::result::AppResult;
    use ledgerdesk_core::traits::PresignedUrl;
    use ledgerdesk_storage::MemoryObjectStore;

    use super::*;

    /// Store that records how many deletes overlap and fails on `bad/` keys.
    #[derive(Debug, Default)]
    struct CountingStore {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl ObjectStore for CountingStore {
        fn provider_type(&self) -> &str {
            "counting"
        }

        async fn health_check(&self) -> AppResult<bool> {
            Ok(true)
        }

        async fn presign_upload(&self, _: &str, _: &str, _: u64, _: u64) -> AppResult<PresignedUrl> {
            Err(AppError::internal("unused"))
        }

        async fn presign_download(&self, _: &str, _: &str, _: u64) -> AppResult<PresignedUrl> {
            Err(AppError::internal("unused"))
        }

        async fn object_size(&self, _: &str) -> AppResult<Option<u64>> {
            Ok(None)
        }

        async fn delete(&self, key: &str) -> AppResult<()> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(2)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            if key.starts_with("bad/") {
                return Err(AppError::storage("delete refused"));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_delete_objects() {
        let store = MemoryObjectStore::new();
        store.insert("uploads/a/1-x.pdf", 10).await;
        store.insert("uploads/a/2-y.pdf", 20).await;

        let keys = vec![
            "uploads/a/1-x.pdf".to_string(),
            "uploads/a/2-y.pdf".to_string(),
            "uploads/a/missing".to_string(),
        ];
        assert_eq!(delete_objects(&store, &keys).await, 3);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_objects_bounds_concurrency() {
        let store = CountingStore::default();
        let keys: Vec<String> = (0..200).map(|i| format!("uploads/u/{i}.pdf")).collect();

        assert_eq!(delete_objects(&store, &keys).await, 200);
        let peak = store.peak.load(Ordering::SeqCst);
        assert!(peak <= MAX_CONCURRENT_DELETES, "peak concurrency was {peak}");
        assert!(peak > 1);
    }

    #[tokio::test]
    async fn test_delete_objects_skips_failures() {
        let store = CountingStore::default();
        let keys = vec![
            "uploads/u/ok.pdf".to_string(),
            "bad/one".to_string(),
            "bad/two".to_string(),
        ];
        assert_eq!(delete_objects(&store, &keys).await, 1);
    }
}
