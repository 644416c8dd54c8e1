//! In-memory list of revoked token IDs.

use std::time::Duration;

use moka::future::Cache;
use uuid::Uuid;

/// Upper bound on tracked revocations.
const MAX_ENTRIES: u64 = 100_000;

/// Revoked `jti`s, each kept for one access-token lifetime.
///
/// Tokens expire on their own after that, so the entry is no longer
/// needed. The list is per process and does not survive restarts.
#[derive(Debug, Clone)]
pub struct TokenRevocationList {
    revoked: Cache<Uuid, ()>,
}

impl TokenRevocationList {
    /// Create a list whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            revoked: Cache::builder()
                .max_capacity(MAX_ENTRIES)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Revoke a token ID.
    pub async fn revoke(&self, jti: Uuid) {
        self.revoked.insert(jti, ()).await;
    }

    /// Whether a token ID has been revoked.
    pub async fn is_revoked(&self, jti: &Uuid) -> bool {
        self.revoked.contains_key(jti)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_revoke() {
        let list = TokenRevocationList::new(Duration::from_secs(60));
        let jti = Uuid::new_v4();
        assert!(!list.is_revoked(&jti).await);
        list.revoke(jti).await;
        assert!(list.is_revoked(&jti).await);
        assert!(!list.is_revoked(&Uuid::new_v4()).await);
    }
}
