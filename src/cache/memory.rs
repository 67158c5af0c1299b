//! In-process cache adapter over `TtlStore`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{Cache, TtlStore};
use crate::error::CacheError;

/// Shared, lock-protected `TtlStore`.
///
/// Clones share the same underlying store.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<TtlStore>>,
}

impl MemoryCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            store: Arc::new(RwLock::new(TtlStore::new(max_entries))),
        }
    }

    /// Handle to the underlying store, for the expiry sweep task.
    pub fn shared(&self) -> Arc<RwLock<TtlStore>> {
        self.store.clone()
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let peeked = self.store.read().await.peek(key);
        match peeked {
            Ok(value) => Ok(Some(value)),
            Err(CacheError::NotFound(_)) => Ok(None),
            Err(CacheError::Expired(_)) => {
                // Re-check under the write lock: a writer may have refreshed the key.
                let mut store = self.store.write().await;
                match store.get(key) {
                    Ok(value) => Ok(Some(value)),
                    Err(CacheError::NotFound(_)) | Err(CacheError::Expired(_)) => Ok(None),
                    Err(err) => Err(err),
                }
            }
            Err(err) => Err(err),
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        let mut store = self.store.write().await;
        store.set(key.to_string(), value, ttl)
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut store = self.store.write().await;
        match store.delete(key) {
            Ok(()) | Err(CacheError::NotFound(_)) => Ok(()),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::PRODUCT_CACHE_TTL;

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let cache = MemoryCache::new(10);
        assert_eq!(cache.get("product:1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_get_delete() {
        let cache = MemoryCache::new(10);

        cache
            .set("product:1", b"{}".to_vec(), PRODUCT_CACHE_TTL)
            .await
            .unwrap();
        assert_eq!(cache.get("product:1").await.unwrap(), Some(b"{}".to_vec()));

        cache.delete("product:1").await.unwrap();
        assert_eq!(cache.get("product:1").await.unwrap(), None);

        // Idempotent
        cache.delete("product:1").await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_reads_as_miss() {
        let cache = MemoryCache::new(10);

        cache
            .set("product:1", b"{}".to_vec(), PRODUCT_CACHE_TTL)
            .await
            .unwrap();
        tokio::time::advance(PRODUCT_CACHE_TTL).await;

        assert_eq!(cache.get("product:1").await.unwrap(), None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_clones_share_store() {
        let cache = MemoryCache::new(10);
        let other = cache.clone();

        cache
            .set("product:2", b"x".to_vec(), PRODUCT_CACHE_TTL)
            .await
            .unwrap();

        assert_eq!(other.len().await, 1);
    }

    #[tokio::test]
    async fn test_hit_is_served_while_other_readers_hold_the_store() {
        let cache = MemoryCache::new(10);
        cache
            .set("product:3", b"{}".to_vec(), PRODUCT_CACHE_TTL)
            .await
            .unwrap();

        let shared = cache.shared();
        let _reader = shared.read().await;

        let hit = tokio::time::timeout(std::time::Duration::from_secs(1), cache.get("product:3"))
            .await
            .expect("cache hit blocked behind a shared reader");
        assert_eq!(hit.unwrap(), Some(b"{}".to_vec()));
    }
}
