//! Cache Module
//!
//! The `Cache` capability consumed by the repository and its two adapters:
//! Redis for deployments, and an in-process TTL store when no Redis server
//! is configured. Caches are never authoritative; every call may fail and
//! callers treat failure as a miss.

mod entry;
mod memory;
mod redis_cache;
mod store;


use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheError;

// Re-export public types
pub use entry::CacheEntry;
pub use memory::MemoryCache;
pub use redis_cache::RedisCache;
pub use store::TtlStore;

// == Public Constants ==
/// Lifetime of a cached product.
pub const PRODUCT_CACHE_TTL: Duration = Duration::from_secs(60);

/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

// == Cache Capability ==
/// Key/value store with per-key expiry.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Returns the payload for `key`, or `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Stores `value` under `key` for `ttl`, replacing any previous entry.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError>;

    /// Removes `key`. Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}
