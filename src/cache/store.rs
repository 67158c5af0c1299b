//! TTL Store Module
//!
//! Bounded in-process key/value engine with per-key expiry. Backs
//! `MemoryCache` when no Redis server is configured.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheEntry, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
use crate::error::CacheError;

// == TTL Store ==
/// Key/value storage where every entry carries its own expiry.
#[derive(Debug)]
pub struct TtlStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Maximum number of entries allowed
    max_entries: usize,
}

impl TtlStore {
    // == Constructor ==
    /// Creates a new store holding at most `max_entries` keys.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            max_entries,
        }
    }

    // == Set ==
    /// Stores a payload under `key` for `ttl`.
    ///
    /// Overwriting a key resets its expiry. When the store is full, expired
    /// entries are purged first; if none were expired, the entry closest to
    /// expiry is evicted.
    pub fn set(&mut self, key: String, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        if key.is_empty() || key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::InvalidRequest(format!(
                "Key must be 1..={} bytes",
                MAX_KEY_LENGTH
            )));
        }

        if value.len() > MAX_VALUE_SIZE {
            return Err(CacheError::InvalidRequest(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }

        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            if self.cleanup_expired() == 0 && !self.evict_soonest() {
                return Err(CacheError::CacheFull(
                    "Cache is full and eviction failed".to_string(),
                ));
            }
        }

        self.entries.insert(key, CacheEntry::new(value, ttl));
        Ok(())
    }

    // == Get ==
    /// Returns the payload for `key` if present and not expired.
    ///
    /// Expired entries are removed on access.
    pub fn get(&mut self, key: &str) -> Result<Vec<u8>, CacheError> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                Err(CacheError::Expired(key.to_string()))
            }
            Some(entry) => Ok(entry.value.clone()),
            None => Err(CacheError::NotFound(key.to_string())),
        }
    }

    // == Peek ==
    /// Like `get`, but leaves an expired entry in place for a later `get`
    /// or sweep to drop. Usable under a shared lock.
    pub fn peek(&self, key: &str) -> Result<Vec<u8>, CacheError> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => Err(CacheError::Expired(key.to_string())),
            Some(entry) => Ok(entry.value.clone()),
            None => Err(CacheError::NotFound(key.to_string())),
        }
    }

    // == Delete ==
    /// Removes an entry by key.
    pub fn delete(&mut self, key: &str) -> Result<(), CacheError> {
        self.entries
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| CacheError::NotFound(key.to_string()))
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        before - self.entries.len()
    }

    fn evict_soonest(&mut self) -> bool {
        let victim = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.expires_at)
            .map(|(key, _)| key.clone());

        match victim {
            Some(key) => {
                self.entries.remove(&key);
                true
            }
            None => false,
        }
    }

    // == Length ==
    /// Returns the current number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
