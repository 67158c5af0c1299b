//! Cache Metrics Module
//!
//! Observability sink for the repository's cache traffic. Cache failures
//! end here instead of in the caller's error path.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tracing::warn;

use crate::error::CacheError;

// == Degradation Kinds ==
/// Ways the cache can fail without failing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheDegraded {
    /// `get` returned an error
    Unreachable,
    /// Cached payload did not decode as a product
    Corrupt,
    /// Encoding or `set` failed after a store read
    WriteFailed,
    /// `delete` failed after a store write
    InvalidateFailed,
}

impl fmt::Display for CacheDegraded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CacheDegraded::Unreachable => "unreachable",
            CacheDegraded::Corrupt => "corrupt",
            CacheDegraded::WriteFailed => "write_failed",
            CacheDegraded::InvalidateFailed => "invalidate_failed",
        };
        f.write_str(name)
    }
}

// == Cache Metrics ==
/// Lock-free counters shared by every clone of the repository.
#[derive(Debug, Default)]
pub struct CacheMetrics {
    hits: AtomicU64,
    misses: AtomicU64,
    degraded: AtomicU64,
    invalidations: AtomicU64,
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_invalidation(&self) {
        self.invalidations.fetch_add(1, Ordering::Relaxed);
    }

    /// Logs a swallowed cache failure and counts it.
    pub fn record_degraded(&self, kind: CacheDegraded, key: &str, err: &CacheError) {
        self.degraded.fetch_add(1, Ordering::Relaxed);
        warn!(%kind, key, error = %err, "Cache degraded, continuing without it");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            degraded: self.degraded.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
        }
    }
}

// == Snapshot ==
/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub degraded: u64,
    pub invalidations: u64,
}

impl MetricsSnapshot {
    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_starts_at_zero() {
        let metrics = CacheMetrics::new();
        assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
        assert_eq!(metrics.snapshot().hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let metrics = CacheMetrics::new();
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_miss();

        assert_eq!(metrics.snapshot().hit_rate(), 0.75);
    }

    #[test]
    fn test_record_degraded_counts() {
        let metrics = CacheMetrics::new();
        let err = CacheError::CacheFull("full".to_string());

        metrics.record_degraded(CacheDegraded::WriteFailed, "product:1", &err);
        metrics.record_degraded(CacheDegraded::Corrupt, "product:2", &err);

        assert_eq!(metrics.snapshot().degraded, 2);
    }

    #[test]
    fn test_degraded_display() {
        assert_eq!(CacheDegraded::InvalidateFailed.to_string(), "invalidate_failed");
    }
}
