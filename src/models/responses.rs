//! Response DTOs for the product API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::models::{Product, ProductPage};
use crate::repository::MetricsSnapshot;

/// Response body for GET /products
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub data: Vec<Product>,
    pub metadata: PageMetadata,
}

/// Pagination block of a list response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub current_page: i64,
    pub total_products: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl From<ProductPage> for ListResponse {
    fn from(page: ProductPage) -> Self {
        Self {
            data: page.items,
            metadata: PageMetadata {
                current_page: page.page,
                total_products: page.total,
                limit: page.limit,
                total_pages: page.total_pages,
            },
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Reads answered from the cache
    pub hits: u64,
    /// Reads that fell through to the store
    pub misses: u64,
    /// Cache failures absorbed by the repository
    pub degraded: u64,
    /// Cache keys removed after a write
    pub invalidations: u64,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl From<MetricsSnapshot> for StatsResponse {
    fn from(snapshot: MetricsSnapshot) -> Self {
        Self {
            hit_rate: snapshot.hit_rate(),
            hits: snapshot.hits,
            misses: snapshot.misses,
            degraded: snapshot.degraded,
            invalidations: snapshot.invalidations,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
