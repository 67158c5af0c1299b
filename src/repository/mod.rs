//! Product Repository
//!
//! Orchestrates the store and the cache:
//! - reads go cache first and repopulate it from the store on a miss
//! - writes go to the store, then delete the cached copy
//! - lists always go to the store
//!
//! The store is authoritative. A cache hit may trail a concurrent write by
//! up to `PRODUCT_CACHE_TTL`, and no cache failure ever fails a request.

mod metrics;
mod pagination;

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::cache::{Cache, PRODUCT_CACHE_TTL};
use crate::error::{ProductError, Result, StoreError};
use crate::models::{cache_key, CreateProductRequest, Product, ProductPage, ProductPatch};
use crate::store::ProductStore;

pub use metrics::{CacheDegraded, CacheMetrics, MetricsSnapshot};
pub use pagination::{PageRequest, DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT};

/// Product CRUD with read-through caching and delete-based invalidation.
///
/// Cheap to clone; clones share the store, cache and metrics.
#[derive(Clone)]
pub struct ProductRepository {
    store: Arc<dyn ProductStore>,
    cache: Arc<dyn Cache>,
    metrics: Arc<CacheMetrics>,
}

impl ProductRepository {
    pub fn new(store: Arc<dyn ProductStore>, cache: Arc<dyn Cache>) -> Self {
        Self {
            store,
            cache,
            metrics: Arc::new(CacheMetrics::new()),
        }
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    // == Read Path ==
    /// Returns the product with `id`, from the cache when possible.
    pub async fn get_by_id(&self, id: i64) -> Result<Product> {
        let key = cache_key(id);

        if let Some(product) = self.read_cached(&key).await {
            debug!(id, "Cache hit");
            self.metrics.record_hit();
            return Ok(product);
        }
        self.metrics.record_miss();

        let product = self
            .store
            .get(id)
            .await
            .map_err(|e| store_failure("get", e))?
            .ok_or(ProductError::NotFound(id))?;

        self.populate(&key, &product).await;
        debug!(id, "Product loaded from store");
        Ok(product)
    }

    /// Cached product for `key`; any failure reads as a miss.
    async fn read_cached(&self, key: &str) -> Option<Product> {
        let bytes = match self.cache.get(key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(err) => {
                self.metrics
                    .record_degraded(CacheDegraded::Unreachable, key, &err);
                return None;
            }
        };

        match Product::from_cache_bytes(&bytes) {
            Ok(product) => Some(product),
            Err(err) => {
                self.metrics
                    .record_degraded(CacheDegraded::Corrupt, key, &err.into());
                None
            }
        }
    }

    async fn populate(&self, key: &str, product: &Product) {
        let written = match product.to_cache_bytes() {
            Ok(bytes) => self.cache.set(key, bytes, PRODUCT_CACHE_TTL).await,
            Err(err) => Err(err.into()),
        };

        if let Err(err) = written {
            self.metrics
                .record_degraded(CacheDegraded::WriteFailed, key, &err);
        }
    }

    // == List Path ==
    /// Returns one page of products ordered by id. Never cached.
    ///
    /// The count and the page are two separate queries, so concurrent
    /// writes may shift rows across page boundaries between them.
    pub async fn list(&self, page: i64, limit: i64) -> Result<ProductPage> {
        let request = PageRequest::new(page, limit);

        let total = self
            .store
            .count()
            .await
            .map_err(|e| store_failure("count", e))?;

        let items = self
            .store
            .query_page(request.limit, request.offset())
            .await
            .map_err(|e| store_failure("query_page", e))?;

        Ok(ProductPage {
            items,
            page: request.page,
            total,
            limit: request.limit,
            total_pages: request.total_pages(total),
        })
    }

    // == Write Path ==
    /// Inserts a product. The cache is filled lazily by the next read.
    pub async fn create(&self, req: CreateProductRequest) -> Result<Product> {
        if let Some(msg) = req.validate() {
            return Err(ProductError::Validation(msg));
        }

        let product = self
            .store
            .insert(&req.name, req.price)
            .await
            .map_err(|e| store_failure("insert", e))?;

        info!(id = product.id, "Product created");
        Ok(product)
    }

    /// Writes the supplied fields of `id` and drops its cached copy.
    pub async fn update(&self, id: i64, patch: ProductPatch) -> Result<Product> {
        let fields = patch.assignments()?;

        let product = self
            .store
            .update_fields(id, &fields)
            .await
            .map_err(|e| store_failure("update_fields", e))?
            .ok_or(ProductError::NotFound(id))?;

        self.invalidate(id).await;
        info!(id, "Product updated");
        Ok(product)
    }

    /// Deletes `id` and drops its cached copy.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let affected = self
            .store
            .delete(id)
            .await
            .map_err(|e| store_failure("delete", e))?;

        if affected == 0 {
            return Err(ProductError::NotFound(id));
        }

        self.invalidate(id).await;
        info!(id, "Product deleted");
        Ok(())
    }

    /// Removes the cache entry for `id`. Must run after the store write.
    async fn invalidate(&self, id: i64) {
        let key = cache_key(id);
        match self.cache.delete(&key).await {
            Ok(()) => self.metrics.record_invalidation(),
            // The stale entry expires within the TTL.
            Err(err) => self
                .metrics
                .record_degraded(CacheDegraded::InvalidateFailed, &key, &err),
        }
    }
}

fn store_failure(op: &'static str, err: StoreError) -> ProductError {
    error!(op, error = %err, "Store operation failed");
    err.into()
}
