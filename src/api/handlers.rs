//! API Handlers
//!
//! HTTP request handlers for each product endpoint. Handlers only map
//! HTTP shapes onto repository calls.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use super::extract::{ApiJson, ApiPath};
use crate::cache::Cache;
use crate::error::Result;
use crate::models::{
    CreateProductRequest, HealthResponse, ListQuery, ListResponse, Product, ProductPatch,
    StatsResponse,
};
use crate::repository::ProductRepository;
use crate::store::ProductStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: ProductRepository,
}

impl AppState {
    pub fn new(repo: ProductRepository) -> Self {
        Self { repo }
    }

    /// Builds the repository from its two adapters.
    pub fn from_adapters(store: Arc<dyn ProductStore>, cache: Arc<dyn Cache>) -> Self {
        Self::new(ProductRepository::new(store, cache))
    }
}

/// Handler for GET /products
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>> {
    let page = state.repo.list(query.page(), query.limit()).await?;
    Ok(Json(page.into()))
}

/// Handler for POST /products
pub async fn create_product(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = state.repo.create(req).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Handler for GET /products/:id
pub async fn get_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Product>> {
    let product = state.repo.get_by_id(id).await?;
    Ok(Json(product))
}

/// Handler for PUT /products/:id
pub async fn update_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(patch): ApiJson<ProductPatch>,
) -> Result<Json<Product>> {
    let product = state.repo.update(id, patch).await?;
    Ok(Json(product))
}

/// Handler for DELETE /products/:id
pub async fn delete_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode> {
    state.repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.repo.metrics().into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::error::ProductError;
    use crate::store::MemoryProductStore;

    fn test_state() -> AppState {
        AppState::from_adapters(
            Arc::new(MemoryProductStore::new()),
            Arc::new(MemoryCache::new(100)),
        )
    }

    #[tokio::test]
    async fn test_create_and_get_handler() {
        let state = test_state();

        let (status, Json(created)) = create_product(
            State(state.clone()),
            ApiJson(CreateProductRequest::new("Mug", 8.5)),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let Json(fetched) = get_product(State(state), ApiPath(created.id)).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_missing_product() {
        let result = get_product(State(test_state()), ApiPath(404)).await;
        assert!(matches!(result, Err(ProductError::NotFound(404))));
    }

    #[tokio::test]
    async fn test_delete_handler_returns_no_content() {
        let state = test_state();
        let (_, Json(created)) = create_product(
            State(state.clone()),
            ApiJson(CreateProductRequest::new("Mug", 8.5)),
        )
        .await
        .unwrap();

        let status = delete_product(State(state), ApiPath(created.id)).await.unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_stats_handler_counts_reads() {
        let state = test_state();
        let _ = get_product(State(state.clone()), ApiPath(1)).await;

        let Json(stats) = stats_handler(State(state)).await;
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
