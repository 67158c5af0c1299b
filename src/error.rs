//! Error types for the product service
//!
//! Three layers, three enums: `ProductError` is what callers see,
//! `StoreError` and `CacheError` are what the adapters return.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Product Error Enum ==
/// Caller-facing error for every repository operation.
#[derive(Error, Debug)]
pub enum ProductError {
    /// Missing or invalid caller-supplied field
    #[error("{0}")]
    Validation(String),

    /// No row with the given id
    #[error("Product not found: {0}")]
    NotFound(i64),

    /// Store connectivity or query failure
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ProductError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ProductError::NotFound(_) => (StatusCode::NOT_FOUND, "Product not found".to_string()),
            // Cause text stays in the logs.
            ProductError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Extractor Rejections ==
// Unreadable bodies and ids answer like any other validation failure.
impl From<JsonRejection> for ProductError {
    fn from(rejection: JsonRejection) -> Self {
        ProductError::Validation(format!("invalid request body: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ProductError {
    fn from(rejection: PathRejection) -> Self {
        ProductError::Validation(format!("invalid product id: {}", rejection.body_text()))
    }
}

// == Store Error Enum ==
/// Failure reported by a relational store adapter.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<StoreError> for ProductError {
    fn from(err: StoreError) -> Self {
        ProductError::Internal(err.to_string())
    }
}

// == Cache Error Enum ==
/// Failure reported by a cache adapter. Never surfaced to callers.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key not found in cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Key has expired
    #[error("Key expired: {0}")]
    Expired(String),

    /// Key or value rejected by the cache
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Cache is full and eviction failed
    #[error("Cache full: {0}")]
    CacheFull(String),

    /// Redis command or connection failure
    #[error("Cache backend error: {0}")]
    Backend(#[from] redis::RedisError),

    /// Cached payload could not be encoded or decoded
    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for repository operations.
pub type Result<T> = std::result::Result<T, ProductError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ProductError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (ProductError::NotFound(4), StatusCode::NOT_FOUND),
            (
                ProductError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn test_internal_error_hides_cause() {
        let response = ProductError::Internal("password=hunter2".into()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();

        assert!(!body.contains("hunter2"));
        assert!(body.contains("Internal server error"));
    }

    #[test]
    fn test_store_error_maps_to_internal() {
        let err: ProductError = StoreError::Database(sqlx::Error::PoolTimedOut).into();
        assert!(matches!(err, ProductError::Internal(_)));
    }
}
