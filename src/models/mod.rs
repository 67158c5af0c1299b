//! Domain types and request/response models
//!
//! `product` holds the entity and the repository's page type;
//! `requests` and `responses` are the HTTP DTOs.

pub mod product;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use product::{cache_key, FieldAssignment, Product, ProductPage, CACHE_KEY_PREFIX};
pub use requests::{CreateProductRequest, ListQuery, ProductPatch};
pub use responses::{HealthResponse, ListResponse, PageMetadata, StatsResponse};
