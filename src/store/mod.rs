//! Relational Store Module
//!
//! The `ProductStore` capability is the source of truth for products.
//! `PgProductStore` talks to PostgreSQL; `MemoryProductStore` keeps rows in
//! process for local runs and tests.

mod memory;
mod postgres;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{FieldAssignment, Product};

pub use memory::MemoryProductStore;
pub use postgres::{build_update_query, PgProductStore};

/// Durable product table.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Number of rows in the table.
    async fn count(&self) -> Result<i64, StoreError>;

    /// Rows ordered by ascending id, `LIMIT limit OFFSET offset`.
    async fn query_page(&self, limit: i64, offset: i64) -> Result<Vec<Product>, StoreError>;

    async fn get(&self, id: i64) -> Result<Option<Product>, StoreError>;

    /// Inserts a row and returns it with its generated id.
    async fn insert(&self, name: &str, price: f64) -> Result<Product, StoreError>;

    /// Writes exactly the given columns of row `id` and returns the result,
    /// or `None` if no such row exists.
    async fn update_fields(
        &self,
        id: i64,
        fields: &[FieldAssignment],
    ) -> Result<Option<Product>, StoreError>;

    /// Deletes row `id`, returning the number of rows affected.
    async fn delete(&self, id: i64) -> Result<u64, StoreError>;
}
