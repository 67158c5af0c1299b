//! PostgreSQL product store.
//!
//! Expects a table created out of band:
//!
//! ```sql
//! CREATE TABLE products (
//!     id    BIGSERIAL PRIMARY KEY,
//!     name  TEXT NOT NULL,
//!     price DOUBLE PRECISION NOT NULL CHECK (price > 0)
//! );
//! ```

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, QueryBuilder};
use tracing::debug;

use crate::error::StoreError;
use crate::models::{FieldAssignment, Product};
use crate::store::ProductStore;

/// Product table accessed through a sqlx connection pool.
#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Builds a pool and verifies it with a round trip.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(8))
            .connect(url)
            .await?;

        sqlx::query("SELECT 1").execute(&pool).await?;

        Ok(Self::new(pool))
    }
}

/// Builds `UPDATE products SET ... WHERE id = $n RETURNING id, name, price`
/// with one bound placeholder per assignment.
pub fn build_update_query(id: i64, fields: &[FieldAssignment]) -> QueryBuilder<'_, Postgres> {
    let mut builder = QueryBuilder::new("UPDATE products SET ");

    {
        let mut set = builder.separated(", ");
        for field in fields {
            set.push(format_args!("{} = ", field.column()));
            match field {
                FieldAssignment::Name(name) => set.push_bind_unseparated(name.as_str()),
                FieldAssignment::Price(price) => set.push_bind_unseparated(*price),
            };
        }
    }

    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(" RETURNING id, name, price");
    builder
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn count(&self) -> Result<i64, StoreError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn query_page(&self, limit: i64, offset: i64) -> Result<Vec<Product>, StoreError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, price FROM products ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        debug!(limit, offset, count = products.len(), "Fetched product page");
        Ok(products)
    }

    async fn get(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let product =
            sqlx::query_as::<_, Product>("SELECT id, name, price FROM products WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(product)
    }

    async fn insert(&self, name: &str, price: f64) -> Result<Product, StoreError> {
        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO products (name, price) VALUES ($1, $2) RETURNING id, name, price",
        )
        .bind(name)
        .bind(price)
        .fetch_one(&self.pool)
        .await?;
        Ok(product)
    }

    async fn update_fields(
        &self,
        id: i64,
        fields: &[FieldAssignment],
    ) -> Result<Option<Product>, StoreError> {
        let mut query = build_update_query(id, fields);
        let product = query
            .build_query_as::<Product>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
