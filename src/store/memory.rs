//! In-process product store.
//!
//! Mirrors the PostgreSQL table semantics: ids come from a sequence that
//! never reuses a value, and pages are ordered by id.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::{FieldAssignment, Product};
use crate::store::ProductStore;

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, Product>,
    last_id: i64,
}

/// Product table held in memory. Clones share the same rows.
#[derive(Debug, Clone, Default)]
pub struct MemoryProductStore {
    table: Arc<RwLock<Table>>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.table.read().await.rows.len() as i64)
    }

    async fn query_page(&self, limit: i64, offset: i64) -> Result<Vec<Product>, StoreError> {
        let table = self.table.read().await;
        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(0);

        Ok(table
            .rows
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Product>, StoreError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, name: &str, price: f64) -> Result<Product, StoreError> {
        let mut table = self.table.write().await;
        table.last_id += 1;

        let product = Product {
            id: table.last_id,
            name: name.to_string(),
            price,
        };
        table.rows.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update_fields(
        &self,
        id: i64,
        fields: &[FieldAssignment],
    ) -> Result<Option<Product>, StoreError> {
        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&id).map(|product| {
            for field in fields {
                field.apply(product);
            }
            product.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        let mut table = self.table.write().await;
        Ok(u64::from(table.rows.remove(&id).is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let store = MemoryProductStore::new();

        let a = store.insert("A", 1.0).await.unwrap();
        let b = store.insert("B", 2.0).await.unwrap();
        store.delete(b.id).await.unwrap();
        let c = store.insert("C", 3.0).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(c.id, 3);
    }

    #[tokio::test]
    async fn test_query_page_orders_by_id() {
        let store = MemoryProductStore::new();
        for i in 1..=5 {
            store.insert(&format!("P{}", i), i as f64).await.unwrap();
        }

        let page = store.query_page(2, 2).await.unwrap();
        let ids: Vec<i64> = page.iter().map(|p| p.id).collect();

        assert_eq!(ids, vec![3, 4]);
        assert!(store.query_page(10, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_fields_missing_row() {
        let store = MemoryProductStore::new();
        let result = store
            .update_fields(99, &[FieldAssignment::Price(1.0)])
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let store = MemoryProductStore::new();
        let product = store.insert("A", 1.0).await.unwrap();

        assert_eq!(store.delete(product.id).await.unwrap(), 1);
        assert_eq!(store.delete(product.id).await.unwrap(), 0);
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
