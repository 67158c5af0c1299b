//! Product entity
//!
//! The single record type served by the repository, plus the page
//! wrapper returned by list queries.

use serde::{Deserialize, Serialize};

/// Prefix of every product cache key.
pub const CACHE_KEY_PREFIX: &str = "product:";

/// Builds the cache key for a product id, e.g. `product:42`.
pub fn cache_key(id: i64) -> String {
    format!("{}{}", CACHE_KEY_PREFIX, id)
}

// == Product ==
/// A persisted product. `id` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

impl Product {
    /// Encodes the product for cache storage.
    pub fn to_cache_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Decodes a cached payload.
    pub fn from_cache_bytes(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}

// == Field Assignment ==
/// One column write of a partial update.
///
/// The set of updatable columns is closed, so the column name always
/// comes from this enum and never from caller input.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldAssignment {
    Name(String),
    Price(f64),
}

impl FieldAssignment {
    /// Column written by this assignment.
    pub fn column(&self) -> &'static str {
        match self {
            FieldAssignment::Name(_) => "name",
            FieldAssignment::Price(_) => "price",
        }
    }

    /// Applies the assignment to an in-memory product.
    pub fn apply(&self, product: &mut Product) {
        match self {
            FieldAssignment::Name(name) => product.name = name.clone(),
            FieldAssignment::Price(price) => product.price = *price,
        }
    }
}

// == Product Page ==
/// One page of a list query with its pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub page: i64,
    pub total: i64,
    pub limit: i64,
    pub total_pages: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_shape() {
        assert_eq!(cache_key(7), "product:7");
    }

    #[test]
    fn test_cache_bytes_preserve_price() {
        let product = Product {
            id: 12,
            name: "Widget".to_string(),
            price: 0.1 + 0.2,
        };

        let bytes = product.to_cache_bytes().unwrap();
        let decoded = Product::from_cache_bytes(&bytes).unwrap();

        assert_eq!(decoded, product);
        assert_eq!(decoded.price.to_bits(), product.price.to_bits());
    }

    #[test]
    fn test_corrupt_bytes_rejected() {
        assert!(Product::from_cache_bytes(b"{\"id\":\"x\"").is_err());
        assert!(Product::from_cache_bytes(&[0xff, 0x00]).is_err());
    }

    #[test]
    fn test_assignment_apply() {
        let mut product = Product {
            id: 3,
            name: "A".to_string(),
            price: 5.0,
        };

        FieldAssignment::Price(7.0).apply(&mut product);

        assert_eq!(product.name, "A");
        assert_eq!(product.price, 7.0);
        assert_eq!(FieldAssignment::Name("B".into()).column(), "name");
    }
}
