//! Request DTOs for the product API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::error::ProductError;
use crate::models::FieldAssignment;
use crate::repository::{DEFAULT_LIMIT, DEFAULT_PAGE};

/// Request body for POST /products
///
/// `Price` is accepted as an alias of `price` for older clients.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(alias = "Price")]
    pub price: f64,
}

impl CreateProductRequest {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.is_empty() {
            return Some("name cannot be empty".to_string());
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            return Some("price must be greater than zero".to_string());
        }
        None
    }
}

/// Request body for PUT /products/:id
///
/// Every field is optional. An empty name or a zero price counts as
/// not supplied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "Price")]
    pub price: Option<f64>,
}

impl ProductPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Column writes for the supplied fields, in column order.
    ///
    /// Fails when a negative or non-finite price is given, or when nothing
    /// remains to write.
    pub fn assignments(&self) -> Result<Vec<FieldAssignment>, ProductError> {
        let mut assignments = Vec::with_capacity(2);

        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            assignments.push(FieldAssignment::Name(name.to_string()));
        }

        match self.price {
            Some(price) if !price.is_finite() || price < 0.0 => {
                return Err(ProductError::Validation(
                    "price must be greater than zero".to_string(),
                ));
            }
            Some(price) if price > 0.0 => assignments.push(FieldAssignment::Price(price)),
            _ => {}
        }

        if assignments.is_empty() {
            return Err(ProductError::Validation(
                "no valid fields provided for update".to_string(),
            ));
        }

        Ok(assignments)
    }
}

/// Query string for GET /products
///
/// Values are kept as text and parsed leniently: anything that is not an
/// integer reads as 0 and is clamped by the repository.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListQuery {
    pub fn page(&self) -> i64 {
        parse_or_zero(self.page.as_deref(), DEFAULT_PAGE)
    }

    pub fn limit(&self) -> i64 {
        parse_or_zero(self.limit.as_deref(), DEFAULT_LIMIT)
    }
}

fn parse_or_zero(raw: Option<&str>, default: i64) -> i64 {
    match raw {
        Some(value) => value.trim().parse().unwrap_or(0),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_price_alias() {
        let json = r#"{"name": "Lamp", "Price": 19.5}"#;
        let req: CreateProductRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.name, "Lamp");
        assert_eq!(req.price, 19.5);
    }

    #[test]
    fn test_validate_create_request() {
        assert!(CreateProductRequest::new("Lamp", 1.0).validate().is_none());
        assert!(CreateProductRequest::new("", 1.0).validate().is_some());
        assert!(CreateProductRequest::new("Lamp", 0.0).validate().is_some());
        assert!(CreateProductRequest::new("Lamp", -3.0).validate().is_some());
        assert!(CreateProductRequest::new("Lamp", f64::NAN).validate().is_some());
    }

    #[test]
    fn test_whitespace_name_counts_as_supplied() {
        assert!(CreateProductRequest::new("  ", 1.0).validate().is_none());

        let patch = ProductPatch::default().name("  ");
        assert_eq!(
            patch.assignments().unwrap(),
            vec![FieldAssignment::Name("  ".to_string())]
        );
    }

    #[test]
    fn test_patch_price_only() {
        let patch = ProductPatch::default().price(7.0);
        assert_eq!(patch.assignments().unwrap(), vec![FieldAssignment::Price(7.0)]);
    }

    #[test]
    fn test_patch_zero_values_not_supplied() {
        let patch = ProductPatch::default().name("").price(0.0);
        assert!(matches!(patch.assignments(), Err(ProductError::Validation(_))));
    }

    #[test]
    fn test_patch_empty_is_rejected() {
        let err = ProductPatch::default().assignments().unwrap_err();
        assert_eq!(err.to_string(), "no valid fields provided for update");
    }

    #[test]
    fn test_patch_negative_price_is_rejected() {
        let patch = ProductPatch::default().name("B").price(-1.0);
        assert!(matches!(patch.assignments(), Err(ProductError::Validation(_))));
    }

    #[test]
    fn test_patch_deserialize_partial() {
        let patch: ProductPatch = serde_json::from_str(r#"{"name": "Desk"}"#).unwrap();
        assert_eq!(
            patch.assignments().unwrap(),
            vec![FieldAssignment::Name("Desk".to_string())]
        );
    }

    #[test]
    fn test_list_query_lenient_parsing() {
        let query = ListQuery {
            page: Some("abc".to_string()),
            limit: None,
        };
        assert_eq!(query.page(), 0);
        assert_eq!(query.limit(), 10);

        let query = ListQuery {
            page: Some("3".to_string()),
            limit: Some("25".to_string()),
        };
        assert_eq!(query.page(), 3);
        assert_eq!(query.limit(), 25);
    }
}
