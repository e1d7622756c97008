//! Catalog product records.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A purchasable product, exactly as published by the remote catalog.
///
/// Products are read-only once decoded; the cart copies them into line
/// items instead of pointing back at the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub category: String,
    pub description: String,
    /// Absolute image URL.
    pub image: String,
    pub price: Price,
    pub title: String,
}

/// Reasons a decoded catalog is refused.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two records share an identifier, which would break cart lookups.
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
    /// A record carries a price below zero.
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),
}

/// Check a decoded catalog before it is served.
///
/// Typed decoding already guarantees every field is present with the right
/// type. This adds the two properties the cart relies on: unique ids, and
/// prices that make sense to display.
///
/// # Errors
///
/// Returns the first [`CatalogError`] found, in catalog order.
pub fn validate_catalog(products: &[Product]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(products.len());
    for product in products {
        if !seen.insert(product.id) {
            return Err(CatalogError::DuplicateId(product.id));
        }
        if product.price.is_negative() {
            return Err(CatalogError::NegativePrice(product.id));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: i32, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            category: "jewelery".to_string(),
            description: "Sterling silver".to_string(),
            image: format!("https://img.example/{id}.jpg"),
            price: Price::from_cents(cents),
            title: format!("Ring {id}"),
        }
    }

    #[test]
    fn test_decodes_fakestore_record() {
        let json = r#"{
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
            "price": 109.95,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.category, "men's clothing");
        assert_eq!(product.price.to_string(), "$109.95");
    }

    #[test]
    fn test_rejects_record_missing_field() {
        let json = r#"{"id": 1, "title": "No price", "description": "", "category": "", "image": ""}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }

    #[test]
    fn test_rejects_string_id() {
        let json = r#"{"id": "1", "title": "t", "price": 1, "description": "", "category": "", "image": ""}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }

    #[test]
    fn test_validate_accepts_well_formed_catalog() {
        let catalog = vec![product(1, 100), product(2, 0), product(3, 999)];
        assert!(validate_catalog(&catalog).is_ok());
        assert!(validate_catalog(&[]).is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let catalog = vec![product(1, 100), product(2, 200), product(1, 300)];
        assert_eq!(
            validate_catalog(&catalog).unwrap_err(),
            CatalogError::DuplicateId(ProductId::new(1))
        );
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let catalog = vec![product(1, 100), product(4, -5)];
        assert_eq!(
            validate_catalog(&catalog).unwrap_err(),
            CatalogError::NegativePrice(ProductId::new(4))
        );
    }
}
