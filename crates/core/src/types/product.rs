//! Catalog product values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A product as published by the catalog service.
///
/// The cart treats products as immutable values: once a product is in a cart
/// line, later changes to the catalog entry do not flow into that line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    #[serde(default)]
    pub category: String,
    /// Image URL or asset path.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub stock: u32,
    /// Unit label shown next to the price (e.g. "kg", "pack").
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub review_count: u32,
    /// Discount percentage advertised by the catalog. Informational only.
    #[serde(default)]
    pub discount: Decimal,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub sku: String,
}

impl Product {
    /// Minimal product with only the fields the cart needs.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Price) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            category: String::new(),
            image: String::new(),
            stock: 0,
            unit: String::new(),
            rating: 0.0,
            review_count: 0,
            discount: Decimal::ZERO,
            featured: false,
            sku: String::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog_payload() {
        let json = r#"{
            "id": "apple-01",
            "name": "Honeycrisp Apples",
            "description": "Crisp and sweet",
            "price": "4.99",
            "category": "produce",
            "image": "/images/apples.jpg",
            "stock": 120,
            "unit": "kg",
            "rating": 4.7,
            "reviewCount": 38,
            "discount": "10",
            "featured": true,
            "sku": "PRD-APL-01"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new("apple-01"));
        assert_eq!(product.price.amount(), Decimal::new(499, 2));
        assert_eq!(product.review_count, 38);
        assert!(product.featured);
        assert_eq!(product.sku, "PRD-APL-01");
    }

    #[test]
    fn test_deserialize_minimal_payload() {
        let product: Product =
            serde_json::from_str(r#"{"id": "A", "name": "Thing", "price": "10"}"#).unwrap();
        assert_eq!(product.stock, 0);
        assert!(!product.featured);
        assert_eq!(product.discount, Decimal::ZERO);
    }
}
