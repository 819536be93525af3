//! Product records as delivered by the external product API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// Highest rating a product can carry.
pub const MAX_RATING: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// A catalog product.
///
/// Treated as an immutable value once fetched. Field names follow the
/// upstream JSON (`discountPercentage`, etc.).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub rating: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub discount_percentage: Option<Decimal>,
}

impl Product {
    /// Whether the record satisfies the catalog's value constraints:
    /// non-negative price and a rating within 0-5.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.price.is_sign_negative()
            && !self.rating.is_sign_negative()
            && self.rating <= MAX_RATING
            && !self.title.trim().is_empty()
    }

    /// Primary image: the thumbnail if present, otherwise the first gallery image.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.thumbnail
            .as_deref()
            .or_else(|| self.images.first().map(String::as_str))
    }

    /// Unit price in the storefront currency.
    #[must_use]
    pub fn unit_price(&self) -> Price {
        Price::usd(self.price)
    }

    /// Whether any stock remains.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> Product {
        serde_json::from_str(
            r#"{
                "id": 16,
                "title": "Apple",
                "description": "Fresh and crisp apples.",
                "category": "groceries",
                "price": 1.99,
                "discountPercentage": 1.97,
                "rating": 2.96,
                "stock": 9,
                "images": ["https://cdn.example/apple/1.png"],
                "thumbnail": "https://cdn.example/apple/thumb.png"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_deserialize_upstream_shape() {
        let product = sample();
        assert_eq!(product.id, ProductId::new(16));
        assert_eq!(product.price, Decimal::new(199, 2));
        assert_eq!(product.rating, Decimal::new(296, 2));
        assert_eq!(product.discount_percentage, Some(Decimal::new(197, 2)));
        assert!(product.is_well_formed());
        assert!(product.in_stock());
    }

    #[test]
    fn test_image_prefers_thumbnail() {
        let mut product = sample();
        assert_eq!(product.image(), Some("https://cdn.example/apple/thumb.png"));
        product.thumbnail = None;
        assert_eq!(product.image(), Some("https://cdn.example/apple/1.png"));
        product.images.clear();
        assert_eq!(product.image(), None);
    }

    #[test]
    fn test_out_of_range_values_are_not_well_formed() {
        let mut product = sample();
        product.rating = Decimal::new(51, 1);
        assert!(!product.is_well_formed());

        let mut product = sample();
        product.price = Decimal::new(-1, 0);
        assert!(!product.is_well_formed());
    }

    #[test]
    fn test_missing_required_field_fails() {
        let result = serde_json::from_str::<Product>(r#"{"id": 1, "title": "No price"}"#);
        assert!(result.is_err());
    }
}
