//! Line-item cart store.
//!
//! The cart keeps at most one line per product, in the order products were
//! first added. A line's quantity is always at least 1: adding merges into
//! the existing line, updates are floored at 1, and removal deletes the line.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{Price, Product, ProductId};

/// One cart entry.
///
/// Title, price, category, and image are captured when the product is first
/// added and are not refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub quantity: u32,
}

impl CartLine {
    fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            title: product.title.clone(),
            price: product.price,
            category: product.category.clone(),
            image: product.image().map(String::from),
            quantity,
        }
    }

    /// Price times quantity, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price
            .checked_mul(Decimal::from(self.quantity))
            .unwrap_or(Decimal::MAX)
    }
}

/// Totals shown in the order summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub subtotal: Price,
    /// Shipping is free on every order.
    pub shipping: Price,
    pub tax: Price,
    pub total: Price,
    /// Distinct lines, not units.
    pub item_count: usize,
}

/// The cart.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    lines: Vec<CartLine>,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add `quantity` units of `product`.
    ///
    /// Merges into the existing line for `product.id` if there is one,
    /// otherwise appends a new line. A quantity of 0 is treated as 1.
    pub fn add_to_cart(&mut self, product: &Product, quantity: u32) {
        let quantity = quantity.max(1);
        if let Some(line) = self.line_mut(product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine::from_product(product, quantity));
        }
    }

    /// Set the quantity of an existing line, flooring at 1.
    ///
    /// Returns `false` (and changes nothing) if the product is not in the cart.
    pub fn update_quantity(&mut self, product_id: ProductId, new_quantity: u32) -> bool {
        self.line_mut(product_id).is_some_and(|line| {
            line.quantity = new_quantity.max(1);
            true
        })
    }

    /// Remove a line. Returns whether a line was removed.
    pub fn remove_from_cart(&mut self, product_id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != product_id);
        self.lines.len() != before
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) {
        self.lines.clear();
    }

    /// Sum of price times quantity over all lines; zero when empty.
    ///
    /// Saturates at `Decimal::MAX` instead of overflowing.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).fold(Decimal::ZERO, |acc, line| {
            acc.checked_add(line).unwrap_or(Decimal::MAX)
        })
    }

    /// Number of distinct lines (not units).
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn unit_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up the line for a product.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Order summary: free shipping and no tax, so total equals subtotal.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        let subtotal = self.total();
        CartSummary {
            subtotal: Price::usd(subtotal),
            shipping: Price::usd(Decimal::ZERO),
            tax: Price::usd(Decimal::ZERO),
            total: Price::usd(subtotal),
            item_count: self.item_count(),
        }
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
    }
}
