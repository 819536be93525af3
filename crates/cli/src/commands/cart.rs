//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! fv-cli cart total --file adds.json
//! ```
//!
//! The file holds a JSON array of adds, applied in order:
//!
//! ```json
//! [{ "product": { "id": 16, "title": "Apple", "price": 1.99, "category": "groceries", "rating": 4.2 }, "quantity": 2 }]
//! ```

use std::fmt::Write as _;
use std::path::Path;

use foodverse_core::{CartStore, Product};
use serde::Deserialize;

use super::{CommandError, read_file};

/// One `add_to_cart` call.
#[derive(Debug, Deserialize)]
struct CartAdd {
    product: Product,
    #[serde(default = "default_quantity")]
    quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

/// Apply the adds in `path` to an empty cart and print the summary.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn total(path: &Path) -> Result<(), CommandError> {
    let cart = build_cart(&read_file(path)?)?;

    #[allow(clippy::print_stdout)]
    {
        print!("{}", render_cart(&cart));
    }
    Ok(())
}

fn build_cart(json: &str) -> Result<CartStore, CommandError> {
    let adds: Vec<CartAdd> = serde_json::from_str(json)?;

    let mut cart = CartStore::new();
    for add in adds {
        cart.add_to_cart(&add.product, add.quantity);
    }
    Ok(cart)
}

fn render_cart(cart: &CartStore) -> String {
    let summary = cart.summary();
    let mut out = String::new();
    for line in cart.lines() {
        let _ = writeln!(
            out,
            "{:>3} x {:<32} {:>10}",
            line.quantity,
            line.title,
            foodverse_core::Price::usd(line.line_total()).display(),
        );
    }
    let _ = writeln!(out, "Items:    {}", summary.item_count);
    let _ = writeln!(out, "Subtotal: {}", summary.subtotal.display());
    let _ = writeln!(out, "Shipping: Free");
    let _ = writeln!(out, "Tax:      {}", summary.tax.display());
    let _ = writeln!(out, "Total:    {}", summary.total.display());
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    const ADDS: &str = r#"[
        {"product": {"id": 1, "title": "Rice", "price": 10, "category": "groceries", "rating": 4}, "quantity": 2},
        {"product": {"id": 1, "title": "Rice", "price": 10, "category": "groceries", "rating": 4}, "quantity": 3},
        {"product": {"id": 2, "title": "Milk", "price": 2.5, "category": "groceries", "rating": 5}}
    ]"#;

    #[test]
    fn test_build_cart_merges_lines() {
        let cart = build_cart(ADDS).unwrap();
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total(), Decimal::new(5250, 2));
    }

    #[test]
    fn test_render_cart() {
        let rendered = render_cart(&build_cart(ADDS).unwrap());
        assert!(rendered.contains("5 x Rice"));
        assert!(rendered.contains("Items:    2"));
        assert!(rendered.contains("Total:    $52.50"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(build_cart("{"), Err(CommandError::Json(_))));
    }
}
