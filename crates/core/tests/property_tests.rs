//! # Property-Based Tests
//!
//! Invariants of the catalog query engine and cart store, checked over
//! generated product lists and queries.

use foodverse_core::{
    CartStore, CatalogQuery, Category, Product, ProductId, SortKey, derive_view,
};
use proptest::collection::vec;
use proptest::prelude::*;
use rust_decimal::Decimal;

// =============================================================================
// GENERATORS
// =============================================================================

const TITLES: &[&str] = &["Apple", "banana", "Bread", "Cheese", "Milk", "Rice"];
const DESCRIPTIONS: &[&str] = &["", "Fresh bread", "whole MILK", "ripe and sweet"];
const CATEGORIES: &[&str] = &["groceries", "fruits", "vegetables", "meat", "Meat-Deli"];
const TERMS: &[&str] = &["", "a", "an", "BREAD", "milk", "zzz", "e"];
const FILTERS: &[&str] = &["all", "groceries", "fruits", "meat", "veg", "none"];
const SORTS: &[SortKey] = &[
    SortKey::Featured,
    SortKey::PriceLow,
    SortKey::PriceHigh,
    SortKey::Rating,
    SortKey::Newest,
];

/// Products with ids equal to their input position; prices and ratings are
/// drawn from small ranges so ties are common.
fn products() -> impl Strategy<Value = Vec<Product>> {
    vec(
        (
            0..TITLES.len(),
            0..DESCRIPTIONS.len(),
            0..CATEGORIES.len(),
            0i64..5,
            0i64..=5,
        ),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(index, (title, description, category, price, rating))| Product {
                id: ProductId::new(i32::try_from(index).unwrap_or(i32::MAX)),
                title: TITLES.get(title).copied().unwrap_or_default().to_string(),
                price: Decimal::from(price),
                category: CATEGORIES
                    .get(category)
                    .copied()
                    .unwrap_or_default()
                    .to_string(),
                rating: Decimal::from(rating),
                description: DESCRIPTIONS
                    .get(description)
                    .copied()
                    .unwrap_or_default()
                    .to_string(),
                stock: 1,
                thumbnail: None,
                images: Vec::new(),
                discount_percentage: None,
            })
            .collect()
    })
}

fn query() -> impl Strategy<Value = CatalogQuery> {
    (0..TERMS.len(), 0..FILTERS.len(), 0..SORTS.len()).prop_map(|(term, filter, sort)| {
        CatalogQuery::new(
            TERMS.get(term).copied().unwrap_or_default(),
            Category::parse(FILTERS.get(filter).copied().unwrap_or_default()),
            SORTS.get(sort).copied().unwrap_or_default(),
        )
    })
}

/// Case-insensitive term in title or description, and a category filter
/// that is either `all` or a substring of the product's category.
fn expected_match(product: &Product, query: &CatalogQuery) -> bool {
    let term = query.term.to_lowercase();
    let filter = query.category.as_str();

    let term_ok = term.is_empty()
        || product.title.to_lowercase().contains(&term)
        || product.description.to_lowercase().contains(&term);
    let category_ok = filter == "all" || product.category.to_lowercase().contains(filter);

    term_ok && category_ok
}

fn position(product: &Product) -> i32 {
    product.id.as_i32()
}

// =============================================================================
// CATALOG PROPERTIES
// =============================================================================

proptest! {
    /// Output holds exactly the matching inputs, each once.
    #[test]
    fn view_is_exactly_the_matching_products(products in products(), query in query()) {
        let view = derive_view(&products, &query);

        let mut got: Vec<i32> = view.iter().map(|p| position(p)).collect();
        got.sort_unstable();
        let expected: Vec<i32> = products
            .iter()
            .filter(|p| expected_match(p, &query))
            .map(position)
            .collect();

        prop_assert_eq!(got, expected);
    }

    /// Sorted modes keep input order among equal keys; newest reverses exactly.
    #[test]
    fn sorting_is_stable_or_reversed(products in products(), query in query()) {
        let view = derive_view(&products, &query);
        let filtered: Vec<i32> = products
            .iter()
            .filter(|p| expected_match(p, &query))
            .map(position)
            .collect();

        match query.sort {
            SortKey::Featured => {
                let got: Vec<i32> = view.iter().map(|p| position(p)).collect();
                prop_assert_eq!(got, filtered);
            }
            SortKey::Newest => {
                let got: Vec<i32> = view.iter().map(|p| position(p)).collect();
                let reversed: Vec<i32> = filtered.into_iter().rev().collect();
                prop_assert_eq!(got, reversed);
            }
            SortKey::PriceLow | SortKey::PriceHigh | SortKey::Rating => {
                for pair in view.windows(2) {
                    let [a, b] = pair else { continue };
                    let (ka, kb) = match query.sort {
                        SortKey::PriceLow => (a.price, b.price),
                        SortKey::PriceHigh => (b.price, a.price),
                        _ => (b.rating, a.rating),
                    };
                    prop_assert!(ka <= kb);
                    if ka == kb {
                        prop_assert!(position(a) < position(b));
                    }
                }
            }
        }
    }

    /// Deriving a view leaves the source list untouched.
    #[test]
    fn view_does_not_mutate_source(products in products(), query in query()) {
        let before = products.clone();
        let _ = derive_view(&products, &query);
        let _ = derive_view(&products, &query);
        prop_assert_eq!(products, before);
    }
}

// =============================================================================
// CART PROPERTIES
// =============================================================================

proptest! {
    /// Two adds of the same product give one line with the summed quantity.
    #[test]
    fn repeated_add_merges(products in products(), first in 1u32..50, second in 1u32..50) {
        prop_assume!(!products.is_empty());
        let Some(product) = products.first() else { return Ok(()) };

        let mut cart = CartStore::new();
        cart.add_to_cart(product, first);
        cart.add_to_cart(product, second);

        prop_assert_eq!(cart.item_count(), 1);
        prop_assert_eq!(cart.line(product.id).map(|l| l.quantity), Some(first + second));
    }

    /// No sequence of updates drives a line below 1.
    #[test]
    fn quantity_never_below_one(products in products(), updates in vec(0u32..5, 1..20)) {
        prop_assume!(!products.is_empty());
        let Some(product) = products.first() else { return Ok(()) };

        let mut cart = CartStore::new();
        cart.add_to_cart(product, 1);
        for quantity in updates {
            cart.update_quantity(product.id, quantity);
            prop_assert!(cart.lines().iter().all(|l| l.quantity >= 1));
        }
    }

    /// Total equals the sum of price times quantity over distinct lines.
    #[test]
    fn total_matches_line_sum(products in products(), quantity in 1u32..10) {
        let mut cart = CartStore::new();
        for product in &products {
            cart.add_to_cart(product, quantity);
        }

        let expected: Decimal = products
            .iter()
            .map(|p| p.price * Decimal::from(quantity))
            .sum();
        prop_assert_eq!(cart.total(), expected);
        prop_assert_eq!(cart.item_count(), products.len());

        cart.clear_cart();
        prop_assert_eq!(cart.item_count(), 0);
        prop_assert_eq!(cart.total(), Decimal::ZERO);
    }
}
