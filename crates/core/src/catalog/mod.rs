//! Catalog query engine.
//!
//! Turns a raw product list plus a [`CatalogQuery`] into a derived view:
//! text and category filtering followed by a stable sort. Nothing here
//! mutates the input; the same product slice can be queried repeatedly.
//!
//! # Example
//!
//! ```
//! use foodverse_core::{CatalogQuery, Category, SortKey, derive_view};
//!
//! let products = Vec::new();
//! let query = CatalogQuery::new("apple", Category::All, SortKey::PriceLow);
//! assert!(derive_view(&products, &query).is_empty());
//! ```

mod payload;

pub use payload::{ParsedCatalog, PayloadError, parse_catalog_payload};

use serde::{Deserialize, Serialize};

use crate::types::Product;

/// A category shown in the storefront's filter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    /// Filter value (`all` is the sentinel).
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
}

/// Categories offered by the product listing, sentinel first.
pub const KNOWN_CATEGORIES: &[CategoryInfo] = &[
    CategoryInfo {
        id: "all",
        name: "All Items",
    },
    CategoryInfo {
        id: "groceries",
        name: "Groceries",
    },
    CategoryInfo {
        id: "fruits",
        name: "Fruits",
    },
    CategoryInfo {
        id: "vegetables",
        name: "Vegetables",
    },
    CategoryInfo {
        id: "meat",
        name: "Meat",
    },
];

/// Category filter.
///
/// `Named` filters match loosely: the (lowercased) filter only has to be a
/// substring of the product's category, so `meat` also matches
/// `meat-and-seafood`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All,
    Named(String),
}

impl Category {
    /// Parse a filter value. Empty input and `all` (any case) give the sentinel.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Named(s.to_lowercase())
        }
    }

    /// The filter value as it appears on the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Named(name) => name,
        }
    }

    /// Display name for a known category, falling back to the raw value.
    #[must_use]
    pub fn display_name(&self) -> &str {
        KNOWN_CATEGORIES
            .iter()
            .find(|info| info.id == self.as_str())
            .map_or_else(|| self.as_str(), |info| info.name)
    }

    fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => product.category.to_lowercase().contains(name.as_str()),
        }
    }
}

impl Serialize for Category {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

/// Sort order for the derived view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Source order.
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    /// Highest rating first.
    Rating,
    /// Literal reversal of source order.
    Newest,
}

impl SortKey {
    /// Parse a wire name. Unknown names fall back to [`SortKey::Featured`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "price-low" => Self::PriceLow,
            "price-high" => Self::PriceHigh,
            "rating" => Self::Rating,
            "newest" => Self::Newest,
            _ => Self::Featured,
        }
    }

    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Rating => "rating",
            Self::Newest => "newest",
        }
    }
}

/// A catalog query: free-text term, category filter, and sort key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub term: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub sort: SortKey,
}

impl CatalogQuery {
    /// Create a query.
    #[must_use]
    pub fn new(term: impl Into<String>, category: Category, sort: SortKey) -> Self {
        Self {
            term: term.into(),
            category,
            sort,
        }
    }

    /// Whether the product passes both the text and the category filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        matches_term(product, &self.term.to_lowercase()) && self.category.matches(product)
    }
}

/// An empty term matches everything; otherwise the term must appear in the
/// title or the description. `term` must already be lowercased.
fn matches_term(product: &Product, term: &str) -> bool {
    term.is_empty()
        || product.title.to_lowercase().contains(term)
        || product.description.to_lowercase().contains(term)
}

/// Derive the filtered, sorted view of `products` for `query`.
///
/// Returns references into `products` in view order. Every sort except
/// [`SortKey::Newest`] is stable, so equal keys keep their input order;
/// `Newest` is an exact reversal. An empty result is not an error.
#[must_use]
pub fn derive_view<'a>(products: &'a [Product], query: &CatalogQuery) -> Vec<&'a Product> {
    let term = query.term.to_lowercase();
    let mut view: Vec<&Product> = products
        .iter()
        .filter(|product| matches_term(product, &term) && query.category.matches(product))
        .collect();

    match query.sort {
        SortKey::Featured => {}
        SortKey::PriceLow => view.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceHigh => view.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::Rating => view.sort_by(|a, b| b.rating.cmp(&a.rating)),
        SortKey::Newest => view.reverse(),
    }

    view
}

/// Whether a product belongs on the menu's detail pages: the `groceries`
/// category or anything with `food` in its category.
#[must_use]
pub fn is_menu_item(product: &Product) -> bool {
    product.category == "groceries" || product.category.contains("food")
}

/// A derived view with the count label the listing header shows.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView<'a> {
    pub products: Vec<&'a Product>,
    pub count: usize,
    pub label: String,
}

impl<'a> CatalogView<'a> {
    /// Run `query` over `products` and wrap the result.
    #[must_use]
    pub fn build(products: &'a [Product], query: &CatalogQuery) -> Self {
        let products = derive_view(products, query);
        let count = products.len();
        Self {
            products,
            count,
            label: item_label(count),
        }
    }

    /// Whether the caller should render the empty state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// `"1 item"`, `"3 items"`.
#[must_use]
pub fn item_label(count: usize) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{count} items")
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::ProductId;

    fn product(id: i32, title: &str, category: &str, price: i64, rating: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            price: Decimal::from(price),
            category: category.to_string(),
            rating: Decimal::from(rating),
            description: String::new(),
            stock: 10,
            thumbnail: None,
            images: Vec::new(),
            discount_percentage: None,
        }
    }

    fn ids(view: &[&Product]) -> Vec<i32> {
        view.iter().map(|p| p.id.as_i32()).collect()
    }

    #[test]
    fn test_end_to_end_price_high() {
        let products = vec![
            product(1, "Apple Pie", "desserts", 5, 4),
            product(2, "Banana", "fruits", 2, 5),
        ];
        let query = CatalogQuery::new("a", Category::All, SortKey::PriceHigh);
        assert_eq!(ids(&derive_view(&products, &query)), vec![1, 2]);
    }

    #[test]
    fn test_term_matches_title_or_description_case_insensitively() {
        let mut with_description = product(2, "Loaf", "groceries", 3, 3);
        with_description.description = "Sourdough BREAD".to_string();
        let products = vec![product(1, "Bread Roll", "groceries", 1, 4), with_description];

        let query = CatalogQuery::new("bread", Category::All, SortKey::Featured);
        assert_eq!(ids(&derive_view(&products, &query)), vec![1, 2]);

        let query = CatalogQuery::new("cheese", Category::All, SortKey::Featured);
        assert!(derive_view(&products, &query).is_empty());
    }

    #[test]
    fn test_category_filter_is_substring_match() {
        let products = vec![
            product(1, "Steak", "meat-and-seafood", 20, 4),
            product(2, "Kale", "vegetables", 3, 4),
            product(3, "Chicken", "Meat", 8, 4),
        ];
        let query = CatalogQuery::new("", Category::parse("MEAT"), SortKey::Featured);
        assert_eq!(ids(&derive_view(&products, &query)), vec![1, 3]);
    }

    #[test]
    fn test_both_filters_must_hold() {
        let products = vec![
            product(1, "Apple", "fruits", 1, 4),
            product(2, "Apple Sauce", "groceries", 2, 4),
        ];
        let query = CatalogQuery::new("apple", Category::parse("fruits"), SortKey::Featured);
        assert_eq!(ids(&derive_view(&products, &query)), vec![1]);
    }

    #[test]
    fn test_price_sort_is_stable() {
        let products = vec![
            product(1, "A", "groceries", 3, 1),
            product(2, "B", "groceries", 1, 1),
            product(3, "C", "groceries", 3, 1),
            product(4, "D", "groceries", 1, 1),
        ];
        let low = CatalogQuery::new("", Category::All, SortKey::PriceLow);
        assert_eq!(ids(&derive_view(&products, &low)), vec![2, 4, 1, 3]);
        let high = CatalogQuery::new("", Category::All, SortKey::PriceHigh);
        assert_eq!(ids(&derive_view(&products, &high)), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_rating_sort_descending_and_stable() {
        let products = vec![
            product(1, "A", "groceries", 1, 3),
            product(2, "B", "groceries", 1, 5),
            product(3, "C", "groceries", 1, 3),
        ];
        let query = CatalogQuery::new("", Category::All, SortKey::Rating);
        assert_eq!(ids(&derive_view(&products, &query)), vec![2, 1, 3]);
    }

    #[test]
    fn test_newest_is_exact_reversal() {
        let products = vec![
            product(1, "A", "groceries", 1, 3),
            product(2, "B", "groceries", 1, 3),
            product(3, "C", "groceries", 1, 3),
        ];
        let query = CatalogQuery::new("", Category::All, SortKey::Newest);
        assert_eq!(ids(&derive_view(&products, &query)), vec![3, 2, 1]);
        // Source list untouched.
        assert_eq!(products.first().map(|p| p.id), Some(ProductId::new(1)));
    }

    #[test]
    fn test_sort_key_parse_falls_back_to_featured() {
        assert_eq!(SortKey::parse("price-low"), SortKey::PriceLow);
        assert_eq!(SortKey::parse("newest"), SortKey::Newest);
        assert_eq!(SortKey::parse("alphabetical"), SortKey::Featured);
        assert_eq!(SortKey::PriceHigh.as_str(), "price-high");
    }

    #[test]
    fn test_category_parse_and_display_name() {
        assert_eq!(Category::parse(""), Category::All);
        assert_eq!(Category::parse(" All "), Category::All);
        assert_eq!(Category::parse("Fruits").display_name(), "Fruits");
        assert_eq!(Category::parse("bakery").display_name(), "bakery");
    }

    #[test]
    fn test_is_menu_item() {
        assert!(is_menu_item(&product(1, "Rice", "groceries", 1, 1)));
        assert!(is_menu_item(&product(2, "Kibble", "pet-food", 1, 1)));
        assert!(!is_menu_item(&product(3, "Phone", "smartphones", 1, 1)));
    }

    #[test]
    fn test_catalog_view_label() {
        let products = vec![product(1, "Rice", "groceries", 1, 1)];
        let view = CatalogView::build(&products, &CatalogQuery::default());
        assert_eq!(view.count, 1);
        assert_eq!(view.label, "1 item");
        assert_eq!(item_label(0), "0 items");

        let query = CatalogQuery::new("zzz", Category::All, SortKey::Featured);
        assert!(CatalogView::build(&products, &query).is_empty());
    }
}
