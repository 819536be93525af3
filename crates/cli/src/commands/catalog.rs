//! Catalog commands.
//!
//! # Usage
//!
//! ```bash
//! fv-cli catalog query --term a --sort price-high
//! fv-cli catalog query --file products.json --filter fruits
//! fv-cli catalog categories
//! ```
//!
//! # Environment Variables
//!
//! Live queries read the same product API settings as the storefront
//! (`PRODUCT_API_URL`, `PRODUCT_CATEGORY`, `PRODUCT_API_TIMEOUT_SECS`).

use std::fmt::Write as _;
use std::path::PathBuf;

use foodverse_core::{
    CatalogQuery, CatalogView, Category, KNOWN_CATEGORIES, Price, SortKey, parse_catalog_payload,
};
use foodverse_storefront::config::StorefrontConfig;
use foodverse_storefront::products::{ProductClient, ProductSource};

use super::{CommandError, read_file};

/// Where to load products from.
pub enum Source {
    /// A saved JSON payload.
    File(PathBuf),
    /// The product API, optionally overriding the configured category.
    Api(Option<String>),
}

/// Load products, derive the view and print it as a table.
///
/// # Errors
///
/// Returns an error if the products cannot be loaded.
pub async fn query(source: Source, term: &str, filter: &str, sort: &str) -> Result<(), CommandError> {
    let (source, category) = match source {
        Source::File(path) => {
            let parsed = parse_catalog_payload(&read_file(&path)?)?;
            if parsed.skipped > 0 {
                tracing::warn!(skipped = parsed.skipped, "Skipped malformed product records");
            }
            (ProductSource::fixture(parsed.products), String::new())
        }
        Source::Api(category) => {
            let config = StorefrontConfig::from_env()?;
            let category = category.unwrap_or_else(|| config.products.category.clone());
            (ProductSource::Http(ProductClient::new(&config.products)), category)
        }
    };

    let products = source.list_products(&category).await?;
    let query = CatalogQuery::new(term, Category::parse(filter), SortKey::parse(sort));
    let view = CatalogView::build(&products, &query);

    #[allow(clippy::print_stdout)]
    {
        print!("{}", render_view(&view));
    }
    Ok(())
}

/// Print the known categories.
#[allow(clippy::print_stdout)]
pub fn categories() {
    for info in KNOWN_CATEGORIES {
        println!("{:<12} {}", info.id, info.name);
    }
}

/// Format a view as a fixed-width table followed by the count label.
fn render_view(view: &CatalogView<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>5}  {:<32} {:<14} {:>10} {:>6}", "ID", "TITLE", "CATEGORY", "PRICE", "RATING");
    for product in &view.products {
        let _ = writeln!(
            out,
            "{:>5}  {:<32} {:<14} {:>10} {:>6}",
            product.id,
            truncate(&product.title, 32),
            truncate(&product.category, 14),
            Price::usd(product.price).display(),
            product.rating,
        );
    }
    let _ = writeln!(out, "{}", view.label);
    out
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(width.saturating_sub(1)).collect();
        cut.push('~');
        cut
    }
}
