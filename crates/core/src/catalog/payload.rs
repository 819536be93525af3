//! Parsing of product API payloads.
//!
//! The product API answers with either `{ "products": [...] }` or a single
//! product object. Individual records that do not deserialize, or that fail
//! [`Product::is_well_formed`], are skipped and counted rather than failing
//! the whole payload.

use serde_json::Value;
use thiserror::Error;

use crate::types::Product;

/// Errors for payloads that cannot be read at all.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The body is not JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The body is JSON but neither a product list nor a product.
    #[error("unexpected payload shape: {0}")]
    UnexpectedShape(&'static str),
}

/// Products recovered from a payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCatalog {
    /// Renderable products, in payload order.
    pub products: Vec<Product>,
    /// Number of records dropped as malformed.
    pub skipped: usize,
}

/// Parse a product API response body.
///
/// # Errors
///
/// Returns `PayloadError::Json` if the body is not valid JSON and
/// `PayloadError::UnexpectedShape` if it is neither a `{ products: [...] }`
/// envelope nor a single product object.
pub fn parse_catalog_payload(body: &str) -> Result<ParsedCatalog, PayloadError> {
    let value: Value = serde_json::from_str(body)?;

    match value {
        Value::Object(mut map) => match map.remove("products") {
            Some(Value::Array(records)) => Ok(collect_records(records)),
            Some(_) => Err(PayloadError::UnexpectedShape("`products` is not an array")),
            None => Ok(collect_records(vec![Value::Object(map)])),
        },
        Value::Array(records) => Ok(collect_records(records)),
        _ => Err(PayloadError::UnexpectedShape("expected an object")),
    }
}

fn collect_records(records: Vec<Value>) -> ParsedCatalog {
    let total = records.len();
    let products: Vec<Product> = records
        .into_iter()
        .filter_map(|record| serde_json::from_value::<Product>(record).ok())
        .filter(Product::is_well_formed)
        .collect();

    ParsedCatalog {
        skipped: total - products.len(),
        products,
    }
}
