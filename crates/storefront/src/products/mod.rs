//! Product data access.
//!
//! # Architecture
//!
//! - The remote product API is the source of truth; nothing is persisted
//! - [`ProductClient`] talks to it over `reqwest` and caches responses in
//!   `moka` (5 minute TTL)
//! - [`CatalogFeed`] holds the last published product list so a failed
//!   refresh can fall back to it
//! - [`ProductSource`] lets tests and the CLI serve a fixed list instead
//!
//! # Example
//!
//! ```rust,ignore
//! use foodverse_storefront::products::{ProductClient, ProductSource};
//!
//! let source = ProductSource::Http(ProductClient::new(&config.products));
//! let groceries = source.list_products("groceries").await?;
//! ```

mod cache;
mod client;
mod feed;

pub use client::ProductClient;
pub use feed::{CatalogFeed, FeedTicket};

use std::sync::Arc;

use foodverse_core::{PayloadError, Product, ProductId};
use thiserror::Error;

/// Errors that can occur when loading products.
#[derive(Debug, Error)]
pub enum ProductSourceError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("Upstream returned status {0}")]
    Status(u16),

    /// Response body was not a product payload.
    #[error("Payload error: {0}")]
    Payload(#[from] PayloadError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Where product lists come from.
#[derive(Debug, Clone)]
pub enum ProductSource {
    /// The remote product API.
    Http(ProductClient),
    /// A fixed list, served for every category.
    Fixture(Arc<Vec<Product>>),
}

impl ProductSource {
    /// Wrap a fixed product list.
    #[must_use]
    pub fn fixture(products: Vec<Product>) -> Self {
        Self::Fixture(Arc::new(products))
    }

    /// All products in `category`, in source order.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote request fails or the payload is not a
    /// product list.
    pub async fn list_products(
        &self,
        category: &str,
    ) -> Result<Arc<Vec<Product>>, ProductSourceError> {
        match self {
            Self::Http(client) => client.list_products(category).await,
            Self::Fixture(products) => Ok(Arc::clone(products)),
        }
    }

    /// A single product by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such product exists, or any transport error.
    pub async fn get_product(&self, id: ProductId) -> Result<Product, ProductSourceError> {
        match self {
            Self::Http(client) => client.get_product(id).await,
            Self::Fixture(products) => products
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .ok_or_else(|| ProductSourceError::NotFound(format!("product {id}"))),
        }
    }
}
