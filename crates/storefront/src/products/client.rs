//! HTTP client for the remote product API.
//!
//! Caches category listings and single products using `moka` (5-minute TTL).

use std::sync::Arc;
use std::time::Duration;

use foodverse_core::{PayloadError, Product, ProductId, parse_catalog_payload};
use moka::future::Cache;
use tracing::{debug, instrument, warn};
use url::Url;

use super::ProductSourceError;
use super::cache::{CacheKey, CacheValue};
use crate::config::ProductApiConfig;

/// Client for the product API.
///
/// Category listings and single products are cached for 5 minutes.
#[derive(Clone)]
pub struct ProductClient {
    inner: Arc<ProductClientInner>,
}

struct ProductClientInner {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
    cache: Cache<CacheKey, CacheValue>,
}

impl std::fmt::Debug for ProductClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

impl ProductClient {
    /// Create a new product API client.
    #[must_use]
    pub fn new(config: &ProductApiConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(ProductClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                timeout: config.request_timeout,
                cache,
            }),
        }
    }

    /// Build `{base}/{segments...}`, keeping any path prefix on the base.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.inner.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET `url` and return the body of a successful response.
    async fn fetch(&self, url: Url, what: &str) -> Result<String, ProductSourceError> {
        let response = self
            .inner
            .client
            .get(url)
            .timeout(self.inner.timeout)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ProductSourceError::NotFound(what.to_string()));
        }

        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Product API returned non-success status"
            );
            return Err(ProductSourceError::Status(status.as_u16()));
        }

        Ok(body)
    }

    /// Get every product in `category`.
    ///
    /// Records that fail validation are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a product
    /// payload.
    #[instrument(skip(self), fields(category = %category))]
    pub async fn list_products(
        &self,
        category: &str,
    ) -> Result<Arc<Vec<Product>>, ProductSourceError> {
        let cache_key = CacheKey::Category(category.to_string());

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for category");
            return Ok(products);
        }

        let url = self.endpoint(&["products", "category", category]);
        let body = self.fetch(url, &format!("category {category}")).await?;

        let parsed = parse_catalog_payload(&body).inspect_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse product payload"
            );
        })?;
        if parsed.skipped > 0 {
            warn!(skipped = parsed.skipped, "Skipped malformed product records");
        }

        let products = Arc::new(parsed.products);
        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(Arc::clone(&products)))
            .await;

        Ok(products)
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids, or an error if the request fails
    /// or the record is malformed.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, ProductSourceError> {
        let cache_key = CacheKey::Product(id);

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let url = self.endpoint(&["products", &id.to_string()]);
        let body = self.fetch(url, &format!("product {id}")).await?;

        let product = parse_catalog_payload(&body)?
            .products
            .into_iter()
            .next()
            .ok_or(ProductSourceError::Payload(PayloadError::UnexpectedShape(
                "malformed product record",
            )))?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }
}
