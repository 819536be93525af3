//! Application state shared across handlers.

use std::sync::Arc;

use foodverse_core::{CartStore, OrderLog, Product, SessionStore};
use tokio::sync::Mutex;

use crate::config::StorefrontConfig;
use crate::products::{CatalogFeed, ProductClient, ProductSource, ProductSourceError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The cart and session stores
/// each sit behind their own mutex, so a mutation is never observed
/// half-applied.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    source: ProductSource,
    feed: CatalogFeed,
    cart: Mutex<CartStore>,
    session: Mutex<SessionStore>,
    orders: OrderLog,
}

impl AppState {
    /// Create state backed by the remote product API.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let source = ProductSource::Http(ProductClient::new(&config.products));
        Self::with_source(config, source)
    }

    /// Create state backed by an explicit product source.
    #[must_use]
    pub fn with_source(config: StorefrontConfig, source: ProductSource) -> Self {
        let session = SessionStore::new(config.auth.authenticator());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                source,
                feed: CatalogFeed::new(),
                cart: Mutex::new(CartStore::new()),
                session: Mutex::new(session),
                orders: OrderLog::sample(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product source.
    #[must_use]
    pub fn source(&self) -> &ProductSource {
        &self.inner.source
    }

    /// The cart store.
    #[must_use]
    pub fn cart(&self) -> &Mutex<CartStore> {
        &self.inner.cart
    }

    /// The session store.
    #[must_use]
    pub fn session(&self) -> &Mutex<SessionStore> {
        &self.inner.session
    }

    #[must_use]
    pub fn orders(&self) -> &OrderLog {
        &self.inner.orders
    }

    /// Load the configured menu category through the catalog feed.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails and no earlier snapshot exists.
    pub async fn catalog(&self) -> Result<Arc<Vec<Product>>, ProductSourceError> {
        self.inner
            .feed
            .load(&self.inner.source, &self.inner.config.products.category)
            .await
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .field("source", &self.inner.source)
            .finish_non_exhaustive()
    }
}
