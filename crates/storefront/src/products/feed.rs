//! Last-initiated-wins publication of the catalog snapshot.
//!
//! Every load takes a ticket before it starts fetching. When it finishes it
//! may publish only if no load with a newer ticket has already published, so
//! a slow, older fetch can never overwrite a fresher one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use foodverse_core::Product;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::{ProductSource, ProductSourceError};

/// Ordering token for one load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FeedTicket(u64);

#[derive(Debug)]
struct Snapshot {
    ticket: FeedTicket,
    products: Arc<Vec<Product>>,
}

/// The most recently published product list.
#[derive(Debug, Default)]
pub struct CatalogFeed {
    next_ticket: AtomicU64,
    snapshot: RwLock<Option<Snapshot>>,
}

impl CatalogFeed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a ticket for a load that is about to start.
    pub fn begin(&self) -> FeedTicket {
        FeedTicket(self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Publish `products` for `ticket`.
    ///
    /// Returns `false` (and leaves the snapshot alone) if a newer ticket has
    /// already published.
    pub async fn publish(&self, ticket: FeedTicket, products: Arc<Vec<Product>>) -> bool {
        let mut snapshot = self.snapshot.write().await;
        if snapshot.as_ref().is_some_and(|s| s.ticket > ticket) {
            return false;
        }
        *snapshot = Some(Snapshot { ticket, products });
        true
    }

    /// The current snapshot, if anything has been published.
    pub async fn current(&self) -> Option<Arc<Vec<Product>>> {
        self.snapshot
            .read()
            .await
            .as_ref()
            .map(|s| Arc::clone(&s.products))
    }

    /// Fetch `category` from `source` and publish it.
    ///
    /// On a fetch failure the last good snapshot is returned instead. If a
    /// newer load published first, its snapshot is returned and this result
    /// is discarded.
    ///
    /// # Errors
    ///
    /// Returns the fetch error only when nothing has ever been published.
    pub async fn load(
        &self,
        source: &ProductSource,
        category: &str,
    ) -> Result<Arc<Vec<Product>>, ProductSourceError> {
        let ticket = self.begin();

        match source.list_products(category).await {
            Ok(products) => {
                if self.publish(ticket, Arc::clone(&products)).await {
                    return Ok(products);
                }
                debug!(?ticket, "Discarding stale catalog load");
                Ok(self.current().await.unwrap_or(products))
            }
            Err(e) => match self.current().await {
                Some(snapshot) => {
                    warn!(error = %e, "Catalog refresh failed, serving last snapshot");
                    Ok(snapshot)
                }
                None => Err(e),
            },
        }
    }
}
