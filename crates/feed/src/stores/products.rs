//! Product collection store.

use std::sync::Arc;

use serde_json::Value;
use velora_core::{NewProduct, Product, ProductKey};

use crate::paths::Namespace;
use crate::{Feed, FeedError, Subscription};

/// Typed access to the product collection.
#[derive(Clone)]
pub struct ProductStore {
    feed: Arc<dyn Feed>,
    ns: Namespace,
}

impl ProductStore {
    /// Create a store over the product collection of `ns`.
    #[must_use]
    pub fn new(feed: Arc<dyn Feed>, ns: Namespace) -> Self {
        Self { feed, ns }
    }

    /// Subscribe to change notifications for the whole collection.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        self.feed.subscribe(&self.ns.products())
    }

    /// Point read of the whole collection, newest insertion first.
    ///
    /// # Errors
    ///
    /// Returns an error if the feed read fails.
    pub async fn list(&self) -> Result<Vec<(ProductKey, Product)>, FeedError> {
        let snapshot = self.feed.read(&self.ns.products()).await?;
        Ok(super::decode_newest_first(snapshot.as_ref()))
    }

    /// Insert a new product and return its feed-assigned key.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the feed write fails.
    pub async fn create(&self, product: &NewProduct) -> Result<ProductKey, FeedError> {
        let value: Value = serde_json::to_value(product)?;
        let key = self.feed.push(&self.ns.products(), value).await?;
        Ok(ProductKey::new(key))
    }

    /// Permanently remove a product record.
    ///
    /// Does not cascade into historical order item snapshots; those are
    /// owned copies.
    ///
    /// # Errors
    ///
    /// Returns an error if the feed delete fails.
    pub async fn remove(&self, key: &ProductKey) -> Result<(), FeedError> {
        self.feed.delete(&self.ns.product(key)).await
    }
}
