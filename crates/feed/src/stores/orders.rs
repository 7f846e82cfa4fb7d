//! Order collection store.

use std::sync::Arc;

use serde_json::{Value, json};
use velora_core::{NewOrder, Order, OrderKey};

use crate::paths::Namespace;
use crate::{Feed, FeedError, Subscription};

/// Typed access to the order collection.
#[derive(Clone)]
pub struct OrderStore {
    feed: Arc<dyn Feed>,
    ns: Namespace,
}

impl OrderStore {
    /// Create a store over the order collection of `ns`.
    #[must_use]
    pub fn new(feed: Arc<dyn Feed>, ns: Namespace) -> Self {
        Self { feed, ns }
    }

    /// Subscribe to change notifications for the whole collection.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        self.feed.subscribe(&self.ns.orders())
    }

    /// Point read of the whole collection, newest insertion first.
    ///
    /// # Errors
    ///
    /// Returns an error if the feed read fails.
    pub async fn list(&self) -> Result<Vec<(OrderKey, Order)>, FeedError> {
        let snapshot = self.feed.read(&self.ns.orders()).await?;
        Ok(super::decode_newest_first(snapshot.as_ref()))
    }

    /// Insert a new order and return its feed-assigned key.
    ///
    /// The record is written whole in a single push: there is no
    /// half-applied intermediate state a concurrent reader could see.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the feed write fails.
    pub async fn create(&self, order: &NewOrder) -> Result<OrderKey, FeedError> {
        let value: Value = serde_json::to_value(order)?;
        let key = self.feed.push(&self.ns.orders(), value).await?;
        Ok(OrderKey::new(key))
    }

    /// Overwrite the status field of one order, leaving the rest of the
    /// record untouched. Concurrent admins race last-write-wins.
    ///
    /// # Errors
    ///
    /// Returns an error if the feed update fails.
    pub async fn set_status(&self, key: &OrderKey, status: &str) -> Result<(), FeedError> {
        self.feed
            .update(&self.ns.order(key), json!({ "status": status }))
            .await
    }

    /// Permanently remove an order record.
    ///
    /// # Errors
    ///
    /// Returns an error if the feed delete fails.
    pub async fn remove(&self, key: &OrderKey) -> Result<(), FeedError> {
        self.feed.delete(&self.ns.order(key)).await
    }
}
