//! Velora Feed - Realtime database client layer.
//!
//! # Architecture
//!
//! The remote data feed is a key-value tree store with
//! subscribe-for-changes semantics. This crate wraps it behind the
//! [`Feed`] trait so every component takes an explicitly constructed,
//! passed-in handle instead of reaching for a process-wide singleton:
//!
//! - [`RtdbClient`] - Firebase Realtime Database over REST, with
//!   server-sent-event subscriptions
//! - [`MemoryFeed`] - in-process implementation with the same observable
//!   semantics, used by tests and offline development
//!
//! Subscriptions are expressed as a stream of snapshot-replace events per
//! watched path: each delivery fully replaces the local snapshot, so
//! consumers are idempotent with respect to repeated identical
//! deliveries. Concurrent writers are resolved last-write-wins at the
//! feed layer; this crate imposes no optimistic-concurrency check.
//!
//! On top of the raw feed sit typed [`stores`] (one per collection) and
//! reactive [`mirror`]s that keep a decoded local copy current.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use velora_feed::{Feed, MemoryFeed, Namespace, stores::ProductStore};
//!
//! let feed: Arc<dyn Feed> = Arc::new(MemoryFeed::new());
//! let products = ProductStore::new(Arc::clone(&feed), Namespace::new("velora_v1"));
//! let key = products.create(&new_product).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod auth;
mod client;
mod memory;
mod paths;
mod tree;

pub mod mirror;
pub mod stores;

pub use auth::{AnonymousCredential, AuthClient, AuthClientError, AuthConfig};
pub use client::{RtdbClient, RtdbConfig};
pub use memory::MemoryFeed;
pub use paths::Namespace;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::watch;

/// Errors that can occur when talking to the remote feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed returned an error response.
    #[error("Feed error: {status} - {message}")]
    Api { status: u16, message: String },

    /// JSON decoding failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Push succeeded but the feed did not return a generated key.
    #[error("Feed did not return a key for pushed record")]
    MissingKey,
}

/// The remote data feed consumed by every component.
///
/// Paths are slash-separated and rooted under a namespace prefix shared
/// by all entities, so multiple logical deployments can share one
/// physical store (see [`Namespace`]).
#[async_trait]
pub trait Feed: Send + Sync {
    /// Subscribe to change notifications for the subtree at `path`.
    ///
    /// Every delivery carries the full subtree value; `None` means the
    /// path holds no data. The subscription is cancelled when the
    /// returned handle is dropped.
    fn subscribe(&self, path: &str) -> Subscription;

    /// Point read of the subtree at `path`. Absent data reads as `None`.
    async fn read(&self, path: &str) -> Result<Option<Value>, FeedError>;

    /// Insert `value` under an auto-assigned key and return that key.
    ///
    /// Generated keys sort chronologically, so key order is insertion
    /// order.
    async fn push(&self, path: &str, value: Value) -> Result<String, FeedError>;

    /// Replace the subtree at `path` with `value`.
    async fn write(&self, path: &str, value: Value) -> Result<(), FeedError>;

    /// Merge the top-level fields of `fields` into the record at `path`.
    async fn update(&self, path: &str, fields: Value) -> Result<(), FeedError>;

    /// Remove the subtree at `path`.
    async fn delete(&self, path: &str) -> Result<(), FeedError>;
}

/// A live subscription to one feed path.
///
/// Wraps a watch channel of snapshot-replace events. Dropping the
/// subscription tears down whatever background work keeps it fed;
/// in-flight writes are unaffected.
pub struct Subscription {
    rx: watch::Receiver<Option<Value>>,
    _guard: Option<SubscriptionGuard>,
}

impl Subscription {
    pub(crate) fn new(rx: watch::Receiver<Option<Value>>, guard: Option<SubscriptionGuard>) -> Self {
        Self { rx, _guard: guard }
    }

    /// The most recently delivered snapshot for the watched path.
    #[must_use]
    pub fn snapshot(&self) -> Option<Value> {
        self.rx.borrow().clone()
    }

    /// Wait for the next snapshot-replace delivery.
    ///
    /// Returns `false` if the feed side of the channel has gone away and
    /// no further deliveries will arrive.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

/// Aborts the subscription's background task on drop.
pub(crate) struct SubscriptionGuard(tokio::task::JoinHandle<()>);

impl SubscriptionGuard {
    pub(crate) const fn new(handle: tokio::task::JoinHandle<()>) -> Self {
        Self(handle)
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}
