//! Integration tests for Velora.
//!
//! Every scenario runs against [`MemoryFeed`], which carries the same
//! observable semantics as the hosted database client: full-snapshot
//! subscription deliveries, chronologically sorting push keys, and
//! last-write-wins resolution. The scenarios live under `tests/`; this
//! crate provides the shared wiring.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use velora_feed::stores::{OrderStore, ProductStore, UserStore};
use velora_feed::{Feed, MemoryFeed, Namespace};
use velora_storefront::notify::{NotificationError, Notifier, OrderConfirmation};
use velora_storefront::prefs::MemoryStore;
use velora_storefront::{OrderPipeline, SessionStore};

/// One self-contained shop over the in-memory feed.
pub struct TestShop {
    pub feed: Arc<MemoryFeed>,
    pub ns: Namespace,
    pub local: Arc<MemoryStore>,
}

impl TestShop {
    #[must_use]
    pub fn new() -> Self {
        Self {
            feed: Arc::new(MemoryFeed::new()),
            ns: Namespace::new("velora_test"),
            local: Arc::new(MemoryStore::new()),
        }
    }

    #[must_use]
    pub fn products(&self) -> ProductStore {
        ProductStore::new(self.dyn_feed(), self.ns.clone())
    }

    #[must_use]
    pub fn orders(&self) -> OrderStore {
        OrderStore::new(self.dyn_feed(), self.ns.clone())
    }

    #[must_use]
    pub fn users(&self) -> UserStore {
        UserStore::new(self.dyn_feed(), self.ns.clone())
    }

    /// A session store with `admin` as the reserved name.
    #[must_use]
    pub fn sessions(&self) -> SessionStore {
        SessionStore::new(self.users(), Arc::clone(&self.local) as _, "admin")
    }

    /// An order pipeline with no notifier attached.
    #[must_use]
    pub fn pipeline(&self) -> OrderPipeline {
        OrderPipeline::new(self.orders())
    }

    fn dyn_feed(&self) -> Arc<dyn Feed> {
        Arc::clone(&self.feed) as Arc<dyn Feed>
    }
}

impl Default for TestShop {
    fn default() -> Self {
        Self::new()
    }
}

/// Notifier that records confirmations instead of sending them, and can
/// be told to fail.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<OrderConfirmation>>,
    pub fail: bool,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Confirmations recorded so far.
    #[must_use]
    pub fn sent(&self) -> Vec<OrderConfirmation> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_order_confirmation(
        &self,
        confirmation: &OrderConfirmation,
    ) -> Result<(), NotificationError> {
        if self.fail {
            return Err(NotificationError::Api {
                status: 503,
                message: "unavailable".to_owned(),
            });
        }
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(confirmation.clone());
        Ok(())
    }
}
