//! Order mirror: a live local copy of the order collection.

use velora_core::{Order, OrderKey};

use crate::Subscription;
use crate::stores::OrderStore;
use crate::stores::decode_newest_first;

/// Reactive mirror of the order collection.
///
/// One subscription serves both consumers: the storefront view filters
/// to the current user through [`OrderMirror::for_user`], while the
/// admin console reads [`OrderMirror::all`] unfiltered.
pub struct OrderMirror {
    sub: Subscription,
    orders: Vec<(OrderKey, Order)>,
}

impl OrderMirror {
    /// Subscribe to the order collection and decode whatever snapshot is
    /// already available.
    #[must_use]
    pub fn new(store: &OrderStore) -> Self {
        let mut mirror = Self {
            sub: store.subscribe(),
            orders: Vec::new(),
        };
        mirror.refresh();
        mirror
    }

    /// Re-decode the current snapshot, replacing the local copy in full.
    fn refresh(&mut self) {
        let snapshot = self.sub.snapshot();
        self.orders = decode_newest_first(snapshot.as_ref());
    }

    /// Wait for the next snapshot delivery and absorb it.
    ///
    /// Returns `false` once the feed side has gone away.
    pub async fn changed(&mut self) -> bool {
        if self.sub.changed().await {
            self.refresh();
            true
        } else {
            false
        }
    }

    /// Every order, newest insertion first.
    #[must_use]
    pub fn all(&self) -> &[(OrderKey, Order)] {
        &self.orders
    }

    /// Look up one order by key.
    #[must_use]
    pub fn get(&self, key: &OrderKey) -> Option<&Order> {
        self.orders.iter().find(|(k, _)| k == key).map(|(_, o)| o)
    }

    /// Orders whose `user_name` equals `name`, newest insertion first.
    ///
    /// This is a name-string join with no uniqueness guarantee behind
    /// it: two accounts sharing a name would see each other's orders.
    #[must_use]
    pub fn for_user(&self, name: &str) -> Vec<&(OrderKey, Order)> {
        self.orders
            .iter()
            .filter(|(_, o)| o.user_name == name)
            .collect()
    }
}
