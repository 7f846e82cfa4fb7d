//! In-process feed implementation.
//!
//! Mirrors the observable semantics of the hosted realtime store:
//! auto-assigned push keys that sort in insertion order, full-subtree
//! snapshot deliveries to subscribers, and last-write-wins resolution of
//! concurrent writers. Used by tests and offline development.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::watch;

use crate::tree::{delete_at, get_at, set_at};
use crate::{Feed, FeedError, Subscription};

/// In-memory key-value tree store.
///
/// Cheaply cloneable; clones share the same tree and watcher set.
#[derive(Clone)]
pub struct MemoryFeed {
    inner: Arc<Inner>,
}

struct Inner {
    tree: Mutex<Value>,
    watchers: Mutex<Vec<Watcher>>,
    next_key: AtomicU64,
}

struct Watcher {
    path: String,
    tx: watch::Sender<Option<Value>>,
}

impl MemoryFeed {
    /// Create an empty feed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                tree: Mutex::new(Value::Object(Map::new())),
                watchers: Mutex::new(Vec::new()),
                next_key: AtomicU64::new(0),
            }),
        }
    }

    /// Deliver the current subtree to every live watcher.
    ///
    /// Deliveries are full snapshot replaces; repeated identical
    /// deliveries are harmless because consumers replace, never merge.
    fn notify(&self) {
        let tree = self.inner.tree.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut watchers = self
            .inner
            .watchers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        watchers.retain(|w| !w.tx.is_closed());
        for watcher in watchers.iter() {
            let snapshot = get_at(&tree, &watcher.path).cloned();
            let _ = watcher.tx.send(snapshot);
        }
    }

    fn with_tree<T>(&self, f: impl FnOnce(&mut Value) -> T) -> T {
        let mut tree = self.inner.tree.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut tree)
    }
}

impl Default for MemoryFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Feed for MemoryFeed {
    fn subscribe(&self, path: &str) -> Subscription {
        let initial = self.with_tree(|tree| get_at(tree, path).cloned());
        let (tx, rx) = watch::channel(initial);
        self.inner
            .watchers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(Watcher {
                path: path.to_owned(),
                tx,
            });
        Subscription::new(rx, None)
    }

    async fn read(&self, path: &str) -> Result<Option<Value>, FeedError> {
        Ok(self.with_tree(|tree| get_at(tree, path).cloned()))
    }

    async fn push(&self, path: &str, value: Value) -> Result<String, FeedError> {
        // Fixed-width counter suffix keeps lexicographic order equal to
        // insertion order, like hosted push keys.
        let n = self.inner.next_key.fetch_add(1, Ordering::Relaxed);
        let key = format!("-P{n:012}");
        let child = format!("{path}/{key}");
        self.with_tree(|tree| set_at(tree, &child, value));
        self.notify();
        Ok(key)
    }

    async fn write(&self, path: &str, value: Value) -> Result<(), FeedError> {
        self.with_tree(|tree| set_at(tree, path, value));
        self.notify();
        Ok(())
    }

    async fn update(&self, path: &str, fields: Value) -> Result<(), FeedError> {
        self.with_tree(|tree| {
            let Value::Object(fields) = fields else {
                return;
            };
            for (field, value) in fields {
                let child = format!("{path}/{field}");
                set_at(tree, &child, value);
            }
        });
        self.notify();
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), FeedError> {
        self.with_tree(|tree| delete_at(tree, path));
        self.notify();
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_read_absent_path_is_none() {
        let feed = MemoryFeed::new();
        assert!(feed.read("shop/products").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let feed = MemoryFeed::new();
        feed.write("shop/users/Ali", json!({"name": "Ali", "role": "user"}))
            .await
            .unwrap();
        let value = feed.read("shop/users/Ali").await.unwrap().unwrap();
        assert_eq!(value["name"], "Ali");
    }

    #[tokio::test]
    async fn test_push_keys_sort_in_insertion_order() {
        let feed = MemoryFeed::new();
        let first = feed.push("shop/orders", json!({"n": 1})).await.unwrap();
        let second = feed.push("shop/orders", json!({"n": 2})).await.unwrap();
        assert!(first < second);

        let orders = feed.read("shop/orders").await.unwrap().unwrap();
        assert_eq!(orders.as_object().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let feed = MemoryFeed::new();
        feed.write("shop/orders/o1", json!({"status": "Processing", "total": 200}))
            .await
            .unwrap();
        feed.update("shop/orders/o1", json!({"status": "Delivered"}))
            .await
            .unwrap();
        let order = feed.read("shop/orders/o1").await.unwrap().unwrap();
        assert_eq!(order["status"], "Delivered");
        assert_eq!(order["total"], 200);
    }

    #[tokio::test]
    async fn test_delete_removes_subtree() {
        let feed = MemoryFeed::new();
        feed.write("shop/products/p1", json!({"name": "Tee"}))
            .await
            .unwrap();
        feed.delete("shop/products/p1").await.unwrap();
        assert!(feed.read("shop/products/p1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_subscription_delivers_snapshot_replaces() {
        let feed = MemoryFeed::new();
        let mut sub = feed.subscribe("shop/products");
        assert!(sub.snapshot().is_none());

        feed.push("shop/products", json!({"name": "Tee"})).await.unwrap();
        assert!(sub.changed().await);
        let snapshot = sub.snapshot().unwrap();
        assert_eq!(snapshot.as_object().unwrap().len(), 1);

        feed.push("shop/products", json!({"name": "Hoodie"})).await.unwrap();
        assert!(sub.changed().await);
        let snapshot = sub.snapshot().unwrap();
        assert_eq!(snapshot.as_object().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_subscription_sees_writes_outside_its_path() {
        // Writes elsewhere still deliver the watcher's own (unchanged)
        // subtree; consumers replace snapshots so this is idempotent.
        let feed = MemoryFeed::new();
        let sub = feed.subscribe("shop/products");
        feed.write("shop/users/Ali", json!({"name": "Ali"})).await.unwrap();
        assert!(sub.snapshot().is_none());
    }
}
