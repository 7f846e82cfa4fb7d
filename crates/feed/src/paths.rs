//! Feed path construction.

use velora_core::{OrderKey, ProductKey};

/// Namespace prefix shared by all entity collections.
///
/// Products, orders, and users all live under one root so multiple
/// logical deployments (staging, production, migrations) can coexist on
/// one physical store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    root: String,
}

impl Namespace {
    /// Create a namespace rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }

    /// The root prefix itself.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Path of the product collection.
    #[must_use]
    pub fn products(&self) -> String {
        format!("{}/products", self.root)
    }

    /// Path of one product record.
    #[must_use]
    pub fn product(&self, key: &ProductKey) -> String {
        format!("{}/products/{}", self.root, key)
    }

    /// Path of the order collection.
    #[must_use]
    pub fn orders(&self) -> String {
        format!("{}/orders", self.root)
    }

    /// Path of one order record.
    #[must_use]
    pub fn order(&self, key: &OrderKey) -> String {
        format!("{}/orders/{}", self.root, key)
    }

    /// Path of one user profile, keyed by display name.
    #[must_use]
    pub fn user(&self, name: &str) -> String {
        format!("{}/users/{}", self.root, name)
    }
}
