//! Catalog mirror: a live local copy of the product collection.

use velora_core::{Product, ProductKey};

use crate::Subscription;
use crate::stores::ProductStore;
use crate::stores::decode_newest_first;

/// Facet label that selects the whole catalog.
pub const ALL_CATEGORIES: &str = "All";

/// Reactive mirror of the product collection.
///
/// Holds the subscription for its whole lifetime; dropping the mirror
/// tears the subscription down.
pub struct CatalogMirror {
    sub: Subscription,
    products: Vec<(ProductKey, Product)>,
    pending_deep_link: Option<ProductKey>,
}

impl CatalogMirror {
    /// Subscribe to the product collection and decode whatever snapshot
    /// is already available.
    #[must_use]
    pub fn new(store: &ProductStore) -> Self {
        Self::with_deep_link(store, None)
    }

    /// Like [`CatalogMirror::new`], with a pending deep link to resolve.
    ///
    /// The deep link comes from a `product` query parameter at process
    /// start; see [`CatalogMirror::take_deep_link`].
    #[must_use]
    pub fn with_deep_link(store: &ProductStore, deep_link: Option<ProductKey>) -> Self {
        let mut mirror = Self {
            sub: store.subscribe(),
            products: Vec::new(),
            pending_deep_link: deep_link,
        };
        mirror.refresh();
        mirror
    }

    /// Re-decode the current snapshot, replacing the local copy in full.
    fn refresh(&mut self) {
        let snapshot = self.sub.snapshot();
        self.products = decode_newest_first(snapshot.as_ref());
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

    /// Current products, newest insertion first.
    #[must_use]
    pub fn products(&self) -> &[(ProductKey, Product)] {
        &self.products
    }

    /// Look up one product by key.
    #[must_use]
    pub fn get(&self, key: &ProductKey) -> Option<&Product> {
        self.products
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, p)| p)
    }

    /// Category facets: `"All"` followed by each product's (defaulted)
    /// category in order of first appearance.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_owned()];
        for (_, product) in &self.products {
            let facet = product.facet_category();
            if !categories.iter().any(|c| c == facet) {
                categories.push(facet.to_owned());
            }
        }
        categories
    }

    /// Products whose (defaulted) category equals `category`, snapshot
    /// order preserved. `"All"` is an identity pass-through.
    #[must_use]
    pub fn filtered(&self, category: &str) -> Vec<&(ProductKey, Product)> {
        self.products
            .iter()
            .filter(|(_, p)| category == ALL_CATEGORIES || p.facet_category() == category)
            .collect()
    }

    /// Resolve the pending deep link against the current snapshot.
    ///
    /// Returns the matching product at most once per process start: the
    /// pending key is consumed on first match so later snapshot updates
    /// do not re-open the detail view.
    pub fn take_deep_link(&mut self) -> Option<(ProductKey, Product)> {
        let key = self.pending_deep_link.as_ref()?;
        let product = self.get(key)?.clone();
        let key = self.pending_deep_link.take()?;
        Some((key, product))
    }
}
