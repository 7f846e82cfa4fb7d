//! Shareable product deep links.
//!
//! A `product` query parameter in the application URL selects a product
//! to open directly. The URL is rewritten as the detail view opens and
//! closes; other query parameters ride along untouched.

use url::Url;
use velora_core::ProductKey;

/// Query parameter carrying the deep-linked product key.
pub const PRODUCT_PARAM: &str = "product";

/// Extract the deep-linked product key from `url`, if present.
#[must_use]
pub fn product_key(url: &Url) -> Option<ProductKey> {
    url.query_pairs()
        .find(|(name, _)| name == PRODUCT_PARAM)
        .map(|(_, value)| ProductKey::new(value.into_owned()))
}

/// A copy of `url` with the product parameter set to `key`, replacing
/// any previous value.
#[must_use]
pub fn with_product(url: &Url, key: &ProductKey) -> Url {
    let others: Vec<(String, String)> = other_pairs(url);
    let mut out = url.clone();
    {
        let mut pairs = out.query_pairs_mut();
        pairs.clear();
        pairs.extend_pairs(others);
        pairs.append_pair(PRODUCT_PARAM, key.as_str());
    }
    out
}

/// A copy of `url` with the product parameter removed.
#[must_use]
pub fn without_product(url: &Url) -> Url {
    let others = other_pairs(url);
    let mut out = url.clone();
    if others.is_empty() {
        out.set_query(None);
    } else {
        let mut pairs = out.query_pairs_mut();
        pairs.clear();
        pairs.extend_pairs(others);
    }
    out
}

fn other_pairs(url: &Url) -> Vec<(String, String)> {
    url.query_pairs()
        .filter(|(name, _)| name != PRODUCT_PARAM)
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect()
}
