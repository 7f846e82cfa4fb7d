//! Product records as stored in the feed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sentinel facet used when a product carries no category.
pub const OTHER_CATEGORY: &str = "Other";

/// Default category applied when an admin publishes a product with a blank
/// category field.
pub const DEFAULT_CATEGORY: &str = "New Arrival";

/// A color variant of a product.
///
/// Wire field names match the feed schema: `img` is the variant image URL
/// and `hex` the color token shown to customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductColor {
    /// Image URL shown when this color is selected.
    #[serde(rename = "img")]
    pub image: String,
    /// Color token (usually a hex string like `#1a1a1a`).
    #[serde(rename = "hex")]
    pub color: String,
}

/// A product as read back from the feed.
///
/// Products are created by admin writes and deleted by admin action; there
/// is no edit-in-place operation. The key is assigned by the feed on
/// insert and travels separately from the record body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Display name.
    pub name: String,
    /// Unit price, non-negative.
    pub price: Decimal,
    /// Primary image URL.
    pub image: String,
    /// Free-text category; may be absent or empty in older records.
    #[serde(default)]
    pub category: String,
    /// Ordered size labels (e.g. `["S", "M", "L"]`).
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Ordered color variants.
    #[serde(default)]
    pub colors: Vec<ProductColor>,
}

impl Product {
    /// The category this product files under for faceting, substituting
    /// the [`OTHER_CATEGORY`] sentinel when the stored category is empty.
    #[must_use]
    pub fn facet_category(&self) -> &str {
        if self.category.is_empty() {
            OTHER_CATEGORY
        } else {
            &self.category
        }
    }
}

/// A product about to be inserted into the feed.
///
/// Identical to [`Product`] on the wire; the separate type makes it clear
/// at call sites that no key exists yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub image: String,
    pub category: String,
    pub sizes: Vec<String>,
    pub colors: Vec<ProductColor>,
}
