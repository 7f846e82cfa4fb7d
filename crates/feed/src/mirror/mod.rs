//! Reactive mirrors of feed collections.
//!
//! A mirror is a local, decoded copy of one collection kept current via
//! subscription. Every delivery replaces the snapshot in full - there is
//! no incremental patching - so a mirror is always a consistent image of
//! some recent feed state, and repeated identical deliveries are
//! harmless. Mirrors never error on absent data; an empty collection is
//! an empty snapshot.

mod catalog;
mod orders;

pub use catalog::{ALL_CATEGORIES, CatalogMirror};
pub use orders::OrderMirror;
