//! Core types for Velora.
//!
//! This module provides the domain records stored in the realtime feed and
//! type-safe wrappers around feed-assigned keys.

pub mod cart;
pub mod key;
pub mod order;
pub mod product;
pub mod user;

pub use cart::CartLine;
pub use key::*;
pub use order::{NewOrder, Order, ShippingDetails, status};
pub use product::{DEFAULT_CATEGORY, NewProduct, OTHER_CATEGORY, Product, ProductColor};
pub use user::{Role, UserProfile};
