//! Velora Storefront - customer-facing core.
//!
//! Everything a shopper-side process needs between the feed layer and a
//! UI: session resolution ([`session`]), durable local preferences
//! ([`prefs`]), the in-memory cart ([`cart`]), order submission
//! ([`checkout`]), the confirmation email side channel ([`notify`]),
//! and shareable product deep links ([`links`]).
//!
//! The crate renders nothing. Each component takes its collaborators as
//! explicit constructor arguments ([`velora_feed::Feed`]-backed stores,
//! a [`prefs::LocalStore`], a [`notify::Notifier`]) so the whole core
//! runs unchanged against the in-memory feed in tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod links;
pub mod notify;
pub mod prefs;
pub mod session;

pub use cart::Cart;
pub use checkout::{CheckoutRequest, OrderPipeline, ShippingForm};
pub use config::{ConfigError, StorefrontConfig};
pub use error::{AuthError, CheckoutError, SubmissionError, ValidationError};
pub use session::{SessionOutcome, SessionStore};
