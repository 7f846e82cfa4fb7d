//! Velora Core - Shared types library.
//!
//! This crate provides common types used across all Velora components:
//! - `feed` - Realtime database client, typed stores, and mirrors
//! - `storefront` - Customer-facing session, cart, and checkout logic
//! - `admin` - Store administration console
//! - `cli` - Command-line entry point wiring everything together
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! subscriptions. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Domain records (products, orders, carts, profiles) and
//!   type-safe string keys

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
