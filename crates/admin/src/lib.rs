//! Velora Admin - catalog and order management core.
//!
//! The console mutates the same collections the storefront mirrors:
//! product create/delete against the catalog, status transitions and
//! deletion against orders. Status transitions also compose a pre-filled
//! chat message for the customer; dispatch is manual (the operator opens
//! the returned link), never automated.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod console;
pub mod error;
pub mod whatsapp;

pub use console::{AdminConsole, ProductForm};
pub use error::AdminError;
