//! Admin console error taxonomy.

use thiserror::Error;
use velora_feed::FeedError;

/// Errors raised by console operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Product name, price, and image URL are all required.
    #[error("product name, price, and image are required")]
    IncompleteProduct,

    /// The price field did not coerce to a non-negative number.
    #[error("price must be a non-negative number, got {0:?}")]
    InvalidPrice(String),

    /// Remote operation against the feed failed.
    #[error(transparent)]
    Feed(#[from] FeedError),
}
