//! Storefront error taxonomy.
//!
//! Errors are grouped by how the caller reports them: validation errors
//! go back to the user inline with no write attempted, credential
//! failures leave the session unset, submission failures preserve the
//! local cart so the user can retry, and notification failures are
//! logged without affecting the order outcome (see [`crate::notify`]).

use thiserror::Error;
use velora_feed::{AuthClientError, FeedError};

use crate::prefs::LocalStoreError;

/// Required user input is missing. Reported inline; no write happens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Shipping name, phone, and address must all be present.
    #[error("shipping name, phone, and address are required")]
    IncompleteShipping,

    /// An order needs at least one line item.
    #[error("cannot submit an order with no items")]
    EmptyOrder,
}

/// Session resolution failed.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A login name is required before anything else can happen.
    #[error("a login name is required")]
    MissingName,

    /// The stored credential does not match the one supplied.
    #[error("wrong credential")]
    WrongCredential,

    /// Profile read or write against the feed failed.
    #[error("profile store error: {0}")]
    Feed(#[from] FeedError),

    /// The platform credential could not be established.
    #[error("platform sign-in failed: {0}")]
    Platform(#[from] AuthClientError),

    /// Persisting the session name locally failed.
    #[error("session persistence failed: {0}")]
    Local(#[from] LocalStoreError),
}

/// The order write itself failed. Local cart state is untouched so the
/// user can retry.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Remote write failed.
    #[error("order write failed: {0}")]
    Feed(#[from] FeedError),
}

/// Anything the order pipeline can fail with.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}
