//! User profile store.
//!
//! Profiles are keyed by display name. Uniqueness is first-writer-wins
//! at account creation; orders join back to profiles by the same name
//! string and the feed enforces no referential integrity. This is a
//! known design gap, kept as-is rather than silently strengthened into a
//! proper foreign key.

use std::sync::Arc;

use serde_json::Value;
use velora_core::UserProfile;

use crate::paths::Namespace;
use crate::{Feed, FeedError};

/// Typed access to user profiles.
#[derive(Clone)]
pub struct UserStore {
    feed: Arc<dyn Feed>,
    ns: Namespace,
}

impl UserStore {
    /// Create a store over the user collection of `ns`.
    #[must_use]
    pub fn new(feed: Arc<dyn Feed>, ns: Namespace) -> Self {
        Self { feed, ns }
    }

    /// Fetch the profile stored under `name`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the feed read fails or the record does not
    /// decode.
    pub async fn get(&self, name: &str) -> Result<Option<UserProfile>, FeedError> {
        let Some(value) = self.feed.read(&self.ns.user(name)).await? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_value(value)?))
    }

    /// Write a profile under its name key, replacing any existing record.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the feed write fails.
    pub async fn put(&self, profile: &UserProfile) -> Result<(), FeedError> {
        let value: Value = serde_json::to_value(profile)?;
        self.feed.write(&self.ns.user(&profile.name), value).await
    }
}
