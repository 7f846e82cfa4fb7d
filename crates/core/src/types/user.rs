//! User profiles.

use serde::{Deserialize, Serialize};

/// Role assigned at account creation and fixed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access to the admin console.
    Admin,
    /// Regular storefront customer.
    #[default]
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::User => write!(f, "user"),
        }
    }
}

/// A user profile stored in the feed, keyed by display name.
///
/// The name doubles as the natural key and as the join key for filtering
/// orders, with no uniqueness enforcement beyond first-writer-wins at
/// account creation. The stored credential is compared byte-for-byte at
/// login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name; also the feed key.
    pub name: String,
    /// Role, fixed at creation.
    pub role: Role,
    /// Stored credential. Absent on profiles created before passwords
    /// were recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
