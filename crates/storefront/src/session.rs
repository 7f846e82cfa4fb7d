//! Session resolution against name-keyed profiles in the feed.
//!
//! A single entry point covers both login and signup: resolving a name
//! that has no profile creates one, resolving an existing name checks
//! the stored credential. The profile's name doubles as its feed key
//! and as the join key for order filtering, so names must be unique -
//! uniqueness is first-writer-wins and nothing stronger (see
//! [`velora_feed::stores::UserStore`]).

use std::sync::Arc;

use async_trait::async_trait;
use velora_core::{Role, UserProfile};
use velora_feed::AuthClientError;
use velora_feed::stores::UserStore;

use crate::error::AuthError;
use crate::prefs::{LocalStore, LocalStoreError, SESSION_KEY};

/// Establishes the platform-level credential the feed's access rules
/// require before accepting writes.
///
/// The credential is anonymous and carries no identity this core uses;
/// application identity lives in the name-keyed profiles.
#[async_trait]
pub trait PlatformAuth: Send + Sync {
    /// Establish the credential for the current process.
    async fn establish(&self) -> Result<(), AuthClientError>;
}

/// Outcome of a successful [`SessionStore::resolve`].
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    /// The signed-in profile.
    pub profile: UserProfile,
    /// Whether this resolution created the account.
    pub created: bool,
}

/// Resolves and remembers the current user session.
pub struct SessionStore {
    users: UserStore,
    local: Arc<dyn LocalStore>,
    platform: Option<Arc<dyn PlatformAuth>>,
    admin_name: String,
}

impl SessionStore {
    /// Create a session store.
    ///
    /// `admin_name` is the reserved login name that receives the admin
    /// role at account creation; the comparison is case-insensitive.
    #[must_use]
    pub fn new(users: UserStore, local: Arc<dyn LocalStore>, admin_name: impl Into<String>) -> Self {
        Self {
            users,
            local,
            platform: None,
            admin_name: admin_name.into(),
        }
    }

    /// Attach a platform auth collaborator, established on every
    /// successful resolution.
    #[must_use]
    pub fn with_platform_auth(mut self, platform: Arc<dyn PlatformAuth>) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Resolve `name`/`password` into a session.
    ///
    /// If no profile exists under `name`, one is created with the given
    /// password and the session counts as a new account. If one exists,
    /// the stored credential must match byte for byte. On success the
    /// name is persisted to the local session slot so a restarted
    /// process can reattach.
    ///
    /// The platform credential is established before the profile write:
    /// the feed's access rules gate writes on it, so a first signup
    /// without it would be rejected.
    ///
    /// # Errors
    ///
    /// [`AuthError::MissingName`] for an empty name,
    /// [`AuthError::WrongCredential`] on a mismatch, and feed, platform,
    /// or local-store errors otherwise.
    pub async fn resolve(&self, name: &str, password: &str) -> Result<SessionOutcome, AuthError> {
        if name.is_empty() {
            return Err(AuthError::MissingName);
        }

        let (profile, created) = match self.users.get(name).await? {
            Some(profile) => {
                if profile.password.as_deref() != Some(password) {
                    tracing::debug!(user = %name, "credential mismatch");
                    return Err(AuthError::WrongCredential);
                }
                self.establish_platform().await?;
                (profile, false)
            }
            None => {
                let role = if name.eq_ignore_ascii_case(&self.admin_name) {
                    Role::Admin
                } else {
                    Role::User
                };
                let profile = UserProfile {
                    name: name.to_owned(),
                    role,
                    password: Some(password.to_owned()),
                };
                self.establish_platform().await?;
                self.users.put(&profile).await?;
                (profile, true)
            }
        };

        self.local.set(SESSION_KEY, name)?;

        tracing::info!(user = %profile.name, role = %profile.role, created, "session resolved");
        Ok(SessionOutcome { profile, created })
    }

    async fn establish_platform(&self) -> Result<(), AuthClientError> {
        if let Some(platform) = &self.platform {
            platform.establish().await?;
        }
        Ok(())
    }

    /// Reattach the session remembered in the local slot, if any.
    ///
    /// Returns `None` when no name is remembered or the remembered name
    /// no longer has a profile. No credential check happens here; the
    /// slot only exists because a previous resolution succeeded.
    ///
    /// # Errors
    ///
    /// Returns feed or local-store errors.
    pub async fn reattach(&self) -> Result<Option<UserProfile>, AuthError> {
        let Some(name) = self.local.get(SESSION_KEY)? else {
            return Ok(None);
        };
        Ok(self.users.get(&name).await?)
    }

    /// Forget the remembered session.
    ///
    /// # Errors
    ///
    /// Returns an error if the local slot cannot be cleared.
    pub fn sign_out(&self) -> Result<(), LocalStoreError> {
        self.local.remove(SESSION_KEY)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use serde_json::Value;
    use velora_feed::{Feed, FeedError, MemoryFeed, Namespace, Subscription};

    use super::*;
    use crate::prefs::MemoryStore;

    /// Feed whose access rules deny writes until a credential exists,
    /// like a hosted database with authenticated-write rules.
    struct RuleGatedFeed {
        inner: MemoryFeed,
        authed: Arc<AtomicBool>,
    }

    impl RuleGatedFeed {
        fn check(&self) -> Result<(), FeedError> {
            if self.authed.load(Ordering::SeqCst) {
                Ok(())
            } else {
                Err(FeedError::Api {
                    status: 401,
                    message: "Permission denied".to_owned(),
                })
            }
        }
    }

    #[async_trait]
    impl Feed for RuleGatedFeed {
        fn subscribe(&self, path: &str) -> Subscription {
            self.inner.subscribe(path)
        }

        async fn read(&self, path: &str) -> Result<Option<Value>, FeedError> {
            self.inner.read(path).await
        }

        async fn push(&self, path: &str, value: Value) -> Result<String, FeedError> {
            self.check()?;
            self.inner.push(path, value).await
        }

        async fn write(&self, path: &str, value: Value) -> Result<(), FeedError> {
            self.check()?;
            self.inner.write(path, value).await
        }

        async fn update(&self, path: &str, fields: Value) -> Result<(), FeedError> {
            self.check()?;
            self.inner.update(path, fields).await
        }

        async fn delete(&self, path: &str) -> Result<(), FeedError> {
            self.check()?;
            self.inner.delete(path).await
        }
    }

    struct GrantingAuth {
        authed: Arc<AtomicBool>,
    }

    #[async_trait]
    impl PlatformAuth for GrantingAuth {
        async fn establish(&self) -> Result<(), AuthClientError> {
            self.authed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    fn session() -> (SessionStore, Arc<MemoryStore>) {
        let users = UserStore::new(Arc::new(MemoryFeed::new()), Namespace::new("shop"));
        let local = Arc::new(MemoryStore::new());
        let store = SessionStore::new(users, Arc::clone(&local) as Arc<dyn LocalStore>, "admin");
        (store, local)
    }

    #[tokio::test]
    async fn test_first_login_creates_account() {
        let (sessions, local) = session();
        let outcome = sessions.resolve("Ali", "secret").await.unwrap();
        assert!(outcome.created);
        assert_eq!(outcome.profile.role, Role::User);
        assert_eq!(local.get(SESSION_KEY).unwrap().as_deref(), Some("Ali"));
    }

    #[tokio::test]
    async fn test_reserved_name_gets_admin_role_case_insensitively() {
        let (sessions, _) = session();
        let outcome = sessions.resolve("Admin", "secret").await.unwrap();
        assert_eq!(outcome.profile.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_wrong_password_leaves_session_unset() {
        let (sessions, local) = session();
        sessions.resolve("Ali", "secret").await.unwrap();
        local.remove(SESSION_KEY).unwrap();

        let err = sessions.resolve("Ali", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthError::WrongCredential));
        assert!(local.get(SESSION_KEY).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_matching_password_signs_in_existing_account() {
        let (sessions, _) = session();
        sessions.resolve("Ali", "secret").await.unwrap();

        let outcome = sessions.resolve("Ali", "secret").await.unwrap();
        assert!(!outcome.created);
        assert_eq!(outcome.profile.name, "Ali");
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected() {
        let (sessions, _) = session();
        let err = sessions.resolve("", "secret").await.unwrap_err();
        assert!(matches!(err, AuthError::MissingName));
    }

    #[tokio::test]
    async fn test_first_signup_establishes_credential_before_profile_write() {
        let authed = Arc::new(AtomicBool::new(false));
        let feed = Arc::new(RuleGatedFeed {
            inner: MemoryFeed::new(),
            authed: Arc::clone(&authed),
        });
        let users = UserStore::new(Arc::clone(&feed) as Arc<dyn Feed>, Namespace::new("shop"));
        let sessions = SessionStore::new(users, Arc::new(MemoryStore::new()), "admin")
            .with_platform_auth(Arc::new(GrantingAuth { authed }));

        let outcome = sessions.resolve("Ali", "secret").await.unwrap();
        assert!(outcome.created);

        // The profile landed in the feed, so the write ran after the grant.
        let stored = feed.read("shop/users/Ali").await.unwrap();
        assert!(stored.is_some());
    }

    #[tokio::test]
    async fn test_reattach_restores_remembered_session() {
        let (sessions, _) = session();
        sessions.resolve("Ali", "secret").await.unwrap();

        let profile = sessions.reattach().await.unwrap().unwrap();
        assert_eq!(profile.name, "Ali");

        sessions.sign_out().unwrap();
        assert!(sessions.reattach().await.unwrap().is_none());
    }
}
