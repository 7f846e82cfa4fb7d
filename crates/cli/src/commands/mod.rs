//! Command implementations and shared feed wiring.

pub mod orders;
pub mod products;
pub mod seed;
pub mod session;

use std::sync::Arc;

use async_trait::async_trait;
use velora_feed::{
    AuthClient, AuthClientError, AuthConfig, Namespace, RtdbClient, RtdbConfig,
};
use velora_storefront::StorefrontConfig;
use velora_storefront::session::PlatformAuth;

/// Open a feed client without establishing a credential.
pub(crate) fn open(config: &StorefrontConfig) -> (Arc<RtdbClient>, Namespace) {
    let feed = Arc::new(RtdbClient::new(&RtdbConfig {
        database_url: config.database_url.clone(),
    }));
    (feed, Namespace::new(config.namespace.clone()))
}

/// Connect to the feed and establish the platform write credential.
pub(crate) async fn connect(
    config: &StorefrontConfig,
) -> Result<(Arc<RtdbClient>, Namespace), Box<dyn std::error::Error>> {
    let (feed, ns) = open(config);

    let auth = AuthClient::new(AuthConfig {
        api_key: config.api_key.clone(),
        endpoint: None,
    });
    let credential = auth.sign_in_anonymously().await?;
    feed.set_auth_token(credential.id_token);

    Ok((feed, ns))
}

/// [`PlatformAuth`] over anonymous sign-in: establishes a credential and
/// attaches it to the shared feed client.
pub(crate) struct AnonymousPlatformAuth {
    auth: AuthClient,
    feed: Arc<RtdbClient>,
}

impl AnonymousPlatformAuth {
    pub(crate) fn new(config: &StorefrontConfig, feed: Arc<RtdbClient>) -> Self {
        Self {
            auth: AuthClient::new(AuthConfig {
                api_key: config.api_key.clone(),
                endpoint: None,
            }),
            feed,
        }
    }
}

#[async_trait]
impl PlatformAuth for AnonymousPlatformAuth {
    async fn establish(&self) -> Result<(), AuthClientError> {
        let credential = self.auth.sign_in_anonymously().await?;
        self.feed.set_auth_token(credential.id_token);
        Ok(())
    }
}
