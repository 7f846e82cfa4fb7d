//! Anonymous sign-in against the hosted auth service.
//!
//! The feed's access rules require some credential before accepting
//! writes. The storefront has its own name/password profiles in the feed
//! itself, so the platform credential is anonymous and carries no
//! identity used by application logic.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

/// Identity Toolkit endpoint for anonymous sign-up.
const SIGN_UP_URL: &str = "https://identitytoolkit.googleapis.com/v1/accounts:signUp";

/// Errors that can occur during anonymous sign-in.
#[derive(Debug, Error)]
pub enum AuthClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Auth service returned an error response.
    #[error("Auth error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Auth collaborator configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct AuthConfig {
    /// Web API key of the hosted project.
    pub api_key: SecretString,
    /// Endpoint override, used by tests. `None` means the hosted service.
    pub endpoint: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("api_key", &"[REDACTED]")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Credential returned by anonymous sign-in.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct AnonymousCredential {
    /// Access token to attach to feed requests.
    pub id_token: SecretString,
    /// Opaque platform-assigned id; unused by this core beyond logging.
    pub local_id: String,
}

impl std::fmt::Debug for AnonymousCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnonymousCredential")
            .field("id_token", &"[REDACTED]")
            .field("local_id", &self.local_id)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignUpResponse {
    id_token: String,
    local_id: String,
}

/// Client for the external auth collaborator.
#[derive(Clone)]
pub struct AuthClient {
    client: reqwest::Client,
    config: AuthConfig,
}

impl AuthClient {
    /// Create a new auth client.
    #[must_use]
    pub fn new(config: AuthConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Establish an anonymous credential.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn sign_in_anonymously(&self) -> Result<AnonymousCredential, AuthClientError> {
        let url = self
            .config
            .endpoint
            .clone()
            .unwrap_or_else(|| SIGN_UP_URL.to_owned());

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key.expose_secret())])
            .json(&serde_json::json!({ "returnSecureToken": true }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AuthClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: SignUpResponse = response.json().await?;
        tracing::debug!(local_id = %body.local_id, "anonymous sign-in established");

        Ok(AnonymousCredential {
            id_token: SecretString::from(body.id_token),
            local_id: body.local_id,
        })
    }
}
