//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `VELORA_DATABASE_URL` - Realtime database base URL
//! - `VELORA_API_KEY` - Web API key for the platform auth service
//!
//! ## Optional
//! - `VELORA_NAMESPACE` - Feed namespace prefix (default: velora)
//! - `VELORA_ADMIN_NAME` - Reserved admin login name (default: admin)
//! - `VELORA_COUNTRY_CODE` - Shipping phone prefix (default: +20)
//! - `VELORA_PREFS_PATH` - Local preference file (default: velora-prefs.json)
//! - `EMAILJS_SERVICE_ID` / `EMAILJS_TEMPLATE_ID` / `EMAILJS_PUBLIC_KEY` -
//!   Order confirmation email account; all three must be set together
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

use crate::checkout::DEFAULT_COUNTRY_CODE;
use crate::notify::EmailJsConfig;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Incomplete variable group {0}: set all of the group or none")]
    IncompleteGroup(&'static str),
}

/// Storefront application configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct StorefrontConfig {
    /// Realtime database base URL
    pub database_url: String,
    /// Namespace prefix all feed paths live under
    pub namespace: String,
    /// Web API key for anonymous platform sign-in
    pub api_key: SecretString,
    /// Reserved login name that receives the admin role
    pub admin_name: String,
    /// Country prefix for shipping phone numbers
    pub country_code: String,
    /// Path of the local preference file
    pub prefs_path: PathBuf,
    /// Confirmation email account, when configured
    pub emailjs: Option<EmailJsConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl std::fmt::Debug for StorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontConfig")
            .field("database_url", &self.database_url)
            .field("namespace", &self.namespace)
            .field("api_key", &"[REDACTED]")
            .field("admin_name", &self.admin_name)
            .field("country_code", &self.country_code)
            .field("prefs_path", &self.prefs_path)
            .field("emailjs", &self.emailjs)
            .field("sentry_dsn", &self.sentry_dsn)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or the
    /// `EmailJS` group is only partially set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: get_required_env("VELORA_DATABASE_URL")?,
            namespace: get_env_or_default("VELORA_NAMESPACE", "velora"),
            api_key: SecretString::from(get_required_env("VELORA_API_KEY")?),
            admin_name: get_env_or_default("VELORA_ADMIN_NAME", "admin"),
            country_code: get_env_or_default("VELORA_COUNTRY_CODE", DEFAULT_COUNTRY_CODE),
            prefs_path: PathBuf::from(get_env_or_default("VELORA_PREFS_PATH", "velora-prefs.json")),
            emailjs: emailjs_group(
                get_optional_env("EMAILJS_SERVICE_ID"),
                get_optional_env("EMAILJS_TEMPLATE_ID"),
                get_optional_env("EMAILJS_PUBLIC_KEY"),
            )?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
        })
    }
}

/// Fold the three `EmailJS` variables into one optional config.
fn emailjs_group(
    service_id: Option<String>,
    template_id: Option<String>,
    public_key: Option<String>,
) -> Result<Option<EmailJsConfig>, ConfigError> {
    match (service_id, template_id, public_key) {
        (Some(service_id), Some(template_id), Some(public_key)) => Ok(Some(EmailJsConfig {
            service_id,
            template_id,
            public_key,
            endpoint: None,
        })),
        (None, None, None) => Ok(None),
        _ => Err(ConfigError::IncompleteGroup("EMAILJS_*")),
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default fallback.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_emailjs_group_all_present() {
        let group = emailjs_group(
            Some("service_x".to_owned()),
            Some("template_y".to_owned()),
            Some("public-key".to_owned()),
        )
        .unwrap()
        .unwrap();
        assert_eq!(group.service_id, "service_x");
        assert!(group.endpoint.is_none());
    }

    #[test]
    fn test_emailjs_group_absent() {
        assert!(emailjs_group(None, None, None).unwrap().is_none());
    }

    #[test]
    fn test_emailjs_group_partial_is_rejected() {
        let err = emailjs_group(Some("service_x".to_owned()), None, None).unwrap_err();
        assert!(matches!(err, ConfigError::IncompleteGroup(_)));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = StorefrontConfig {
            database_url: "https://shop.firebaseio.example".to_owned(),
            namespace: "velora".to_owned(),
            api_key: SecretString::from("super-secret-key"),
            admin_name: "admin".to_owned(),
            country_code: "+20".to_owned(),
            prefs_path: PathBuf::from("velora-prefs.json"),
            emailjs: None,
            sentry_dsn: None,
        };
        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super-secret-key"));
    }
}
