//! Order confirmation email via the `EmailJS` REST API.
//!
//! A best-effort side channel: the order pipeline fires a confirmation
//! after the order write commits, and a failure here is logged and
//! swallowed. The order record is the durable fact.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use velora_core::{CartLine, NewOrder};

/// `EmailJS` send endpoint.
const SEND_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Errors that can occur when sending a notification.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Template fields for the order confirmation message.
#[derive(Debug, Clone, Serialize)]
pub struct OrderConfirmation {
    /// Shipping contact name.
    pub customer_name: String,
    /// Login name of the ordering account.
    pub user_login: String,
    /// Country-prefixed phone number.
    pub customer_phone: String,
    /// Free-text shipping address.
    pub customer_address: String,
    /// One-line item summary, e.g. `Tee (Size: M, Color: #000)`.
    pub order_items: String,
    /// Formatted total, e.g. `200 EGP`.
    pub total_price: String,
}

impl OrderConfirmation {
    /// Build the template fields for `order`, placed by `user_login`.
    #[must_use]
    pub fn for_order(user_login: &str, order: &NewOrder) -> Self {
        let order_items = order
            .items
            .iter()
            .map(|line: &CartLine| format!("{} (Size: {}, Color: {})", line.name, line.size, line.color))
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            customer_name: order.shipping.name.clone(),
            user_login: user_login.to_owned(),
            customer_phone: order.shipping.phone.clone(),
            customer_address: order.shipping.address.clone(),
            order_items,
            total_price: format!("{} EGP", order.total),
        }
    }
}

/// The templated-message send operation consumed by the order pipeline.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send an order confirmation. Best-effort; the caller logs
    /// failures and moves on.
    async fn send_order_confirmation(
        &self,
        confirmation: &OrderConfirmation,
    ) -> Result<(), NotificationError>;
}

/// `EmailJS` account configuration.
///
/// The public key identifies the account to the hosted service; it is
/// not a secret.
#[derive(Debug, Clone)]
pub struct EmailJsConfig {
    /// Service id, e.g. `service_xxxxxxx`.
    pub service_id: String,
    /// Template id, e.g. `template_xxxxxxx`.
    pub template_id: String,
    /// Account public key.
    pub public_key: String,
    /// Endpoint override, used by tests. `None` means the hosted service.
    pub endpoint: Option<String>,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a OrderConfirmation,
}

/// `EmailJS` REST client.
#[derive(Clone)]
pub struct EmailJsClient {
    client: reqwest::Client,
    config: EmailJsConfig,
}

impl EmailJsClient {
    /// Create a new `EmailJS` client.
    #[must_use]
    pub fn new(config: EmailJsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl Notifier for EmailJsClient {
    async fn send_order_confirmation(
        &self,
        confirmation: &OrderConfirmation,
    ) -> Result<(), NotificationError> {
        let url = self
            .config
            .endpoint
            .clone()
            .unwrap_or_else(|| SEND_URL.to_owned());

        let response = self
            .client
            .post(&url)
            .json(&SendRequest {
                service_id: &self.config.service_id,
                template_id: &self.config.template_id,
                user_id: &self.config.public_key,
                template_params: confirmation,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NotificationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(user = %confirmation.user_login, "order confirmation sent");
        Ok(())
    }
}
