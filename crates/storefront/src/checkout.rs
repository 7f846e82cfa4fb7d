//! The order pipeline: shipping validation through durable submission.
//!
//! Submission is a single push of the complete record, so a concurrent
//! reader never observes a half-written order. The cart is cleared only
//! when the whole cart was checked out; a buy-now purchase leaves it
//! untouched. The confirmation email fires after the write commits and
//! never affects the reported outcome.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use velora_core::{CartLine, NewOrder, OrderKey, ShippingDetails, status};
use velora_feed::stores::OrderStore;

use crate::cart::Cart;
use crate::error::{CheckoutError, SubmissionError, ValidationError};
use crate::notify::{Notifier, OrderConfirmation};

/// Country prefix prepended to the phone number as typed.
pub const DEFAULT_COUNTRY_CODE: &str = "+20";

/// Shipping details as entered, before normalization.
///
/// The phone number is the national part; the pipeline prepends the
/// country code.
#[derive(Debug, Clone)]
pub struct ShippingForm {
    pub name: String,
    pub phone: String,
    pub address: String,
}

/// What is being checked out.
#[derive(Debug, Clone)]
pub enum CheckoutRequest {
    /// Every line currently in the cart. Success empties the cart.
    FullCart,
    /// A single line bought directly from a product view. The cart is
    /// left untouched.
    BuyNow(CartLine),
}

/// Validates, snapshots, and submits orders.
pub struct OrderPipeline {
    orders: OrderStore,
    notifier: Option<Arc<dyn Notifier>>,
    country_code: String,
}

impl OrderPipeline {
    /// Create a pipeline over the order collection, with no
    /// confirmation channel attached.
    #[must_use]
    pub fn new(orders: OrderStore) -> Self {
        Self {
            orders,
            notifier: None,
            country_code: DEFAULT_COUNTRY_CODE.to_owned(),
        }
    }

    /// Attach a confirmation notifier, fired after each successful
    /// submission.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Override the country prefix for shipping phone numbers.
    #[must_use]
    pub fn with_country_code(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = country_code.into();
        self
    }

    /// Submit an order for `user_name`.
    ///
    /// Line items are copied by value into the order, and the total is
    /// computed here once and stored; later catalog changes never alter
    /// the historical record. On success the order key is returned and,
    /// for a [`CheckoutRequest::FullCart`], the cart is emptied. On
    /// failure the cart is untouched so the user can retry.
    ///
    /// # Errors
    ///
    /// [`ValidationError`] when shipping fields are missing or there is
    /// nothing to order (no write is attempted), [`SubmissionError`]
    /// when the feed write fails.
    pub async fn submit(
        &self,
        user_name: &str,
        cart: &mut Cart,
        request: CheckoutRequest,
        shipping: &ShippingForm,
    ) -> Result<OrderKey, CheckoutError> {
        if shipping.name.is_empty() || shipping.phone.is_empty() || shipping.address.is_empty() {
            return Err(ValidationError::IncompleteShipping.into());
        }

        let items: Vec<CartLine> = match &request {
            CheckoutRequest::FullCart => cart.lines().to_vec(),
            CheckoutRequest::BuyNow(line) => vec![line.clone()],
        };
        if items.is_empty() {
            return Err(ValidationError::EmptyOrder.into());
        }

        let total: Decimal = items.iter().map(CartLine::line_total).sum();
        let order = NewOrder {
            user_name: user_name.to_owned(),
            items,
            total,
            shipping: ShippingDetails {
                name: shipping.name.clone(),
                phone: format!("{}{}", self.country_code, shipping.phone),
                address: shipping.address.clone(),
            },
            status: status::PROCESSING.to_owned(),
            timestamp: Utc::now().timestamp_millis(),
        };

        let key = self
            .orders
            .create(&order)
            .await
            .map_err(SubmissionError::Feed)?;
        tracing::info!(order = %key, user = %user_name, total = %order.total, "order submitted");

        if matches!(request, CheckoutRequest::FullCart) {
            cart.clear();
        }

        if let Some(notifier) = &self.notifier {
            let confirmation = OrderConfirmation::for_order(user_name, &order);
            if let Err(error) = notifier.send_order_confirmation(&confirmation).await {
                tracing::warn!(%error, order = %key, "order confirmation failed");
            }
        }

        Ok(key)
    }
}
