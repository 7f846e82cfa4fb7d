//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product/size/color/quantity tuple.
///
/// Cart lines are ephemeral while they live in the cart and become owned,
/// embedded snapshots once an order is submitted - later catalog changes
/// never alter them. Wire field names (`sz`, `img`, `hex`, `qty`) match
/// the feed schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product name at the time the line was created.
    pub name: String,
    /// Unit price at the time the line was created.
    pub price: Decimal,
    /// Chosen size label.
    #[serde(rename = "sz")]
    pub size: String,
    /// Image URL of the chosen variant.
    #[serde(rename = "img")]
    pub image: String,
    /// Chosen color token.
    #[serde(rename = "hex")]
    pub color: String,
    /// Quantity, always >= 1; a line reaching zero is removed, not zeroed.
    #[serde(rename = "qty")]
    pub quantity: u32,
}

impl CartLine {
    /// Price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}
