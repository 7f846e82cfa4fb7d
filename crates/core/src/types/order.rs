//! Order records and shipping details.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cart::CartLine;

/// Well-known status tokens.
///
/// Status is a free-text token on the wire; the admin console may write
/// arbitrary or localized tokens beyond these two.
pub mod status {
    /// Every new order starts here.
    pub const PROCESSING: &str = "Processing";
    /// Terminal status written by the admin console.
    pub const DELIVERED: &str = "Delivered";
}

/// Shipping details captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    /// Recipient name.
    pub name: String,
    /// Phone number in fixed country-prefixed format (e.g. `+201001234567`).
    pub phone: String,
    /// Free-text delivery address.
    pub address: String,
}

/// An order as read back from the feed.
///
/// Created once by the order pipeline; mutated only by admin status
/// transitions; deleted only by explicit admin action. `total` is frozen
/// at submission time and never recomputed from current catalog prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Owning user, joined by name. This is a weak reference: the feed
    /// enforces no integrity, and an order survives its user's deletion.
    #[serde(rename = "userName")]
    pub user_name: String,
    /// Line item snapshots, copied by value at submission time.
    pub items: Vec<CartLine>,
    /// Sum of price x quantity over `items`, computed at submission.
    pub total: Decimal,
    /// Shipping details as entered at checkout.
    pub shipping: ShippingDetails,
    /// Free-text status token, defaults to [`status::PROCESSING`].
    pub status: String,
    /// Capture-time epoch milliseconds.
    pub timestamp: i64,
}

/// An order about to be inserted into the feed.
///
/// Same wire shape as [`Order`]; the key does not exist until the feed
/// assigns one on push.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrder {
    #[serde(rename = "userName")]
    pub user_name: String,
    pub items: Vec<CartLine>,
    pub total: Decimal,
    pub shipping: ShippingDetails,
    pub status: String,
    pub timestamp: i64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_wire_shape() {
        let order = NewOrder {
            user_name: "Ali".to_owned(),
            items: vec![],
            total: Decimal::from(200),
            shipping: ShippingDetails {
                name: "Ali".to_owned(),
                phone: "+201001234567".to_owned(),
                address: "Cairo".to_owned(),
            },
            status: status::PROCESSING.to_owned(),
            timestamp: 1_700_000_000_000,
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["userName"], "Ali");
        assert_eq!(json["status"], "Processing");
        assert_eq!(json["shipping"]["phone"], "+201001234567");
    }

    #[test]
    fn test_order_decodes_from_feed_record() {
        let json = r##"{
            "userName": "Ali",
            "items": [{"name":"Tee","price":100,"sz":"M","img":"u","hex":"#000","qty":2}],
            "total": 200,
            "shipping": {"name":"Ali","phone":"+201001234567","address":"Cairo"},
            "status": "Processing",
            "timestamp": 1700000000000
        }"##;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.user_name, "Ali");
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.total, Decimal::from(200));
    }
}
