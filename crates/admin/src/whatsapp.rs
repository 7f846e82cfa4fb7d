//! Pre-filled chat compose links for order status updates.
//!
//! Produces a `wa.me` link carrying a formatted multi-line message.
//! Nothing is sent automatically; the operator opens the link and
//! presses send themselves.

use velora_core::Order;

/// The formatted status message for `order`.
#[must_use]
pub fn status_message(order: &Order, status: &str) -> String {
    let items = order
        .items
        .iter()
        .map(|line| {
            format!(
                "- {}\n  Size: {}\n  Color: {}\n  Qty: {}",
                line.name, line.size, line.color, line.quantity
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Update on your Velora order\n\n\
         Hi {name},\n\n\
         Your order status is now: {status}\n\n\
         Items:\n{items}\n\n\
         Total: {total} EGP\n\
         Shipping address: {address}\n\
         Contact number: {phone}\n\n\
         Our courier will reach out soon. Thank you for shopping with Velora!",
        name = order.shipping.name,
        total = order.total,
        address = order.shipping.address,
        phone = order.shipping.phone,
    )
}

/// A `wa.me` compose link addressed to the order's stored phone number,
/// carrying the status message for `order`.
#[must_use]
pub fn status_link(order: &Order, status: &str) -> String {
    let phone = order.shipping.phone.replace('+', "");
    let message = status_message(order, status);
    format!("https://wa.me/{phone}?text={}", urlencoding::encode(&message))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use velora_core::{CartLine, ShippingDetails, status};

    use super::*;

    fn order() -> Order {
        Order {
            user_name: "Ali".to_owned(),
            items: vec![CartLine {
                name: "Tee".to_owned(),
                price: Decimal::from(100),
                size: "M".to_owned(),
                image: "https://img.example/tee.jpg".to_owned(),
                color: "#000".to_owned(),
                quantity: 2,
            }],
            total: Decimal::from(200),
            shipping: ShippingDetails {
                name: "Ali Hassan".to_owned(),
                phone: "+201001234567".to_owned(),
                address: "12 Nile St, Cairo".to_owned(),
            },
            status: status::PROCESSING.to_owned(),
            timestamp: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_message_carries_status_items_total_and_address() {
        let message = status_message(&order(), status::DELIVERED);
        assert!(message.contains("Your order status is now: Delivered"));
        assert!(message.contains("- Tee"));
        assert!(message.contains("Qty: 2"));
        assert!(message.contains("Total: 200 EGP"));
        assert!(message.contains("12 Nile St, Cairo"));
        assert!(message.contains("+201001234567"));
    }

    #[test]
    fn test_link_strips_plus_and_encodes_message() {
        let link = status_link(&order(), status::DELIVERED);
        assert!(link.starts_with("https://wa.me/201001234567?text="));
        assert!(!link.contains(' '));
        assert!(link.contains("Delivered"));
    }
}
