//! Messaging deep links for ordering

use shared::util::format_price;
use urlencoding::encode;

const DEEP_LINK_BASE: &str = "https://wa.me";

/// Pre-filled order message for an item
pub fn order_message(name: &str, price: f64) -> String {
    format!(
        "Hello! I'm interested in ordering {name} priced at ₦{}. Is it available?",
        format_price(price)
    )
}

/// Deep link that opens a chat with `number` and the order message filled in.
/// The message is percent-encoded, spaces as `%20`.
pub fn order_link(number: &str, name: &str, price: f64) -> String {
    format!(
        "{DEEP_LINK_BASE}/{}?text={}",
        number.trim(),
        encode(&order_message(name, price))
    )
}
