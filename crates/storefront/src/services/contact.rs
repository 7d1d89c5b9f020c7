//! Pre-filled WhatsApp messages for following up on an order.

use hoodie_store_core::Order;

/// A message addressed to the customer of one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    phone: String,
    text: String,
}

impl ContactMessage {
    /// Greeting about `order`, signed with `store_name`.
    #[must_use]
    pub fn for_order(order: &Order, store_name: &str) -> Self {
        let customer = order.customer_info();
        let text = format!(
            "Bonjour {}, concernant votre commande #{} sur {store_name}. Comment puis-je vous aider ?",
            customer.name,
            order.id(),
        );
        Self {
            phone: customer.phone.clone(),
            text,
        }
    }

    /// The message body.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The phone number as entered at checkout.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// A `wa.me` link opening a chat with the message typed in.
    ///
    /// Non-digit characters are stripped from the phone number. Returns
    /// `None` when no digit is left.
    #[must_use]
    pub fn whatsapp_url(&self) -> Option<String> {
        let digits: String = self.phone.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return None;
        }
        Some(format!(
            "https://wa.me/{digits}?text={}",
            urlencoding::encode(&self.text)
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use hoodie_store_core::{Cart, CustomerInfo, OrderId, ProductId, UserId};

    use super::*;
    use crate::catalog::Catalog;

    fn order(phone: &str) -> Order {
        let catalog = Catalog::sample();
        let mut cart = Cart::new();
        cart.add(catalog.get(&ProductId::new("1")).unwrap(), "M", "Noir", 1).unwrap();
        let info = CustomerInfo {
            name: "Salma".into(),
            email: "salma@example.ma".into(),
            phone: phone.into(),
            address: "8 Derb Sidi".into(),
            city: "Marrakech".into(),
            notes: None,
        };
        Order::place(&cart, info, UserId::new("3"), Utc::now()).unwrap()
    }

    #[test]
    fn test_message_text() {
        let order = order("+212 6 12-34-56-78");
        let message = ContactMessage::for_order(&order, "HoodieStore");
        let expected = format!(
            "Bonjour Salma, concernant votre commande #{} sur HoodieStore. Comment puis-je vous aider ?",
            order.id()
        );
        assert_eq!(message.text(), expected);
    }

    #[test]
    fn test_url_strips_phone_and_encodes_text() {
        let order = order("+212 6 12-34-56-78");
        let url = ContactMessage::for_order(&order, "HoodieStore")
            .whatsapp_url()
            .unwrap();
        assert!(url.starts_with("https://wa.me/212612345678?text=Bonjour%20Salma%2C"));
        assert!(!url.contains(' '));
        assert!(url.ends_with("aider%20%3F"));
    }

    #[test]
    fn test_url_needs_digits() {
        let message = ContactMessage::for_order(&order("n/a"), "HoodieStore");
        assert_eq!(message.whatsapp_url(), None);
        assert_eq!(message.phone(), "n/a");
    }

    #[test]
    fn test_order_id_in_text() {
        let order = order("0600");
        let id: &OrderId = order.id();
        let message = ContactMessage::for_order(&order, "X");
        assert!(message.text().contains(&format!("#{id}")));
    }
}
