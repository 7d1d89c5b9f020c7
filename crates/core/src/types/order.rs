//! Orders and the customer details captured at checkout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Cart, CartLineItem, OrderId, OrderStatus, Price, Role, UserId};
use crate::error::{PermissionError, ValidationError};

/// Errors from creating or updating an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Customer details are incomplete.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Checkout was attempted with nothing in the cart.
    #[error("cannot place an order with an empty cart")]
    EmptyCart,

    /// The actor is not allowed to run the operation.
    #[error(transparent)]
    Permission(#[from] PermissionError),

    /// No order has the given identifier.
    #[error("order not found: {0}")]
    NotFound(OrderId),

    /// The configured transition policy refuses this status change.
    #[error("order cannot move from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: OrderStatus,
        /// Requested status.
        to: OrderStatus,
    },
}

/// Contact and delivery details entered at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    /// Full name.
    pub name: String,
    /// Contact email, kept as typed.
    pub email: String,
    /// Phone number, used for the WhatsApp follow-up.
    pub phone: String,
    /// Street address.
    pub address: String,
    /// Delivery city.
    pub city: String,
    /// Free-text delivery notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CustomerInfo {
    /// Check that every required field holds non-blank text.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingFields` listing every blank field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing: Vec<&'static str> = [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
            ("city", &self.city),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields(missing))
        }
    }
}

/// Which status changes an admin may make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Any status may follow any other.
    #[default]
    Permissive,
    /// Only one step forward along pending, confirmed, shipped, delivered.
    Monotonic,
}

impl TransitionPolicy {
    /// Whether `from -> to` is allowed under this policy.
    #[must_use]
    pub fn allows(self, from: OrderStatus, to: OrderStatus) -> bool {
        match self {
            Self::Permissive => true,
            Self::Monotonic => from.next() == Some(to),
        }
    }
}

impl std::str::FromStr for TransitionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "permissive" => Ok(Self::Permissive),
            "monotonic" => Ok(Self::Monotonic),
            _ => Err(format!("invalid transition policy: {s}")),
        }
    }
}

/// A placed order.
///
/// Everything except the status is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    id: OrderId,
    user_id: UserId,
    customer_info: CustomerInfo,
    items: Vec<CartLineItem>,
    total: Price,
    status: OrderStatus,
    created_at: DateTime<Utc>,
}

impl Order {
    /// Snapshot `cart` into a new pending order.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::EmptyCart` if the cart has no lines, or
    /// `OrderError::Validation` if a required customer field is blank.
    pub fn place(
        cart: &Cart,
        customer_info: CustomerInfo,
        user_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Result<Self, OrderError> {
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        customer_info.validate()?;

        Ok(Self {
            id: OrderId::generate(),
            user_id,
            customer_info,
            items: cart.items().to_vec(),
            total: cart.total_price(),
            status: OrderStatus::Pending,
            created_at,
        })
    }

    /// Change the status on behalf of `actor`.
    ///
    /// Returns the previous status.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Permission` unless `actor` is an admin, and
    /// `OrderError::InvalidTransition` when `policy` refuses the change.
    pub fn transition(
        &mut self,
        to: OrderStatus,
        actor: Option<Role>,
        policy: TransitionPolicy,
    ) -> Result<OrderStatus, OrderError> {
        PermissionError::require_admin(actor, "changing an order status")?;
        let from = self.status;
        if !policy.allows(from, to) {
            return Err(OrderError::InvalidTransition { from, to });
        }
        self.status = to;
        Ok(from)
    }

    /// Order identifier.
    #[must_use]
    pub const fn id(&self) -> &OrderId {
        &self.id
    }

    /// User who placed the order.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Details entered at checkout.
    #[must_use]
    pub const fn customer_info(&self) -> &CustomerInfo {
        &self.customer_info
    }

    /// Line items captured from the cart.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Cart total at checkout.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }

    /// Current fulfilment status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// When the order was placed.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{CurrencyCode, Product, ProductId};

    fn info() -> CustomerInfo {
        CustomerInfo {
            name: "Yasmine".into(),
            email: "yasmine@example.ma".into(),
            phone: "+212 600-000000".into(),
            address: "12 Rue Atlas".into(),
            city: "Rabat".into(),
            notes: None,
        }
    }

    fn cart() -> Cart {
        let product = Product {
            id: ProductId::new("1"),
            title: "Hoodie Premium Noir".into(),
            description: String::new(),
            price: Price::from_minor(8999, CurrencyCode::MAD),
            images: vec![],
            sizes: vec!["M".into()],
            colors: vec!["Noir".into()],
            stock: 50,
            category: "Premium".into(),
            featured: true,
        };
        let mut cart = Cart::new();
        cart.add(&product, "M", "Noir", 2).unwrap();
        cart
    }

    #[test]
    fn test_validate_lists_blank_fields() {
        let mut info = info();
        info.phone = "  ".into();
        info.city = String::new();
        assert_eq!(
            info.validate(),
            Err(ValidationError::MissingFields(vec!["phone", "city"]))
        );
    }

    #[test]
    fn test_notes_are_optional() {
        let mut info = info();
        info.notes = Some(String::new());
        assert!(info.validate().is_ok());
    }

    #[test]
    fn test_place_snapshots_cart() {
        let cart = cart();
        let order = Order::place(&cart, info(), UserId::new("2"), Utc::now()).unwrap();
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.items(), cart.items());
        assert_eq!(order.total(), cart.total_price());
    }

    #[test]
    fn test_place_empty_cart() {
        let result = Order::place(&Cart::new(), info(), UserId::new("2"), Utc::now());
        assert_eq!(result, Err(OrderError::EmptyCart));
    }

    #[test]
    fn test_transition_requires_admin() {
        let mut order = Order::place(&cart(), info(), UserId::new("2"), Utc::now()).unwrap();
        let result = order.transition(
            OrderStatus::Shipped,
            Some(Role::Customer),
            TransitionPolicy::Permissive,
        );
        assert!(matches!(result, Err(OrderError::Permission(_))));
        assert_eq!(order.status(), OrderStatus::Pending);
    }

    #[test]
    fn test_permissive_allows_backwards() {
        let mut order = Order::place(&cart(), info(), UserId::new("2"), Utc::now()).unwrap();
        let admin = Some(Role::Admin);
        order
            .transition(OrderStatus::Delivered, admin, TransitionPolicy::Permissive)
            .unwrap();
        let previous = order
            .transition(OrderStatus::Pending, admin, TransitionPolicy::Permissive)
            .unwrap();
        assert_eq!(previous, OrderStatus::Delivered);
        assert_eq!(order.status(), OrderStatus::Pending);
    }

    #[test]
    fn test_monotonic_rejects_skips() {
        let mut order = Order::place(&cart(), info(), UserId::new("2"), Utc::now()).unwrap();
        let admin = Some(Role::Admin);
        let result = order.transition(OrderStatus::Shipped, admin, TransitionPolicy::Monotonic);
        assert_eq!(
            result,
            Err(OrderError::InvalidTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Shipped
            })
        );
        order
            .transition(OrderStatus::Confirmed, admin, TransitionPolicy::Monotonic)
            .unwrap();
        assert_eq!(order.status(), OrderStatus::Confirmed);
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let order = Order::place(&cart(), info(), UserId::new("2"), Utc::now()).unwrap();
        let json = serde_json::to_string(&order).unwrap();
        assert!(json.contains("\"customerInfo\""));
        assert!(json.contains("\"createdAt\""));
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(back, order);
    }
}
