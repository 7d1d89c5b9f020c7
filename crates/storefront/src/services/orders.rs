//! Order lifecycle service.
//!
//! The order book is the system of record for placed orders. Orders are
//! appended at checkout and only their status changes afterwards. The whole
//! list is rewritten under the `orders` storage key after each change.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument, warn};

use hoodie_store_core::storage::{self, keys};
use hoodie_store_core::{
    Cart, CustomerInfo, KeyValueStore, Order, OrderError, OrderId, OrderStatus, PermissionError,
    Role, StorageError, TransitionPolicy, UserId,
};

/// All placed orders.
#[derive(Debug)]
pub struct OrderBook {
    orders: Vec<Order>,
    policy: TransitionPolicy,
    store: Arc<dyn KeyValueStore>,
}

impl OrderBook {
    /// Load the order book from storage.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the stored orders cannot be read. Unlike the
    /// cart, existing orders are never silently discarded.
    #[instrument(skip(store))]
    pub fn open(
        store: Arc<dyn KeyValueStore>,
        policy: TransitionPolicy,
    ) -> Result<Self, StorageError> {
        let orders: Vec<Order> =
            storage::read_json(store.as_ref(), keys::ORDERS)?.unwrap_or_default();
        Ok(Self {
            orders,
            policy,
            store,
        })
    }

    /// Snapshot `cart` into a new pending order owned by `user_id`.
    ///
    /// The caller is expected to clear its cart ledger afterwards.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::EmptyCart` for an empty cart and
    /// `OrderError::Validation` when a required customer field is blank.
    /// Nothing is stored on failure.
    #[instrument(skip(self, cart, customer_info), fields(lines = cart.len()))]
    pub fn create_order(
        &mut self,
        cart: &Cart,
        customer_info: CustomerInfo,
        user_id: &UserId,
    ) -> Result<Order, OrderError> {
        let order = Order::place(cart, customer_info, user_id.clone(), Utc::now())?;
        self.orders.push(order.clone());
        self.persist();

        info!(
            order_id = %order.id(),
            total = %order.total(),
            "Order placed"
        );
        Ok(order)
    }

    /// Move an order to `status` on behalf of `actor`.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Permission` unless `actor` is an admin,
    /// `OrderError::NotFound` for an unknown id, and
    /// `OrderError::InvalidTransition` when the configured policy refuses the
    /// change.
    #[instrument(skip(self))]
    pub fn transition_status(
        &mut self,
        order_id: &OrderId,
        status: OrderStatus,
        actor: Option<Role>,
    ) -> Result<&Order, OrderError> {
        PermissionError::require_admin(actor, "changing an order status")?;

        let index = self
            .orders
            .iter()
            .position(|o| o.id() == order_id)
            .ok_or_else(|| OrderError::NotFound(order_id.clone()))?;

        let policy = self.policy;
        let order = self
            .orders
            .get_mut(index)
            .ok_or_else(|| OrderError::NotFound(order_id.clone()))?;
        let previous = order.transition(status, actor, policy)?;
        info!(%order_id, from = %previous, to = %status, "Order status changed");

        self.persist();
        self.orders
            .get(index)
            .ok_or_else(|| OrderError::NotFound(order_id.clone()))
    }

    /// Look up an order.
    #[must_use]
    pub fn get(&self, order_id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id() == order_id)
    }

    /// Every order, oldest first. Admin only.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Permission` unless `actor` is an admin.
    pub fn all(&self, actor: Option<Role>) -> Result<&[Order], OrderError> {
        PermissionError::require_admin(actor, "listing all orders")?;
        Ok(&self.orders)
    }

    /// Orders placed by one user, oldest first.
    pub fn placed_by<'a>(&'a self, user_id: &'a UserId) -> impl Iterator<Item = &'a Order> {
        self.orders.iter().filter(move |o| o.user_id() == user_id)
    }

    /// Number of orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether no order has been placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Active status-transition policy.
    #[must_use]
    pub const fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    fn persist(&self) {
        if let Err(e) = storage::write_json(self.store.as_ref(), keys::ORDERS, &self.orders) {
            warn!(error = %e, "Failed to persist orders");
        }
    }
}
