//! Cart ledger service.
//!
//! Owns the current client's [`Cart`] and mirrors it to the `cart` storage
//! key after every change. In-memory state is updated first, so reads made
//! right after a mutation see it even if the write fails. A failed write is
//! logged and otherwise ignored; only adding a product priced in another
//! currency than the cart can fail.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use hoodie_store_core::storage::{self, keys};
use hoodie_store_core::{
    Cart, CartLineItem, CurrencyMismatch, KeyValueStore, LineKey, Price, Product, ProductId,
};

/// The shopping cart of the current client.
#[derive(Debug)]
pub struct CartLedger {
    cart: Cart,
    store: Arc<dyn KeyValueStore>,
}

impl CartLedger {
    /// Restore the ledger from storage.
    ///
    /// A missing or unreadable `cart` key yields an empty cart.
    #[instrument(skip_all)]
    pub fn open(store: Arc<dyn KeyValueStore>) -> Self {
        let cart = match storage::read_json::<Cart>(store.as_ref(), keys::CART) {
            Ok(Some(cart)) => {
                debug!(lines = cart.len(), "Restored cart");
                cart
            }
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable cart");
                Cart::new()
            }
        };
        Self { cart, store }
    }

    /// Current cart contents.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        self.cart.items()
    }

    /// Add units of a product variant, merging with an existing line.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyMismatch` if the cart already holds lines priced in
    /// another currency. The cart is left unchanged.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add(
        &mut self,
        product: &Product,
        size: &str,
        color: &str,
        quantity: u32,
    ) -> Result<(), CurrencyMismatch> {
        if self.cart.add(product, size, color, quantity)? {
            self.persist();
        }
        Ok(())
    }

    /// Remove a line. Absent lines are ignored.
    #[instrument(skip(self))]
    pub fn remove(&mut self, product_id: &ProductId, size: &str, color: &str) {
        let key = LineKey::new(product_id.clone(), size, color);
        if self.cart.remove(&key) {
            self.persist();
        }
    }

    /// Replace a line's quantity; zero or less removes the line.
    #[instrument(skip(self))]
    pub fn set_quantity(&mut self, product_id: &ProductId, size: &str, color: &str, quantity: i64) {
        let key = LineKey::new(product_id.clone(), size, color);
        if self.cart.set_quantity(&key, quantity) {
            self.persist();
        }
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        if self.cart.clear() {
            self.persist();
        }
    }

    /// Sum of quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.cart.total_items()
    }

    /// Sum of captured unit price times quantity.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.cart.total_price()
    }

    fn persist(&self) {
        if let Err(e) = storage::write_json(self.store.as_ref(), keys::CART, &self.cart) {
            warn!(error = %e, "Failed to persist cart");
        }
    }
}
