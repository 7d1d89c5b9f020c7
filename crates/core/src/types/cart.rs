//! Cart aggregate and line items.
//!
//! A [`Cart`] holds at most one [`CartLineItem`] per composite key
//! (product, size, color). Quantities are stored as [`NonZeroU32`], so a line
//! with no units cannot exist; lowering a quantity to zero removes the line.
//!
//! Totals are derived on every call from the captured product copies. Later
//! catalog price changes never leak into an existing line. Every line is
//! priced in the same currency, the one of the first line added.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::{CurrencyCode, Price, Product, ProductId};
use crate::error::CurrencyMismatch;

/// The (product, size, color) tuple that identifies a line item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    /// Product identifier.
    pub product_id: ProductId,
    /// Selected size.
    pub size: String,
    /// Selected color.
    pub color: String,
}

impl LineKey {
    /// Build a key from its parts.
    #[must_use]
    pub fn new(product_id: ProductId, size: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            product_id,
            size: size.into(),
            color: color.into(),
        }
    }
}

/// One (product, size, color, quantity) entry in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Product copy captured when the line was created.
    pub product: Product,
    /// Selected size.
    pub size: String,
    /// Selected color.
    pub color: String,
    /// Number of units.
    pub quantity: NonZeroU32,
}

impl CartLineItem {
    /// The product identifier of this line.
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// An owned copy of this line's composite key.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product.id.clone(), &*self.size, &*self.color)
    }

    /// Whether this line has the given composite key.
    #[must_use]
    pub fn matches(&self, key: &LineKey) -> bool {
        self.product.id == key.product_id && self.size == key.size && self.color == key.color
    }

    /// Captured unit price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity.get())
    }
}

/// An ordered collection of line items, unique by composite key.
///
/// Serialized as a plain list. Duplicate keys found while deserializing are
/// merged into the first occurrence; a list mixing currencies is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartLineItem>", into = "Vec<CartLineItem>")]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Currency of the lines, `None` while the cart is empty.
    #[must_use]
    pub fn currency(&self) -> Option<CurrencyCode> {
        self.items
            .first()
            .map(|item| item.product.price.currency_code())
    }

    /// Look up a line by key.
    #[must_use]
    pub fn line(&self, key: &LineKey) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.matches(key))
    }

    /// Add `quantity` units of a product variant.
    ///
    /// Merges into an existing line with the same key, otherwise appends a new
    /// line holding a copy of `product`. Adding zero units changes nothing.
    /// Returns whether the cart changed.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyMismatch` if `product` is priced in another currency
    /// than the lines already in the cart.
    pub fn add(
        &mut self,
        product: &Product,
        size: &str,
        color: &str,
        quantity: u32,
    ) -> Result<bool, CurrencyMismatch> {
        let Some(quantity) = NonZeroU32::new(quantity) else {
            return Ok(false);
        };
        let found = product.price.currency_code();
        if let Some(expected) = self.currency().filter(|c| *c != found) {
            return Err(CurrencyMismatch { expected, found });
        }
        let key = LineKey::new(product.id.clone(), size, color);
        if let Some(existing) = self.items.iter_mut().find(|item| item.matches(&key)) {
            existing.quantity = existing.quantity.saturating_add(quantity.get());
        } else {
            self.items.push(CartLineItem {
                product: product.clone(),
                size: key.size,
                color: key.color,
                quantity,
            });
        }
        Ok(true)
    }

    /// Remove the line with `key`. Returns whether a line was removed.
    pub fn remove(&mut self, key: &LineKey) -> bool {
        let before = self.items.len();
        self.items.retain(|item| !item.matches(key));
        self.items.len() != before
    }

    /// Replace the quantity of the line with `key`.
    ///
    /// A quantity of zero or less removes the line. Unknown keys are ignored.
    /// Returns whether the cart changed.
    pub fn set_quantity(&mut self, key: &LineKey, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(key);
        }
        let quantity = u32::try_from(quantity)
            .ok()
            .and_then(NonZeroU32::new)
            .unwrap_or(NonZeroU32::MAX);
        match self.items.iter_mut().find(|item| item.matches(key)) {
            Some(item) if item.quantity != quantity => {
                item.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Drop every line. Returns whether the cart had any.
    pub fn clear(&mut self) -> bool {
        let had_items = !self.items.is_empty();
        self.items.clear();
        had_items
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Sum of captured unit price times quantity over all lines.
    ///
    /// An empty cart totals zero in the default currency.
    #[must_use]
    pub fn total_price(&self) -> Price {
        let currency = self.currency().unwrap_or_default();
        self.items.iter().fold(Price::zero(currency), |total, item| {
            total.plus_amount(item.line_total().amount())
        })
    }
}

impl TryFrom<Vec<CartLineItem>> for Cart {
    type Error = CurrencyMismatch;

    fn try_from(items: Vec<CartLineItem>) -> Result<Self, Self::Error> {
        let mut cart = Self::new();
        for item in items {
            let found = item.product.price.currency_code();
            if let Some(expected) = cart.currency().filter(|c| *c != found) {
                return Err(CurrencyMismatch { expected, found });
            }
            let key = item.key();
            match cart.items.iter_mut().find(|existing| existing.matches(&key)) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity.get());
                }
                None => cart.items.push(item),
            }
        }
        Ok(cart)
    }
}

impl From<Cart> for Vec<CartLineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}
