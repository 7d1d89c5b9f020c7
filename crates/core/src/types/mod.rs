//! Domain types for the hoodie store.
//!
//! Newtype identifiers, prices, and the cart, order and session records the
//! storefront services operate on.

pub mod cart;
pub mod email;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod session;
pub mod status;

pub use cart::{Cart, CartLineItem, LineKey};
pub use email::{Email, EmailError};
pub use id::*;
pub use order::{CustomerInfo, Order, OrderError, TransitionPolicy};
pub use price::{CurrencyCode, Price, PriceError};
pub use product::Product;
pub use session::{Session, name_from_email};
pub use status::{OrderStatus, Role};
