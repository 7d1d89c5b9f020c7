//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Session state and credential checks
//! - `cart` - Cart ledger mirrored to storage
//! - `orders` - Order book and status lifecycle
//! - `admin` - Dashboard figures for admin sessions
//! - `contact` - WhatsApp follow-up links for an order

pub mod admin;
pub mod auth;
pub mod cart;
pub mod contact;
pub mod orders;

pub use admin::DashboardStats;
pub use auth::{
    AuthError, Authenticator, PasswordAuthenticator, PlaceholderAuthenticator, SessionService,
};
pub use cart::CartLedger;
pub use contact::ContactMessage;
pub use orders::OrderBook;
