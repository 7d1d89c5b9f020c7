//! Subcommand implementations.
//!
//! Commands log their output through `tracing` at info level.

pub mod admin;
pub mod auth;
pub mod cart;
pub mod orders;
pub mod products;

use thiserror::Error;

use hoodie_store_storefront::error::AppError;

/// Errors raised by the command layer before or while calling the store.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The store refused the operation.
    #[error(transparent)]
    App(#[from] AppError),

    /// An argument could not be understood.
    #[error("Invalid {name}: {reason}")]
    InvalidArgument {
        /// Argument name.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// The product is not offered in this size.
    #[error("{product} is not available in size {size}")]
    UnknownSize {
        /// Product title.
        product: String,
        /// Requested size.
        size: String,
    },

    /// The product is not offered in this color.
    #[error("{product} is not available in color {color}")]
    UnknownColor {
        /// Product title.
        product: String,
        /// Requested color.
        color: String,
    },

    /// Not enough units left.
    #[error("only {stock} of {product} in stock, {requested} requested")]
    InsufficientStock {
        /// Product title.
        product: String,
        /// Units in stock.
        stock: u32,
        /// Units the cart would hold.
        requested: u64,
    },
}

impl CommandError {
    fn invalid(name: &'static str, reason: impl ToString) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.to_string(),
        }
    }
}
