//! Hoodie Store Core - Shared types library.
//!
//! This crate provides the domain model used across the hoodie store:
//! - `storefront` - Cart, checkout, session and admin services
//! - `cli` - Command-line front end over a local data directory
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage
//! backends. Cart merging, order snapshots and status-transition rules live
//! here as pure functions on the types so they can be tested without a store.
//!
//! # Modules
//!
//! - [`types`] - IDs, prices, emails, products, carts, orders and sessions
//! - [`error`] - Validation, permission and currency errors shared by the services
//! - [`storage`] - The key-value persistence contract

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod storage;
pub mod types;

pub use error::{CurrencyMismatch, PermissionError, ValidationError};
pub use storage::{KeyValueStore, StorageError};
pub use types::*;
