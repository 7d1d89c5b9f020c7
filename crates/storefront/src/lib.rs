//! Hoodie Store storefront library.
//!
//! Services for the cart ledger, order lifecycle and session identity of
//! one storefront client, the storage backends they persist through, and
//! the [`Storefront`](state::Storefront) facade that ties them together.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod storage;
