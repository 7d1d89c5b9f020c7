//! File-backed persistence and recovery.

#![allow(clippy::unwrap_used)]

use std::fs;
use std::sync::Arc;

use hoodie_store_core::storage::keys;
use hoodie_store_core::{KeyValueStore, ProductId};
use hoodie_store_integration_tests::{TestContext, customer_info};
use hoodie_store_storefront::config::StoreConfig;
use hoodie_store_storefront::error::AppError;
use hoodie_store_storefront::state::Storefront;
use hoodie_store_storefront::storage::{FileStore, MemoryStore};

#[test]
fn test_state_files_are_json() {
    let ctx = TestContext::new().unwrap();
    let mut store = ctx.open().unwrap();
    store.sessions_mut().login("x@y.com", "pw").unwrap();
    store
        .add_to_cart(&ProductId::new("6"), "L", "Rouge", 2)
        .unwrap();

    let cart: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(ctx.data_dir().join("cart.json")).unwrap())
            .unwrap();
    assert_eq!(cart.as_array().unwrap().len(), 1);
    assert_eq!(cart[0]["quantity"], 2);
    assert_eq!(cart[0]["size"], "L");

    let user: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(ctx.data_dir().join("user.json")).unwrap())
            .unwrap();
    assert_eq!(user["role"], "customer");

    store.checkout(customer_info()).unwrap();
    let orders: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(ctx.data_dir().join("orders.json")).unwrap())
            .unwrap();
    assert_eq!(orders[0]["status"], "pending");
    assert!(orders[0]["createdAt"].is_string());
}

#[test]
fn test_corrupt_cart_and_session_are_discarded() {
    let ctx = TestContext::new().unwrap();
    fs::write(ctx.data_dir().join("cart.json"), "{not json").unwrap();
    fs::write(ctx.data_dir().join("user.json"), "[]").unwrap();

    let store = ctx.open().unwrap();
    assert_eq!(store.cart().total_items(), 0);
    assert!(store.session().is_none());
}

#[test]
fn test_corrupt_orders_fail_to_open() {
    let ctx = TestContext::new().unwrap();
    fs::write(ctx.data_dir().join("orders.json"), "{not json").unwrap();

    let err = ctx.open().unwrap_err();
    assert!(matches!(err, AppError::Storage(_)));
}

#[test]
fn test_memory_store_backs_facade() {
    let backend = Arc::new(MemoryStore::new());
    let mut store = Storefront::with_store(StoreConfig::default(), backend.clone()).unwrap();
    store
        .add_to_cart(&ProductId::new("1"), "M", "Noir", 1)
        .unwrap();
    assert!(backend.get(keys::CART).unwrap().is_some());
    assert!(backend.get(keys::ORDERS).unwrap().is_none());
}

#[test]
fn test_file_store_round_trip() {
    let ctx = TestContext::new().unwrap();
    let files = FileStore::open(ctx.data_dir()).unwrap();
    files.set(keys::ORDERS, "[]").unwrap();
    assert_eq!(files.get(keys::ORDERS).unwrap().as_deref(), Some("[]"));
    files.remove(keys::ORDERS).unwrap();
    files.remove(keys::ORDERS).unwrap();
    assert_eq!(files.get(keys::ORDERS).unwrap(), None);
}
