//! Role-gated status transitions and transition policies.

#![allow(clippy::unwrap_used)]

use hoodie_store_core::{OrderError, OrderId, OrderStatus, ProductId, TransitionPolicy};
use hoodie_store_integration_tests::{TestContext, customer_info};
use hoodie_store_storefront::config::StoreConfig;
use hoodie_store_storefront::error::AppError;
use hoodie_store_storefront::state::Storefront;

fn place_order(store: &mut Storefront) -> OrderId {
    store
        .sessions_mut()
        .login("client@example.ma", "pw")
        .unwrap();
    store
        .add_to_cart(&ProductId::new("3"), "XL", "Vert", 1)
        .unwrap();
    store.checkout(customer_info()).unwrap().id().clone()
}

fn sign_in_admin(store: &mut Storefront) {
    store
        .sessions_mut()
        .login("admin@hoodies.com", "admin123")
        .unwrap();
}

#[test]
fn test_customer_cannot_transition() {
    let ctx = TestContext::new().unwrap();
    let mut store = ctx.open().unwrap();
    let order_id = place_order(&mut store);

    let err = store
        .set_order_status(&order_id, OrderStatus::Shipped)
        .unwrap_err();
    assert!(matches!(err, AppError::Order(OrderError::Permission(_))));
    assert_eq!(
        store.orders().get(&order_id).unwrap().status(),
        OrderStatus::Pending
    );

    store.sessions_mut().logout();
    let err = store
        .set_order_status(&order_id, OrderStatus::Shipped)
        .unwrap_err();
    assert!(err.is_permission());
}

#[test]
fn test_permission_checked_before_lookup() {
    let ctx = TestContext::new().unwrap();
    let mut store = ctx.open().unwrap();
    store
        .sessions_mut()
        .login("client@example.ma", "pw")
        .unwrap();
    let err = store
        .set_order_status(&OrderId::new("missing"), OrderStatus::Confirmed)
        .unwrap_err();
    assert!(err.is_permission());

    sign_in_admin(&mut store);
    let err = store
        .set_order_status(&OrderId::new("missing"), OrderStatus::Confirmed)
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_permissive_any_to_any_and_persisted() {
    let ctx = TestContext::new().unwrap();
    let mut store = ctx.open().unwrap();
    let order_id = place_order(&mut store);
    sign_in_admin(&mut store);

    for status in [
        OrderStatus::Delivered,
        OrderStatus::Pending,
        OrderStatus::Shipped,
        OrderStatus::Confirmed,
    ] {
        let order = store.set_order_status(&order_id, status).unwrap();
        assert_eq!(order.status(), status);
    }

    let store = ctx.reopen(store).unwrap();
    let order = store.orders().get(&order_id).unwrap();
    assert_eq!(order.status(), OrderStatus::Confirmed);
    assert_eq!(order.customer_info(), &customer_info());
}

#[test]
fn test_monotonic_policy() {
    let config = StoreConfig {
        order_transitions: TransitionPolicy::Monotonic,
        ..StoreConfig::default()
    };
    let ctx = TestContext::with_config(config).unwrap();
    let mut store = ctx.open().unwrap();
    let order_id = place_order(&mut store);
    sign_in_admin(&mut store);

    let err = store
        .set_order_status(&order_id, OrderStatus::Delivered)
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Order(OrderError::InvalidTransition {
            from: OrderStatus::Pending,
            to: OrderStatus::Delivered
        })
    ));

    for status in [
        OrderStatus::Confirmed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ] {
        store.set_order_status(&order_id, status).unwrap();
    }
    let err = store
        .set_order_status(&order_id, OrderStatus::Pending)
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Order(OrderError::InvalidTransition { .. })
    ));
}

#[test]
fn test_dashboard_and_contact() {
    let ctx = TestContext::new().unwrap();
    let mut store = ctx.open().unwrap();
    let order_id = place_order(&mut store);
    sign_in_admin(&mut store);

    let stats = store.dashboard().unwrap();
    assert_eq!(stats.products, 6);
    assert_eq!(stats.orders, 1);
    assert_eq!(stats.revenue.len(), 1);
    assert_eq!(stats.revenue[0].display(), "94.99 DH");

    let contact = store.contact_customer(&order_id).unwrap();
    assert_eq!(
        contact.text(),
        format!(
            "Bonjour Nadia Benali, concernant votre commande #{order_id} sur HoodieStore. Comment puis-je vous aider ?"
        )
    );
    assert!(
        contact
            .whatsapp_url()
            .unwrap()
            .starts_with("https://wa.me/212661234567?text=")
    );
}
