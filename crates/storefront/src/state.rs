//! Application state for one storefront client.
//!
//! [`Storefront`] wires the catalog, cart ledger, session service and order
//! book to one storage backend, and runs the flows that cross them:
//! checkout, role-gated order and catalog edits, and the admin dashboard.

use std::sync::Arc;

use tracing::{debug, instrument};

use hoodie_store_core::{
    CustomerInfo, KeyValueStore, Order, OrderId, OrderStatus, PermissionError, Product, ProductId,
    Session,
};

use crate::catalog::{Catalog, CatalogError};
use crate::config::{AuthMode, StoreConfig};
use crate::error::AppError;
use crate::services::{
    Authenticator, CartLedger, ContactMessage, DashboardStats, OrderBook, PasswordAuthenticator,
    PlaceholderAuthenticator, SessionService,
};
use crate::storage::FileStore;

/// Everything one client of the store works with.
#[derive(Debug)]
pub struct Storefront {
    config: StoreConfig,
    catalog: Catalog,
    cart: CartLedger,
    sessions: SessionService,
    orders: OrderBook,
    accounts: Option<Arc<PasswordAuthenticator>>,
}

impl Storefront {
    /// Open the store with state kept under `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory, the catalog file or the saved
    /// orders cannot be read.
    pub fn open(config: StoreConfig) -> Result<Self, AppError> {
        let store = FileStore::open(&config.data_dir)?;
        Self::with_store(config, Arc::new(store))
    }

    /// Open the store over an existing storage backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file or the saved orders cannot be
    /// read.
    #[instrument(skip_all, fields(auth_mode = ?config.auth_mode))]
    pub fn with_store(config: StoreConfig, store: Arc<dyn KeyValueStore>) -> Result<Self, AppError> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::load(path, config.currency)?,
            None => Catalog::sample_in(config.currency),
        };

        let accounts = match config.auth_mode {
            AuthMode::Placeholder => None,
            AuthMode::Password => Some(Arc::new(PasswordAuthenticator::new(store.clone()))),
        };
        let authenticator: Arc<dyn Authenticator> = match &accounts {
            Some(accounts) => accounts.clone(),
            None => Arc::new(PlaceholderAuthenticator::new(
                config.admin_email.clone(),
                config.admin_password.clone(),
            )),
        };

        let orders = OrderBook::open(store.clone(), config.order_transitions)?;
        let cart = CartLedger::open(store.clone());
        let sessions = SessionService::open(store, authenticator);

        debug!(
            products = catalog.len(),
            orders = orders.len(),
            "Storefront opened"
        );
        Ok(Self {
            config,
            catalog,
            cart,
            sessions,
            orders,
            accounts,
        })
    }

    /// Get a reference to the store configuration.
    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Get a reference to the cart ledger.
    #[must_use]
    pub const fn cart(&self) -> &CartLedger {
        &self.cart
    }

    /// Get a mutable reference to the cart ledger.
    pub const fn cart_mut(&mut self) -> &mut CartLedger {
        &mut self.cart
    }

    /// Get a reference to the session service.
    #[must_use]
    pub const fn sessions(&self) -> &SessionService {
        &self.sessions
    }

    /// Get a mutable reference to the session service.
    pub const fn sessions_mut(&mut self) -> &mut SessionService {
        &mut self.sessions
    }

    /// Get a reference to the order book.
    #[must_use]
    pub const fn orders(&self) -> &OrderBook {
        &self.orders
    }

    /// The signed-in session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.sessions.current()
    }

    /// Add a catalog product to the cart.
    ///
    /// The line captures the product as it is now.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for an unknown product, or
    /// `AppError::Currency` when the cart holds lines in another currency.
    pub fn add_to_cart(
        &mut self,
        product_id: &ProductId,
        size: &str,
        color: &str,
        quantity: u32,
    ) -> Result<(), AppError> {
        let product = self
            .catalog
            .get(product_id)
            .ok_or_else(|| CatalogError::NotFound(product_id.clone()))?;
        self.cart.add(product, size, color, quantity)?;
        Ok(())
    }

    /// Turn the cart into an order for the signed-in user, then empty the
    /// cart.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` without a session, otherwise
    /// the order book's `EmptyCart` or `Validation` error. The cart is kept
    /// on failure.
    #[instrument(skip_all)]
    pub fn checkout(&mut self, customer_info: CustomerInfo) -> Result<Order, AppError> {
        let user_id = self.sessions.require()?.id().clone();
        let order = self
            .orders
            .create_order(self.cart.cart(), customer_info, &user_id)?;
        self.cart.clear();
        Ok(order)
    }

    /// Orders visible to the signed-in user: every order for an admin, their
    /// own otherwise.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` without a session.
    pub fn visible_orders(&self) -> Result<Vec<&Order>, AppError> {
        let session = self.sessions.require()?;
        if session.is_admin() {
            Ok(self.orders.all(Some(session.role()))?.iter().collect())
        } else {
            Ok(self.orders.placed_by(session.id()).collect())
        }
    }

    /// Move an order to `status` as the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Permission` unless an admin is signed in,
    /// `OrderError::NotFound` for an unknown id, or
    /// `OrderError::InvalidTransition` when the configured policy refuses.
    pub fn set_order_status(
        &mut self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<&Order, AppError> {
        let actor = self.sessions.role();
        Ok(self.orders.transition_status(order_id, status, actor)?)
    }

    /// WhatsApp follow-up for an order. Admin only.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Permission` unless an admin is signed in, or
    /// `OrderError::NotFound` for an unknown id.
    pub fn contact_customer(&self, order_id: &OrderId) -> Result<ContactMessage, AppError> {
        PermissionError::require_admin(self.sessions.role(), "contacting a customer")?;
        let order = self
            .orders
            .get(order_id)
            .ok_or_else(|| AppError::order_not_found(order_id.clone()))?;
        Ok(ContactMessage::for_order(order, &self.config.store_name))
    }

    /// Dashboard figures. Admin only.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Permission` unless an admin is signed in.
    pub fn dashboard(&self) -> Result<DashboardStats, AppError> {
        Ok(DashboardStats::compute(
            &self.catalog,
            &self.orders,
            self.sessions.role(),
        )?)
    }

    /// Add or replace a catalog product as the signed-in user.
    ///
    /// Returns `true` when the product is new.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Permission` unless an admin is signed in.
    pub fn upsert_product(&mut self, product: Product) -> Result<bool, AppError> {
        let actor = self.sessions.role();
        Ok(self.catalog.upsert_product(product, actor)?)
    }

    /// Remove a catalog product as the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Permission` unless an admin is signed in, or
    /// `CatalogError::NotFound` for an unknown id.
    pub fn remove_product(&mut self, product_id: &ProductId) -> Result<Product, AppError> {
        let actor = self.sessions.role();
        Ok(self.catalog.remove_product(product_id, actor)?)
    }

    /// Create an admin account in password mode.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unsupported` in placeholder mode, otherwise the
    /// authenticator's error.
    pub fn create_admin(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Session, AppError> {
        let accounts = self
            .accounts
            .as_ref()
            .ok_or(AppError::Unsupported("admin accounts need HOODIE_AUTH_MODE=password"))?;
        Ok(accounts.create_admin(email, password, name)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use hoodie_store_core::{CurrencyCode, OrderError};

    use super::*;
    use crate::services::AuthError;
    use crate::storage::MemoryStore;

    fn storefront() -> Storefront {
        Storefront::with_store(StoreConfig::default(), Arc::new(MemoryStore::new())).unwrap()
    }

    fn info() -> CustomerInfo {
        CustomerInfo {
            name: "Imane".into(),
            email: "imane@example.ma".into(),
            phone: "+212 611 223 344".into(),
            address: "5 Rue de Tanger".into(),
            city: "Tanger".into(),
            notes: Some("Sonner deux fois".into()),
        }
    }

    #[test]
    fn test_checkout_requires_session() {
        let mut store = storefront();
        store.add_to_cart(&ProductId::new("1"), "M", "Noir", 1).unwrap();
        let err = store.checkout(info()).unwrap_err();
        assert!(matches!(err, AppError::Auth(AuthError::NotAuthenticated)));
        assert_eq!(store.cart().total_items(), 1);
    }

    #[test]
    fn test_checkout_clears_cart() {
        let mut store = storefront();
        store.sessions_mut().login("x@y.com", "pw").unwrap();
        store.add_to_cart(&ProductId::new("1"), "M", "Noir", 2).unwrap();

        let order = store.checkout(info()).unwrap();
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.items().len(), 1);
        assert_eq!(store.cart().total_items(), 0);
        assert_eq!(store.visible_orders().unwrap().len(), 1);
    }

    #[test]
    fn test_failed_checkout_keeps_cart() {
        let mut store = storefront();
        store.sessions_mut().login("x@y.com", "pw").unwrap();
        store.add_to_cart(&ProductId::new("2"), "L", "Gris", 1).unwrap();

        let mut incomplete = info();
        incomplete.address = String::new();
        let err = store.checkout(incomplete).unwrap_err();
        assert!(matches!(err, AppError::Order(OrderError::Validation(_))));
        assert_eq!(store.cart().total_items(), 1);
        assert!(store.orders().is_empty());
    }

    #[test]
    fn test_unknown_product() {
        let mut store = storefront();
        let err = store
            .add_to_cart(&ProductId::new("404"), "M", "Noir", 1)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_admin_flows_are_gated() {
        let mut store = storefront();
        store.sessions_mut().login("x@y.com", "pw").unwrap();
        store.add_to_cart(&ProductId::new("1"), "M", "Noir", 1).unwrap();
        let order_id = store.checkout(info()).unwrap().id().clone();

        let denied = store
            .set_order_status(&order_id, OrderStatus::Shipped)
            .unwrap_err();
        assert!(denied.is_permission());
        assert!(store.dashboard().unwrap_err().is_permission());
        assert!(store.contact_customer(&order_id).unwrap_err().is_permission());
        assert!(
            store
                .remove_product(&ProductId::new("1"))
                .unwrap_err()
                .is_permission()
        );

        store.sessions_mut().logout();
        store
            .sessions_mut()
            .login("admin@hoodies.com", "admin123")
            .unwrap();
        let order = store
            .set_order_status(&order_id, OrderStatus::Shipped)
            .unwrap();
        assert_eq!(order.status(), OrderStatus::Shipped);
        assert_eq!(store.dashboard().unwrap().orders, 1);
        let contact = store.contact_customer(&order_id).unwrap();
        assert!(contact.whatsapp_url().is_some());
        store.remove_product(&ProductId::new("1")).unwrap();
        assert_eq!(store.catalog().len(), 5);
    }

    #[test]
    fn test_store_currency_prices_catalog_and_revenue() {
        let config = StoreConfig {
            currency: CurrencyCode::USD,
            ..StoreConfig::default()
        };
        let mut store = Storefront::with_store(config, Arc::new(MemoryStore::new())).unwrap();
        store.sessions_mut().login("x@y.com", "pw").unwrap();
        store.add_to_cart(&ProductId::new("1"), "M", "Noir", 2).unwrap();
        let order = store.checkout(info()).unwrap();
        assert_eq!(order.total().currency_code(), CurrencyCode::USD);

        store
            .sessions_mut()
            .login("admin@hoodies.com", "admin123")
            .unwrap();
        let stats = store.dashboard().unwrap();
        assert_eq!(stats.revenue, vec![order.total()]);
        assert_eq!(stats.revenue[0].display(), "$179.98");
    }

    #[test]
    fn test_saved_cart_in_old_currency_refuses_new_lines() {
        let backend: Arc<MemoryStore> = Arc::new(MemoryStore::new());
        let mut store = Storefront::with_store(StoreConfig::default(), backend.clone()).unwrap();
        store.add_to_cart(&ProductId::new("1"), "M", "Noir", 1).unwrap();

        let config = StoreConfig {
            currency: CurrencyCode::EUR,
            ..StoreConfig::default()
        };
        let mut store = Storefront::with_store(config, backend).unwrap();
        let err = store
            .add_to_cart(&ProductId::new("2"), "L", "Gris", 1)
            .unwrap_err();
        assert!(matches!(err, AppError::Currency(_)));
        assert_eq!(store.cart().total_items(), 1);
    }

    #[test]
    fn test_customer_sees_only_own_orders() {
        let mut store = storefront();
        store.sessions_mut().login("a@y.com", "pw").unwrap();
        store.add_to_cart(&ProductId::new("1"), "M", "Noir", 1).unwrap();
        store.checkout(info()).unwrap();

        store.sessions_mut().login("b@y.com", "pw").unwrap();
        assert!(store.visible_orders().unwrap().is_empty());

        store
            .sessions_mut()
            .login("admin@hoodies.com", "admin123")
            .unwrap();
        assert_eq!(store.visible_orders().unwrap().len(), 1);
    }

    #[test]
    fn test_create_admin_needs_password_mode() {
        let store = storefront();
        let err = store
            .create_admin("boss@hoodies.com", "long enough", "Boss")
            .unwrap_err();
        assert!(matches!(err, AppError::Unsupported(_)));

        let config = StoreConfig {
            auth_mode: AuthMode::Password,
            ..StoreConfig::default()
        };
        let mut store = Storefront::with_store(config, Arc::new(MemoryStore::new())).unwrap();
        store
            .create_admin("boss@hoodies.com", "long enough", "Boss")
            .unwrap();
        store
            .sessions_mut()
            .login("boss@hoodies.com", "long enough")
            .unwrap();
        assert!(store.sessions().is_admin());
        let placeholder_admin = store.sessions_mut().login("admin@hoodies.com", "admin123");
        assert!(placeholder_admin.is_err());
    }
}
