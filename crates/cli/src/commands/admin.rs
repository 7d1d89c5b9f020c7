//! Admin commands.
//!
//! # Usage
//!
//! ```bash
//! # Dashboard figures (sign in as an admin first)
//! hoodie-cli admin stats
//!
//! # Create an admin account (HOODIE_AUTH_MODE=password)
//! hoodie-cli admin create -e boss@hoodies.com -n "Boss" -p "a long password"
//! ```

use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use hoodie_store_core::{OrderStatus, Price};
use hoodie_store_storefront::state::Storefront;

use super::CommandError;

/// Show dashboard figures.
///
/// # Errors
///
/// Returns a permission error unless an admin is signed in.
pub fn stats(store: &Storefront) -> Result<(), CommandError> {
    let stats = store.dashboard()?;
    info!("Produits:          {}", stats.products);
    info!("Commandes:         {}", stats.orders);
    let revenue: Vec<String> = stats.revenue.iter().map(Price::display).collect();
    info!("Chiffre d'affaires: {}", revenue.join(" + "));

    let orders = store.visible_orders()?;
    for status in OrderStatus::ALL {
        let count = orders.iter().filter(|o| o.status() == status).count();
        info!("  {:<11} {count}", status.label());
    }
    Ok(())
}

/// Create an admin account.
///
/// # Errors
///
/// Returns an error in placeholder mode, for an invalid email or weak
/// password, or when the email is already registered.
pub fn create(
    store: &Storefront,
    email: &str,
    name: &str,
    password: &SecretString,
) -> Result<(), CommandError> {
    info!("Creating admin user: {}", email);
    let session = store.create_admin(email, password.expose_secret(), name)?;
    info!(
        "Admin user created successfully! ID: {}, Email: {}",
        session.id(),
        session.email()
    );
    Ok(())
}
