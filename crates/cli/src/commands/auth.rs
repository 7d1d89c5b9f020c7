//! Sign-in commands.

use tracing::info;

use hoodie_store_storefront::error::AppError;
use hoodie_store_storefront::state::Storefront;

use super::CommandError;

/// Sign in.
///
/// # Errors
///
/// Returns the authenticator's error.
pub fn login(store: &mut Storefront, email: &str, password: &str) -> Result<(), CommandError> {
    let session = store
        .sessions_mut()
        .login(email, password)
        .map_err(AppError::from)?;
    info!("Signed in as {} ({})", session.name(), session.role());
    Ok(())
}

/// Create a customer account and sign in.
///
/// # Errors
///
/// Returns the authenticator's error.
pub fn register(
    store: &mut Storefront,
    email: &str,
    password: &str,
    name: &str,
) -> Result<(), CommandError> {
    let session = store
        .sessions_mut()
        .register(email, password, name)
        .map_err(AppError::from)?;
    info!("Welcome, {}", session.name());
    Ok(())
}

/// Sign out.
pub fn logout(store: &mut Storefront) {
    store.sessions_mut().logout();
    info!("Signed out");
}

/// Show the signed-in user.
pub fn whoami(store: &Storefront) {
    match store.session() {
        Some(session) => info!(
            "{} <{}> ({}), id {}",
            session.name(),
            session.email(),
            session.role(),
            session.id()
        ),
        None => info!("Not signed in"),
    }
}
