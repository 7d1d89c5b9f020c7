//! Checkout and order management commands.

use clap::Args;
use tracing::{info, warn};

use hoodie_store_core::{CustomerInfo, Order, OrderId, OrderStatus};
use hoodie_store_storefront::state::Storefront;

use super::CommandError;

/// Customer details for `checkout`.
#[derive(Debug, Args)]
pub struct CheckoutArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub address: String,
    #[arg(long)]
    pub city: String,
    /// Delivery notes
    #[arg(long)]
    pub notes: Option<String>,
}

impl From<CheckoutArgs> for CustomerInfo {
    fn from(args: CheckoutArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            phone: args.phone,
            address: args.address,
            city: args.city,
            notes: args.notes.filter(|n| !n.trim().is_empty()),
        }
    }
}

/// Place an order from the cart.
///
/// # Errors
///
/// Returns an error when no one is signed in, the cart is empty, or a
/// customer field is blank.
pub fn checkout(store: &mut Storefront, args: CheckoutArgs) -> Result<(), CommandError> {
    let order = store.checkout(args.into())?;
    info!("Order #{} placed, total {}", order.id(), order.total());
    info!("We will contact you on {} to confirm.", order.customer_info().phone);
    Ok(())
}

/// List the orders the signed-in user may see, newest first.
///
/// # Errors
///
/// Returns an error when no one is signed in.
pub fn list(store: &Storefront) -> Result<(), CommandError> {
    let orders = store.visible_orders()?;
    if orders.is_empty() {
        info!("No orders yet");
        return Ok(());
    }
    for order in orders.iter().rev() {
        summarize(order);
    }
    Ok(())
}

/// Change an order's status.
///
/// # Errors
///
/// Returns an error for an unknown status or order, a non-admin session, or
/// a transition the configured policy refuses.
pub fn set_status(store: &mut Storefront, id: &str, status: &str) -> Result<(), CommandError> {
    let status: OrderStatus = status
        .parse()
        .map_err(|e| CommandError::invalid("status", e))?;
    let order = store.set_order_status(&OrderId::new(id), status)?;
    info!("Order #{} is now {}", order.id(), order.status().label());
    Ok(())
}

/// Print a WhatsApp link for an order's customer.
///
/// # Errors
///
/// Returns an error for an unknown order or a non-admin session.
pub fn contact(store: &Storefront, id: &str) -> Result<(), CommandError> {
    let message = store.contact_customer(&OrderId::new(id))?;
    info!("{}", message.text());
    match message.whatsapp_url() {
        Some(url) => info!("{url}"),
        None => warn!(phone = message.phone(), "Phone number has no digits"),
    }
    Ok(())
}

fn summarize(order: &Order) {
    let customer = order.customer_info();
    info!(
        "#{}  {}  {:<11} {:>12}  {} ({})",
        order.id(),
        order.created_at().format("%Y-%m-%d %H:%M"),
        order.status().label(),
        order.total().display(),
        customer.name,
        customer.city
    );
    for line in order.items() {
        info!(
            "      {} x{} ({}, {})",
            line.product.title, line.quantity, line.size, line.color
        );
    }
    if let Some(notes) = &customer.notes {
        info!("      Notes: {notes}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_notes_are_dropped() {
        let args = CheckoutArgs {
            name: "Nadia".into(),
            email: "nadia@example.ma".into(),
            phone: "0600000000".into(),
            address: "12 Rue Atlas".into(),
            city: "Rabat".into(),
            notes: Some("   ".into()),
        };
        let info = CustomerInfo::from(args);
        assert_eq!(info.notes, None);
        assert_eq!(info.city, "Rabat");
    }
}
