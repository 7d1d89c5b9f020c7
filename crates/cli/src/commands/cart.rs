//! Cart commands.
//!
//! Size, color and stock are checked here before the ledger is touched; the
//! ledger itself accepts any variant.

use tracing::info;

use hoodie_store_core::{Cart, LineKey, Product, ProductId};
use hoodie_store_storefront::catalog::CatalogError;
use hoodie_store_storefront::error::AppError;
use hoodie_store_storefront::state::Storefront;

use super::CommandError;

/// Add units of a product variant.
///
/// # Errors
///
/// Returns an error for an unknown product, a size or color the product is
/// not offered in, or more units than are in stock.
pub fn add(
    store: &mut Storefront,
    id: &str,
    size: &str,
    color: &str,
    quantity: u32,
) -> Result<(), CommandError> {
    if quantity == 0 {
        return Err(CommandError::invalid("quantity", "must be at least 1"));
    }
    let id = ProductId::new(id);
    let product = lookup(store, &id)?;
    let requested = units_of(store.cart().cart(), &id) + u64::from(quantity);
    check_variant(product, size, color, requested)?;

    store.add_to_cart(&id, size, color, quantity)?;
    info!(
        "Added {quantity} x {} ({size}, {color})",
        product_title(store, &id)
    );
    show(store);
    Ok(())
}

/// Remove a line.
pub fn remove(store: &mut Storefront, id: &str, size: &str, color: &str) {
    store.cart_mut().remove(&ProductId::new(id), size, color);
    show(store);
}

/// Replace a line's quantity.
///
/// # Errors
///
/// Returns `CommandError::InsufficientStock` when the new quantity exceeds
/// the stock left.
pub fn set(
    store: &mut Storefront,
    id: &str,
    size: &str,
    color: &str,
    quantity: i64,
) -> Result<(), CommandError> {
    let id = ProductId::new(id);
    if quantity > 0
        && let Some(product) = store.catalog().get(&id)
    {
        let key = LineKey::new(id.clone(), size, color);
        let cart = store.cart().cart();
        let current = cart
            .line(&key)
            .map_or(0, |line| u64::from(line.quantity.get()));
        let requested = units_of(cart, &id) - current + quantity.unsigned_abs();
        check_stock(product, requested)?;
    }
    store.cart_mut().set_quantity(&id, size, color, quantity);
    show(store);
    Ok(())
}

/// Empty the cart.
pub fn clear(store: &mut Storefront) {
    store.cart_mut().clear();
    info!("Cart cleared");
}

/// Print the cart lines and totals.
pub fn show(store: &Storefront) {
    let cart = store.cart();
    if cart.items().is_empty() {
        info!("Your cart is empty");
        return;
    }
    for line in cart.items() {
        info!(
            "{:>4}  {:<28} {:<4} {:<8} x{:<3} {:>12}",
            line.product.id.as_str(),
            line.product.title,
            line.size,
            line.color,
            line.quantity,
            line.line_total().display()
        );
    }
    info!(
        "{} item(s), total {}",
        cart.total_items(),
        cart.total_price().display()
    );
}

fn lookup<'a>(store: &'a Storefront, id: &ProductId) -> Result<&'a Product, CommandError> {
    store
        .catalog()
        .get(id)
        .ok_or_else(|| AppError::from(CatalogError::NotFound(id.clone())).into())
}

fn product_title(store: &Storefront, id: &ProductId) -> String {
    store
        .catalog()
        .get(id)
        .map_or_else(|| id.to_string(), |p| p.title.clone())
}

/// Units of `id` already in the cart, across every variant.
fn units_of(cart: &Cart, id: &ProductId) -> u64 {
    cart.items()
        .iter()
        .filter(|line| line.product_id() == id)
        .map(|line| u64::from(line.quantity.get()))
        .sum()
}

fn check_variant(
    product: &Product,
    size: &str,
    color: &str,
    requested: u64,
) -> Result<(), CommandError> {
    if !product.offers_size(size) {
        return Err(CommandError::UnknownSize {
            product: product.title.clone(),
            size: size.to_owned(),
        });
    }
    if !product.offers_color(color) {
        return Err(CommandError::UnknownColor {
            product: product.title.clone(),
            color: color.to_owned(),
        });
    }
    check_stock(product, requested)
}

fn check_stock(product: &Product, requested: u64) -> Result<(), CommandError> {
    if requested > u64::from(product.stock) {
        return Err(CommandError::InsufficientStock {
            product: product.title.clone(),
            stock: product.stock,
            requested,
        });
    }
    Ok(())
}
