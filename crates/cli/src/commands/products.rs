//! Catalog browsing commands.

use tracing::info;

use hoodie_store_core::{Product, ProductId};
use hoodie_store_storefront::catalog::{CatalogError, SortOrder};
use hoodie_store_storefront::error::AppError;
use hoodie_store_storefront::state::Storefront;

use super::CommandError;

/// List products, optionally filtered by category.
///
/// # Errors
///
/// Returns `CommandError::InvalidArgument` for an unknown sort order.
pub fn list(store: &Storefront, category: Option<&str>, sort: &str) -> Result<(), CommandError> {
    let sort: SortOrder = sort.parse().map_err(|e| CommandError::invalid("sort", e))?;
    let products = store.catalog().browse(category, sort);

    if products.is_empty() {
        info!("No products found");
        return Ok(());
    }
    for product in products {
        info!(
            "{:>4}  {:<28} {:>12}  {}{}",
            product.id.as_str(),
            product.title,
            product.price.display(),
            product.category,
            if product.featured { "  *" } else { "" }
        );
    }
    info!("Categories: {}", store.catalog().categories().join(", "));
    Ok(())
}

/// Show one product in full.
///
/// # Errors
///
/// Returns a not-found error for an unknown product.
pub fn show(store: &Storefront, id: &str) -> Result<(), CommandError> {
    let id = ProductId::new(id);
    let product = store
        .catalog()
        .get(&id)
        .ok_or_else(|| AppError::from(CatalogError::NotFound(id.clone())))?;
    describe(product);
    Ok(())
}

fn describe(product: &Product) {
    info!("{} ({})", product.title, product.id);
    info!("  {}", product.description);
    info!("  Price:    {}", product.price);
    info!("  Category: {}", product.category);
    info!("  Sizes:    {}", product.sizes.join(", "));
    info!("  Colors:   {}", product.colors.join(", "));
    if product.stock == 0 {
        info!("  Out of stock");
    } else {
        info!("  Stock:    {}", product.stock);
    }
}
