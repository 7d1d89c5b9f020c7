//! Admin dashboard figures.

use serde::Serialize;

use hoodie_store_core::{Order, OrderError, PermissionError, Price, Role};

use super::orders::OrderBook;
use crate::catalog::Catalog;

/// Headline numbers shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Products in the catalog.
    pub products: usize,
    /// Orders placed, whatever their status.
    pub orders: usize,
    /// Sum of every order total, one entry per currency in first-seen
    /// order. Zero in the catalog currency when there are no orders.
    pub revenue: Vec<Price>,
}

impl DashboardStats {
    /// Compute the dashboard for `actor`.
    ///
    /// Revenue counts every order regardless of status. Totals stay in the
    /// currency they were placed in; amounts are never converted.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Permission` unless `actor` is an admin.
    pub fn compute(
        catalog: &Catalog,
        orders: &OrderBook,
        actor: Option<Role>,
    ) -> Result<Self, OrderError> {
        PermissionError::require_admin(actor, "viewing the dashboard")?;
        let placed = orders.all(actor)?;

        let mut revenue: Vec<Price> = Vec::new();
        for total in placed.iter().map(Order::total) {
            match revenue
                .iter_mut()
                .find(|sum| sum.currency_code() == total.currency_code())
            {
                Some(sum) => *sum = sum.plus_amount(total.amount()),
                None => revenue.push(total),
            }
        }
        if revenue.is_empty() {
            revenue.push(Price::zero(catalog.currency()));
        }

        Ok(Self {
            products: catalog.len(),
            orders: placed.len(),
            revenue,
        })
    }
}
