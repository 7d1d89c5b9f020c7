//! Catalog product record.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A product as supplied by the catalog.
///
/// Owned by the catalog; carts and orders hold their own copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Marketing description.
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Image URLs, first one is the cover.
    #[serde(default)]
    pub images: Vec<String>,
    /// Available sizes (e.g. `S`, `M`, `XL`).
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Available colors.
    #[serde(default)]
    pub colors: Vec<String>,
    /// Units in stock.
    pub stock: u32,
    /// Category label used for filtering.
    pub category: String,
    /// Shown on the home page when set.
    #[serde(default)]
    pub featured: bool,
}

impl Product {
    /// Whether `size` is one of the offered sizes.
    #[must_use]
    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// Whether `color` is one of the offered colors.
    #[must_use]
    pub fn offers_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// The cover image, if any.
    #[must_use]
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
