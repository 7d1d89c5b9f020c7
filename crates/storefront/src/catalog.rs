//! Product catalog.
//!
//! The catalog is supplied at startup, either the built-in sample range or a
//! JSON file, and prices every product in the store currency. Carts only read
//! from it. Admin sessions may edit it in memory;
//! edits are not persisted and never touch products already captured in a
//! cart or order.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, instrument};

use hoodie_store_core::{CurrencyCode, PermissionError, Price, Product, ProductId, Role};

/// Errors from loading or editing the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The actor may not edit the catalog.
    #[error(transparent)]
    Permission(#[from] PermissionError),

    /// No product has the given identifier.
    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// Two products share an identifier.
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),

    /// A product is priced in another currency than the catalog.
    #[error("product {id} is priced in {}, the store sells in {}", .found.code(), .expected.code())]
    Currency {
        /// Offending product.
        id: ProductId,
        /// Store currency.
        expected: CurrencyCode,
        /// Currency of the product's price.
        found: CurrencyCode,
    },

    /// A product record is unusable.
    #[error("invalid product {id}: {reason}")]
    InvalidProduct {
        /// Offending product.
        id: ProductId,
        /// What is wrong with it.
        reason: String,
    },

    /// The catalog file could not be read.
    #[error("could not read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file is not a JSON product list.
    #[error("malformed catalog: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Product ordering for [`Catalog::browse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Featured products first, otherwise catalog order.
    #[default]
    Featured,
    /// Cheapest first.
    PriceLow,
    /// Most expensive first.
    PriceHigh,
    /// Alphabetical by title, ignoring case.
    Name,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "featured" => Ok(Self::Featured),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            "name" => Ok(Self::Name),
            _ => Err(format!(
                "invalid sort order: {s} (expected featured, price-low, price-high or name)"
            )),
        }
    }
}

/// The set of products on sale.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    currency: CurrencyCode,
}

impl Catalog {
    /// Build a catalog selling in `currency`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId`, `CatalogError::InvalidProduct`
    /// for a blank title, or `CatalogError::Currency` for a product priced
    /// in another currency.
    pub fn new(products: Vec<Product>, currency: CurrencyCode) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for product in &products {
            check_product(product, currency)?;
            if !seen.insert(&product.id) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self { products, currency })
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Malformed` for bad JSON, or any error from
    /// [`Catalog::new`].
    pub fn from_json(json: &str, currency: CurrencyCode) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products, currency)
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, or any error
    /// from [`Catalog::from_json`].
    #[instrument(skip_all, fields(path = %path.as_ref().display(), currency = currency.code()))]
    pub fn load(path: impl AsRef<Path>, currency: CurrencyCode) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_json(&json, currency)?;
        info!(products = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// Currency every product is priced in.
    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by identifier.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Products flagged as featured, in catalog order.
    pub fn featured(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.featured)
    }

    /// Distinct category labels in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .map(|p| p.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Filter by category and sort.
    ///
    /// `category` of `None` or `"all"` keeps every product.
    #[must_use]
    pub fn browse(&self, category: Option<&str>, sort: SortOrder) -> Vec<&Product> {
        let category = category.filter(|c| *c != "all");
        let mut products: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| category.is_none_or(|c| p.category == c))
            .collect();

        // sort_by is stable, so ties keep catalog order
        products.sort_by(|a, b| compare(a, b, sort));
        products
    }

    /// Insert a product or replace the one with the same identifier.
    ///
    /// Returns `true` when the product is new.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Permission` unless `actor` is an admin,
    /// `CatalogError::InvalidProduct` for a blank title, or
    /// `CatalogError::Currency` for a price in another currency.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn upsert_product(
        &mut self,
        product: Product,
        actor: Option<Role>,
    ) -> Result<bool, CatalogError> {
        PermissionError::require_admin(actor, "editing the catalog")?;
        check_product(&product, self.currency)?;

        if let Some(existing) = self.products.iter_mut().find(|p| p.id == product.id) {
            *existing = product;
            debug!("Replaced product");
            Ok(false)
        } else {
            self.products.push(product);
            debug!("Added product");
            Ok(true)
        }
    }

    /// Remove a product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Permission` unless `actor` is an admin, or
    /// `CatalogError::NotFound` if the product does not exist.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn remove_product(
        &mut self,
        id: &ProductId,
        actor: Option<Role>,
    ) -> Result<Product, CatalogError> {
        PermissionError::require_admin(actor, "editing the catalog")?;
        let index = self
            .products
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
        Ok(self.products.remove(index))
    }

    /// The built-in hoodie range, priced in dirhams.
    #[must_use]
    pub fn sample() -> Self {
        Self::sample_in(CurrencyCode::default())
    }

    /// The built-in hoodie range with its list prices labelled in `currency`.
    #[must_use]
    pub fn sample_in(currency: CurrencyCode) -> Self {
        let products = vec![
            hoodie(
                "1",
                "Hoodie Premium Noir",
                "Hoodie de qualité supérieure en coton biologique. Confortable et stylé pour un look décontracté.",
                Price::from_minor(8999, currency),
                &["photo-1556821840-3a63f95609a7", "photo-1578662996442-48f60103fc96"],
                &["S", "M", "L", "XL", "XXL"],
                &["Noir", "Gris", "Blanc"],
                50,
                "Premium",
                true,
            ),
            hoodie(
                "2",
                "Hoodie Sport Gris",
                "Hoodie sportif avec technologie anti-transpiration. Parfait pour les activités physiques.",
                Price::from_minor(7499, currency),
                &["photo-1503341504253-dff4815485f1", "photo-1620799140408-edc6dcb6d633"],
                &["S", "M", "L", "XL"],
                &["Gris", "Bleu", "Rouge"],
                30,
                "Sport",
                true,
            ),
            hoodie(
                "3",
                "Hoodie Vintage Marron",
                "Hoodie au style vintage avec finitions soignées. Un classique intemporel.",
                Price::from_minor(9499, currency),
                &["photo-1574180566232-aaad1b5b8450", "photo-1618354691373-d851c5c3a990"],
                &["M", "L", "XL", "XXL"],
                &["Marron", "Beige", "Vert"],
                25,
                "Vintage",
                false,
            ),
            hoodie(
                "4",
                "Hoodie Streetwear Blanc",
                "Hoodie tendance streetwear avec impression moderne. Pour un style urbain affirmé.",
                Price::from_minor(7999, currency),
                &["photo-1578662015058-4ba7c73f2c85", "photo-1618354691321-b8b6c3b8c5cc"],
                &["S", "M", "L", "XL"],
                &["Blanc", "Noir", "Gris"],
                40,
                "Streetwear",
                true,
            ),
            hoodie(
                "5",
                "Hoodie Oversize Bleu",
                "Hoodie coupe oversize pour un confort maximum. Parfait pour un look décontracté.",
                Price::from_minor(8499, currency),
                &["photo-1618354691373-d851c5c3a990", "photo-1574180566232-aaad1b5b8450"],
                &["M", "L", "XL", "XXL"],
                &["Bleu", "Marine", "Noir"],
                35,
                "Oversize",
                false,
            ),
            hoodie(
                "6",
                "Hoodie Tech Rouge",
                "Hoodie technique avec tissu respirant et coupe moderne. Innovation et style.",
                Price::from_minor(9999, currency),
                &["photo-1556821840-3a63f95609a7", "photo-1503341504253-dff4815485f1"],
                &["S", "M", "L", "XL"],
                &["Rouge", "Noir", "Gris"],
                20,
                "Tech",
                true,
            ),
        ];
        Self { products, currency }
    }
}

fn check_product(product: &Product, currency: CurrencyCode) -> Result<(), CatalogError> {
    if product.title.trim().is_empty() {
        return Err(CatalogError::InvalidProduct {
            id: product.id.clone(),
            reason: "title cannot be blank".to_owned(),
        });
    }
    let found = product.price.currency_code();
    if found != currency {
        return Err(CatalogError::Currency {
            id: product.id.clone(),
            expected: currency,
            found,
        });
    }
    Ok(())
}

fn compare(a: &Product, b: &Product, sort: SortOrder) -> Ordering {
    match sort {
        SortOrder::Featured => b.featured.cmp(&a.featured),
        SortOrder::PriceLow => a.price.amount().cmp(&b.price.amount()),
        SortOrder::PriceHigh => b.price.amount().cmp(&a.price.amount()),
        SortOrder::Name => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
    }
}

#[allow(clippy::too_many_arguments)]
fn hoodie(
    id: &str,
    title: &str,
    description: &str,
    price: Price,
    photos: &[&str],
    sizes: &[&str],
    colors: &[&str],
    stock: u32,
    category: &str,
    featured: bool,
) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_owned(),
        description: description.to_owned(),
        price,
        images: photos
            .iter()
            .map(|photo| format!("https://images.unsplash.com/{photo}?w=600&h=800&fit=crop"))
            .collect(),
        sizes: sizes.iter().map(|s| (*s).to_owned()).collect(),
        colors: colors.iter().map(|c| (*c).to_owned()).collect(),
        stock,
        category: category.to_owned(),
        featured,
    }
}
