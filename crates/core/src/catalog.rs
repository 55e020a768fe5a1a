//! The read-only product catalog.
//!
//! The catalog is built once at startup and shared by every request. Nothing
//! in this crate mutates a [`Product`] after it has been handed to
//! [`Catalog::new`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Furniture category used to group the shop and pick related products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Seating,
    Tables,
    Storage,
    Lighting,
    Textiles,
    Decor,
}

impl Category {
    /// Every category in shop display order.
    pub const ALL: [Self; 6] = [
        Self::Seating,
        Self::Tables,
        Self::Storage,
        Self::Lighting,
        Self::Textiles,
        Self::Decor,
    ];

    /// URL-safe identifier, e.g. `seating`.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Seating => "seating",
            Self::Tables => "tables",
            Self::Storage => "storage",
            Self::Lighting => "lighting",
            Self::Textiles => "textiles",
            Self::Decor => "decor",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Seating => "Seating",
            Self::Tables => "Tables",
            Self::Storage => "Storage",
            Self::Lighting => "Lighting",
            Self::Textiles => "Textiles",
            Self::Decor => "Decor",
        }
    }

    /// Look up a category by its slug (case-insensitive).
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.slug().eq_ignore_ascii_case(slug.trim()))
    }
}

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Image path relative to the site root, e.g. `/static/images/shop/arden-sofa.jpg`.
    pub image: String,
    pub category: Category,
    pub in_stock: bool,
    /// Shown on the home page and used to pad related-product shelves.
    pub featured: bool,
}

/// An ordered product list indexed by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog, keeping catalog order.
    ///
    /// If two products share an id, the first one wins and the later one is
    /// dropped with a warning.
    ///
    /// A catalog is priced in a single currency, that of its first product.
    /// Products priced in any other currency are dropped with a warning.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        let mut kept: Vec<Product> = Vec::with_capacity(products.len());
        let mut index = HashMap::with_capacity(products.len());
        let currency = products.first().map(|p| p.price.currency_code);

        for product in products {
            if index.contains_key(&product.id) {
                tracing::warn!(product_id = %product.id, "Duplicate product id in catalog, ignoring");
                continue;
            }
            if Some(product.price.currency_code) != currency {
                tracing::warn!(
                    product_id = %product.id,
                    currency = ?product.price.currency_code,
                    "Product priced in a second currency, ignoring"
                );
                continue;
            }
            index.insert(product.id, kept.len());
            kept.push(product);
        }

        Self {
            products: kept,
            index,
        }
    }

    /// Get a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.index.get(&id).and_then(|&i| self.products.get(i))
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
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

    /// Products in a category, in catalog order.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(move |p| p.category == category)
    }

    /// Featured products, in catalog order.
    pub fn featured(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.featured)
    }

    /// Resolve ids against the catalog, preserving their order.
    ///
    /// Ids that are not in the catalog are skipped.
    #[must_use]
    pub fn resolve(&self, ids: &[ProductId]) -> Vec<&Product> {
        ids.iter().filter_map(|&id| self.get(id)).collect()
    }

    /// Products to show next to `id`.
    ///
    /// Same-category products come first in catalog order, then featured
    /// products from other categories. The product itself is never included.
    /// Returns an empty list if `id` is unknown.
    #[must_use]
    pub fn related(&self, id: ProductId, limit: usize) -> Vec<&Product> {
        let Some(product) = self.get(id) else {
            return Vec::new();
        };

        let same_category = self
            .by_category(product.category)
            .filter(|p| p.id != id);
        let featured_elsewhere = self
            .featured()
            .filter(|p| p.category != product.category);

        same_category.chain(featured_elsewhere).take(limit).collect()
    }
}
