//! The fixed product catalog.
//!
//! Products are immutable fixture data. The storefront builds one [`Catalog`]
//! at startup and shares it read-only across requests.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Price, ProductId};

/// Errors detected while validating catalog data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("product id {0} is not positive")]
    InvalidId(ProductId),
    #[error("product id {0} appears more than once")]
    DuplicateId(ProductId),
    #[error("product {0} has no sizes")]
    NoSizes(ProductId),
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),
}

/// A purchasable bed canopy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Opaque asset reference, resolved by whatever serves static files.
    pub image: String,
    /// Size labels in display order. Informational only.
    pub sizes: Vec<String>,
}

impl Product {
    /// Create a product from borrowed fixture data.
    #[must_use]
    pub fn new(
        id: i32,
        name: &str,
        price: Price,
        description: &str,
        image: &str,
        sizes: &[&str],
    ) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.to_owned(),
            description: description.to_owned(),
            price,
            image: image.to_owned(),
            sizes: sizes.iter().map(|&size| size.to_owned()).collect(),
        }
    }

    /// Sizes joined for display, e.g. `"Twin, Queen, King"`.
    #[must_use]
    pub fn sizes_label(&self) -> String {
        self.sizes.join(", ")
    }
}

/// An ordered, validated set of products.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, validating every product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if an id is non-positive or repeated, a product
    /// has no sizes, or a price is negative.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());

        for product in &products {
            if !product.id.is_positive() {
                return Err(CatalogError::InvalidId(product.id));
            }
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            if product.sizes.is_empty() {
                return Err(CatalogError::NoSizes(product.id));
            }
            if product.price.is_negative() {
                return Err(CatalogError::NegativePrice(product.id));
            }
        }

        Ok(Self { products })
    }

    /// The Mystik Canopy collection.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the fixture data is invalid.
    pub fn mystik() -> Result<Self, CatalogError> {
        Self::new(vec![
            Product::new(
                1,
                "Ethereal Dreams Canopy",
                Price::from_cents(159_999),
                "Where modern maximalism meets mystical elegance",
                "/static/images/etherealdreams.svg",
                &["Twin", "Queen", "King"],
            ),
            Product::new(
                2,
                "Celestial Haven",
                Price::from_cents(149_999),
                "A sanctuary inspired by cosmic energy and mountain serenity",
                "/static/images/celestialhaven.svg",
                &["Queen", "King"],
            ),
            Product::new(
                3,
                "Urban Mystic",
                Price::from_cents(129_999),
                "Modern spirituality meets urban edge",
                "/static/images/urbanmystic.svg",
                &["Twin", "Full", "Queen", "King"],
            ),
        ])
    }

    /// All products in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
