//! The cart state machine.
//!
//! [`CartState`] is the only owner of a shopper's cart. Every change goes
//! through one of five operations, each total over its inputs:
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | [`add_to_cart`](CartState::add_to_cart) | Append a quantity-1 line, open the panel |
//! | [`remove_from_cart`](CartState::remove_from_cart) | Drop every line with the id |
//! | [`update_quantity`](CartState::update_quantity) | Shift quantity, clamped at 1 |
//! | [`toggle_visibility`](CartState::toggle_visibility) | Show or hide the panel |
//! | [`total`](CartState::total) | Exact sum of `price * quantity` |
//!
//! Unknown ids are no-ops, never errors.
//!
//! Adding a product that is already in the cart appends a second line rather
//! than bumping the first line's quantity. Both lines share the product id, so
//! later quantity and remove operations act on both.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Product;
use crate::types::{Price, ProductId};

/// A stored cart line that breaks the cart's invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartLineError {
    #[error("cart line for product {0} has zero quantity")]
    ZeroQuantity(ProductId),
}

/// One catalog product plus how many the shopper wants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredCartLine")]
pub struct CartLine {
    product: Product,
    quantity: u32,
}

/// Wire shape of a [`CartLine`], checked before it becomes one.
#[derive(Deserialize)]
struct StoredCartLine {
    product: Product,
    quantity: u32,
}

impl TryFrom<StoredCartLine> for CartLine {
    type Error = CartLineError;

    fn try_from(stored: StoredCartLine) -> Result<Self, Self::Error> {
        if stored.quantity == 0 {
            return Err(CartLineError::ZeroQuantity(stored.product.id));
        }
        Ok(Self {
            product: stored.product,
            quantity: stored.quantity,
        })
    }
}

impl CartLine {
    fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// Id of the originating product.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    /// Always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `price * quantity`, exactly.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }

    fn shift_quantity(&mut self, delta: i32) {
        let shifted = (i64::from(self.quantity) + i64::from(delta)).max(1);
        self.quantity = u32::try_from(shifted).unwrap_or(u32::MAX);
    }
}

/// A shopper's cart and whether its panel is open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartState {
    lines: Vec<CartLine>,
    visible: bool,
}

impl CartState {
    /// An empty, hidden cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `product` as a new quantity-1 line and open the cart panel.
    pub fn add_to_cart(&mut self, product: &Product) {
        self.lines.push(CartLine::new(product.clone()));
        self.visible = true;
    }

    /// Remove every line for `id`.
    pub fn remove_from_cart(&mut self, id: ProductId) {
        self.lines.retain(|line| line.id() != id);
    }

    /// Set each line for `id` to `max(1, quantity + delta)`.
    ///
    /// A line never drops below 1 here; use [`remove_from_cart`](Self::remove_from_cart)
    /// to take it out.
    pub fn update_quantity(&mut self, id: ProductId, delta: i32) {
        self.lines
            .iter_mut()
            .filter(|line| line.id() == id)
            .for_each(|line| line.shift_quantity(delta));
    }

    /// Show or hide the cart panel.
    pub const fn toggle_visibility(&mut self, show: bool) {
        self.visible = show;
    }

    /// Exact sum of every line's `price * quantity`.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Lines in the order they were added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Number of lines, which is what the nav badge shows.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
