//! Mystik Canopy Core - catalog, cart, and navigation state.
//!
//! This crate holds everything the storefront knows about its products and a
//! shopper's session, with no I/O:
//!
//! - [`types`] - Newtype wrappers for product IDs and prices
//! - [`catalog`] - The fixed product catalog
//! - [`cart`] - The cart state machine (add, remove, adjust quantity, total)
//! - [`navigation`] - Which page of the storefront is showing
//!
//! The storefront crate loads these values from the session, applies one
//! operation per request, and renders the result.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod navigation;
pub mod types;

pub use cart::{CartLine, CartLineError, CartState};
pub use catalog::{Catalog, CatalogError, Product};
pub use navigation::{NavigationState, Page, PageParseError};
pub use types::*;
