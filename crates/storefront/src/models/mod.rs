//! Session-scoped models for storefront.
//!
//! A shopper's session records who they are and which page the navigation
//! shell shows. Their cart is looked up by that identity in the
//! [`CartStore`](crate::carts::CartStore).

pub mod session;

pub use session::{
    ShopperId, existing_shopper_id, keys, load_navigation, save_navigation, shopper_id,
};
