//! In-memory cart store.
//!
//! Carts live here rather than in the session record, keyed by the
//! [`ShopperId`] the session carries. Each cart sits behind its own mutex, so
//! requests from one shopper apply cart operations one at a time while
//! different shoppers never contend. Entries idle for longer than the session
//! window are evicted, along with the cart.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use mystik_canopy_core::CartState;
use tokio::sync::Mutex;

use crate::models::ShopperId;

/// Upper bound on carts held at once.
const MAX_CARTS: u64 = 100_000;

/// Every shopper's cart.
#[derive(Clone)]
pub struct CartStore {
    carts: Cache<ShopperId, Arc<Mutex<CartState>>>,
}

impl CartStore {
    /// Create a store whose carts expire after `idle` without access.
    #[must_use]
    pub fn new(idle: Duration) -> Self {
        let carts = Cache::builder()
            .max_capacity(MAX_CARTS)
            .time_to_idle(idle)
            .build();

        Self { carts }
    }

    /// Copy of the shopper's cart, or an empty one if they have none.
    pub async fn snapshot(&self, shopper: ShopperId) -> CartState {
        match self.carts.get(&shopper).await {
            Some(cart) => cart.lock().await.clone(),
            None => CartState::new(),
        }
    }

    /// Apply `change` to the shopper's cart and return the result.
    ///
    /// The cart stays locked from read to write, so concurrent changes for
    /// one shopper are applied in turn and none are lost.
    pub async fn update<F>(&self, shopper: ShopperId, change: F) -> CartState
    where
        F: FnOnce(&mut CartState),
    {
        let cart = self
            .carts
            .get_with(shopper, async { Arc::new(Mutex::new(CartState::new())) })
            .await;

        let mut guard = cart.lock().await;
        change(&mut *guard);
        guard.clone()
    }
}
