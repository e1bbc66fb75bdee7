//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use mystik_canopy_core::{Catalog, CatalogError};

use crate::carts::CartStore;
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Config and catalog are read-only after
/// startup; per-shopper carts live in the [`CartStore`].
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    carts: CartStore,
}

impl AppState {
    /// Create application state around an existing catalog.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        let carts = CartStore::new(session_idle(&config));
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                carts,
            }),
        }
    }

    /// Create application state with the Mystik Canopy collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog fixture fails validation.
    pub fn with_mystik_catalog(config: StorefrontConfig) -> Result<Self, CatalogError> {
        Ok(Self::new(config, Catalog::mystik()?))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the shoppers' carts.
    #[must_use]
    pub fn carts(&self) -> &CartStore {
        &self.inner.carts
    }
}

/// Carts expire with the session that points at them.
fn session_idle(config: &StorefrontConfig) -> Duration {
    let minutes = u64::try_from(config.session_idle_minutes).unwrap_or(1).max(1);
    Duration::from_secs(minutes.saturating_mul(60))
}
