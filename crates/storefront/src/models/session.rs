//! Session-related types.
//!
//! The session record holds the shopper's identity and which page the
//! navigation shell shows. The cart itself lives in the
//! [`CartStore`](crate::carts::CartStore), keyed by [`ShopperId`], so cart
//! changes never rewrite the session record.
//!
//! A missing or unreadable navigation value falls back to its default, so a
//! fresh or expired session starts on the gallery page.

use mystik_canopy_core::NavigationState;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tower_sessions::Session;
use uuid::Uuid;

/// Session keys for storefront state.
pub mod keys {
    /// Key for the shopper's identity.
    pub const SHOPPER: &str = "shopper";

    /// Key for the navigation shell's current page.
    pub const NAVIGATION: &str = "navigation";
}

/// Identifies one shopper's cart for the life of their session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShopperId(Uuid);

impl ShopperId {
    /// A fresh, random shopper ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ShopperId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

async fn load_or_default<T>(session: &Session, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match session.get::<T>(key).await {
        Ok(value) => value.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(key, "Discarding unreadable session value: {e}");
            T::default()
        }
    }
}

/// Get the shopper ID if this session already has one.
pub async fn existing_shopper_id(session: &Session) -> Option<ShopperId> {
    match session.get::<ShopperId>(keys::SHOPPER).await {
        Ok(shopper) => shopper,
        Err(e) => {
            tracing::warn!("Discarding unreadable shopper id: {e}");
            None
        }
    }
}

/// Get the shopper ID, assigning one on the session's first write.
///
/// Every path that writes the session goes through here first, so once a
/// browser holds a session cookie its shopper ID is fixed and concurrent
/// requests agree on which cart they change.
///
/// # Errors
///
/// Returns an error if the session store rejects the write.
pub async fn shopper_id(session: &Session) -> Result<ShopperId, tower_sessions::session::Error> {
    if let Some(shopper) = existing_shopper_id(session).await {
        return Ok(shopper);
    }

    let shopper = ShopperId::generate();
    session.insert(keys::SHOPPER, shopper).await?;
    tracing::debug!(%shopper, "Assigned shopper id");
    Ok(shopper)
}

/// Get the navigation state from the session.
pub async fn load_navigation(session: &Session) -> NavigationState {
    load_or_default(session, keys::NAVIGATION).await
}

/// Store the navigation state in the session.
///
/// # Errors
///
/// Returns an error if the session store rejects the write.
pub async fn save_navigation(
    session: &Session,
    navigation: &NavigationState,
) -> Result<(), tower_sessions::session::Error> {
    shopper_id(session).await?;
    session.insert(keys::NAVIGATION, navigation).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use mystik_canopy_core::Page;
    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_shopper_id_is_stable() {
        let session = session();
        assert!(existing_shopper_id(&session).await.is_none());

        let first = shopper_id(&session).await.unwrap();
        let second = shopper_id(&session).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(existing_shopper_id(&session).await, Some(first));
    }

    #[tokio::test]
    async fn test_saving_navigation_assigns_shopper() {
        let session = session();
        save_navigation(&session, &NavigationState::new(Page::About))
            .await
            .unwrap();

        assert!(existing_shopper_id(&session).await.is_some());
        assert_eq!(load_navigation(&session).await.current_page(), Page::About);
    }

    #[tokio::test]
    async fn test_unreadable_navigation_falls_back_to_gallery() {
        let session = session();
        session.insert(keys::NAVIGATION, "not a page").await.unwrap();
        assert_eq!(load_navigation(&session).await.current_page(), Page::Gallery);
    }
}
