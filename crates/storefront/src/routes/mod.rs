//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! # Navigation shell
//! GET  /                       - Storefront on the session's current page
//! GET  /gallery                - Select the gallery and render the storefront
//! GET  /about                  - Select the about page and render the storefront
//! POST /navigate               - Switch page (returns main fragment)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart panel fragment
//! POST /cart/add               - Add product, open panel (returns cart panel)
//! POST /cart/update            - Shift quantity (returns cart panel)
//! POST /cart/remove            - Remove product lines (returns cart panel)
//! POST /cart/open              - Show the cart panel
//! POST /cart/close             - Hide the cart panel
//! GET  /cart/count             - Nav cart badge (fragment)
//! ```
//!
//! Mutating routes answer plain (non-HTMX) form posts with `303 See Other`
//! back to `/`.

pub mod cart;
pub mod gallery;
pub mod shell;

use axum::{
    Router,
    extract::FromRequestParts,
    http::request::Parts,
    routing::{get, post},
};

use crate::state::AppState;

/// Header HTMX sets on every request it issues.
pub const HX_REQUEST_HEADER: &str = "hx-request";

/// Whether the request came from HTMX rather than a plain form post.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HxRequest(pub bool);

impl HxRequest {
    #[must_use]
    pub const fn is_htmx(self) -> bool {
        self.0
    }
}

impl<S> FromRequestParts<S> for HxRequest
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let is_htmx = parts
            .headers
            .get(HX_REQUEST_HEADER)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.eq_ignore_ascii_case("true"));
        Ok(Self(is_htmx))
    }
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/open", post(cart::open))
        .route("/close", post(cart::close))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(shell::index))
        .route("/gallery", get(shell::gallery))
        .route("/about", get(shell::about))
        .route("/navigate", post(shell::navigate))
        .nest("/cart", cart_routes())
}
