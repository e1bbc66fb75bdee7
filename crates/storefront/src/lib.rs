//! Mystik Canopy Storefront library.
//!
//! Server-rendered storefront: a product gallery, an about page, and a
//! per-session cart panel. This crate provides the router as a library so the
//! binary stays small and the whole app can be driven in tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod carts;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

use axum::{Router, extract::Request, middleware::from_fn, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::Span;

use crate::state::AppState;

/// Directory holding the stylesheet and product images.
pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Build the storefront router with its middleware stack.
///
/// Sentry layers are added by the binary, outside this stack.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(session_layer)
        .layer(from_fn(middleware::security_headers_middleware))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .with_state(state)
}

/// Span for each request; `request_id` is filled in by the request ID middleware.
fn make_request_span(request: &Request) -> Span {
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = tracing::field::Empty,
    )
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}
