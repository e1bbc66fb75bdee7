//! Integration tests for the Mystik Canopy storefront.
//!
//! The storefront router is driven in-process with `tower::ServiceExt::oneshot`,
//! so no server or network is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p mystik-canopy-integration-tests
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let mut shopper = Shopper::new();
//! let resp = shopper.htmx_post("/cart/add", "product_id=1").await;
//! assert_eq!(resp.status, StatusCode::OK);
//! assert!(resp.body.contains("Ethereal Dreams Canopy"));
//! ```

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use mystik_canopy_core::Catalog;
use mystik_canopy_storefront::{app, config::StorefrontConfig, state::AppState};
use tower::ServiceExt;

/// Largest response body the helpers will buffer.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Value of `name` as a string, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

/// One browser session against an in-process storefront.
///
/// Remembers the session cookie between requests, the way a browser would.
pub struct Shopper {
    router: Router,
    cookie: Option<String>,
}

impl Default for Shopper {
    fn default() -> Self {
        Self::new()
    }
}

impl Shopper {
    /// A fresh shopper against a storefront with the Mystik collection.
    #[must_use]
    pub fn new() -> Self {
        let catalog = Catalog::mystik().expect("Mystik catalog is valid");
        Self::with_state(AppState::new(StorefrontConfig::default(), catalog))
    }

    /// A fresh shopper against a storefront built from `state`.
    #[must_use]
    pub fn with_state(state: AppState) -> Self {
        Self {
            router: app(state),
            cookie: None,
        }
    }

    /// A second shopper on the same storefront, with no session yet.
    #[must_use]
    pub fn stranger(&self) -> Self {
        Self {
            router: self.router.clone(),
            cookie: None,
        }
    }

    /// Another tab in this shopper's browser: same storefront, same session.
    #[must_use]
    pub fn tab(&self) -> Self {
        Self {
            router: self.router.clone(),
            cookie: self.cookie.clone(),
        }
    }

    /// Whether the storefront has issued this shopper a session cookie.
    #[must_use]
    pub const fn has_session(&self) -> bool {
        self.cookie.is_some()
    }

    pub async fn get(&mut self, path: &str) -> TestResponse {
        let request = self.request("GET", path, false);
        self.send(request.body(Body::empty()).expect("valid request"))
            .await
    }

    pub async fn htmx_get(&mut self, path: &str) -> TestResponse {
        let request = self.request("GET", path, true);
        self.send(request.body(Body::empty()).expect("valid request"))
            .await
    }

    /// Plain form post, as a browser without JavaScript would send it.
    pub async fn post(&mut self, path: &str, form: &str) -> TestResponse {
        self.post_form(path, form, false).await
    }

    /// Form post issued by HTMX.
    pub async fn htmx_post(&mut self, path: &str, form: &str) -> TestResponse {
        self.post_form(path, form, true).await
    }

    async fn post_form(&mut self, path: &str, form: &str, htmx: bool) -> TestResponse {
        let request = self
            .request("POST", path, htmx)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_owned()))
            .expect("valid request");
        self.send(request).await
    }

    fn request(&self, method: &str, path: &str, htmx: bool) -> axum::http::request::Builder {
        let mut builder = Request::builder().method(method).uri(path);
        if htmx {
            builder = builder.header("HX-Request", "true");
        }
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            && let Some(pair) = set_cookie.split(';').next()
        {
            self.cookie = Some(pair.trim().to_owned());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), MAX_BODY_BYTES)
            .await
            .expect("readable body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}
