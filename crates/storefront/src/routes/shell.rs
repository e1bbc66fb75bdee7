//! Navigation shell route handlers.
//!
//! The shell is the full page: brand, nav buttons, banner, the current page
//! body, and the cart panel. It owns the session's [`NavigationState`]; cart
//! visibility toggles are forwarded to the cart routes.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use mystik_canopy_core::{CartState, NavigationState, Page};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::models::{load_navigation, save_navigation};
use crate::routes::HxRequest;
use crate::routes::cart::{CartPanelView, current_cart};
use crate::routes::gallery::{MainTemplate, ProductView};
use crate::state::AppState;

/// Navigation button display data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavItemView {
    pub slug: &'static str,
    pub title: &'static str,
}

/// Navigation buttons in display order.
#[must_use]
pub fn nav_items() -> Vec<NavItemView> {
    Page::ALL
        .into_iter()
        .map(|page| NavItemView {
            slug: page.slug(),
            title: page.title(),
        })
        .collect()
}

/// Full storefront page template.
#[derive(Template, WebTemplate)]
#[template(path = "shell.html")]
pub struct ShellTemplate {
    pub nav: Vec<NavItemView>,
    pub is_about: bool,
    pub products: Vec<ProductView>,
    pub cart: CartPanelView,
    pub count: usize,
}

impl ShellTemplate {
    /// Render the whole shell from session state.
    #[must_use]
    pub fn new(state: &AppState, navigation: NavigationState, cart: &CartState) -> Self {
        let main = MainTemplate::for_page(navigation.current_page(), state.catalog());
        Self {
            nav: nav_items(),
            is_about: main.is_about,
            products: main.products,
            cart: CartPanelView::from(cart),
            count: cart.line_count(),
        }
    }
}

/// Navigate form data.
#[derive(Debug, Deserialize)]
pub struct NavigateForm {
    pub page: String,
}

async fn render_shell(state: &AppState, session: &Session, navigation: NavigationState) -> ShellTemplate {
    let cart = current_cart(state, session).await;
    ShellTemplate::new(state, navigation, &cart)
}

/// Select `page`, persist it, and render the shell.
async fn show_page(state: &AppState, session: &Session, page: Page) -> Result<ShellTemplate> {
    let mut navigation = load_navigation(session).await;
    navigation.navigate(page);
    save_navigation(session, &navigation).await?;
    Ok(render_shell(state, session, navigation).await)
}

/// Display the storefront on the session's current page.
#[instrument(skip(state, session))]
pub async fn index(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let navigation = load_navigation(&session).await;
    render_shell(&state, &session, navigation).await
}

/// Display the gallery page.
///
/// # Errors
///
/// Returns an error if the session cannot be saved.
#[instrument(skip(state, session))]
pub async fn gallery(State(state): State<AppState>, session: Session) -> Result<ShellTemplate> {
    show_page(&state, &session, Page::Gallery).await
}

/// Display the about page.
///
/// # Errors
///
/// Returns an error if the session cannot be saved.
#[instrument(skip(state, session))]
pub async fn about(State(state): State<AppState>, session: Session) -> Result<ShellTemplate> {
    show_page(&state, &session, Page::About).await
}

/// Switch pages (HTMX swaps `#main`; plain posts are redirected).
///
/// # Errors
///
/// Returns 400 for an unknown page name.
#[instrument(skip(state, session))]
pub async fn navigate(
    State(state): State<AppState>,
    session: Session,
    hx: HxRequest,
    Form(form): Form<NavigateForm>,
) -> Result<Response> {
    let page = form
        .page
        .parse::<Page>()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let mut navigation = load_navigation(&session).await;
    navigation.navigate(page);
    save_navigation(&session, &navigation).await?;
    tracing::debug!(%page, "Navigated");

    if !hx.is_htmx() {
        return Ok(Redirect::to("/").into_response());
    }

    Ok(MainTemplate::for_page(page, state.catalog()).into_response())
}
