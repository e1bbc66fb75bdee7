//! Cart route handlers.
//!
//! Each handler resolves the session's shopper, applies one cart operation
//! through the [`CartStore`](crate::carts::CartStore), and renders the panel
//! from the new state. HTMX requests get the panel fragment plus an
//! `HX-Trigger: cart-updated` header; plain form posts are redirected back to
//! the storefront.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use mystik_canopy_core::{CartLine, CartState, ProductId};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::{existing_shopper_id, shopper_id};
use crate::routes::HxRequest;
use crate::state::AppState;

/// Event fired on the page after any cart change.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

/// Cart line display data for templates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartLineView {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub quantity: u32,
}

/// Cart panel display data for templates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartPanelView {
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub is_empty: bool,
    pub visible: bool,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id().as_i32(),
            name: line.product().name.clone(),
            price: line.product().price.display(),
            quantity: line.quantity(),
        }
    }
}

impl From<&CartState> for CartPanelView {
    fn from(cart: &CartState) -> Self {
        Self {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            total: cart.total().display_rounded(),
            is_empty: cart.is_empty(),
            visible: cart.is_visible(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityForm {
    pub product_id: ProductId,
    pub delta: i32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
}

/// Cart panel fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_panel.html")]
pub struct CartPanelTemplate {
    pub cart: CartPanelView,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: usize,
}

/// The shopper's current cart, without creating a session for them.
pub async fn current_cart(state: &AppState, session: &Session) -> CartState {
    match existing_shopper_id(session).await {
        Some(shopper) => state.carts().snapshot(shopper).await,
        None => CartState::new(),
    }
}

/// Apply one cart operation for this session's shopper.
///
/// The store holds the shopper's cart locked for the whole operation, so
/// overlapping requests from one browser are applied in turn.
async fn change_cart<F>(state: &AppState, session: &Session, change: F) -> Result<CartState>
where
    F: FnOnce(&mut CartState),
{
    let shopper = shopper_id(session).await?;
    Ok(state.carts().update(shopper, change).await)
}

/// Answer the request that changed `cart`.
fn respond_with_cart(hx: HxRequest, cart: &CartState) -> Response {
    if !hx.is_htmx() {
        return Redirect::to("/").into_response();
    }

    (
        AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
        CartPanelTemplate {
            cart: CartPanelView::from(cart),
        },
    )
        .into_response()
}

/// Display the cart panel fragment.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let cart = current_cart(&state, &session).await;
    CartPanelTemplate {
        cart: CartPanelView::from(&cart),
    }
}

/// Add a catalog product to the cart and open the panel.
///
/// # Errors
///
/// Returns 404 if the product is not in the catalog; the cart is unchanged.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    hx: HxRequest,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let product = state
        .catalog()
        .get(form.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    let cart = change_cart(&state, &session, |cart| cart.add_to_cart(product)).await?;

    tracing::debug!(
        product_id = %form.product_id,
        lines = cart.line_count(),
        "Added to cart"
    );
    let product_id = form.product_id.to_string();
    add_breadcrumb("cart", "Added product", Some(&[("product_id", product_id.as_str())]));

    Ok(respond_with_cart(hx, &cart))
}

/// Shift the quantity of every line for a product.
///
/// # Errors
///
/// Returns an error if the session cannot be saved.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    hx: HxRequest,
    Form(form): Form<UpdateQuantityForm>,
) -> Result<Response> {
    let cart = change_cart(&state, &session, |cart| {
        cart.update_quantity(form.product_id, form.delta);
    })
    .await?;

    tracing::debug!(
        product_id = %form.product_id,
        delta = form.delta,
        "Updated cart quantity"
    );

    Ok(respond_with_cart(hx, &cart))
}

/// Remove every line for a product.
///
/// # Errors
///
/// Returns an error if the session cannot be saved.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    hx: HxRequest,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let cart = change_cart(&state, &session, |cart| cart.remove_from_cart(form.product_id)).await?;

    tracing::debug!(
        product_id = %form.product_id,
        lines = cart.line_count(),
        "Removed from cart"
    );
    let product_id = form.product_id.to_string();
    add_breadcrumb("cart", "Removed product", Some(&[("product_id", product_id.as_str())]));

    Ok(respond_with_cart(hx, &cart))
}

/// Open the cart panel.
///
/// # Errors
///
/// Returns an error if the session cannot be saved.
#[instrument(skip(state, session))]
pub async fn open(
    State(state): State<AppState>,
    session: Session,
    hx: HxRequest,
) -> Result<Response> {
    let cart = change_cart(&state, &session, |cart| cart.toggle_visibility(true)).await?;
    Ok(respond_with_cart(hx, &cart))
}

/// Close the cart panel.
///
/// # Errors
///
/// Returns an error if the session cannot be saved.
#[instrument(skip(state, session))]
pub async fn close(
    State(state): State<AppState>,
    session: Session,
    hx: HxRequest,
) -> Result<Response> {
    let cart = change_cart(&state, &session, |cart| cart.toggle_visibility(false)).await?;
    Ok(respond_with_cart(hx, &cart))
}

/// Get the nav cart badge (HTMX).
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    CartCountTemplate {
        count: current_cart(&state, &session).await.line_count(),
    }
}
