//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the visitor's session; every mutation loads it,
//! runs the reducer, and stores the returned value.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use fakestore_core::{Cart, CartAction, CartLineItem, DrawerState, ProductId};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::models::session::{load_cart, load_drawer, store_cart, store_drawer};
use crate::state::AppState;

/// HTMX event fired after any cart mutation so the badge refreshes itself.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub price: String,
    pub quantity: u32,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            item_count: 0,
        }
    }
}

impl From<&CartLineItem> for CartItemView {
    fn from(line: &CartLineItem) -> Self {
        Self {
            id: line.id(),
            title: line.title().to_string(),
            image: line.product.image.clone(),
            price: line.price().to_string(),
            quantity: line.quantity(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            item_count: cart.total_item_count(),
        }
    }
}

/// Form data for the add and remove buttons.
#[derive(Debug, Deserialize)]
pub struct CartItemForm {
    pub product_id: ProductId,
}

/// Cart drawer fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_drawer.html")]
pub struct CartDrawerTemplate {
    pub cart: CartView,
    pub drawer_open: bool,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Respond with the refreshed line items and tell the page the cart changed.
fn cart_updated(cart: &Cart) -> Response {
    (
        AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
        CartItemsTemplate {
            cart: CartView::from(cart),
        },
    )
        .into_response()
}

/// Render the drawer for the visitor's current cart.
async fn drawer(session: &Session, drawer: DrawerState) -> Result<CartDrawerTemplate> {
    let cart = load_cart(session).await?;
    Ok(CartDrawerTemplate {
        cart: CartView::from(&cart),
        drawer_open: drawer.is_open(),
    })
}

/// Display the cart drawer (HTMX).
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<CartDrawerTemplate> {
    let state = load_drawer(&session).await?;
    drawer(&session, state).await
}

/// Add one unit of a product (HTMX).
///
/// The product comes from the loaded catalog. If the catalog doesn't have it
/// but the cart does (the drawer's "+" button), the cart's copy is used.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CartItemForm>,
) -> Result<Response> {
    let cart = load_cart(&session).await?;

    let product = state
        .catalog()
        .find(form.product_id)
        .or_else(|| cart.get(form.product_id).map(|line| line.product.clone()))
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    let cart = cart.apply(&CartAction::Add(product));
    store_cart(&session, &cart).await?;

    let product_id = form.product_id.to_string();
    add_breadcrumb(
        "cart",
        "Added product",
        Some(&[("product_id", product_id.as_str())]),
    );
    tracing::debug!(total = cart.total_item_count(), "Cart updated");

    Ok(cart_updated(&cart))
}

/// Remove one unit of a product (HTMX).
///
/// Removing a product that isn't in the cart changes nothing.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<CartItemForm>) -> Result<Response> {
    let cart = load_cart(&session).await?;
    let cart = cart.apply(&CartAction::Remove(form.product_id));
    store_cart(&session, &cart).await?;

    let product_id = form.product_id.to_string();
    add_breadcrumb(
        "cart",
        "Removed product",
        Some(&[("product_id", product_id.as_str())]),
    );
    tracing::debug!(total = cart.total_item_count(), "Cart updated");

    Ok(cart_updated(&cart))
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<CartCountTemplate> {
    let cart = load_cart(&session).await?;
    Ok(CartCountTemplate {
        count: cart.total_item_count(),
    })
}

/// Open the cart drawer (HTMX).
#[instrument(skip(session))]
pub async fn open(session: Session) -> Result<CartDrawerTemplate> {
    store_drawer(&session, DrawerState::Open).await?;
    drawer(&session, DrawerState::Open).await
}

/// Close the cart drawer (HTMX).
#[instrument(skip(session))]
pub async fn close(session: Session) -> Result<CartDrawerTemplate> {
    store_drawer(&session, DrawerState::Closed).await?;
    drawer(&session, DrawerState::Closed).await
}
