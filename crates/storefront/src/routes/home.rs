//! Storefront page and catalog fragment.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;
use tracing::instrument;

use fakestore_core::{Product, ProductId};

use crate::catalog::CatalogState;
use crate::error::Result;
use crate::filters;
use crate::models::session::{load_cart, load_drawer};
use crate::routes::cart::CartView;
use crate::state::AppState;

/// Message shown for any catalog failure. Deliberately says nothing more.
pub const CATALOG_FAILURE_MESSAGE: &str = "Something went wrong...";

/// Product tile display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub price: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
            price: product.price.to_string(),
        }
    }
}

/// Catalog region display data for templates.
#[derive(Clone)]
pub struct CatalogView {
    pub loading: bool,
    pub failed: bool,
    pub failure_message: &'static str,
    pub products: Vec<ProductView>,
}

impl From<&CatalogState> for CatalogView {
    fn from(state: &CatalogState) -> Self {
        let products = match state {
            CatalogState::Ready(products) => products.iter().map(ProductView::from).collect(),
            CatalogState::Loading | CatalogState::Failed => Vec::new(),
        };
        Self {
            loading: state.is_loading(),
            failed: matches!(state, CatalogState::Failed),
            failure_message: CATALOG_FAILURE_MESSAGE,
            products,
        }
    }
}

/// Storefront page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub catalog: CatalogView,
    pub cart: CartView,
    pub drawer_open: bool,
}

/// Catalog region fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/catalog.html")]
pub struct CatalogTemplate {
    pub catalog: CatalogView,
}

/// Display the storefront.
///
/// Renders whatever the catalog holds right now. While it is still loading
/// the page shows a progress bar that asks `/catalog` for the settled grid.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> Result<HomeTemplate> {
    let catalog = CatalogView::from(&state.catalog().snapshot());
    let cart = load_cart(&session).await?;
    let drawer = load_drawer(&session).await?;

    Ok(HomeTemplate {
        catalog,
        cart: CartView::from(&cart),
        drawer_open: drawer.is_open(),
    })
}

/// Catalog region fragment (HTMX).
///
/// Waits for the catalog fetch to settle, then renders the grid or the
/// failure message.
#[instrument(skip(state))]
pub async fn catalog(State(state): State<AppState>) -> CatalogTemplate {
    let settled = state.catalog().settled().await;
    CatalogTemplate {
        catalog: CatalogView::from(&settled),
    }
}
