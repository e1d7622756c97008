//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Storefront page (badge, drawer, catalog)
//! GET  /catalog                - Catalog region fragment (HTMX)
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (catalog loaded)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart drawer fragment
//! POST /cart/add               - Add one unit (returns cart_items fragment)
//! POST /cart/remove            - Remove one unit (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//! POST /cart/open              - Open the drawer (returns drawer fragment)
//! POST /cart/close             - Close the drawer (returns drawer fragment)
//! ```

pub mod cart;
pub mod health;
pub mod home;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::middleware::{
    create_session_layer, request_id_middleware, security_headers_middleware,
};
use crate::state::AppState;

/// Directory served under `/static`, relative to the workspace root.
const STATIC_DIR: &str = "crates/storefront/static";

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
        .route("/open", post(cart::open))
        .route("/close", post(cart::close))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/catalog", get(home::catalog))
        .nest("/cart", cart_routes())
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
}

/// Build the complete application with middleware and state.
///
/// Sentry layers are added by the binary, outside this router.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .merge(routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(session_layer)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
