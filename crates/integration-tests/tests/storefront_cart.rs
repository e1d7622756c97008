//! Integration tests for the session cart and drawer.
//!
//! These walk through the same clicks a visitor makes: add from the grid,
//! "+" and "-" in the drawer, opening and closing the drawer.

use axum::http::StatusCode;

use fakestore_integration_tests::{StubCatalog, TestApp, Visitor, badge_count, drawer_quantity};

async fn ready_app() -> (StubCatalog, TestApp) {
    let stub = StubCatalog::with_products().await;
    let app = TestApp::start(stub.url.clone()).await;
    (stub, app)
}

async fn count(visitor: &mut Visitor) -> u64 {
    let response = visitor.get("/cart/count").await;
    assert_eq!(response.status, StatusCode::OK);
    badge_count(&response.body).expect("badge renders a number")
}

// =============================================================================
// Add / Remove
// =============================================================================

#[tokio::test]
async fn test_add_same_product_twice_then_another() {
    let (_stub, app) = ready_app().await;
    let mut visitor = app.visitor();

    visitor.post_form("/cart/add", "product_id=1").await;
    visitor.post_form("/cart/add", "product_id=1").await;
    let last = visitor.post_form("/cart/add", "product_id=2").await;

    assert_eq!(last.status, StatusCode::OK);
    assert_eq!(drawer_quantity(&last.body, 1), Some(2));
    assert_eq!(drawer_quantity(&last.body, 2), Some(1));

    // Insertion order: product 1 first
    let first_pos = last.body.find("cart-line-1\"").expect("line 1");
    let second_pos = last.body.find("cart-line-2\"").expect("line 2");
    assert!(first_pos < second_pos);

    assert_eq!(count(&mut visitor).await, 3);
}

#[tokio::test]
async fn test_remove_last_unit_empties_cart() {
    let (_stub, app) = ready_app().await;
    let mut visitor = app.visitor();

    visitor.post_form("/cart/add", "product_id=5").await;
    let removed = visitor.post_form("/cart/remove", "product_id=5").await;

    assert_eq!(removed.status, StatusCode::OK);
    assert!(removed.body.contains("No items in cart."));
    assert_eq!(drawer_quantity(&removed.body, 5), None);
    assert_eq!(count(&mut visitor).await, 0);
}

#[tokio::test]
async fn test_remove_decrements_quantity() {
    let (_stub, app) = ready_app().await;
    let mut visitor = app.visitor();

    for _ in 0..3 {
        visitor.post_form("/cart/add", "product_id=2").await;
    }
    let removed = visitor.post_form("/cart/remove", "product_id=2").await;

    assert_eq!(drawer_quantity(&removed.body, 2), Some(2));
    assert_eq!(count(&mut visitor).await, 2);
}

#[tokio::test]
async fn test_remove_absent_product_is_noop() {
    let (_stub, app) = ready_app().await;
    let mut visitor = app.visitor();

    visitor.post_form("/cart/add", "product_id=1").await;
    let response = visitor.post_form("/cart/remove", "product_id=5").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(drawer_quantity(&response.body, 1), Some(1));
    assert_eq!(count(&mut visitor).await, 1);
}

#[tokio::test]
async fn test_add_unknown_product_is_not_found() {
    let (_stub, app) = ready_app().await;
    let mut visitor = app.visitor();

    let response = visitor.post_form("/cart/add", "product_id=404").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(count(&mut visitor).await, 0);
}

#[tokio::test]
async fn test_malformed_form_is_rejected() {
    let (_stub, app) = ready_app().await;
    let mut visitor = app.visitor();

    let response = visitor.post_form("/cart/add", "product_id=backpack").await;
    assert!(response.status.is_client_error());

    let response = visitor.post_form("/cart/remove", "").await;
    assert!(response.status.is_client_error());
}

#[tokio::test]
async fn test_mutations_trigger_badge_refresh() {
    let (_stub, app) = ready_app().await;
    let mut visitor = app.visitor();

    let added = visitor.post_form("/cart/add", "product_id=1").await;
    assert_eq!(
        added.headers.get("HX-Trigger").map(|v| v.to_str().ok()),
        Some(Some("cart-updated"))
    );

    let removed = visitor.post_form("/cart/remove", "product_id=1").await;
    assert!(removed.headers.contains_key("HX-Trigger"));
}

// =============================================================================
// Sessions
// =============================================================================

#[tokio::test]
async fn test_visitors_have_separate_carts() {
    let (_stub, app) = ready_app().await;
    let mut alice = app.visitor();
    let mut bob = app.visitor();

    alice.post_form("/cart/add", "product_id=1").await;
    alice.post_form("/cart/add", "product_id=1").await;
    bob.post_form("/cart/add", "product_id=2").await;

    assert_eq!(count(&mut alice).await, 2);
    assert_eq!(count(&mut bob).await, 1);

    let drawer = bob.get("/cart").await;
    assert_eq!(drawer_quantity(&drawer.body, 1), None);
    assert_eq!(drawer_quantity(&drawer.body, 2), Some(1));
}

#[tokio::test]
async fn test_page_reflects_session_cart() {
    let (_stub, app) = ready_app().await;
    let mut visitor = app.visitor();

    visitor.post_form("/cart/add", "product_id=5").await;
    visitor.post_form("/cart/add", "product_id=5").await;

    let page = visitor.get("/").await;
    assert_eq!(drawer_quantity(&page.body, 5), Some(2));
    assert!(page.body.contains("2 items"));
}

#[tokio::test]
async fn test_drawer_plus_works_for_cart_line() {
    let (_stub, app) = ready_app().await;
    let mut visitor = app.visitor();

    let added = visitor.post_form("/cart/add", "product_id=1").await;
    assert!(added.body.contains("hx-post=\"/cart/add\""));

    let again = visitor.post_form("/cart/add", "product_id=1").await;
    assert_eq!(drawer_quantity(&again.body, 1), Some(2));
}

// =============================================================================
// Drawer
// =============================================================================

#[tokio::test]
async fn test_drawer_open_and_close() {
    let (_stub, app) = ready_app().await;
    let mut visitor = app.visitor();

    let page = visitor.get("/").await;
    assert!(!page.body.contains("drawer--open"));

    let opened = visitor.post_form("/cart/open", "").await;
    assert_eq!(opened.status, StatusCode::OK);
    assert!(opened.body.contains("drawer--open"));
    assert!(opened.body.contains("Your Shopping Cart"));

    // Visibility survives a page load
    let page = visitor.get("/").await;
    assert!(page.body.contains("drawer--open"));

    let closed = visitor.post_form("/cart/close", "").await;
    assert!(!closed.body.contains("drawer--open"));

    let drawer = visitor.get("/cart").await;
    assert!(!drawer.body.contains("drawer--open"));
}

#[tokio::test]
async fn test_drawer_toggle_leaves_cart_untouched() {
    let (_stub, app) = ready_app().await;
    let mut visitor = app.visitor();

    visitor.post_form("/cart/add", "product_id=2").await;
    visitor.post_form("/cart/open", "").await;
    visitor.post_form("/cart/close", "").await;

    assert_eq!(count(&mut visitor).await, 1);
}

// =============================================================================
// Middleware
// =============================================================================

#[tokio::test]
async fn test_responses_carry_security_headers_and_request_id() {
    let (_stub, app) = ready_app().await;
    let mut visitor = app.visitor();

    let page = visitor.get("/").await;
    assert_eq!(page.headers.get("x-frame-options").unwrap(), "DENY");
    assert!(page.headers.contains_key("content-security-policy"));
    assert!(page.headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_session_cookie_is_http_only() {
    let (_stub, app) = ready_app().await;
    let mut visitor = app.visitor();

    let added = visitor.post_form("/cart/add", "product_id=1").await;
    let cookie = added
        .headers
        .get("set-cookie")
        .expect("session cookie set")
        .to_str()
        .unwrap();

    assert!(cookie.starts_with("fs_session="));
    assert!(cookie.contains("HttpOnly"));
}
