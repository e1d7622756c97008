//! Integration test harness for Fakestore.
//!
//! Tests drive the real storefront router with `tower::ServiceExt::oneshot`
//! (no listening socket for the storefront itself). The catalog is served by
//! a small axum stub bound to `127.0.0.1:0`, so the storefront's reqwest
//! client makes a genuine HTTP request.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p fakestore-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use axum::{Router, routing::get};
use serde_json::json;
use tower::ServiceExt;
use url::Url;

use fakestore_storefront::catalog::CatalogState;
use fakestore_storefront::config::StorefrontConfig;
use fakestore_storefront::routes;
use fakestore_storefront::state::AppState;

/// A local catalog endpoint with a fixed response.
pub struct StubCatalog {
    pub url: Url,
    hits: Arc<AtomicUsize>,
}

impl StubCatalog {
    /// Serve `body` with `status` at `/products`.
    pub async fn spawn(status: StatusCode, body: impl Into<String>) -> Self {
        let body: String = body.into();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        let app = Router::new().route(
            "/products",
            get(move || {
                let body = body.clone();
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    (status, [(header::CONTENT_TYPE, "application/json")], body)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: Url::parse(&format!("http://{addr}/products")).unwrap(),
            hits,
        }
    }

    /// Serve the standard three-product fixture.
    pub async fn with_products() -> Self {
        Self::spawn(StatusCode::OK, products_fixture().to_string()).await
    }

    /// Number of requests the stub has answered.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Three products shaped like the public fake store catalog.
pub fn products_fixture() -> serde_json::Value {
    json!([
        {
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack",
            "price": 109.95,
            "description": "Your perfect pack for everyday use and walks in the forest.",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        },
        {
            "id": 2,
            "title": "Mens Casual Premium Slim Fit T-Shirts",
            "price": 22.3,
            "description": "Slim-fitting style, contrast raglan long sleeve.",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/71-3HjGNDUL._AC_SY879._SX._UX._SY._UY_.jpg",
            "rating": { "rate": 4.1, "count": 259 }
        },
        {
            "id": 5,
            "title": "John Hardy Women's Legends Naga Bracelet",
            "price": 695,
            "description": "From our Legends Collection, the Naga was inspired by the mythical water dragon.",
            "category": "jewelery",
            "image": "https://fakestoreapi.com/img/71pWzhdJNwL._AC_UL640_QL65_ML3_.jpg",
            "rating": { "rate": 4.6, "count": 400 }
        }
    ])
}

/// Storefront configuration pointing at `catalog_url`.
pub fn test_config(catalog_url: Url) -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        catalog_url,
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// A response flattened for assertions.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

/// One visitor talking to the storefront.
///
/// Carries the session cookie between requests like a browser would.
#[derive(Clone)]
pub struct Visitor {
    router: Router,
    cookie: Option<String>,
}

impl Visitor {
    pub async fn get(&mut self, path: &str) -> TestResponse {
        let request = Request::builder().uri(path);
        self.send(request.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&mut self, path: &str, form: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        self.send(request.body(Body::from(form.to_string())).unwrap())
            .await
    }

    async fn send(&mut self, mut request: Request<Body>) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            request
                .headers_mut()
                .insert(header::COOKIE, cookie.parse().unwrap());
        }

        let response = self.router.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}

/// A running storefront whose catalog fetch has settled.
pub struct TestApp {
    pub state: AppState,
    router: Router,
}

impl TestApp {
    /// Build the storefront against `catalog_url` and wait for the fetch.
    pub async fn start(catalog_url: Url) -> Self {
        let state = AppState::new(test_config(catalog_url));
        state.start_catalog_fetch();
        state.catalog().settled().await;

        let router = routes::app(state.clone());
        Self { state, router }
    }

    /// The settled catalog state.
    pub fn catalog_state(&self) -> CatalogState {
        self.state.catalog().snapshot()
    }

    /// A new visitor with no session yet.
    pub fn visitor(&self) -> Visitor {
        Visitor {
            router: self.router.clone(),
            cookie: None,
        }
    }
}

/// Quantity shown in the drawer for the line with `product_id`, if any.
pub fn drawer_quantity(html: &str, product_id: i32) -> Option<u32> {
    let line = html.split(&format!("id=\"cart-line-{product_id}\"")).nth(1)?;
    let after = line.split("cart-line__quantity\">").nth(1)?;
    after.split('<').next()?.trim().parse().ok()
}

/// Badge count from a `/cart/count` fragment.
pub fn badge_count(html: &str) -> Option<u64> {
    let after = html.split("hx-swap=\"outerHTML\">").nth(1)?;
    after.split('<').next()?.trim().parse().ok()
}
