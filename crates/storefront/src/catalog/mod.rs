//! Product catalog loading.
//!
//! # Architecture
//!
//! - One `GET` to the configured catalog endpoint per process run
//! - The result is published through a `tokio::sync::watch` channel
//! - No retry and no refresh: a failed fetch stays failed until restart
//!
//! Handlers read a [`CatalogState`] snapshot. The page shows a loading bar
//! while the state is [`CatalogState::Loading`], a generic failure message
//! for [`CatalogState::Failed`], and the product grid for
//! [`CatalogState::Ready`].
//!
//! # Example
//!
//! ```rust,ignore
//! let catalog = Catalog::new();
//! catalog.start_fetch(CatalogClient::new(config.catalog_url.clone()));
//!
//! match catalog.settled().await {
//!     CatalogState::Ready(products) => render_grid(&products),
//!     CatalogState::Failed => render_failure(),
//!     CatalogState::Loading => unreachable!(),
//! }
//! ```

mod client;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tokio::sync::watch;
use tracing::{error, info, warn};

use fakestore_core::{CatalogError, Product, ProductId};

pub use client::CatalogClient;

/// Everything that can go wrong while fetching the catalog.
///
/// Visitors never see these details; every variant renders as the same
/// generic failure message.
#[derive(Debug, Error)]
pub enum FetchFailure {
    /// Transport-level failure (DNS, connect, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    /// The body was not a JSON array of products.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The products decoded but broke a catalog invariant.
    #[error("invalid catalog: {0}")]
    Invalid(#[from] CatalogError),
}

/// Where the one catalog fetch currently stands.
#[derive(Debug, Clone, Default)]
pub enum CatalogState {
    /// Request in flight.
    #[default]
    Loading,
    /// Request or decoding failed.
    Failed,
    /// Products available, in catalog order.
    Ready(Arc<[Product]>),
}

impl CatalogState {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Look up a product by id. Only a ready catalog has products.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        match self {
            Self::Ready(products) => products.iter().find(|p| p.id == id),
            Self::Loading | Self::Failed => None,
        }
    }
}

impl From<Result<Vec<Product>, FetchFailure>> for CatalogState {
    fn from(result: Result<Vec<Product>, FetchFailure>) -> Self {
        match result {
            Ok(products) => Self::Ready(products.into()),
            Err(_) => Self::Failed,
        }
    }
}

/// Shared handle to the catalog state.
///
/// Cheaply cloneable; every clone observes the same fetch.
#[derive(Clone)]
pub struct Catalog {
    inner: Arc<CatalogInner>,
}

struct CatalogInner {
    state: watch::Sender<CatalogState>,
    started: AtomicBool,
}

impl Catalog {
    /// A catalog in the [`CatalogState::Loading`] state with no fetch running.
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(CatalogState::Loading);
        Self {
            inner: Arc::new(CatalogInner {
                state,
                started: AtomicBool::new(false),
            }),
        }
    }

    /// Spawn the catalog fetch on the current Tokio runtime.
    ///
    /// Only the first call starts a request; later calls are ignored so the
    /// process never issues more than one catalog request.
    pub fn start_fetch(&self, client: CatalogClient) {
        if self.inner.started.swap(true, Ordering::SeqCst) {
            warn!("Catalog fetch already started, ignoring");
            return;
        }

        info!(endpoint = %client.endpoint(), "Spawning catalog fetch task");
        let catalog = self.clone();
        tokio::spawn(async move {
            let result = client.fetch_products().await;
            match &result {
                Ok(products) => info!(count = products.len(), "Catalog is ready"),
                Err(e) => {
                    let event_id = sentry::capture_error(e);
                    error!(error = %e, sentry_event_id = %event_id, "Catalog fetch failed");
                }
            }
            catalog.publish(CatalogState::from(result));
        });
    }

    /// Replace the current state and wake anyone waiting in [`Self::settled`].
    pub fn publish(&self, state: CatalogState) {
        self.inner.state.send_replace(state);
    }

    /// The state right now.
    #[must_use]
    pub fn snapshot(&self) -> CatalogState {
        self.inner.state.borrow().clone()
    }

    /// Wait until the fetch has either succeeded or failed.
    ///
    /// There is no timeout; a hanging request keeps the caller waiting.
    pub async fn settled(&self) -> CatalogState {
        let mut rx = self.inner.state.subscribe();
        match rx.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            // The sender lives in `self`, so the channel can't close under us
            Err(_) => self.snapshot(),
        }
    }

    /// Look up a product in the current snapshot.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<Product> {
        self.inner.state.borrow().find(id).cloned()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
