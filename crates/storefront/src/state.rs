//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::{Catalog, CatalogClient};
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the process-wide catalog.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
}

impl AppState {
    /// Create a new application state with the catalog still loading.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: Catalog::new(),
            }),
        }
    }

    /// Start the one catalog fetch in the background.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start_catalog_fetch(&self) {
        let client = CatalogClient::new(self.inner.config.catalog_url.clone());
        self.inner.catalog.start_fetch(client);
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }
}
