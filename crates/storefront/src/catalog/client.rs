//! HTTP client for the remote product catalog.

use reqwest::header::ACCEPT;
use tracing::{debug, instrument};
use url::Url;

use fakestore_core::{Product, validate_catalog};

use super::FetchFailure;

/// Longest slice of a response body copied into log lines.
const LOG_BODY_LIMIT: usize = 500;

/// Client for the catalog endpoint.
///
/// Issues a single `GET` and decodes the body as a JSON array of
/// [`Product`] records. No retries, no caching.
#[derive(Clone, Debug)]
pub struct CatalogClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl CatalogClient {
    /// Create a client for `endpoint`.
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch and decode the full product list.
    ///
    /// # Errors
    ///
    /// Returns [`FetchFailure`] on transport errors, non-2xx statuses, bodies
    /// that are not a product array, and catalogs that fail validation.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn fetch_products(&self) -> Result<Vec<Product>, FetchFailure> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();

        // Read the body as text first so failures can be logged with context
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %truncate(&body),
                "Catalog returned non-success status"
            );
            return Err(FetchFailure::Status(status));
        }

        let products: Vec<Product> = match serde_json::from_str(&body) {
            Ok(products) => products,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %truncate(&body),
                    "Failed to parse catalog response"
                );
                return Err(FetchFailure::Parse(e));
            }
        };

        validate_catalog(&products)?;

        debug!(count = products.len(), "Catalog fetched");
        Ok(products)
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(LOG_BODY_LIMIT).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_limits_chars() {
        let long = "x".repeat(LOG_BODY_LIMIT + 20);
        assert_eq!(truncate(&long).len(), LOG_BODY_LIMIT);
        assert_eq!(truncate("short"), "short");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_http_failure() {
        // Grab a free port, then release it so nothing is listening there
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = CatalogClient::new(Url::parse(&format!("http://{addr}/products")).unwrap());
        let err = client.fetch_products().await.unwrap_err();
        assert!(matches!(err, FetchFailure::Http(_)));
    }
}
