//! HTTP listing client.

use async_trait::async_trait;
use reqwest::Client;
use starport_commerce::{catalog::ListingPage, Cursor};
use tracing::{debug, trace};

use crate::config::ListingConfig;
use crate::error::FetchError;
use crate::service::ListingService;
use crate::wire::ListingResponse;

/// Listing service over HTTP GET.
///
/// Requests carry the configured timeouts. Failures are not retried; the
/// caller decides when to ask again.
#[derive(Debug, Clone)]
pub struct HttpListingService {
    client: Client,
    config: ListingConfig,
}

impl HttpListingService {
    /// Create a client from configuration.
    pub fn new(config: ListingConfig) -> Result<Self, FetchError> {
        let timeouts = config.timeouts();
        let client = Client::builder()
            .connect_timeout(timeouts.connect)
            .timeout(timeouts.total)
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &ListingConfig {
        &self.config
    }

    async fn get_page(&self, url: &str, search: Option<&str>) -> Result<ListingPage, FetchError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;

        let mut request = self
            .client
            .get(parsed)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(query) = search {
            request = request.query(&[("search", query)]);
        }

        debug!(url, search, "listing request");
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let bytes = response.bytes().await?;
        let body: ListingResponse = serde_json::from_slice(&bytes)?;
        trace!(count = body.count, results = body.results.len(), "listing response");
        Ok(body.into())
    }
}

#[async_trait]
impl ListingService for HttpListingService {
    async fn list(&self) -> Result<ListingPage, FetchError> {
        self.get_page(&self.config.listing_url(), None).await
    }

    async fn list_from(&self, cursor: &Cursor) -> Result<ListingPage, FetchError> {
        self.get_page(cursor.as_str(), None).await
    }

    async fn search(&self, query: &str) -> Result<ListingPage, FetchError> {
        self.get_page(&self.config.listing_url(), Some(query)).await
    }
}
