//! The listing service seam.

use async_trait::async_trait;
use starport_commerce::{catalog::ListingPage, Cursor};

use crate::error::FetchError;

/// Read-only product listing.
///
/// Implementations must turn transport errors, non-2xx statuses and
/// malformed bodies into `FetchError`.
#[async_trait]
pub trait ListingService: Send + Sync {
    /// First page of the full listing.
    async fn list(&self) -> Result<ListingPage, FetchError>;

    /// Page identified by a cursor from a previous page.
    async fn list_from(&self, cursor: &Cursor) -> Result<ListingPage, FetchError>;

    /// First page of products whose name contains `query`.
    async fn search(&self, query: &str) -> Result<ListingPage, FetchError>;
}
