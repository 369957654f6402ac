//! Fetch orchestration against the listing service.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use starport_commerce::catalog::{Applied, CatalogStore, FetchKind, FetchTicket, ListingPage};
use starport_commerce::Cursor;
use starport_data::{FetchError, ListingService};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::debounce::Debouncer;

/// Issues listing requests and applies their results to the catalog.
///
/// Every request takes a ticket from the catalog before it is sent and offers
/// its outcome back with that ticket, so only the latest request of each kind
/// changes state. Transport errors are logged and recorded as the fixed
/// failure message of the kind; they never reach the caller.
///
/// Cloning is cheap and clones share the catalog, service and search debouncer.
#[derive(Clone)]
pub struct FetchOrchestrator {
    catalog: Arc<Mutex<CatalogStore>>,
    service: Arc<dyn ListingService>,
    debouncer: Arc<Debouncer>,
}

impl FetchOrchestrator {
    /// Create an orchestrator over a shared catalog.
    pub fn new(
        catalog: Arc<Mutex<CatalogStore>>,
        service: Arc<dyn ListingService>,
        search_debounce: Duration,
    ) -> Self {
        Self {
            catalog,
            service,
            debouncer: Arc::new(Debouncer::new(search_debounce)),
        }
    }

    /// Shared catalog handle.
    pub fn catalog(&self) -> &Arc<Mutex<CatalogStore>> {
        &self.catalog
    }

    /// Load the first page of the full listing, replacing the primary page.
    pub async fn fetch_initial(&self) -> Applied {
        let ticket = self.lock_catalog().begin(FetchKind::Primary);
        let result = self.service.list().await;
        self.apply(ticket, result)
    }

    /// Load the page at `cursor` and append it to the primary page.
    ///
    /// Callers should check [`CatalogStore::can_load_more`] first, or use
    /// [`load_more_if_available`](Self::load_more_if_available).
    pub async fn load_more(&self, cursor: Cursor) -> Applied {
        let ticket = self.lock_catalog().begin(FetchKind::More);
        self.run_more(ticket, cursor).await
    }

    /// Load the next page if there is one and no load-more is in flight.
    ///
    /// Returns `None` without a request otherwise.
    pub async fn load_more_if_available(&self) -> Option<Applied> {
        let (ticket, cursor) = {
            let mut catalog = self.lock_catalog();
            if !catalog.can_load_more() {
                debug!("load-more skipped");
                return None;
            }
            let cursor = catalog.next_cursor()?.clone();
            (catalog.begin(FetchKind::More), cursor)
        };
        Some(self.run_more(ticket, cursor).await)
    }

    async fn run_more(&self, ticket: FetchTicket, cursor: Cursor) -> Applied {
        let result = self.service.list_from(&cursor).await;
        self.apply(ticket, result)
    }

    /// Debounced search.
    ///
    /// The trimmed query is sent once no other query arrived for the debounce
    /// delay. A blank query cancels the pending one and clears the search
    /// results at once, without a request. Must be called from within a tokio
    /// runtime.
    pub fn search(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            self.debouncer.cancel();
            self.lock_catalog().clear_search();
            return;
        }

        let this = self.clone();
        let query = query.to_string();
        self.debouncer.schedule(async move {
            this.search_now(&query).await;
        });
    }

    /// Search immediately, bypassing the debounce.
    pub async fn search_now(&self, query: &str) -> Applied {
        let query = query.trim();
        let ticket = self.lock_catalog().begin(FetchKind::Search);
        let result = self.service.search(query).await;
        self.apply(ticket, result)
    }

    /// Wait until the pending debounced search, if any, has completed.
    pub async fn settle_search(&self) {
        self.debouncer.flush().await;
    }

    /// Check whether a debounced search is waiting or running.
    pub fn search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Run [`fetch_initial`](Self::fetch_initial) in the background.
    pub fn spawn_fetch_initial(&self) -> JoinHandle<Applied> {
        let this = self.clone();
        tokio::spawn(async move { this.fetch_initial().await })
    }

    /// Run [`load_more`](Self::load_more) in the background.
    pub fn spawn_load_more(&self, cursor: Cursor) -> JoinHandle<Applied> {
        let this = self.clone();
        tokio::spawn(async move { this.load_more(cursor).await })
    }

    fn apply(&self, ticket: FetchTicket, result: Result<ListingPage, FetchError>) -> Applied {
        let mut catalog = self.lock_catalog();
        match result {
            Ok(page) => {
                let items = page.len();
                let applied = catalog.apply_success(ticket, page);
                if applied == Applied::Applied {
                    info!(kind = %ticket.kind, seq = ticket.seq, items, "fetch succeeded");
                }
                applied
            }
            Err(error) => {
                warn!(kind = %ticket.kind, seq = ticket.seq, error = %error, "fetch failed");
                catalog.apply_failure(ticket, ticket.kind.failure_message())
            }
        }
    }

    fn lock_catalog(&self) -> MutexGuard<'_, CatalogStore> {
        self.catalog.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for FetchOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchOrchestrator")
            .field("debouncer", &self.debouncer)
            .finish_non_exhaustive()
    }
}
