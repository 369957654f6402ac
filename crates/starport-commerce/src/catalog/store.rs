//! Catalog state store.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, trace};

use crate::catalog::{
    Applied, FetchKind, FetchStatus, FetchTicket, ListingPage, QuantityCaps,
};
use crate::ids::{Cursor, ProductId};

#[derive(Debug, Default)]
struct KindSlot {
    status: FetchStatus,
    issued: u64,
}

/// Catalog state: primary listing, search results, fetch status, caps.
///
/// All transitions are synchronous. The fetch orchestrator calls
/// [`begin`](Self::begin) before a request and one of
/// [`apply_success`](Self::apply_success) / [`apply_failure`](Self::apply_failure)
/// when it resolves. A response is only applied if its ticket is the latest one
/// issued for its kind.
#[derive(Debug)]
pub struct CatalogStore {
    primary_page: Option<ListingPage>,
    search_page: Option<ListingPage>,
    primary_error: Option<String>,
    search_error: Option<String>,
    caps: QuantityCaps,
    slots: [KindSlot; 3],
}

impl CatalogStore {
    /// Create an empty store with OS-seeded cap draws.
    pub fn new() -> Self {
        Self::with_caps(QuantityCaps::new())
    }

    /// Create an empty store with the given cap table.
    pub fn with_caps(caps: QuantityCaps) -> Self {
        Self {
            primary_page: None,
            search_page: None,
            primary_error: None,
            search_error: None,
            caps,
            slots: Default::default(),
        }
    }

    /// Mark a fetch as issued and return its ticket.
    ///
    /// Resets the error slot the kind reports into. Issuing a primary fetch
    /// also supersedes an in-flight load-more, since its cursor belongs to the
    /// listing being replaced.
    pub fn begin(&mut self, kind: FetchKind) -> FetchTicket {
        let slot = &mut self.slots[kind.slot()];
        slot.issued += 1;
        slot.status = FetchStatus::Loading;
        let seq = slot.issued;

        match kind {
            FetchKind::Primary => {
                self.primary_error = None;
                self.supersede(FetchKind::More);
            }
            FetchKind::More => self.primary_error = None,
            FetchKind::Search => self.search_error = None,
        }

        debug!(kind = %kind, seq, "fetch issued");
        FetchTicket { kind, seq }
    }

    /// Check whether a ticket is still the latest for its kind.
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.slots[ticket.kind.slot()].issued == ticket.seq
    }

    /// Apply a successful page.
    pub fn apply_success(&mut self, ticket: FetchTicket, page: ListingPage) -> Applied {
        if !self.is_current(ticket) {
            debug!(kind = %ticket.kind, seq = ticket.seq, "discarding stale response");
            return Applied::Stale;
        }

        let kind = ticket.kind;
        if kind == FetchKind::More && self.primary_page.is_none() {
            // The listing was cleared while the page was in flight.
            self.slots[kind.slot()].status = FetchStatus::Idle;
            return Applied::Ignored;
        }

        let new_caps = self.caps.assign(&page.items);
        trace!(kind = %kind, new_caps, "assigned quantity caps");

        match kind {
            FetchKind::Primary => {
                self.primary_page = Some(page);
                self.primary_error = None;
            }
            FetchKind::More => {
                if let Some(primary) = self.primary_page.as_mut() {
                    primary.append(page);
                }
                self.primary_error = None;
            }
            FetchKind::Search => {
                self.search_page = Some(page);
                self.search_error = None;
            }
        }

        self.slots[kind.slot()].status = FetchStatus::Success;
        Applied::Applied
    }

    /// Record a failed fetch. Previously loaded data is kept.
    pub fn apply_failure(&mut self, ticket: FetchTicket, message: impl Into<String>) -> Applied {
        if !self.is_current(ticket) {
            debug!(kind = %ticket.kind, seq = ticket.seq, "discarding stale failure");
            return Applied::Stale;
        }

        let message = message.into();
        match ticket.kind {
            FetchKind::Primary | FetchKind::More => self.primary_error = Some(message.clone()),
            FetchKind::Search => self.search_error = Some(message.clone()),
        }
        self.slots[ticket.kind.slot()].status = FetchStatus::Failure(message);
        Applied::Applied
    }

    /// Drop the primary listing and its error.
    ///
    /// In-flight primary and load-more responses are discarded when they arrive.
    pub fn clear_products(&mut self) {
        self.primary_page = None;
        self.primary_error = None;
        self.supersede(FetchKind::Primary);
        self.supersede(FetchKind::More);
        self.slots[FetchKind::Primary.slot()].status = FetchStatus::Idle;
        self.slots[FetchKind::More.slot()].status = FetchStatus::Idle;
    }

    /// Drop the search results and search error.
    ///
    /// An in-flight search response is discarded when it arrives.
    pub fn clear_search(&mut self) {
        self.search_page = None;
        self.search_error = None;
        self.supersede(FetchKind::Search);
        self.slots[FetchKind::Search.slot()].status = FetchStatus::Idle;
    }

    fn supersede(&mut self, kind: FetchKind) {
        let slot = &mut self.slots[kind.slot()];
        if slot.status.is_loading() {
            slot.issued += 1;
            slot.status = FetchStatus::Idle;
        }
    }

    /// Status of a fetch kind.
    pub fn status(&self, kind: FetchKind) -> &FetchStatus {
        &self.slots[kind.slot()].status
    }

    /// Primary listing, if loaded.
    pub fn primary_page(&self) -> Option<&ListingPage> {
        self.primary_page.as_ref()
    }

    /// Search results, if any.
    pub fn search_page(&self) -> Option<&ListingPage> {
        self.search_page.as_ref()
    }

    /// Cursor for the next primary page.
    pub fn next_cursor(&self) -> Option<&Cursor> {
        self.primary_page.as_ref().and_then(|p| p.cursor.as_ref())
    }

    /// Check whether a load-more may be issued now.
    pub fn can_load_more(&self) -> bool {
        self.next_cursor().is_some() && !self.more_loading()
    }

    pub fn primary_loading(&self) -> bool {
        self.status(FetchKind::Primary).is_loading()
    }

    pub fn more_loading(&self) -> bool {
        self.status(FetchKind::More).is_loading()
    }

    pub fn search_loading(&self) -> bool {
        self.status(FetchKind::Search).is_loading()
    }

    pub fn primary_error(&self) -> Option<&str> {
        self.primary_error.as_deref()
    }

    pub fn search_error(&self) -> Option<&str> {
        self.search_error.as_deref()
    }

    /// Assigned cap for a product.
    pub fn quantity_cap(&self, id: &ProductId) -> Option<u32> {
        self.caps.get(id)
    }

    /// Cap for a product, with the default for unseen products.
    pub fn cap_for(&self, id: &ProductId) -> u32 {
        self.caps.cap_for(id)
    }

    /// Find a loaded product by id, in the primary listing or search results.
    pub fn find_product(&self, id: &ProductId) -> Option<&crate::catalog::Product> {
        self.primary_page
            .iter()
            .chain(self.search_page.iter())
            .flat_map(|page| page.items.iter())
            .find(|p| &p.id == id)
    }

    /// Copy of the current state for rendering.
    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            primary_page: self.primary_page.clone(),
            search_page: self.search_page.clone(),
            primary_loading: self.primary_loading(),
            more_loading: self.more_loading(),
            search_loading: self.search_loading(),
            primary_error: self.primary_error.clone(),
            search_error: self.search_error.clone(),
            quantity_caps: self.caps.to_map(),
        }
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of the catalog state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogSnapshot {
    pub primary_page: Option<ListingPage>,
    pub search_page: Option<ListingPage>,
    pub primary_loading: bool,
    pub more_loading: bool,
    pub search_loading: bool,
    pub primary_error: Option<String>,
    pub search_error: Option<String>,
    pub quantity_caps: BTreeMap<ProductId, u32>,
}
