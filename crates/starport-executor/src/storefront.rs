//! Shared handle over the cart, the catalog and the fetcher.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use starport_commerce::cart::{AddOutcome, CartSnapshot, CartStore};
use starport_commerce::catalog::{CatalogSnapshot, CatalogStore};
use starport_commerce::ProductId;
use starport_data::{HttpListingService, ListingConfig, ListingService};
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::orchestrator::FetchOrchestrator;

/// The presentation boundary.
///
/// Owns one cart and one catalog, constructed once and shared with the fetch
/// orchestrator. Readers take snapshots; writers go through the methods here
/// or through [`with_cart`](Self::with_cart). The two stores are never locked
/// at the same time.
#[derive(Debug, Clone)]
pub struct Storefront {
    cart: Arc<Mutex<CartStore>>,
    catalog: Arc<Mutex<CatalogStore>>,
    fetcher: FetchOrchestrator,
}

impl Storefront {
    /// Assemble a storefront over any listing service.
    pub fn new(service: Arc<dyn ListingService>, config: &EngineConfig) -> Result<Self, EngineError> {
        let catalog = Arc::new(Mutex::new(CatalogStore::with_caps(config.build_caps()?)));
        let fetcher = FetchOrchestrator::new(catalog.clone(), service, config.search_debounce());

        Ok(Self {
            cart: Arc::new(Mutex::new(CartStore::new())),
            catalog,
            fetcher,
        })
    }

    /// Assemble a storefront over the HTTP listing service.
    pub fn connect(listing: ListingConfig, config: &EngineConfig) -> Result<Self, EngineError> {
        let service = HttpListingService::new(listing)?;
        Self::new(Arc::new(service), config)
    }

    pub fn fetcher(&self) -> &FetchOrchestrator {
        &self.fetcher
    }

    /// Add one unit of a loaded product, with the catalog's cap for it.
    ///
    /// Returns `None` if the product is not in the primary listing or the
    /// search results.
    pub fn add_product(&self, id: &ProductId, image_ref: &str) -> Option<AddOutcome> {
        let (product, cap) = {
            let catalog = self.lock_catalog();
            let product = catalog.find_product(id)?.clone();
            (product, catalog.cap_for(id))
        };

        let outcome = self.with_cart(|cart| cart.add_item(&product, cap, image_ref));
        debug!(product = %id, cap, ?outcome, "add to cart");
        Some(outcome)
    }

    /// Run `f` with exclusive access to the cart.
    pub fn with_cart<R>(&self, f: impl FnOnce(&mut CartStore) -> R) -> R {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *cart)
    }

    /// Run `f` with shared access to the catalog.
    pub fn with_catalog<R>(&self, f: impl FnOnce(&CatalogStore) -> R) -> R {
        f(&*self.lock_catalog())
    }

    pub fn cart_snapshot(&self) -> CartSnapshot {
        self.with_cart(|cart| cart.snapshot())
    }

    pub fn catalog_snapshot(&self) -> CatalogSnapshot {
        self.with_catalog(CatalogStore::snapshot)
    }

    fn lock_catalog(&self) -> MutexGuard<'_, CatalogStore> {
        self.catalog.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
