//! Catalog module.
//!
//! Contains products, listing pages, inventory caps and the catalog store.

mod inventory;
mod page;
mod product;
mod status;
mod store;

pub use inventory::{QuantityCaps, DEFAULT_QUANTITY_CAP, MAX_QUANTITY_CAP};
pub use page::ListingPage;
pub use product::{Price, Product};
pub use status::{Applied, FetchKind, FetchStatus, FetchTicket};
pub use store::{CatalogSnapshot, CatalogStore};
