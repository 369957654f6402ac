//! Cart and catalog state for the Starport commerce engine.
//!
//! This crate holds the synchronous half of the engine:
//!
//! - **Cart**: `CartStore` with line items, derived totals and payment method
//! - **Catalog**: `CatalogStore` with the primary listing, search results,
//!   per-kind fetch status and sticky inventory caps
//!
//! Network fetching lives in `starport-data` and `starport-executor`; they drive
//! the catalog through the transition methods exposed here.
//!
//! # Example
//!
//! ```rust
//! use starport_commerce::prelude::*;
//!
//! let xwing = Product::new("X-wing", Price::Credits(149_999.0));
//!
//! let mut cart = CartStore::new();
//! cart.add_item(&xwing, 3, "https://picsum.photos/300/200");
//! cart.add_item(&xwing, 3, "https://picsum.photos/300/200");
//!
//! assert_eq!(cart.item_count(), 2);
//! assert_eq!(cart.total(), 299_998.0);
//! ```

pub mod error;
pub mod ids;

pub mod cart;
pub mod catalog;

pub use error::CommerceError;
pub use ids::{Cursor, ProductId};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::{Cursor, ProductId};

    // Cart
    pub use crate::cart::{
        AddOutcome, CartLine, CartSnapshot, CartStore, LineSummary, OrderReceipt, OrderSummary,
        PaymentMethod, DEFAULT_TAX_RATE,
    };

    // Catalog
    pub use crate::catalog::{
        Applied, CatalogSnapshot, CatalogStore, FetchKind, FetchStatus, FetchTicket, ListingPage,
        Price, Product, QuantityCaps, DEFAULT_QUANTITY_CAP, MAX_QUANTITY_CAP,
    };
}
