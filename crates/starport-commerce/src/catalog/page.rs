//! Listing pages and cursor pagination.

use crate::catalog::Product;
use crate::ids::Cursor;
use serde::{Deserialize, Serialize};

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ListingPage {
    /// Products in listing order.
    pub items: Vec<Product>,
    /// Cursor for the next page; `None` at the end of the listing.
    pub cursor: Option<Cursor>,
    /// Cursor for the previous page.
    pub previous: Option<Cursor>,
    /// Total number of products the service reports for this listing.
    pub total_count: u64,
}

impl ListingPage {
    /// Create a page.
    pub fn new(items: Vec<Product>, cursor: Option<Cursor>, total_count: u64) -> Self {
        Self {
            items,
            cursor,
            previous: None,
            total_count,
        }
    }

    /// Create an empty final page.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check whether another page can be requested.
    pub fn has_more(&self) -> bool {
        self.cursor.is_some()
    }

    /// Append the items of a following page.
    ///
    /// Items are kept in order and not deduplicated. The cursor moves to the
    /// one carried by `next`.
    pub fn append(&mut self, next: ListingPage) {
        self.items.extend(next.items);
        self.cursor = next.cursor;
        self.total_count = next.total_count;
    }

    /// Number of items loaded so far.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
