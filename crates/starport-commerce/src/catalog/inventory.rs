//! Per-product inventory caps.

use std::collections::{BTreeMap, HashMap};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;

/// Upper bound for a drawn quantity cap.
pub const MAX_QUANTITY_CAP: u32 = 10;

/// Cap used for products that have not appeared in any listing yet.
pub const DEFAULT_QUANTITY_CAP: u32 = 10;

/// Sticky map of product id to maximum purchasable quantity.
///
/// A cap is drawn uniformly from `1..=max_cap` the first time a product is
/// seen and never changes afterwards.
#[derive(Debug)]
pub struct QuantityCaps {
    caps: HashMap<ProductId, u32>,
    rng: StdRng,
    max_cap: u32,
    default_cap: u32,
}

impl QuantityCaps {
    /// Create with OS-seeded randomness and the default bounds.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Create with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            caps: HashMap::new(),
            rng,
            max_cap: MAX_QUANTITY_CAP,
            default_cap: DEFAULT_QUANTITY_CAP,
        }
    }

    /// Set the bounds used for draws and for unseen products.
    pub fn with_bounds(mut self, max_cap: u32, default_cap: u32) -> Result<Self, CommerceError> {
        if max_cap == 0 {
            return Err(CommerceError::InvalidQuantityCap {
                cap: max_cap,
                max: u32::MAX,
            });
        }
        if default_cap == 0 || default_cap > max_cap {
            return Err(CommerceError::InvalidQuantityCap {
                cap: default_cap,
                max: max_cap,
            });
        }
        self.max_cap = max_cap;
        self.default_cap = default_cap;
        Ok(self)
    }

    /// Assign caps to every product not seen before.
    ///
    /// Returns the number of newly assigned caps.
    pub fn assign(&mut self, products: &[Product]) -> usize {
        let mut assigned = 0;
        for product in products {
            if self.caps.contains_key(&product.id) {
                continue;
            }
            let cap = self.rng.random_range(1..=self.max_cap);
            self.caps.insert(product.id.clone(), cap);
            assigned += 1;
        }
        assigned
    }

    /// Get the assigned cap for a product.
    pub fn get(&self, id: &ProductId) -> Option<u32> {
        self.caps.get(id).copied()
    }

    /// Get the cap for a product, falling back to the default for unseen ids.
    pub fn cap_for(&self, id: &ProductId) -> u32 {
        self.get(id).unwrap_or(self.default_cap)
    }

    /// Number of products with an assigned cap.
    pub fn len(&self) -> usize {
        self.caps.len()
    }

    /// Check if no caps are assigned.
    pub fn is_empty(&self) -> bool {
        self.caps.is_empty()
    }

    /// Ordered copy of the assignments.
    pub fn to_map(&self) -> BTreeMap<ProductId, u32> {
        self.caps.iter().map(|(k, v)| (k.clone(), *v)).collect()
    }
}

impl Default for QuantityCaps {
    fn default() -> Self {
        Self::new()
    }
}
