//! Cart store and line types.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cart::PaymentMethod;
use crate::catalog::Product;
use crate::ids::ProductId;

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Price per unit in credits.
    pub unit_price: f64,
    /// Quantity, always in `1..=quantity_cap`.
    pub quantity: u32,
    /// Image reference supplied by the presentation layer.
    pub image_ref: String,
    /// Maximum purchasable quantity.
    pub quantity_cap: u32,
}

impl CartLine {
    /// Price of the line (unit price times quantity).
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }

    /// Check if the quantity can go up by one.
    pub fn can_increment(&self) -> bool {
        self.quantity < self.quantity_cap
    }
}

/// What `add_item` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// New line appended with quantity 1.
    Inserted,
    /// Existing line incremented.
    Incremented,
    /// Existing line already at its cap; nothing changed.
    AtCap,
    /// Product has no price and cannot be bought; nothing changed.
    Unavailable,
}

/// Shopping cart state.
///
/// `total` and `item_count` are derived from the lines and recomputed after
/// every mutation, folding the lines in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartStore {
    lines: Vec<CartLine>,
    total: f64,
    item_count: u64,
    payment_method: PaymentMethod,
}

impl CartStore {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product.
    ///
    /// An existing line is incremented up to its cap. A new line starts at
    /// quantity 1 with `quantity_cap` (raised to at least 1).
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity_cap: u32,
        image_ref: impl Into<String>,
    ) -> AddOutcome {
        let Some(unit_price) = product.price.credits() else {
            debug!(product = %product.id, "ignoring add of unavailable product");
            return AddOutcome::Unavailable;
        };

        let outcome = match self.lines.iter_mut().find(|l| l.product_id == product.id) {
            Some(line) if !line.can_increment() => return AddOutcome::AtCap,
            Some(line) => {
                line.quantity += 1;
                AddOutcome::Incremented
            }
            None => {
                self.lines.push(CartLine {
                    product_id: product.id.clone(),
                    unit_price,
                    quantity: 1,
                    image_ref: image_ref.into(),
                    quantity_cap: quantity_cap.max(1),
                });
                AddOutcome::Inserted
            }
        };

        self.recompute();
        outcome
    }

    /// Remove a line. Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.product_id != product_id);
        self.recompute();
        self.lines.len() < len_before
    }

    /// Set a line's quantity.
    ///
    /// Negative values count as 0, and 0 removes the line. Values above the
    /// line's cap are clamped to it. Unknown products are ignored.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        let Some(index) = self.lines.iter().position(|l| &l.product_id == product_id) else {
            return;
        };

        let quantity = quantity.max(0);
        if quantity == 0 {
            self.lines.remove(index);
        } else {
            let line = &mut self.lines[index];
            let cap = i64::from(line.quantity_cap);
            // Clamped into 1..=cap, so the narrowing cannot truncate.
            line.quantity = quantity.min(cap) as u32;
        }
        self.recompute();
    }

    /// Select the payment method.
    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    /// Remove all lines. The payment method is kept.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.item_count = self.lines.iter().map(|l| u64::from(l.quantity)).sum();
        self.total = self
            .lines
            .iter()
            .fold(0.0, |total, line| total + line.line_total());
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Total price of all lines.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Sum of all quantities.
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Get a line by product.
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product_id == product_id)
    }

    /// Quantity of a product in the cart, 0 if absent.
    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.line(product_id).map_or(0, |l| l.quantity)
    }

    /// Check if the product's quantity can be raised by one.
    pub fn can_increment(&self, product_id: &ProductId) -> bool {
        self.line(product_id).is_some_and(CartLine::can_increment)
    }

    /// Check if the product's quantity can be lowered without removing it.
    pub fn can_decrement(&self, product_id: &ProductId) -> bool {
        self.line(product_id).is_some_and(|l| l.quantity > 1)
    }

    /// Number of distinct products.
    pub fn unique_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Copy of the current state for rendering.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            lines: self.lines.clone(),
            total: self.total,
            item_count: self.item_count,
            payment_method: self.payment_method,
        }
    }
}

/// Point-in-time copy of the cart state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub total: f64,
    pub item_count: u64,
    pub payment_method: PaymentMethod,
}
