//! Order summary and checkout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cart::{CartStore, PaymentMethod};
use crate::error::CommerceError;
use crate::ids::ProductId;

/// Tax applied at checkout when none is configured.
pub const DEFAULT_TAX_RATE: f64 = 0.05;

/// Price breakdown for one line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSummary {
    pub product_id: ProductId,
    pub unit_price: f64,
    pub quantity: u32,
    /// Unit price times quantity.
    pub subtotal: f64,
}

/// Priced view of the cart at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Cart total before tax.
    pub subtotal: f64,
    /// Tax rate applied (0.05 = 5%).
    pub tax_rate: f64,
    /// Tax amount.
    pub tax: f64,
    /// Subtotal plus tax.
    pub grand_total: f64,
    pub item_count: u64,
    pub payment_method: PaymentMethod,
    pub lines: Vec<LineSummary>,
}

impl OrderSummary {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub summary: OrderSummary,
    pub placed_at: DateTime<Utc>,
}

impl CartStore {
    /// Price the cart with the given tax rate.
    pub fn order_summary(&self, tax_rate: f64) -> Result<OrderSummary, CommerceError> {
        if !tax_rate.is_finite() || tax_rate < 0.0 {
            return Err(CommerceError::InvalidTaxRate(tax_rate));
        }

        let subtotal = self.total();
        let tax = subtotal * tax_rate;
        let lines = self
            .lines()
            .iter()
            .map(|line| LineSummary {
                product_id: line.product_id.clone(),
                unit_price: line.unit_price,
                quantity: line.quantity,
                subtotal: line.line_total(),
            })
            .collect();

        Ok(OrderSummary {
            subtotal,
            tax_rate,
            tax,
            grand_total: subtotal + tax,
            item_count: self.item_count(),
            payment_method: self.payment_method(),
            lines,
        })
    }

    /// Place the order: price the cart, then empty it.
    ///
    /// Returns `Ok(None)` for an empty cart.
    pub fn place_order(&mut self, tax_rate: f64) -> Result<Option<OrderReceipt>, CommerceError> {
        let summary = self.order_summary(tax_rate)?;
        if summary.is_empty() {
            return Ok(None);
        }

        self.clear();
        info!(
            items = summary.item_count,
            grand_total = summary.grand_total,
            payment = %summary.payment_method,
            "order placed"
        );
        Ok(Some(OrderReceipt {
            summary,
            placed_at: Utc::now(),
        }))
    }
}
