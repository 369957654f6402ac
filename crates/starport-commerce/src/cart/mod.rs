//! Shopping cart module.
//!
//! Contains the cart store, payment method selection and order summaries.

mod cart;
mod payment;
mod summary;

pub use cart::{AddOutcome, CartLine, CartSnapshot, CartStore};
pub use payment::PaymentMethod;
pub use summary::{LineSummary, OrderReceipt, OrderSummary, DEFAULT_TAX_RATE};
