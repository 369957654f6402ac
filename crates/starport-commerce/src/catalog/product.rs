//! Catalog product types.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Listed price of a product.
///
/// The listing service sends prices as strings; anything that is not a
/// finite, non-negative number (e.g. `"unknown"`) means the product cannot
/// be purchased.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum Price {
    /// Price in credits.
    Credits(f64),
    /// Not for sale.
    #[default]
    Unavailable,
}

impl Price {
    /// Parse a raw price string.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Self::Credits(value),
            _ => Self::Unavailable,
        }
    }

    /// Price in credits, if purchasable.
    pub fn credits(&self) -> Option<f64> {
        match self {
            Self::Credits(value) => Some(*value),
            Self::Unavailable => None,
        }
    }

    /// Check if the product can be bought.
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Credits(_))
    }
}

impl From<String> for Price {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<Price> for String {
    fn from(price: Price) -> Self {
        match price {
            Price::Credits(value) => value.to_string(),
            Price::Unavailable => "unknown".to_string(),
        }
    }
}

/// A listed product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog-unique product name.
    pub id: ProductId,
    /// Listed price.
    pub price: Price,
}

impl Product {
    /// Create a new product.
    pub fn new(id: impl Into<ProductId>, price: Price) -> Self {
        Self {
            id: id.into(),
            price,
        }
    }

    /// Check if the product can be added to a cart.
    pub fn is_purchasable(&self) -> bool {
        self.price.is_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_parse_credits() {
        assert_eq!(Price::parse("149999"), Price::Credits(149_999.0));
        assert_eq!(Price::parse(" 3500000 "), Price::Credits(3_500_000.0));
        assert_eq!(Price::parse("0"), Price::Credits(0.0));
    }

    #[test]
    fn test_price_parse_unavailable() {
        assert_eq!(Price::parse("unknown"), Price::Unavailable);
        assert_eq!(Price::parse(""), Price::Unavailable);
        assert_eq!(Price::parse("-5"), Price::Unavailable);
        assert_eq!(Price::parse("NaN"), Price::Unavailable);
        assert_eq!(Price::parse("inf"), Price::Unavailable);
    }

    #[test]
    fn test_price_serde_uses_string_form() {
        let json = serde_json::to_string(&Price::Credits(149_999.0)).unwrap();
        assert_eq!(json, r#""149999""#);

        let price: Price = serde_json::from_str(r#""unknown""#).unwrap();
        assert_eq!(price, Price::Unavailable);
    }

    #[test]
    fn test_product_purchasable() {
        assert!(Product::new("X-wing", Price::Credits(1.0)).is_purchasable());
        assert!(!Product::new("Death Star", Price::Unavailable).is_purchasable());
    }
}
