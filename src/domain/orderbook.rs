//! Orderbook data structures.

use serde::{Deserialize, Serialize};

/// PriceLevel represents a single price level in the orderbook.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: f64,
    pub quantity: f64,
}

impl PriceLevel {
    pub fn new(price: f64, quantity: f64) -> Self {
        Self { price, quantity }
    }

    /// Returns true if price and quantity are finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.price.is_finite() && self.quantity.is_finite() && self.price >= 0.0 && self.quantity >= 0.0
    }

    /// Returns the quote value resting at this level.
    pub fn notional(&self) -> f64 {
        self.price * self.quantity
    }
}

impl From<(f64, f64)> for PriceLevel {
    fn from((price, quantity): (f64, f64)) -> Self {
        Self { price, quantity }
    }
}

/// Orderbook snapshot for a single market.
///
/// Levels are kept in the order the source delivered them, which is also
/// the fill priority: nothing here re-sorts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Orderbook {
    /// Sorted list of ask price levels (lowest to highest).
    #[serde(default)]
    pub asks: Vec<PriceLevel>,
    /// Sorted list of bid price levels (highest to lowest).
    #[serde(default)]
    pub bids: Vec<PriceLevel>,
}

impl Orderbook {
    /// Drops levels that fail `PriceLevel::is_valid`, keeping the order of the rest.
    pub fn without_invalid_levels(mut self) -> Self {
        self.asks.retain(PriceLevel::is_valid);
        self.bids.retain(PriceLevel::is_valid);
        self
    }

    /// Builds an orderbook from `(price, quantity)` tuples.
    #[cfg(test)]
    pub fn from_levels(asks: &[(f64, f64)], bids: &[(f64, f64)]) -> Self {
        Self {
            asks: asks.iter().copied().map(PriceLevel::from).collect(),
            bids: bids.iter().copied().map(PriceLevel::from).collect(),
        }
    }
}
