//! Conversion result structures.

use serde::Serialize;

/// Best route found for a conversion request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConversionResult {
    /// Amount of the destination currency obtained.
    pub amount: f64,
    /// Intermediary currency the trade is routed through.
    pub via: Option<String>,
    /// Markets used, in execution order: buy leg then sell leg.
    pub path: Vec<String>,
}

impl ConversionResult {
    /// Result for a conversion with no usable route.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn routed(amount: f64, via: impl Into<String>, buy_market: String, sell_market: String) -> Self {
        Self {
            amount,
            via: Some(via.into()),
            path: vec![buy_market, sell_market],
        }
    }

    /// Returns true if a route with a positive amount was found.
    pub fn is_found(&self) -> bool {
        self.via.is_some() && self.amount > 0.0
    }
}
