//! Common utilities for exchange implementations.

use crate::domain::PriceLevel;

/// Converts "BTC-CLP" to the lowercase form used in Buda URLs ("btc-clp").
pub fn market_to_path(market_id: &str) -> String {
    market_id.trim().to_lowercase()
}

/// Parses `[price, quantity]` string pairs into PriceLevels.
/// Entries that aren't valid non-negative numbers are dropped.
pub fn parse_price_levels(data: &[[String; 2]]) -> Vec<PriceLevel> {
    data.iter()
        .filter_map(|[price, quantity]| {
            let price: f64 = price.trim().parse().ok()?;
            let quantity: f64 = quantity.trim().parse().ok()?;
            Some(PriceLevel::new(price, quantity)).filter(PriceLevel::is_valid)
        })
        .collect()
}

/// Parses a decimal string as reported by the exchange.
pub fn parse_amount(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
