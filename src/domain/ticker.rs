//! Ticker and market price structures.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Last traded price of a single market as reported by a ticker feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    /// Market identifier in "BASE-QUOTE" format (e.g., "BTC-CLP").
    pub market_id: String,
    pub last_price: f64,
    /// Currency the price is denominated in (e.g., "CLP").
    pub quote_currency: String,
}

impl Ticker {
    pub fn new(market_id: impl Into<String>, last_price: f64, quote_currency: impl Into<String>) -> Self {
        Self {
            market_id: market_id.into(),
            last_price,
            quote_currency: quote_currency.into(),
        }
    }

    /// Returns the base currency of this market.
    ///
    /// The trailing "-QUOTE" suffix is stripped from the market id; ids that
    /// don't carry the suffix are returned whole.
    pub fn base_currency(&self) -> String {
        let market = self.market_id.to_uppercase();
        let suffix = format!("-{}", self.quote_currency.to_uppercase());
        market
            .strip_suffix(&suffix)
            .map(str::to_string)
            .unwrap_or(market)
    }
}

/// Latest prices keyed by quote currency, then by base currency.
///
/// BTreeMap keeps intermediary enumeration in a stable (alphabetical) order.
pub type MarketPrices = BTreeMap<String, BTreeMap<String, f64>>;

/// Builds a "BASE-QUOTE" market identifier.
pub fn market_id(base: &str, quote: &str) -> String {
    format!("{}-{}", base, quote)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_currency_strips_quote_suffix() {
        assert_eq!(Ticker::new("BTC-CLP", 1.0, "CLP").base_currency(), "BTC");
        assert_eq!(Ticker::new("USDC-COP", 1.0, "COP").base_currency(), "USDC");
    }

    #[test]
    fn test_base_currency_normalizes_case() {
        assert_eq!(Ticker::new("eth-btc", 1.0, "btc").base_currency(), "ETH");
    }

    #[test]
    fn test_base_currency_without_suffix() {
        assert_eq!(Ticker::new("BTCCLP", 1.0, "CLP").base_currency(), "BTCCLP");
    }

    #[test]
    fn test_market_id() {
        assert_eq!(market_id("BTC", "PEN"), "BTC-PEN");
    }
}
