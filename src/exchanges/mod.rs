//! Market data sources: the capability traits the conversion engine reads
//! through, and their implementations.

pub mod buda;
pub mod memory;
mod utils;

use crate::domain::{Orderbook, Ticker};
use async_trait::async_trait;
use thiserror::Error;

pub use buda::BudaExchange;
pub use memory::InMemoryExchange;

/// Market data fetch errors.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure (connect, timeout, body read).
    #[error("connection error: {0}")]
    Connection(String),

    /// Non-success response from the data source.
    #[error("API error: {0}")]
    Api(String),

    /// Response could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result type for market data operations.
pub type Result<T> = std::result::Result<T, FetchError>;

/// TickerSource provides the last traded price of every market.
#[async_trait]
pub trait TickerSource: Send + Sync {
    /// Fetches the full ticker list.
    async fn fetch_tickers(&self) -> Result<Vec<Ticker>>;
}

/// OrderBookSource provides orderbook snapshots per market.
#[async_trait]
pub trait OrderBookSource: Send + Sync {
    /// Fetches the orderbook for a market id in "BASE-QUOTE" format.
    /// Returns `Ok(None)` when the market does not exist.
    async fn fetch_order_book(&self, market_id: &str) -> Result<Option<Orderbook>>;
}

/// A source serving both tickers and orderbooks.
pub trait MarketSource: TickerSource + OrderBookSource {
    /// Name returns the identifier of this source (e.g., "buda", "fixture").
    fn name(&self) -> &str;
}
