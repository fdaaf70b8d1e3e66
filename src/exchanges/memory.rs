//! Fixture-backed market data source.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use crate::domain::{Orderbook, Ticker};
use crate::exchanges::{FetchError, MarketSource, OrderBookSource, Result, TickerSource};

/// Static market data loaded from a JSON file.
///
/// ```json
/// {
///   "tickers": [{"market_id": "BTC-CLP", "last_price": 100.0, "quote_currency": "CLP"}],
///   "order_books": {"BTC-CLP": {"asks": [{"price": 100.0, "quantity": 1.0}], "bids": []}}
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub tickers: Vec<Ticker>,
    #[serde(default)]
    pub order_books: HashMap<String, Orderbook>,
}

impl Fixture {
    /// Reads a fixture from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| FetchError::Connection(format!("read fixture {}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| FetchError::Parse(format!("parse fixture {}: {}", path.display(), e)))
    }
}

/// In-memory market data source serving fixed tickers and orderbooks.
pub struct InMemoryExchange {
    tickers: Vec<Ticker>,
    order_books: HashMap<String, Orderbook>,
}

impl InMemoryExchange {
    pub fn new(tickers: Vec<Ticker>, order_books: HashMap<String, Orderbook>) -> Self {
        // Lookups are case-insensitive on market id.
        let order_books = order_books
            .into_iter()
            .map(|(market, book)| (market.to_uppercase(), book.without_invalid_levels()))
            .collect();
        Self { tickers, order_books }
    }

    /// Creates an InMemoryExchange from a fixture file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let fixture = Fixture::load(path.as_ref())?;

        info!(
            path = %path.as_ref().display(),
            tickers = fixture.tickers.len(),
            order_books = fixture.order_books.len(),
            "fixture market source loaded"
        );

        Ok(Self::from(fixture))
    }
}

impl From<Fixture> for InMemoryExchange {
    fn from(fixture: Fixture) -> Self {
        Self::new(fixture.tickers, fixture.order_books)
    }
}

#[async_trait]
impl TickerSource for InMemoryExchange {
    async fn fetch_tickers(&self) -> Result<Vec<Ticker>> {
        Ok(self.tickers.clone())
    }
}

#[async_trait]
impl OrderBookSource for InMemoryExchange {
    async fn fetch_order_book(&self, market_id: &str) -> Result<Option<Orderbook>> {
        Ok(self.order_books.get(&market_id.to_uppercase()).cloned())
    }
}

impl MarketSource for InMemoryExchange {
    fn name(&self) -> &str {
        "fixture"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_get_order_book_returns_data() {
        let book = Orderbook::from_levels(&[(1000.0, 0.1)], &[(900.0, 0.2)]);
        let exchange = InMemoryExchange::new(
            Vec::new(),
            HashMap::from([("btc-clp".to_string(), book.clone())]),
        );

        let result = exchange.fetch_order_book("BTC-CLP").await.unwrap();
        assert_eq!(result, Some(book));
    }

    #[tokio::test]
    async fn test_get_order_book_missing_market() {
        let exchange = InMemoryExchange::new(Vec::new(), HashMap::new());
        let result = exchange.fetch_order_book("nonexistent-market").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "tickers": [{{"market_id": "BTC-CLP", "last_price": 100.0, "quote_currency": "CLP"}}],
                "order_books": {{"BTC-CLP": {{"asks": [{{"price": 100.0, "quantity": 1.0}}]}}}}
            }}"#
        )
        .unwrap();

        let exchange = InMemoryExchange::from_file(file.path()).unwrap();
        let tickers = exchange.fetch_tickers().await.unwrap();
        assert_eq!(tickers, vec![Ticker::new("BTC-CLP", 100.0, "CLP")]);

        let book = exchange.fetch_order_book("BTC-CLP").await.unwrap().unwrap();
        assert_eq!(book.asks.len(), 1);
        assert!(book.bids.is_empty());
        assert_eq!(exchange.name(), "fixture");
    }

    #[tokio::test]
    async fn test_from_file_drops_invalid_levels() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "order_books": {{"BTC-CLP": {{"asks": [
                    {{"price": 100.0, "quantity": -1.0}},
                    {{"price": 100.0, "quantity": 1.0}}
                ]}}}}
            }}"#
        )
        .unwrap();

        let exchange = InMemoryExchange::from_file(file.path()).unwrap();
        let book = exchange.fetch_order_book("BTC-CLP").await.unwrap().unwrap();

        assert_eq!(book.asks.len(), 1);
        let base = crate::conversion::simulate_buy_with_quote(&book, 50.0);
        assert!((base - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_from_file_missing() {
        let result = InMemoryExchange::from_file("/nonexistent/fixture.json");
        assert!(matches!(result, Err(FetchError::Connection(_))));
    }

    #[test]
    fn test_from_file_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let result = InMemoryExchange::from_file(file.path());
        assert!(matches!(result, Err(FetchError::Parse(_))));
    }
}
