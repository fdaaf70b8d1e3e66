use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::MarketConfig;
use crate::domain::{Orderbook, Ticker};
use crate::exchanges::buda::client::{Client, ClientError};
use crate::exchanges::utils::{market_to_path, parse_amount, parse_price_levels};
use crate::exchanges::{FetchError, MarketSource, OrderBookSource, Result, TickerSource};

const EXCHANGE_NAME: &str = "buda";

/// Live Buda.com market data source.
pub struct BudaExchange {
    client: Client,
}

impl BudaExchange {
    /// Creates a BudaExchange from the market config.
    pub fn from_config(config: &MarketConfig) -> Result<Self> {
        let client = Client::from_config(config)
            .map_err(|e| FetchError::Connection(format!("build {} client: {}", EXCHANGE_NAME, e)))?;

        info!(base_url = %client.base_url(), "buda market source ready");

        Ok(Self { client })
    }
}

fn map_client_error(context: &str, err: ClientError) -> FetchError {
    match err {
        ClientError::Request(e) => FetchError::Connection(format!("{}: {}", context, e)),
        ClientError::Json(e) => FetchError::Parse(format!("{}: {}", context, e)),
        ClientError::Api(e) => FetchError::Api(format!("{}: {}", context, e)),
    }
}

#[async_trait]
impl TickerSource for BudaExchange {
    async fn fetch_tickers(&self) -> Result<Vec<Ticker>> {
        let resp: TickersResponse = self
            .client
            .get_json("/tickers")
            .await
            .map_err(|e| map_client_error("get tickers", e))?;

        let tickers = resp.into_tickers()?;
        debug!(count = tickers.len(), "tickers received");
        Ok(tickers)
    }
}

#[async_trait]
impl OrderBookSource for BudaExchange {
    async fn fetch_order_book(&self, market_id: &str) -> Result<Option<Orderbook>> {
        let endpoint = format!("/markets/{}/order_book", market_to_path(market_id));

        match self.client.get_json::<OrderbookResponse>(&endpoint).await {
            Ok(resp) => Ok(Some(resp.into_orderbook())),
            Err(e) if e.is_not_found() => {
                debug!(market = %market_id, "market not found");
                Ok(None)
            }
            Err(e) => Err(map_client_error(&format!("get orderbook for {}", market_id), e)),
        }
    }
}

impl MarketSource for BudaExchange {
    fn name(&self) -> &str {
        EXCHANGE_NAME
    }
}

// ==================== API response types ====================

#[derive(Debug, Deserialize)]
struct TickersResponse {
    #[serde(default)]
    tickers: Vec<TickerEntry>,
}

#[derive(Debug, Deserialize)]
struct TickerEntry {
    market_id: String,
    /// `[amount, currency]`, e.g. `["1000000.0", "CLP"]`.
    last_price: [String; 2],
}

impl TickersResponse {
    fn into_tickers(self) -> Result<Vec<Ticker>> {
        self.tickers
            .into_iter()
            .map(|entry| -> Result<Ticker> {
                let [amount, currency] = entry.last_price;
                let price = parse_amount(&amount)
                    .filter(|p| *p >= 0.0)
                    .ok_or_else(|| {
                        FetchError::Parse(format!(
                            "invalid last price {:?} for {}",
                            amount, entry.market_id
                        ))
                    })?;
                Ok(Ticker::new(
                    entry.market_id.to_uppercase(),
                    price,
                    currency.to_uppercase(),
                ))
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct OrderbookResponse {
    order_book: OrderbookData,
}

#[derive(Debug, Deserialize)]
struct OrderbookData {
    #[serde(default)]
    asks: Vec<[String; 2]>,
    #[serde(default)]
    bids: Vec<[String; 2]>,
}

impl OrderbookResponse {
    fn into_orderbook(self) -> Orderbook {
        Orderbook {
            asks: parse_price_levels(&self.order_book.asks),
            bids: parse_price_levels(&self.order_book.bids),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceLevel;

    #[test]
    fn test_parse_tickers_response() {
        let body = r#"{
            "tickers": [
                {"market_id": "BTC-CLP", "last_price": ["1000000.0", "CLP"], "price_variation_24h": "0.01"},
                {"market_id": "ETH-CLP", "last_price": ["50000.0", "CLP"]}
            ]
        }"#;
        let resp: TickersResponse = serde_json::from_str(body).unwrap();
        let tickers = resp.into_tickers().unwrap();

        assert_eq!(tickers.len(), 2);
        assert_eq!(tickers[0], Ticker::new("BTC-CLP", 1_000_000.0, "CLP"));
        assert_eq!(tickers[1].base_currency(), "ETH");
    }

    #[test]
    fn test_parse_tickers_missing_list() {
        let resp: TickersResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.into_tickers().unwrap().is_empty());
    }

    #[test]
    fn test_parse_tickers_invalid_price() {
        let body = r#"{"tickers": [{"market_id": "BTC-CLP", "last_price": ["n/a", "CLP"]}]}"#;
        let resp: TickersResponse = serde_json::from_str(body).unwrap();
        let result = resp.into_tickers();
        assert!(matches!(result, Err(FetchError::Parse(_))));
    }

    #[test]
    fn test_parse_orderbook_response() {
        let body = r#"{
            "order_book": {
                "asks": [["100.0", "0.5"], ["101.0", "1.0"]],
                "bids": [["99.0", "0.3"]],
                "market_id": "BTC-CLP"
            }
        }"#;
        let resp: OrderbookResponse = serde_json::from_str(body).unwrap();
        let book = resp.into_orderbook();

        assert_eq!(book.asks, vec![PriceLevel::new(100.0, 0.5), PriceLevel::new(101.0, 1.0)]);
        assert_eq!(book.bids, vec![PriceLevel::new(99.0, 0.3)]);
    }

    #[test]
    fn test_map_client_error() {
        let err = ClientError::Api(crate::exchanges::buda::client::ApiError {
            code: 500,
            message: "boom".to_string(),
        });
        assert!(matches!(map_client_error("ctx", err), FetchError::Api(_)));

        let json_err = serde_json::from_str::<TickersResponse>("not json").unwrap_err();
        assert!(matches!(
            map_client_error("ctx", ClientError::Json(json_err)),
            FetchError::Parse(_)
        ));
    }

    #[test]
    fn test_name() {
        let exchange = BudaExchange::from_config(&MarketConfig::default()).unwrap();
        assert_eq!(exchange.name(), "buda");
    }
}
