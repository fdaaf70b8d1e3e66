//! Conversion routing: picks the intermediary currency that yields the most
//! destination currency for a given source amount.

mod error;
mod simulate;

pub use error::ConversionError;
pub use simulate::{simulate_buy_with_quote, simulate_sell_base};

use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, info, warn};

use crate::domain::{ConversionResult, market_id};
use crate::exchanges::OrderBookSource;
use crate::market::MarketCache;

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConversionError>;

/// ConversionRouter evaluates every intermediary quoted against both
/// currencies and keeps the one with the highest simulated output.
///
/// Every route goes through exactly one intermediary: a direct
/// source/dest market is never considered.
pub struct ConversionRouter {
    cache: Arc<MarketCache>,
    books: Arc<dyn OrderBookSource>,
}

impl ConversionRouter {
    pub fn new(cache: Arc<MarketCache>, books: Arc<dyn OrderBookSource>) -> Self {
        Self { cache, books }
    }

    /// Finds the best route from `source` to `dest` for `amount` of `source`.
    ///
    /// Returns `ConversionResult::none()` when no intermediary produces a
    /// positive amount, including unknown currencies and non-positive
    /// amounts. Only a ticker refresh failure is returned as an error;
    /// orderbook failures just drop the affected intermediary.
    pub async fn find_best_conversion(
        &self,
        source: &str,
        dest: &str,
        amount: f64,
    ) -> Result<ConversionResult> {
        self.cache.refresh().await?;

        let source = normalize_code(source);
        let dest = normalize_code(dest);

        if !amount.is_finite() || amount <= 0.0 {
            debug!(amount, "non-positive amount, nothing to convert");
            return Ok(ConversionResult::none());
        }

        let intermediaries = self.cache.intermediaries(&source, &dest).await;
        if intermediaries.is_empty() {
            debug!(source = %source, dest = %dest, "no common intermediaries");
            return Ok(ConversionResult::none());
        }

        debug!(
            source = %source,
            dest = %dest,
            candidates = ?intermediaries,
            "evaluating intermediaries"
        );

        // Fetches run concurrently; join_all keeps input order, so ties still
        // go to the first intermediary enumerated.
        let candidates = join_all(
            intermediaries
                .iter()
                .map(|via| self.evaluate(via, &source, &dest, amount)),
        )
        .await;

        let mut best = ConversionResult::none();
        for candidate in candidates.into_iter().flatten() {
            if candidate.amount > best.amount {
                best = candidate;
            }
        }

        if best.is_found() {
            info!(
                source = %source,
                dest = %dest,
                amount,
                result = best.amount,
                via = ?best.via,
                "best conversion found"
            );
        }

        Ok(best)
    }

    /// Like `find_best_conversion`, but reports a missing route as
    /// `ConversionError::NoPath`.
    pub async fn convert(&self, source: &str, dest: &str, amount: f64) -> Result<ConversionResult> {
        let result = self.find_best_conversion(source, dest, amount).await?;
        if !result.is_found() {
            return Err(ConversionError::NoPath {
                from: normalize_code(source),
                to: normalize_code(dest),
            });
        }
        Ok(result)
    }

    /// Simulates buying `via` with `source` and selling it for `dest`.
    /// Returns None if either orderbook is unavailable.
    async fn evaluate(
        &self,
        via: &str,
        source: &str,
        dest: &str,
        amount: f64,
    ) -> Option<ConversionResult> {
        let buy_market = market_id(via, source);
        let sell_market = market_id(via, dest);

        let (buy_book, sell_book) = tokio::join!(
            self.books.fetch_order_book(&buy_market),
            self.books.fetch_order_book(&sell_market),
        );

        let (buy_book, sell_book) = match (buy_book, sell_book) {
            (Ok(Some(buy)), Ok(Some(sell))) => (buy, sell),
            (Err(e), _) | (_, Err(e)) => {
                warn!(via = %via, error = %e, "skipping intermediary, orderbook fetch failed");
                return None;
            }
            _ => {
                debug!(via = %via, "skipping intermediary, orderbook unavailable");
                return None;
            }
        };

        let base_amount = simulate_buy_with_quote(&buy_book, amount);
        let dest_amount = simulate_sell_base(&sell_book, base_amount);

        debug!(
            via = %via,
            base_amount,
            dest_amount,
            "intermediary evaluated"
        );

        Some(ConversionResult::routed(dest_amount, via, buy_market, sell_market))
    }
}

/// Currency codes are matched trimmed and upper-cased.
fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}
