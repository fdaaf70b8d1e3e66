//! Market data cache: last traded prices per quote currency, refreshed from
//! a ticker source once the data goes stale.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::domain::{MarketPrices, Ticker};
use crate::exchanges::{Result, TickerSource};

/// Default age after which cached prices are refetched.
pub const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(2 * 60 * 60);

/// Cached prices plus the time they were last fetched.
#[derive(Debug, Clone, Default)]
pub struct CacheState {
    pub prices: MarketPrices,
    pub last_refresh: Option<DateTime<Utc>>,
}

impl CacheState {
    /// Returns true if the cache must be refetched at `now`.
    /// A cache that was never refreshed is always stale.
    pub fn is_stale(&self, now: DateTime<Utc>, stale_after: Duration) -> bool {
        match self.last_refresh {
            None => true,
            // A negative elapsed time (clock moved backwards) counts as fresh.
            Some(last) => (now - last)
                .to_std()
                .map(|elapsed| elapsed > stale_after)
                .unwrap_or(false),
        }
    }
}

/// MarketCache holds the latest known prices shared by all conversion requests.
///
/// Refreshes are serialized and the new price map is swapped in under a
/// single write lock, so readers never see a partially merged map.
pub struct MarketCache {
    source: Arc<dyn TickerSource>,
    stale_after: Duration,
    state: RwLock<CacheState>,
    refresh_lock: Mutex<()>,
}

impl MarketCache {
    /// Creates an empty cache. Nothing is fetched until the first refresh.
    pub fn new(source: Arc<dyn TickerSource>, stale_after: Duration) -> Self {
        Self {
            source,
            stale_after,
            state: RwLock::new(CacheState::default()),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Refetches tickers if the cached prices are stale.
    /// Returns true if a fetch happened.
    pub async fn refresh(&self) -> Result<bool> {
        self.refresh_at(Utc::now()).await
    }

    /// Refresh using an explicit current time.
    ///
    /// On fetch failure the error is returned and `last_refresh` is left
    /// untouched, so the next call tries again.
    pub async fn refresh_at(&self, now: DateTime<Utc>) -> Result<bool> {
        let _guard = self.refresh_lock.lock().await;

        let mut prices = {
            let state = self.state.read().await;
            if !state.is_stale(now, self.stale_after) {
                debug!(last_refresh = ?state.last_refresh, "market cache is fresh, skipping refresh");
                return Ok(false);
            }
            state.prices.clone()
        };

        let tickers = self.source.fetch_tickers().await.inspect_err(|e| {
            warn!(error = %e, "failed to refresh market cache");
        })?;

        let updated = update_prices(&mut prices, &tickers);
        let quotes = prices.len();

        {
            let mut state = self.state.write().await;
            state.prices = prices;
            state.last_refresh = Some(now);
        }

        info!(tickers = tickers.len(), updated, quotes, "market cache refreshed");

        Ok(true)
    }

    /// Returns base currencies quoted against both `source` and `dest`,
    /// in ascending order. Unknown currencies yield an empty list.
    pub async fn intermediaries(&self, source: &str, dest: &str) -> Vec<String> {
        let state = self.state.read().await;
        find_intermediaries(&state.prices, source, dest)
    }

    /// Returns a copy of the current cache state.
    #[cfg(test)]
    pub async fn snapshot(&self) -> CacheState {
        self.state.read().await.clone()
    }

}

/// Upserts every ticker into `prices` as `prices[quote][base] = last_price`.
/// Returns the number of entries written.
pub fn update_prices(prices: &mut MarketPrices, tickers: &[Ticker]) -> usize {
    let mut updated = 0;

    for ticker in tickers {
        if !ticker.last_price.is_finite() || ticker.last_price < 0.0 {
            warn!(market = %ticker.market_id, price = ticker.last_price, "skipping invalid ticker price");
            continue;
        }

        let quote = ticker.quote_currency.to_uppercase();
        let base = ticker.base_currency();

        prices.entry(quote).or_default().insert(base, ticker.last_price);
        updated += 1;
    }

    updated
}

/// Intersects the base currencies of two quote markets.
pub fn find_intermediaries(prices: &MarketPrices, source: &str, dest: &str) -> Vec<String> {
    match (prices.get(source), prices.get(dest)) {
        (Some(buys), Some(sells)) => buys
            .keys()
            .filter(|base| sells.contains_key(*base))
            .cloned()
            .collect(),
        _ => Vec::new(),
    }
}
