//! Market data source configuration.

use serde::Deserialize;
use std::time::Duration;

use super::duration;

/// Production Buda HTTP API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.buda.com/api/v2";

/// Which market data source to serve conversions from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Live Buda.com public API.
    #[default]
    Live,
    /// Static tickers and orderbooks read from a JSON file.
    Fixture,
}

/// Market data settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketConfig {
    #[serde(default)]
    pub source: SourceKind,
    /// Base URL of the exchange API (overridable with `BUDA_BASE_URL`).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Timeout applied to every HTTP request.
    #[serde(default = "default_request_timeout", with = "duration")]
    pub request_timeout: Duration,
    /// Maximum age of cached ticker prices before they are refetched.
    #[serde(default = "default_stale_after", with = "duration")]
    pub stale_after: Duration,
    /// Fixture file, required when `source` is `fixture`.
    pub fixture_path: Option<String>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::default(),
            base_url: default_base_url(),
            request_timeout: default_request_timeout(),
            stale_after: default_stale_after(),
            fixture_path: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_stale_after() -> Duration {
    crate::market::DEFAULT_STALE_AFTER
}
