//! Configuration loading and validation for the conversion service.
//!
//! Uses serde_yaml to load YAML configuration files, with an environment
//! variable override for the exchange endpoint.

mod app;
mod duration;
mod error;
mod market;
mod server;

pub use app::AppConfig;
pub use error::ConfigError;
pub use market::{DEFAULT_BASE_URL, MarketConfig, SourceKind};
pub use server::ServerConfig;

use serde::Deserialize;
use std::net::SocketAddr;
use std::{env, fs};

/// Environment variable overriding `market.base_url`.
pub const BASE_URL_ENV: &str = "BUDA_BASE_URL";

/// Root configuration structure.
///
/// Required sections: app.
/// Optional sections: server, market.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Application-level settings like name and environment.
    pub app: AppConfig,
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Market data source and cache settings.
    #[serde(default)]
    pub market: MarketConfig,
}

impl Config {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Loads environment variables from `.env` (if present) first, so
    /// `BUDA_BASE_URL` can be set there.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let content = fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Apply overrides from environment variables.
    fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                self.market.base_url = base_url.trim().to_string();
            }
        }
    }

    /// Validate the configuration.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.app.name.trim().is_empty() {
            return Err(ConfigError::invalid("app.name", "must not be empty"));
        }

        if self.server.bind.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::invalid(
                "server.bind",
                format!("{:?} is not a socket address", self.server.bind),
            ));
        }

        match self.market.source {
            SourceKind::Live => {
                if !self.market.base_url.starts_with("http://")
                    && !self.market.base_url.starts_with("https://")
                {
                    return Err(ConfigError::invalid(
                        "market.base_url",
                        format!("{:?} is not an http(s) URL", self.market.base_url),
                    ));
                }
            }
            SourceKind::Fixture => {
                let has_path = self
                    .market
                    .fixture_path
                    .as_deref()
                    .is_some_and(|p| !p.trim().is_empty());
                if !has_path {
                    return Err(ConfigError::invalid(
                        "market.fixture_path",
                        "required when market.source is fixture",
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
