mod api;
mod config;
mod conversion;
mod domain;
mod exchanges;
mod market;

use std::env;
use std::sync::Arc;

use config::{Config, SourceKind};
use conversion::ConversionRouter;
use exchanges::{BudaExchange, InMemoryExchange, MarketSource};
use market::MarketCache;
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_CONFIG_PATH: &str = "configs/config.yaml";

fn parse_config_path() -> String {
    for arg in env::args().skip(1) {
        if let Some(path) = arg.strip_prefix("--config=") {
            return path.to_string();
        }
    }
    DEFAULT_CONFIG_PATH.to_string()
}

fn init_tracing(log_level: Option<&str>) {
    let level = match log_level {
        Some("debug") => Level::DEBUG,
        Some("info") => Level::INFO,
        Some("warn") | Some("warning") => Level::WARN,
        Some("error") => Level::ERROR,
        Some("trace") => Level::TRACE,
        _ => Level::INFO,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// Builds the conversion router over the market source selected in config.
fn build_router(config: &Config) -> exchanges::Result<ConversionRouter> {
    match config.market.source {
        SourceKind::Live => {
            let source = BudaExchange::from_config(&config.market)?;
            Ok(router_for(Arc::new(source), config))
        }
        SourceKind::Fixture => {
            // validate() guarantees the path is set.
            let path = config.market.fixture_path.as_deref().unwrap_or_default();
            let source = InMemoryExchange::from_file(path)?;
            Ok(router_for(Arc::new(source), config))
        }
    }
}

fn router_for<S: MarketSource + 'static>(source: Arc<S>, config: &Config) -> ConversionRouter {
    info!(
        source = source.name(),
        stale_after = ?config.market.stale_after,
        "Market source ready"
    );

    let cache = Arc::new(MarketCache::new(source.clone(), config.market.stale_after));
    ConversionRouter::new(cache, source)
}

#[tokio::main]
async fn main() {
    let config_path = parse_config_path();

    let config = match Config::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config {}: {}", config_path, e);
            std::process::exit(1);
        }
    };

    init_tracing(config.app.log_level.as_deref());

    let router = match build_router(&config) {
        Ok(router) => Arc::new(router),
        Err(e) => {
            error!(error = %e, "Failed to create market source");
            std::process::exit(1);
        }
    };

    info!(
        app = %config.app.name,
        env = %config.app.env,
        config = %config_path,
        "Conversion service initialized"
    );

    if let Err(e) = api::serve(&config.server.bind, api::AppState::new(router)).await {
        error!(error = %e, "API server error");
        std::process::exit(1);
    }

    info!("Conversion service stopped");
}
