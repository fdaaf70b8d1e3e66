//! Conversion error types.

use crate::exchanges::FetchError;

/// Conversion error type.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("market data unavailable: {0}")]
    Fetch(#[from] FetchError),
    #[error("no conversion path found from {from} to {to}")]
    NoPath { from: String, to: String },
}
