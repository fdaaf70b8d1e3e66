//! Domain models for currency conversion.

mod conversion;
mod orderbook;
mod ticker;

pub use conversion::ConversionResult;
pub use orderbook::{Orderbook, PriceLevel};
pub use ticker::{MarketPrices, Ticker, market_id};
