//! Orderbook fill simulation.
//!
//! Both functions walk one side of the book in the order given, consuming
//! levels until the input is used up or the book runs out of depth. The book
//! is never modified.

use crate::domain::Orderbook;

/// Returns the base amount obtained by spending `quote_amount` against the asks.
///
/// Levels with a non-positive price carry no usable liquidity and are skipped.
pub fn simulate_buy_with_quote(book: &Orderbook, quote_amount: f64) -> f64 {
    if quote_amount.is_nan() || quote_amount <= 0.0 {
        return 0.0;
    }

    let mut remaining = quote_amount;
    let mut total_base = 0.0;

    for level in &book.asks {
        if level.price <= 0.0 {
            continue;
        }

        let trade_quote = remaining.min(level.notional());
        total_base += trade_quote / level.price;
        remaining -= trade_quote;

        if remaining <= 0.0 {
            break;
        }
    }

    total_base
}

/// Returns the quote amount obtained by selling `base_amount` into the bids.
pub fn simulate_sell_base(book: &Orderbook, base_amount: f64) -> f64 {
    if base_amount.is_nan() || base_amount <= 0.0 {
        return 0.0;
    }

    let mut remaining = base_amount;
    let mut total_quote = 0.0;

    for level in &book.bids {
        let trade_base = remaining.min(level.quantity);
        total_quote += trade_base * level.price;
        remaining -= trade_base;

        if remaining <= 0.0 {
            break;
        }
    }

    total_quote
}
