//! Buda.com exchange integration.

mod client;
mod exchange;

pub use exchange::BudaExchange;
