//! Request and response bodies of the HTTP API.

use serde::{Deserialize, Serialize};

use crate::domain::ConversionResult;

/// Body of `POST /convert`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversionRequest {
    pub source: String,
    pub dest: String,
    pub amount: f64,
}

/// Successful conversion quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionResponse {
    /// Destination amount rounded to 6 decimals.
    pub amount: f64,
    /// Intermediary currency, or "-" when none was used.
    pub via: String,
    pub path: Vec<String>,
    pub notes: String,
}

impl From<ConversionResult> for ConversionResponse {
    fn from(result: ConversionResult) -> Self {
        // Routing always goes through an intermediary, so the direct label
        // is only reachable if that ever changes.
        let notes = match result.via.as_deref() {
            Some(via) => format!("Used intermediary: {}", via),
            None => "Direct conversion".to_string(),
        };

        Self {
            amount: round_to(result.amount, 6),
            via: result.via.unwrap_or_else(|| "-".to_string()),
            path: result.path,
            notes,
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
