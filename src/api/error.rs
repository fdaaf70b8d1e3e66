//! HTTP error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::conversion::ConversionError;

/// Error returned by API handlers.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] ConversionError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            ConversionError::NoPath { .. } => StatusCode::NOT_FOUND,
            ConversionError::Fetch(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = match self.0 {
            ConversionError::NoPath { .. } => "No conversion path found".to_string(),
            ConversionError::Fetch(ref e) => format!("Market data unavailable: {}", e),
        };
        (self.status(), Json(json!({ "detail": detail }))).into_response()
    }
}
