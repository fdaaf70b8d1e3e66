//! HTTP client for the Buda.com public API.

use std::time::Duration;

use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{DEFAULT_BASE_URL, MarketConfig};

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Buda API error.
#[derive(Debug, Error)]
#[error("buda api error {code}: {message}")]
pub struct ApiError {
    pub code: u16,
    pub message: String,
}

/// Client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ClientError {
    /// Returns true if the API answered 404 Not Found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api(e) if e.code == StatusCode::NOT_FOUND.as_u16())
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Configuration for creating a new Client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: if base_url.is_empty() {
                DEFAULT_BASE_URL.to_string()
            } else {
                base_url.trim_end_matches('/').to_string()
            },
            timeout: if timeout.is_zero() { REQUEST_TIMEOUT } else { timeout },
        }
    }
}

/// HTTP client for the Buda public endpoints.
/// Only unauthenticated GET requests are issued.
pub struct Client {
    config: ClientConfig,
    http_client: HttpClient,
}

impl Client {
    /// Creates a new Buda API client.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http_client = HttpClient::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http_client })
    }

    /// Creates a new Buda API client from market config.
    pub fn from_config(market_config: &MarketConfig) -> Result<Self> {
        Self::new(ClientConfig::new(
            market_config.base_url.clone(),
            market_config.request_timeout,
        ))
    }

    /// Returns the API base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Sends a GET request and returns the raw response body.
    pub async fn request(&self, endpoint: &str) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.config.base_url, endpoint);

        debug!(endpoint = %endpoint, "sending request");

        let response = self.http_client.get(&url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_client_error() || status.is_server_error() {
            return Err(parse_error_response(status, &body));
        }

        Ok(body.to_vec())
    }

    /// Sends a GET request and decodes the JSON response.
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let body = self.request(endpoint).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Creates a ClientError from an error response.
fn parse_error_response(status: StatusCode, body: &[u8]) -> ClientError {
    #[derive(Deserialize)]
    struct ErrorResponse {
        message: Option<String>,
    }

    let message = serde_json::from_slice::<ErrorResponse>(body)
        .ok()
        .and_then(|resp| resp.message)
        .unwrap_or_else(|| String::from_utf8_lossy(body).to_string());

    let api_err = ApiError {
        code: status.as_u16(),
        message,
    };

    if status != StatusCode::NOT_FOUND {
        warn!(code = api_err.code, message = %api_err.message, "api error");
    }

    ClientError::Api(api_err)
}
