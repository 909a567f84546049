//! Pure Exa REST API client.
//!
//! A minimal client for the Exa search API with no domain-specific logic.
//! Supports neural/keyword search, similar-page lookup, and structured answers.
//!
//! # Example
//!
//! ```rust,ignore
//! use exa_client::{ContentsOptions, ExaClient, SearchRequest, SearchType};
//!
//! let client = ExaClient::from_env()?;
//!
//! let raw = client
//!     .search(
//!         &SearchRequest::new("secondary suite permit vancouver", 5)
//!             .search_type(SearchType::Auto)
//!             .contents(Some(ContentsOptions::bounded_text(2_000))),
//!     )
//!     .await?;
//!
//! for result in raw["results"].as_array().into_iter().flatten() {
//!     println!("{}", result["url"]);
//! }
//! ```
//!
//! Responses are returned as raw JSON; result shapes vary with the
//! requested contents and are normalized by the caller.

pub mod credentials;
pub mod error;
pub mod schema;
pub mod types;

pub use credentials::{ApiKey, API_KEY_ENV};
pub use error::{ExaError, Result};
pub use schema::OutputSchema;
pub use types::*;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://api.exa.ai";

/// Pure Exa API client.
#[derive(Debug, Clone)]
pub struct ExaClient {
    http_client: Client,
    api_key: ApiKey,
    base_url: String,
}

impl ExaClient {
    /// Create a new Exa client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_key(ApiKey::new(api_key))
    }

    pub fn with_key(api_key: ApiKey) -> Self {
        Self {
            http_client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create from environment variable `EXA_API_KEY`.
    pub fn from_env() -> Result<Self> {
        Ok(Self::with_key(ApiKey::from_env()?))
    }

    /// Set a custom base URL (for proxies, test servers, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Use a preconfigured HTTP client (timeouts, proxies).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http_client = client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /search`.
    pub async fn search(&self, request: &SearchRequest) -> Result<Value> {
        self.post("search", request).await
    }

    /// `POST /findSimilar`.
    pub async fn find_similar(&self, request: &FindSimilarRequest) -> Result<Value> {
        self.post("findSimilar", request).await
    }

    /// `POST /answer`.
    pub async fn answer(&self, request: &AnswerRequest) -> Result<Value> {
        self.post("answer", request).await
    }

    async fn post<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<Value> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/{}", self.base_url, endpoint))
            .header("x-api-key", self.api_key.expose())
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(endpoint, error = %e, "Exa request failed");
                ExaError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(endpoint, status = %status, error = %message, "Exa API error");
            return Err(ExaError::Api {
                status: status.as_u16(),
                message,
            });
        }

        // Read as text first so a malformed body surfaces as a JSON error
        // rather than an opaque transport error.
        let text = response
            .text()
            .await
            .map_err(|e| ExaError::Network(e.to_string()))?;
        let value: Value = serde_json::from_str(&text)?;

        debug!(
            endpoint,
            duration_ms = start.elapsed().as_millis() as u64,
            "Exa request completed"
        );

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = ExaClient::new("exa-test").with_base_url("https://proxy.example.com/");

        assert_eq!(client.api_key.expose(), "exa-test");
        assert_eq!(client.base_url(), "https://proxy.example.com");
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = ExaClient::new("exa-very-secret");
        let debug = format!("{:?}", client);

        assert!(!debug.contains("exa-very-secret"));
    }
}
