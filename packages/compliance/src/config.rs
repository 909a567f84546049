use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use exa_client::{ApiKey, ExaClient, API_KEY_ENV};
use reqwest::Client;

use crate::gateway::{ExaCompliance, GatewayOptions};
use crate::provider::{LazyExaClient, SearchProvider};

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration loaded from environment variables.
///
/// The Exa key is optional here: a missing key is reported by the first
/// provider call, so commands that never reach the provider still run.
#[derive(Debug, Clone)]
pub struct ComplianceConfig {
    pub exa_api_key: Option<ApiKey>,
    pub exa_base_url: Option<String>,
    pub request_timeout: Duration,
    pub preferred_domains: Option<Vec<String>>,
    pub query_hint: Option<String>,
    pub default_jurisdiction: Option<String>,
}

impl ComplianceConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let request_timeout_secs = match var("EXA_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .context("EXA_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let preferred_domains = var("COMPLIANCE_PREFERRED_DOMAINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .filter(|domains| !domains.is_empty());

        Ok(Self {
            exa_api_key: ApiKey::from_value(var(API_KEY_ENV)).ok(),
            exa_base_url: var("EXA_BASE_URL"),
            request_timeout: Duration::from_secs(request_timeout_secs),
            preferred_domains,
            query_hint: var("COMPLIANCE_QUERY_HINT"),
            default_jurisdiction: var("COMPLIANCE_DEFAULT_JURISDICTION"),
        })
    }

    /// Gateway defaults with any configured overrides applied.
    pub fn gateway_options(&self) -> GatewayOptions {
        let mut options = GatewayOptions::default();

        if let Some(domains) = &self.preferred_domains {
            options.preferred_domains = domains.clone();
        }
        if let Some(hint) = &self.query_hint {
            options.query_hint = hint.clone();
        }
        if let Some(jurisdiction) = &self.default_jurisdiction {
            options.default_jurisdiction_hint = jurisdiction.clone();
        }

        options
    }

    /// Factory for the real client. Fails with `ExaError::Config` when no
    /// key is configured.
    pub fn client_factory(
        &self,
    ) -> Result<impl Fn() -> exa_client::Result<ExaClient> + Send + Sync + 'static> {
        let http_client = Client::builder()
            .timeout(self.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;
        let api_key = self.exa_api_key.clone();
        let base_url = self.exa_base_url.clone();

        Ok(move || {
            let api_key = api_key.clone().ok_or_else(ApiKey::missing)?;

            let client = ExaClient::with_key(api_key).with_http_client(http_client.clone());
            Ok(match &base_url {
                Some(url) => client.with_base_url(url.as_str()),
                None => client,
            })
        })
    }

    pub fn provider(&self) -> Result<Arc<dyn SearchProvider>> {
        Ok(Arc::new(LazyExaClient::new(self.client_factory()?)))
    }

    pub fn gateway(&self) -> Result<ExaCompliance> {
        Ok(ExaCompliance::new(self.provider()?).with_options(self.gateway_options()))
    }
}
