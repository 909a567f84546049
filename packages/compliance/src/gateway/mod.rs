//! Upstream search gateway.
//!
//! Wraps a single [`SearchProvider`] and turns its untyped responses into
//! canonical records. `search` and `similar` walk a fallback ladder of
//! progressively cheaper request variants because full-page text fetching
//! is the least reliable part of the provider:
//!
//! 1. text bounded to `max_text_characters`
//! 2. text without a bound
//! 3. no text at all (metadata only)
//!
//! Attempts run strictly in order and stop at the first success. `answer`
//! is a single request.

pub mod answer;
pub mod normalize;

use std::future::Future;
use std::sync::Arc;

use exa_client::{
    AnswerRequest, ContentsOptions, ExaError, FindSimilarRequest, OutputSchema, SearchRequest,
    SearchType,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ComplianceError, Result};
use crate::provider::SearchProvider;
use crate::types::{Citation, SearchResult, StructuredAnswer};

use self::answer::{answer_payload, normalize_answer, normalize_citations};
use self::normalize::{extract_results, normalize_results};

pub const PREFERRED_COMPLIANCE_DOMAINS: &[&str] = &[
    "vancouver.ca",
    "bccodes.ca",
    "bclaws.gov.bc.ca",
    "www2.gov.bc.ca",
    "nrc.canada.ca",
    "laws-lois.justice.gc.ca",
];

pub const COMPLIANCE_QUERY_HINT: &str =
    "construction compliance regulations permits zoning building code occupancy fire safety";

pub const DEFAULT_JURISDICTION_HINT: &str = "Kitsilano, Vancouver, BC, Canada";

const DEFAULT_MAX_TEXT_CHARACTERS: u32 = 10_000;

/// Tunables for the gateway. Defaults target Vancouver / BC sources.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayOptions {
    /// Domain allow-list sent with every search/similar request
    pub preferred_domains: Vec<String>,
    /// Prepended to every project prompt
    pub query_hint: String,
    /// Used when an answer request carries no jurisdiction
    pub default_jurisdiction_hint: String,
    /// Text bound for the richest ladder variant
    pub max_text_characters: u32,
}

impl Default for GatewayOptions {
    fn default() -> Self {
        Self {
            preferred_domains: PREFERRED_COMPLIANCE_DOMAINS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            query_hint: COMPLIANCE_QUERY_HINT.to_string(),
            default_jurisdiction_hint: DEFAULT_JURISDICTION_HINT.to_string(),
            max_text_characters: DEFAULT_MAX_TEXT_CHARACTERS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    pub query_used: String,
    pub searched_domains: Vec<String>,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarOutcome {
    pub seed_url: String,
    pub searched_domains: Vec<String>,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerOutcome {
    pub question: String,
    pub answer: StructuredAnswer,
    pub citations: Vec<Citation>,
}

/// Compliance-flavoured access to the search provider.
#[derive(Clone)]
pub struct ExaCompliance {
    provider: Arc<dyn SearchProvider>,
    options: GatewayOptions,
}

impl ExaCompliance {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self {
            provider,
            options: GatewayOptions::default(),
        }
    }

    pub fn with_options(mut self, options: GatewayOptions) -> Self {
        self.options = options;
        self
    }

    pub async fn search(&self, project_prompt: &str, num_results: u32) -> Result<SearchOutcome> {
        let query_used = self.build_search_query(project_prompt);

        let requests: Vec<SearchRequest> = self
            .content_ladder()
            .into_iter()
            .map(|contents| {
                SearchRequest::new(query_used.clone(), num_results)
                    .search_type(SearchType::Auto)
                    .include_domains(&self.options.preferred_domains)
                    .contents(contents)
            })
            .collect();

        let provider = self.provider.as_ref();
        let response = with_attempts(
            &requests,
            |request| provider.search(request),
            "Unable to search compliance sources with Exa.",
        )
        .await?;

        let results = normalize_results(&extract_results(&response, "search")?);
        debug!(count = results.len(), "Normalized compliance search results");

        Ok(SearchOutcome {
            query_used,
            searched_domains: self.options.preferred_domains.clone(),
            results,
        })
    }

    pub async fn answer(
        &self,
        question: &str,
        jurisdiction_hint: Option<&str>,
    ) -> Result<AnswerOutcome> {
        let request = AnswerRequest::new(self.build_answer_query(question, jurisdiction_hint))
            .text(true)
            .output_schema(StructuredAnswer::output_schema());

        let response = self
            .provider
            .answer(&request)
            .await
            .map_err(normalize_exa_error)?;

        Ok(AnswerOutcome {
            question: question.to_string(),
            answer: normalize_answer(answer_payload(&response)),
            citations: normalize_citations(response.get("citations")),
        })
    }

    pub async fn similar(&self, seed_url: &str, num_results: u32) -> Result<SimilarOutcome> {
        let requests: Vec<FindSimilarRequest> = self
            .content_ladder()
            .into_iter()
            .map(|contents| {
                FindSimilarRequest::new(seed_url, num_results)
                    .include_domains(&self.options.preferred_domains)
                    .contents(contents)
            })
            .collect();

        let provider = self.provider.as_ref();
        let response = with_attempts(
            &requests,
            |request| provider.find_similar(request),
            "Unable to find similar compliance sources with Exa.",
        )
        .await?;

        Ok(SimilarOutcome {
            seed_url: seed_url.to_string(),
            searched_domains: self.options.preferred_domains.clone(),
            results: normalize_results(&extract_results(&response, "findSimilar")?),
        })
    }

    fn content_ladder(&self) -> [Option<ContentsOptions>; 3] {
        [
            Some(ContentsOptions::bounded_text(self.options.max_text_characters)),
            Some(ContentsOptions::full_text()),
            None,
        ]
    }

    fn build_search_query(&self, project_prompt: &str) -> String {
        format!("{} {}", self.options.query_hint, project_prompt)
    }

    fn build_answer_query(&self, question: &str, jurisdiction_hint: Option<&str>) -> String {
        let jurisdiction = jurisdiction_hint
            .map(str::trim)
            .filter(|j| !j.is_empty())
            .unwrap_or(&self.options.default_jurisdiction_hint);

        [
            format!("Jurisdiction: {}.", jurisdiction),
            "Answer as a construction compliance analyst.".to_string(),
            "Prioritize zoning, permits, building code, fire/life safety, and occupancy requirements."
                .to_string(),
            question.trim().to_string(),
        ]
        .join(" ")
    }
}

/// Run `requests` in order until one succeeds.
///
/// Returns the last normalized error when every variant fails. A
/// configuration error ends the ladder immediately.
async fn with_attempts<'a, R, F, Fut>(
    requests: &'a [R],
    mut run: F,
    fallback_message: &str,
) -> Result<Value>
where
    F: FnMut(&'a R) -> Fut,
    Fut: Future<Output = exa_client::Result<Value>>,
{
    let mut last_error = None;

    for (index, request) in requests.iter().enumerate() {
        match run(request).await {
            Ok(value) => {
                debug!(attempt = index + 1, "Exa attempt succeeded");
                return Ok(value);
            }
            Err(e) => {
                let error = normalize_exa_error(e);
                warn!(attempt = index + 1, error = %error, "Exa attempt failed");
                if !error.is_retryable() {
                    return Err(error);
                }
                last_error = Some(error);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| ComplianceError::Provider(fallback_message.to_string())))
}

/// Collapse client errors into the gateway's error type.
pub fn normalize_exa_error(error: ExaError) -> ComplianceError {
    if error.is_unreadable() {
        return ComplianceError::UnreadableResponse;
    }

    match error {
        ExaError::Config(message) => ComplianceError::Config(message),
        other => ComplianceError::Provider(other.to_string()),
    }
}
