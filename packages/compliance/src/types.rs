//! Canonical records produced per request.
//!
//! Field names serialize in camelCase so the JSON matches what the
//! front-end already consumes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// =============================================================================
// Gateway output
// =============================================================================

/// A normalized search hit. `url` is unique within a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
}

/// The answer shape requested from the provider and returned to callers.
///
/// Also the source of the provider output schema, so field names here are
/// the contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StructuredAnswer {
    pub concise_answer: String,
    pub likely_permits: Vec<String>,
    pub governing_bodies: Vec<String>,
    pub critical_risks: Vec<String>,
    pub next_step: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    pub title: String,
    pub url: String,
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    pub text_snippet: String,
}

// =============================================================================
// Planning output
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermitPlanItem {
    pub permit_name: String,
    pub category: String,
    pub estimated_wait_weeks: u32,
    pub estimated_wait_text: String,
    /// 1-based submission order
    pub priority_rank: usize,
    pub why_start_early: String,
    pub required_information: Vec<String>,
}

/// A document or fact needed by one or more permits.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossPermitInfoItem {
    pub info: String,
    pub used_by_permits: Vec<String>,
    pub longest_wait_weeks: u32,
    pub effort_rank: usize,
    pub shared_across_permits: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermitPlan {
    pub permits: Vec<PermitPlanItem>,
    pub information_across_permits: Vec<CrossPermitInfoItem>,
    pub sequencing_note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BylawLink {
    pub title: String,
    pub url: String,
    pub domain: String,
}

/// Condensed view for the guided interview panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewMode {
    pub permit_classes: Vec<String>,
    pub key_bylaw_links: Vec<BylawLink>,
    pub top_risks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarProject {
    pub title: String,
    pub url: String,
    pub domain: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f64>,
    pub required_regulations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_result_omits_missing_optionals() {
        let result = SearchResult {
            title: "Zoning and Development By-law".into(),
            url: "https://vancouver.ca/zoning".into(),
            snippet: "RS zones".into(),
            domain: "vancouver.ca".into(),
            score: None,
            published_date: None,
        };

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "title": "Zoning and Development By-law",
                "url": "https://vancouver.ca/zoning",
                "snippet": "RS zones",
                "domain": "vancouver.ca"
            })
        );
    }

    #[test]
    fn test_plan_item_uses_camel_case() {
        let item = PermitPlanItem {
            permit_name: "Building Permit".into(),
            category: "Building Code".into(),
            estimated_wait_weeks: 12,
            estimated_wait_text: "8-16 weeks".into(),
            priority_rank: 1,
            why_start_early: "why".into(),
            required_information: vec![],
        };
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["permitName"], "Building Permit");
        assert_eq!(value["estimatedWaitWeeks"], 12);
        assert_eq!(value["priorityRank"], 1);
    }
}
