//! Compliance agent.
//!
//! Composes the gateway with the planners and inference rules into the
//! three user-facing operations. Gateway errors pass through untouched.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::checklist::make_checklist;
use crate::corpus::Corpus;
use crate::error::Result;
use crate::gateway::ExaCompliance;
use crate::inference::{infer_regulations, pick_bylaw_links, top_risks};
use crate::planner::make_permit_plan;
use crate::text::unique;
use crate::types::{
    Citation, InterviewMode, PermitPlan, SearchResult, SimilarProject, StructuredAnswer,
};

pub const DEFAULT_SEARCH_RESULTS: u32 = 8;
pub const DEFAULT_SIMILAR_RESULTS: u32 = 6;
pub const MAX_PERMIT_CLASSES: usize = 6;

pub const SEARCH_DISCLAIMER: &str = "Use these sources as a starting point. Confirm final requirements with your municipality and licensed professionals.";
pub const ANSWER_DISCLAIMER: &str = "AI-generated compliance guidance is directional only. Confirm all decisions with licensed professionals and governing authorities.";
pub const SIMILAR_DISCLAIMER: &str = "Similarity is semantic, not legal equivalence. Regulation requirements are inferred from source text and must be validated in full source documents.";

// =============================================================================
// Inputs
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchInput {
    pub project_prompt: String,
    #[serde(default)]
    pub num_results: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerInput {
    pub question: String,
    #[serde(default)]
    pub jurisdiction_hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarInput {
    pub seed_url: String,
    #[serde(default)]
    pub num_results: Option<u32>,
}

// =============================================================================
// Outputs
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub query_used: String,
    pub searched_domains: Vec<String>,
    pub results: Vec<SearchResult>,
    pub checklist: Vec<String>,
    pub permit_plan: PermitPlan,
    pub interview_mode: InterviewMode,
    pub disclaimer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerResponse {
    pub question: String,
    pub answer: StructuredAnswer,
    pub citations: Vec<Citation>,
    pub disclaimer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarResponse {
    pub seed_url: String,
    pub searched_domains: Vec<String>,
    pub results: Vec<SearchResult>,
    pub similar_projects: Vec<SimilarProject>,
    pub no_similar_found: bool,
    pub disclaimer: String,
}

// =============================================================================
// Agent
// =============================================================================

#[derive(Clone)]
pub struct ComplianceAgent {
    gateway: ExaCompliance,
}

impl ComplianceAgent {
    pub fn new(gateway: ExaCompliance) -> Self {
        Self { gateway }
    }

    /// Sources for a project plus the permit plan, checklist and interview
    /// summary derived from them.
    pub async fn search(&self, input: SearchInput) -> Result<SearchResponse> {
        let num_results = input.num_results.unwrap_or(DEFAULT_SEARCH_RESULTS);
        let search = self.gateway.search(&input.project_prompt, num_results).await?;

        let corpus = Corpus::new(&input.project_prompt, &search.results);
        let permit_plan = make_permit_plan(&corpus);
        let interview_mode = make_interview(&corpus, &search.results, &permit_plan);

        info!(
            results = search.results.len(),
            permits = permit_plan.permits.len(),
            "Compliance search complete"
        );

        Ok(SearchResponse {
            query_used: search.query_used,
            searched_domains: search.searched_domains,
            results: search.results,
            checklist: make_checklist(&input.project_prompt),
            permit_plan,
            interview_mode,
            disclaimer: SEARCH_DISCLAIMER.to_string(),
        })
    }

    pub async fn answer(&self, input: AnswerInput) -> Result<AnswerResponse> {
        let answer = self
            .gateway
            .answer(&input.question, input.jurisdiction_hint.as_deref())
            .await?;

        Ok(AnswerResponse {
            question: answer.question,
            answer: answer.answer,
            citations: answer.citations,
            disclaimer: ANSWER_DISCLAIMER.to_string(),
        })
    }

    /// Semantically similar projects, each tagged with the regulation
    /// families its text mentions.
    pub async fn similar(&self, input: SimilarInput) -> Result<SimilarResponse> {
        let num_results = input.num_results.unwrap_or(DEFAULT_SIMILAR_RESULTS);
        let similar = self.gateway.similar(&input.seed_url, num_results).await?;

        let similar_projects: Vec<SimilarProject> = similar
            .results
            .iter()
            .map(|result| SimilarProject {
                title: result.title.clone(),
                url: result.url.clone(),
                domain: result.domain.clone(),
                summary: result.snippet.clone(),
                similarity_score: result.score,
                required_regulations: infer_regulations(result),
            })
            .collect();

        Ok(SimilarResponse {
            seed_url: similar.seed_url,
            searched_domains: similar.searched_domains,
            results: similar.results,
            no_similar_found: similar_projects.is_empty(),
            similar_projects,
            disclaimer: SIMILAR_DISCLAIMER.to_string(),
        })
    }
}

fn make_interview(
    corpus: &Corpus,
    results: &[SearchResult],
    permit_plan: &PermitPlan,
) -> InterviewMode {
    let mut permit_classes = unique(permit_plan.permits.iter().map(|p| &p.permit_name));
    permit_classes.truncate(MAX_PERMIT_CLASSES);

    InterviewMode {
        permit_classes,
        key_bylaw_links: pick_bylaw_links(results),
        top_risks: top_risks(corpus),
    }
}
