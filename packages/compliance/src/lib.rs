//! Construction compliance research.
//!
//! Searches regulation sources through Exa, then turns the hits into a
//! permit plan ranked by municipal review time, a pre-submission
//! checklist, and a short interview summary of risks and bylaw links.
//!
//! # Example
//!
//! ```rust,ignore
//! use compliance::{ComplianceAgent, ComplianceConfig, SearchInput};
//!
//! let config = ComplianceConfig::from_env()?;
//! let agent = ComplianceAgent::new(config.gateway()?);
//!
//! let response = agent
//!     .search(SearchInput {
//!         project_prompt: "4 storey condo in Kitsilano, Vancouver BC".into(),
//!         num_results: None,
//!     })
//!     .await?;
//!
//! for permit in &response.permit_plan.permits {
//!     println!("{}. {} ({})", permit.priority_rank, permit.permit_name, permit.estimated_wait_text);
//! }
//! ```

pub mod agent;
pub mod aggregator;
pub mod checklist;
pub mod config;
pub mod corpus;
pub mod error;
pub mod gateway;
pub mod inference;
pub mod permits;
pub mod planner;
pub mod provider;
pub mod testing;
pub mod text;
pub mod types;

pub use agent::{
    AnswerInput, AnswerResponse, ComplianceAgent, SearchInput, SearchResponse, SimilarInput,
    SimilarResponse,
};
pub use config::ComplianceConfig;
pub use error::{ComplianceError, Result};
pub use gateway::{AnswerOutcome, ExaCompliance, GatewayOptions, SearchOutcome, SimilarOutcome};
pub use provider::{LazyExaClient, SearchProvider};
pub use types::*;
