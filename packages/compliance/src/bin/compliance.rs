//! Command-line front end for the compliance agent.
//!
//! Prints pretty JSON to stdout. Logs go to stderr so the output can be
//! piped straight into other tools.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use compliance::{AnswerInput, ComplianceAgent, ComplianceConfig, SearchInput, SimilarInput};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "compliance")]
#[command(about = "Construction permit research backed by Exa search")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search compliance sources and build a permit plan for a project
    Search {
        #[arg(long, value_parser = parse_request_text)]
        prompt: String,
        #[arg(long, value_parser = clap::value_parser!(u32).range(3..=12))]
        num_results: Option<u32>,
    },

    /// Ask a compliance question and get a structured answer
    Answer {
        #[arg(long, value_parser = parse_request_text)]
        question: String,
        #[arg(long, value_parser = parse_jurisdiction)]
        jurisdiction: Option<String>,
    },

    /// Find projects similar to a seed URL
    Similar {
        #[arg(long, value_parser = parse_seed_url)]
        seed_url: String,
        #[arg(long, value_parser = clap::value_parser!(u32).range(3..=12))]
        num_results: Option<u32>,
    },
}

fn bounded(value: &str, min: usize, max: usize) -> Result<String, String> {
    let trimmed = value.trim();
    let length = trimmed.chars().count();
    if (min..=max).contains(&length) {
        Ok(trimmed.to_string())
    } else {
        Err(format!("must be {} to {} characters (got {})", min, max, length))
    }
}

fn parse_request_text(value: &str) -> Result<String, String> {
    bounded(value, 10, 500)
}

fn parse_jurisdiction(value: &str) -> Result<String, String> {
    bounded(value, 3, 120)
}

fn parse_seed_url(value: &str) -> Result<String, String> {
    url::Url::parse(value.trim())
        .map(|_| value.trim().to_string())
        .map_err(|e| format!("must be an absolute URL: {}", e))
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize response")?;
    println!("{}", json);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,compliance=debug,exa_client=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();

    let config = ComplianceConfig::from_env().context("Failed to load configuration")?;
    let agent = ComplianceAgent::new(config.gateway()?);

    match cli.command {
        Commands::Search {
            prompt,
            num_results,
        } => {
            let response = agent
                .search(SearchInput {
                    project_prompt: prompt,
                    num_results,
                })
                .await?;
            print_json(&response)
        }
        Commands::Answer {
            question,
            jurisdiction,
        } => {
            let response = agent
                .answer(AnswerInput {
                    question,
                    jurisdiction_hint: jurisdiction,
                })
                .await?;
            print_json(&response)
        }
        Commands::Similar {
            seed_url,
            num_results,
        } => {
            let response = agent
                .similar(SimilarInput {
                    seed_url,
                    num_results,
                })
                .await?;
            print_json(&response)
        }
    }
}
