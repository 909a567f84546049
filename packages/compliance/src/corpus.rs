//! The text basis for rule matching.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::SearchResult;

/// "4 stories", "6 storey" style mid-rise mentions (4 to 9 floors).
static MID_RISE_STORIES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[4-9]\s*stor(y|ies)\b").unwrap());

/// Lower-cased prompt plus every result title and snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    pub normalized_prompt: String,
    pub text: String,
}

impl Corpus {
    pub fn new(project_prompt: &str, results: &[SearchResult]) -> Self {
        let normalized_prompt = project_prompt.to_lowercase();

        let text = std::iter::once(normalized_prompt.clone())
            .chain(
                results
                    .iter()
                    .map(|r| format!("{} {}", r.title, r.snippet).to_lowercase()),
            )
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            normalized_prompt,
            text,
        }
    }

    /// Only the prompt counts here: result text routinely quotes storey
    /// limits that say nothing about this project.
    pub fn prompt_mentions_mid_rise(&self) -> bool {
        MID_RISE_STORIES.is_match(&self.normalized_prompt)
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.text.contains(needle)
    }
}
