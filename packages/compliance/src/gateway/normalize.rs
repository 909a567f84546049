//! Result normalization.
//!
//! Exa's result items are untyped JSON whose shape depends on which
//! contents were requested. Everything here is a pure function from a raw
//! payload to canonical [`SearchResult`] records, with every field
//! defaulted explicitly.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::error::{ComplianceError, Result};
use crate::types::SearchResult;

/// Snippet and citation text limit, in characters.
pub const SNIPPET_LIMIT: usize = 280;

const UNTITLED_SOURCE: &str = "Untitled source";
const FALLBACK_SNIPPET: &str = "Open source for compliance details.";

/// Pull the result items out of a search/findSimilar response.
///
/// Fails when `results` is missing or not a list. Items that are not
/// objects are skipped.
pub fn extract_results<'a>(
    response: &'a Value,
    api: &'static str,
) -> Result<Vec<&'a Map<String, Value>>> {
    let results = response
        .get("results")
        .and_then(Value::as_array)
        .ok_or(ComplianceError::UnexpectedResponseShape { api })?;

    Ok(results.iter().filter_map(Value::as_object).collect())
}

/// Normalize raw items, dropping non-http and duplicate URLs (first wins).
pub fn normalize_results(raw_results: &[&Map<String, Value>]) -> Vec<SearchResult> {
    let mut seen_urls: HashSet<&str> = HashSet::new();
    let mut normalized = Vec::new();

    for result in raw_results {
        let url = result.get("url").and_then(Value::as_str).unwrap_or("");
        if !url.starts_with("http") || !seen_urls.insert(url) {
            continue;
        }

        let title = match text(result.get("title")) {
            t if t.is_empty() => UNTITLED_SOURCE.to_string(),
            t => t,
        };

        let score = result
            .get("score")
            .and_then(Value::as_f64)
            .filter(|s| s.is_finite());

        let published_date = result
            .get("publishedDate")
            .and_then(Value::as_str)
            .map(String::from);

        normalized.push(SearchResult {
            title,
            url: url.to_string(),
            snippet: make_snippet(result),
            domain: domain_of(url),
            score,
            published_date,
        });
    }

    normalized
}

/// Highlights beat page text; page text beats the canned sentence.
pub fn make_snippet(result: &Map<String, Value>) -> String {
    let highlights = highlights(result.get("highlights"));
    if !highlights.is_empty() {
        return highlights.join(" ");
    }

    let collapsed = result
        .get("text")
        .and_then(Value::as_str)
        .unwrap_or("")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    if collapsed.is_empty() {
        return FALLBACK_SNIPPET.to_string();
    }

    if collapsed.chars().count() > SNIPPET_LIMIT {
        format!("{}...", truncate_chars(&collapsed, SNIPPET_LIMIT))
    } else {
        collapsed
    }
}

/// Highlights arrive either as a list (strings or `{highlight}` objects) or
/// as an object of strings / string lists.
fn highlights(value: Option<&Value>) -> Vec<String> {
    let fragments: Vec<&str> = match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.as_str()),
                Value::Object(obj) => obj.get("highlight").and_then(Value::as_str),
                _ => None,
            })
            .collect(),
        Some(Value::Object(map)) => map
            .values()
            .flat_map(|v| match v {
                Value::String(s) => vec![s.as_str()],
                Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
                _ => vec![],
            })
            .collect(),
        _ => vec![],
    };

    fragments
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Host of `url`, or `"unknown"`.
pub fn domain_of(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(String::from))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Trimmed string value, empty for anything that is not a string.
pub(crate) fn text(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

pub(crate) fn truncate_chars(value: &str, limit: usize) -> &str {
    match value.char_indices().nth(limit) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}
