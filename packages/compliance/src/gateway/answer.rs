//! Structured answer and citation normalization.
//!
//! A partial or malformed answer payload is never an error: each field
//! falls back independently to a fixed value, so callers always get a
//! complete [`StructuredAnswer`].

use std::collections::HashSet;

use indexmap::IndexSet;
use serde_json::Value;

use super::normalize::{domain_of, text, truncate_chars, SNIPPET_LIMIT};
use crate::types::{Citation, StructuredAnswer};

const FALLBACK_CONCISE_ANSWER: &str =
    "I could not structure a full answer from Exa for this question. Please rephrase and retry.";
const FALLBACK_LIKELY_PERMITS: &[&str] = &["Building permit", "Development/zoning review"];
const FALLBACK_GOVERNING_BODIES: &[&str] = &["Municipality", "Provincial code authority"];
const FALLBACK_CRITICAL_RISKS: &[&str] = &[
    "Zoning mismatch",
    "Fire/life-safety noncompliance",
    "Permit sequencing delays",
];
const FALLBACK_NEXT_STEP: &str =
    "Confirm lot zoning and request a pre-application review with the municipality.";

const UNTITLED_CITATION: &str = "Untitled citation";
const FALLBACK_CITATION_SNIPPET: &str = "Open citation source for details.";

/// The answer every field falls back to.
pub fn fallback_answer() -> StructuredAnswer {
    StructuredAnswer {
        concise_answer: FALLBACK_CONCISE_ANSWER.to_string(),
        likely_permits: owned(FALLBACK_LIKELY_PERMITS),
        governing_bodies: owned(FALLBACK_GOVERNING_BODIES),
        critical_risks: owned(FALLBACK_CRITICAL_RISKS),
        next_step: FALLBACK_NEXT_STEP.to_string(),
    }
}

/// `response.answer` when present and not null, otherwise the whole response.
pub fn answer_payload(response: &Value) -> &Value {
    response
        .get("answer")
        .filter(|v| !v.is_null())
        .unwrap_or(response)
}

pub fn normalize_answer(payload: &Value) -> StructuredAnswer {
    let fallback = fallback_answer();

    let record = match payload {
        Value::String(s) => {
            let concise = s.trim();
            return StructuredAnswer {
                concise_answer: non_empty_or(concise.to_string(), fallback.concise_answer.clone()),
                ..fallback
            };
        }
        Value::Object(record) => record,
        _ => return fallback,
    };

    StructuredAnswer {
        concise_answer: non_empty_or(text(record.get("conciseAnswer")), fallback.concise_answer),
        likely_permits: list_or(text_list(record.get("likelyPermits")), fallback.likely_permits),
        governing_bodies: list_or(
            text_list(record.get("governingBodies")),
            fallback.governing_bodies,
        ),
        critical_risks: list_or(text_list(record.get("criticalRisks")), fallback.critical_risks),
        next_step: non_empty_or(text(record.get("nextStep")), fallback.next_step),
    }
}

/// Keep citations with a usable, unseen http(s) URL (`url`, else `id`).
pub fn normalize_citations(citations: Option<&Value>) -> Vec<Citation> {
    let Some(citations) = citations.and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut seen_urls: HashSet<String> = HashSet::new();
    let mut parsed = Vec::new();

    for citation in citations.iter().filter_map(Value::as_object) {
        let url = non_empty_or(text(citation.get("url")), text(citation.get("id")));
        if !url.starts_with("http") || seen_urls.contains(&url) {
            continue;
        }
        seen_urls.insert(url.clone());

        let published_date = Some(text(citation.get("publishedDate"))).filter(|d| !d.is_empty());
        let body = text(citation.get("text"));

        parsed.push(Citation {
            title: non_empty_or(text(citation.get("title")), UNTITLED_CITATION.to_string()),
            domain: domain_of(&url),
            url,
            published_date,
            text_snippet: non_empty_or(
                truncate_chars(&body, SNIPPET_LIMIT).to_string(),
                FALLBACK_CITATION_SNIPPET.to_string(),
            ),
        });
    }

    parsed
}

/// Strings only, trimmed, blanks dropped, deduplicated in insertion order.
fn text_list(value: Option<&Value>) -> Vec<String> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

fn non_empty_or(value: String, fallback: String) -> String {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

fn list_or(values: Vec<String>, fallback: Vec<String>) -> Vec<String> {
    if values.is_empty() {
        fallback
    } else {
        values
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_likely_permits_falls_back_per_field() {
        let answer = normalize_answer(&json!({
            "conciseAnswer": "  A building permit and a development permit are required. ",
            "governingBodies": ["City of Vancouver"],
            "criticalRisks": [],
            "nextStep": "Book an enquiry centre meeting."
        }));

        assert_eq!(
            answer.concise_answer,
            "A building permit and a development permit are required."
        );
        assert_eq!(
            answer.likely_permits,
            vec!["Building permit", "Development/zoning review"]
        );
        assert_eq!(answer.governing_bodies, vec!["City of Vancouver"]);
        assert_eq!(answer.critical_risks.len(), 3);
        assert_eq!(answer.next_step, "Book an enquiry centre meeting.");
    }

    #[test]
    fn test_lists_filtered_trimmed_and_deduplicated() {
        let answer = normalize_answer(&json!({
            "likelyPermits": [" Building permit", "Building permit", 7, "", "Plumbing permit "]
        }));

        assert_eq!(answer.likely_permits, vec!["Building permit", "Plumbing permit"]);
        assert_eq!(answer.concise_answer, FALLBACK_CONCISE_ANSWER);
    }

    #[test]
    fn test_wrong_typed_fields_fall_back() {
        let answer = normalize_answer(&json!({
            "conciseAnswer": 42,
            "likelyPermits": "Building permit",
            "nextStep": ["call"]
        }));

        assert_eq!(answer.concise_answer, FALLBACK_CONCISE_ANSWER);
        assert_eq!(answer.likely_permits.len(), 2);
        assert_eq!(answer.next_step, FALLBACK_NEXT_STEP);
    }

    #[test]
    fn test_string_payload_becomes_concise_answer() {
        let answer = normalize_answer(&json!("  You need a building permit.  "));
        assert_eq!(answer.concise_answer, "You need a building permit.");
        assert_eq!(answer.governing_bodies, owned(FALLBACK_GOVERNING_BODIES));

        let blank = normalize_answer(&json!("   "));
        assert_eq!(blank, fallback_answer());
    }

    #[test]
    fn test_non_object_payload_is_full_fallback() {
        assert_eq!(normalize_answer(&json!(null)), fallback_answer());
        assert_eq!(normalize_answer(&json!([1, 2])), fallback_answer());
    }

    #[test]
    fn test_answer_payload_selection() {
        let nested = json!({ "answer": { "conciseAnswer": "x" }, "citations": [] });
        assert_eq!(answer_payload(&nested), &json!({ "conciseAnswer": "x" }));

        let null_answer = json!({ "answer": null, "conciseAnswer": "y" });
        assert_eq!(answer_payload(&null_answer), &null_answer);
    }

    #[test]
    fn test_citations_normalized() {
        let long_text = "x".repeat(400);
        let citations = normalize_citations(Some(&json!([
            { "url": "https://vancouver.ca/permits", "title": " Permits ", "text": long_text },
            { "id": "https://bccodes.ca/vbbl", "publishedDate": " 2023-01-01 " },
            { "url": "https://vancouver.ca/permits", "title": "Duplicate" },
            { "url": "not-a-url" },
            "junk"
        ])));

        assert_eq!(citations.len(), 2);
        assert_eq!(citations[0].title, "Permits");
        assert_eq!(citations[0].domain, "vancouver.ca");
        assert_eq!(citations[0].text_snippet.chars().count(), SNIPPET_LIMIT);
        assert_eq!(citations[0].published_date, None);

        assert_eq!(citations[1].url, "https://bccodes.ca/vbbl");
        assert_eq!(citations[1].title, "Untitled citation");
        assert_eq!(citations[1].published_date.as_deref(), Some("2023-01-01"));
        assert_eq!(citations[1].text_snippet, "Open citation source for details.");
    }

    #[test]
    fn test_citations_not_a_list() {
        assert!(normalize_citations(None).is_empty());
        assert!(normalize_citations(Some(&json!({ "url": "https://a.ca" }))).is_empty());
    }
}
