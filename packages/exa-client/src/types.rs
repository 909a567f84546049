//! Exa API request types.
//!
//! Responses are deliberately left as `serde_json::Value`: Exa's result
//! shape varies with the requested contents, so callers normalize it.

use serde::Serialize;
use serde_json::Value;

// =============================================================================
// Contents
// =============================================================================

/// Search strategy used by `/search`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Auto,
    Neural,
    Keyword,
    Fast,
}

/// Page text retrieval, either a plain toggle or a length-bounded request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TextContents {
    Enabled(bool),
    Bounded {
        #[serde(rename = "maxCharacters")]
        max_characters: u32,
    },
}

/// The `contents` block shared by `/search` and `/findSimilar`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentsOptions {
    pub text: TextContents,
}

impl ContentsOptions {
    /// Full page text cut at `max_characters`.
    pub fn bounded_text(max_characters: u32) -> Self {
        Self {
            text: TextContents::Bounded { max_characters },
        }
    }

    /// Full page text without a length bound.
    pub fn full_text() -> Self {
        Self {
            text: TextContents::Enabled(true),
        }
    }
}

// =============================================================================
// Search
// =============================================================================

/// Body for `POST /search`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,

    pub num_results: u32,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub search_type: Option<SearchType>,

    /// Restrict results to these domains
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include_domains: Vec<String>,

    /// Omitted entirely for metadata-only search
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<ContentsOptions>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, num_results: u32) -> Self {
        Self {
            query: query.into(),
            num_results,
            search_type: None,
            include_domains: Vec::new(),
            contents: None,
        }
    }

    pub fn search_type(mut self, search_type: SearchType) -> Self {
        self.search_type = Some(search_type);
        self
    }

    pub fn include_domains(mut self, domains: &[String]) -> Self {
        self.include_domains = domains.to_vec();
        self
    }

    pub fn contents(mut self, contents: Option<ContentsOptions>) -> Self {
        self.contents = contents;
        self
    }
}

// =============================================================================
// Find Similar
// =============================================================================

/// Body for `POST /findSimilar`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindSimilarRequest {
    pub url: String,

    pub num_results: u32,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include_domains: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<ContentsOptions>,
}

impl FindSimilarRequest {
    pub fn new(url: impl Into<String>, num_results: u32) -> Self {
        Self {
            url: url.into(),
            num_results,
            include_domains: Vec::new(),
            contents: None,
        }
    }

    pub fn include_domains(mut self, domains: &[String]) -> Self {
        self.include_domains = domains.to_vec();
        self
    }

    pub fn contents(mut self, contents: Option<ContentsOptions>) -> Self {
        self.contents = contents;
        self
    }
}

// =============================================================================
// Answer
// =============================================================================

/// Body for `POST /answer`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRequest {
    pub query: String,

    /// Include full source text in the returned citations
    pub text: bool,

    /// JSON schema the answer must conform to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<Value>,
}

impl AnswerRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            text: false,
            output_schema: None,
        }
    }

    pub fn text(mut self, text: bool) -> Self {
        self.text = text;
        self
    }

    pub fn output_schema(mut self, schema: Value) -> Self {
        self.output_schema = Some(schema);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_request_wire_shape() {
        let domains = vec!["vancouver.ca".to_string()];
        let request = SearchRequest::new("zoning kitsilano", 8)
            .search_type(SearchType::Auto)
            .include_domains(&domains)
            .contents(Some(ContentsOptions::bounded_text(10_000)));

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "query": "zoning kitsilano",
                "numResults": 8,
                "type": "auto",
                "includeDomains": ["vancouver.ca"],
                "contents": { "text": { "maxCharacters": 10000 } }
            })
        );
    }

    #[test]
    fn test_metadata_only_search_omits_contents() {
        let request = SearchRequest::new("q", 3);
        let value = serde_json::to_value(&request).unwrap();

        assert!(value.get("contents").is_none());
        assert!(value.get("includeDomains").is_none());
        assert!(value.get("type").is_none());
    }

    #[test]
    fn test_find_similar_full_text() {
        let request = FindSimilarRequest::new("https://vancouver.ca/permits", 6)
            .contents(Some(ContentsOptions::full_text()));

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "url": "https://vancouver.ca/permits",
                "numResults": 6,
                "contents": { "text": true }
            })
        );
    }

    #[test]
    fn test_answer_request_with_schema() {
        let request = AnswerRequest::new("Do I need a permit?")
            .text(true)
            .output_schema(json!({ "type": "object" }));
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["text"], json!(true));
        assert_eq!(value["outputSchema"]["type"], json!("object"));
    }
}
