//! Testing utilities including a scripted provider.
//!
//! Useful for exercising the gateway and the agent without network calls.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use exa_client::{AnswerRequest, FindSimilarRequest, SearchRequest};
use serde_json::{json, Value};

use crate::provider::SearchProvider;

type Scripted = Mutex<VecDeque<exa_client::Result<Value>>>;

/// A provider that replays queued responses per endpoint and records every
/// request it receives.
///
/// When a queue runs dry, search/similar return an empty result list and
/// answer returns an empty object.
#[derive(Default)]
pub struct MockProvider {
    search_responses: Scripted,
    similar_responses: Scripted,
    answer_responses: Scripted,

    search_requests: Mutex<Vec<SearchRequest>>,
    similar_requests: Mutex<Vec<FindSimilarRequest>>,
    answer_requests: Mutex<Vec<AnswerRequest>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next `/search` response.
    pub fn with_search(self, response: exa_client::Result<Value>) -> Self {
        self.search_responses.lock().unwrap().push_back(response);
        self
    }

    /// Queue the next `/findSimilar` response.
    pub fn with_similar(self, response: exa_client::Result<Value>) -> Self {
        self.similar_responses.lock().unwrap().push_back(response);
        self
    }

    /// Queue the next `/answer` response.
    pub fn with_answer(self, response: exa_client::Result<Value>) -> Self {
        self.answer_responses.lock().unwrap().push_back(response);
        self
    }

    pub fn search_requests(&self) -> Vec<SearchRequest> {
        self.search_requests.lock().unwrap().clone()
    }

    pub fn similar_requests(&self) -> Vec<FindSimilarRequest> {
        self.similar_requests.lock().unwrap().clone()
    }

    pub fn answer_requests(&self) -> Vec<AnswerRequest> {
        self.answer_requests.lock().unwrap().clone()
    }

    fn next(queue: &Scripted, default: Value) -> exa_client::Result<Value> {
        queue.lock().unwrap().pop_front().unwrap_or(Ok(default))
    }
}

#[async_trait]
impl SearchProvider for MockProvider {
    async fn search(&self, request: &SearchRequest) -> exa_client::Result<Value> {
        self.search_requests.lock().unwrap().push(request.clone());
        Self::next(&self.search_responses, json!({ "results": [] }))
    }

    async fn find_similar(&self, request: &FindSimilarRequest) -> exa_client::Result<Value> {
        self.similar_requests.lock().unwrap().push(request.clone());
        Self::next(&self.similar_responses, json!({ "results": [] }))
    }

    async fn answer(&self, request: &AnswerRequest) -> exa_client::Result<Value> {
        self.answer_requests.lock().unwrap().push(request.clone());
        Self::next(&self.answer_responses, json!({}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exa_client::ExaError;

    #[tokio::test]
    async fn test_replays_in_order_then_defaults() {
        let provider = MockProvider::new()
            .with_search(Err(ExaError::Network("reset".into())))
            .with_search(Ok(json!({ "results": [{ "url": "https://a.ca" }] })));
        let request = SearchRequest::new("q", 3);

        assert!(provider.search(&request).await.is_err());
        assert_eq!(
            provider.search(&request).await.unwrap()["results"][0]["url"],
            "https://a.ca"
        );
        assert_eq!(
            provider.search(&request).await.unwrap(),
            json!({ "results": [] })
        );
        assert_eq!(provider.search_requests().len(), 3);
    }
}
