//! Search provider seam.
//!
//! The gateway talks to the upstream provider only through [`SearchProvider`],
//! so tests inject `testing::MockProvider` and the binary injects a
//! [`LazyExaClient`].

use async_trait::async_trait;
use exa_client::{AnswerRequest, ExaClient, FindSimilarRequest, SearchRequest};
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::debug;

/// Raw access to an Exa-compatible provider. Payloads are untyped JSON.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> exa_client::Result<Value>;

    async fn find_similar(&self, request: &FindSimilarRequest) -> exa_client::Result<Value>;

    async fn answer(&self, request: &AnswerRequest) -> exa_client::Result<Value>;
}

#[async_trait]
impl SearchProvider for ExaClient {
    async fn search(&self, request: &SearchRequest) -> exa_client::Result<Value> {
        ExaClient::search(self, request).await
    }

    async fn find_similar(&self, request: &FindSimilarRequest) -> exa_client::Result<Value> {
        ExaClient::find_similar(self, request).await
    }

    async fn answer(&self, request: &AnswerRequest) -> exa_client::Result<Value> {
        ExaClient::answer(self, request).await
    }
}

/// Builds the real client; called until it succeeds once.
pub type ClientFactory = Box<dyn Fn() -> exa_client::Result<ExaClient> + Send + Sync>;

/// Exa client built on first use and shared for the life of the process.
///
/// A missing credential surfaces as `ExaError::Config` on the first call,
/// not at construction. Failed initialization is not cached.
pub struct LazyExaClient {
    factory: ClientFactory,
    client: OnceCell<ExaClient>,
}

impl LazyExaClient {
    pub fn new(
        factory: impl Fn() -> exa_client::Result<ExaClient> + Send + Sync + 'static,
    ) -> Self {
        Self {
            factory: Box::new(factory),
            client: OnceCell::new(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.client.initialized()
    }

    async fn client(&self) -> exa_client::Result<&ExaClient> {
        self.client
            .get_or_try_init(|| async {
                debug!("Initializing Exa client");
                (self.factory)()
            })
            .await
    }
}

#[async_trait]
impl SearchProvider for LazyExaClient {
    async fn search(&self, request: &SearchRequest) -> exa_client::Result<Value> {
        self.client().await?.search(request).await
    }

    async fn find_similar(&self, request: &FindSimilarRequest) -> exa_client::Result<Value> {
        self.client().await?.find_similar(request).await
    }

    async fn answer(&self, request: &AnswerRequest) -> exa_client::Result<Value> {
        self.client().await?.answer(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exa_client::ExaError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_missing_credential_fails_on_first_call() {
        let lazy = LazyExaClient::new(|| Err(ExaError::Config("EXA_API_KEY is missing.".into())));
        assert!(!lazy.is_initialized());

        let err = lazy
            .search(&SearchRequest::new("zoning", 3))
            .await
            .unwrap_err();

        assert!(matches!(err, ExaError::Config(_)));
        assert!(!lazy.is_initialized());
    }

    #[tokio::test]
    async fn test_client_built_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let lazy = LazyExaClient::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(ExaClient::new("exa-test"))
        });

        lazy.client().await.unwrap();
        lazy.client().await.unwrap();

        assert!(lazy.is_initialized());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_init_is_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let lazy = LazyExaClient::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(ExaError::Config("missing".into()))
        });

        assert!(lazy.client().await.is_err());
        assert!(lazy.client().await.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
