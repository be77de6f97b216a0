//! Web search trait and the Serper-backed implementation.

use async_trait::async_trait;
use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::types::search::SearchResult;

/// Web search capability.
///
/// A single search attempt: one query, a bounded result count. Fallback
/// strategy lives in the pipeline's orchestrator, not here.
///
/// # Implementations
///
/// - `SerperSearchProvider` - Serper (Google Search) API
/// - `MockSearchProvider` - for testing
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Search the web, requesting up to `count` results.
    ///
    /// Provider ordering is preserved. Errors on network failure or a
    /// non-success HTTP status.
    async fn search(&self, query: &str, count: usize) -> Result<Vec<SearchResult>>;
}

/// Serper-backed search provider.
///
/// Uses Serper's Google Search API for product lookup.
pub struct SerperSearchProvider {
    api_key: crate::security::SecretString,
    client: reqwest::Client,
    base_url: String,
}

impl SerperSearchProvider {
    /// Create a new Serper search provider.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: crate::security::SecretString::new(api_key),
            client: reqwest::Client::new(),
            base_url: "https://google.serper.dev".to_string(),
        }
    }

    /// Set a custom base URL (for proxies or test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl SearchProvider for SerperSearchProvider {
    async fn search(&self, query: &str, count: usize) -> Result<Vec<SearchResult>> {
        #[derive(serde::Serialize)]
        struct Request<'a> {
            q: &'a str,
            num: usize,
        }

        #[derive(serde::Deserialize)]
        struct Response {
            #[serde(default)]
            organic: Vec<OrganicResult>,
        }

        #[derive(serde::Deserialize)]
        struct OrganicResult {
            #[serde(default)]
            title: String,
            #[serde(default)]
            link: String,
            #[serde(default)]
            snippet: String,
        }

        debug!(query = %query, count = count, "Serper search starting");

        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .header("X-API-KEY", self.api_key.expose())
            .header("Content-Type", "application/json")
            .json(&Request { q: query, num: count })
            .send()
            .await
            .map_err(|e| AnalysisError::Search(Box::new(e)))?;

        if !response.status().is_success() {
            return Err(AnalysisError::Search(Box::new(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Serper API error: {}", response.status()),
            ))));
        }

        let serper_response: Response = response
            .json()
            .await
            .map_err(|e| AnalysisError::Search(Box::new(e)))?;

        let results = serper_response
            .organic
            .into_iter()
            .map(|r| SearchResult::new(r.title, r.link, r.snippet))
            .collect::<Vec<_>>();

        debug!(query = %query, returned = results.len(), "Serper search complete");

        Ok(results)
    }
}
