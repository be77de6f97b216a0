//! Testing utilities including mock implementations.
//!
//! These let applications (and this crate's own tests) exercise the
//! pipeline without making real vision, search, fetch, or synthesis
//! calls. Each mock records the calls made to it for assertions.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::error::{AnalysisError, Result};
use crate::traits::{
    fetcher::ContentFetcher, search::SearchProvider, synthesis::SynthesisService,
    vision::VisionService,
};
use crate::types::{page::ScrapedPage, search::SearchResult};

fn unavailable(what: &str) -> AnalysisError {
    let err = std::io::Error::new(std::io::ErrorKind::Other, format!("{what} unavailable"));
    match what {
        "vision" => AnalysisError::Vision(Box::new(err)),
        "search" => AnalysisError::Search(Box::new(err)),
        _ => AnalysisError::Synthesis(Box::new(err)),
    }
}

/// Mock vision service with a single canned reply.
///
/// Clones share the call log, so tests can keep a handle to a mock
/// after moving it into a pipeline.
#[derive(Default, Clone)]
pub struct MockVisionService {
    reply: Option<String>,
    fail: bool,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockVisionService {
    /// Create a mock that replies with an empty string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canned reply text.
    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.reply = Some(reply.into());
        self
    }

    /// Make every call fail with a transport error.
    pub fn with_failure(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Image URLs this mock was called with.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl VisionService for MockVisionService {
    async fn analyze_image(&self, image_url: &str, _instructions: &str) -> Result<String> {
        self.calls.write().unwrap().push(image_url.to_string());
        if self.fail {
            return Err(unavailable("vision"));
        }
        Ok(self.reply.clone().unwrap_or_default())
    }
}

/// Mock search provider with per-query canned results and failures.
#[derive(Default, Clone)]
pub struct MockSearchProvider {
    results: Arc<RwLock<HashMap<String, Vec<SearchResult>>>>,
    failures: Arc<RwLock<HashSet<String>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockSearchProvider {
    /// Create a mock that returns no results for every query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add canned results for a query.
    pub fn with_results(self, query: &str, results: Vec<SearchResult>) -> Self {
        self.results
            .write()
            .unwrap()
            .insert(query.to_string(), results);
        self
    }

    /// Make a specific query fail.
    pub fn with_failure(self, query: &str) -> Self {
        self.failures.write().unwrap().insert(query.to_string());
        self
    }

    /// Queries this mock was called with, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for MockSearchProvider {
    async fn search(&self, query: &str, count: usize) -> Result<Vec<SearchResult>> {
        self.calls.write().unwrap().push(query.to_string());

        if self.failures.read().unwrap().contains(query) {
            return Err(unavailable("search"));
        }

        let mut results = self
            .results
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default();
        results.truncate(count);
        Ok(results)
    }
}

/// Mock content fetcher backed by canned page content per URL.
///
/// A URL with no canned content behaves like a failed fetch: the page
/// is silently skipped.
#[derive(Default, Clone)]
pub struct MockContentFetcher {
    pages: Arc<RwLock<HashMap<String, String>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockContentFetcher {
    /// Create a mock where every fetch fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add canned content for a URL.
    pub fn with_page(self, url: &str, content: impl Into<String>) -> Self {
        self.pages
            .write()
            .unwrap()
            .insert(url.to_string(), content.into());
        self
    }

    /// URLs this mock attempted, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl ContentFetcher for MockContentFetcher {
    async fn fetch_pages(&self, results: &[SearchResult], max_pages: usize) -> Vec<ScrapedPage> {
        let mut pages = Vec::new();

        for result in results.iter().take(max_pages) {
            self.calls.write().unwrap().push(result.link.clone());

            if let Some(content) = self.pages.read().unwrap().get(&result.link) {
                pages.push(ScrapedPage::new(
                    result.title.clone(),
                    result.link.clone(),
                    content.clone(),
                ));
            }
        }

        pages
    }
}

/// Mock synthesis service with a single canned reply.
#[derive(Default, Clone)]
pub struct MockSynthesisService {
    reply: Option<String>,
    fail: bool,
    calls: Arc<RwLock<Vec<(String, String)>>>,
}

impl MockSynthesisService {
    /// Create a mock that replies with an empty string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canned reply text.
    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.reply = Some(reply.into());
        self
    }

    /// Make every call fail with a transport error.
    pub fn with_failure(mut self) -> Self {
        self.fail = true;
        self
    }

    /// (system, user) prompt pairs this mock was called with.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl SynthesisService for MockSynthesisService {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        self.calls
            .write()
            .unwrap()
            .push((system.to_string(), user.to_string()));
        if self.fail {
            return Err(unavailable("synthesis"));
        }
        Ok(self.reply.clone().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_search_provider_truncates_to_count() {
        let provider = MockSearchProvider::new().with_results(
            "q",
            vec![
                SearchResult::new("a", "https://a.com", ""),
                SearchResult::new("b", "https://b.com", ""),
                SearchResult::new("c", "https://c.com", ""),
            ],
        );

        let results = provider.search("q", 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(provider.calls(), vec!["q"]);
    }

    #[tokio::test]
    async fn test_mock_fetcher_skips_unknown_urls() {
        let fetcher = MockContentFetcher::new().with_page("https://a.com", "content a");
        let results = vec![
            SearchResult::new("a", "https://a.com", ""),
            SearchResult::new("b", "https://b.com", ""),
        ];

        let pages = fetcher.fetch_pages(&results, 5).await;
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].url, "https://a.com");
        assert_eq!(fetcher.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_mock_vision_failure() {
        let vision = MockVisionService::new().with_failure();
        let err = vision.analyze_image("https://img", "prompt").await.unwrap_err();
        assert!(matches!(err, AnalysisError::Vision(_)));
    }
}
