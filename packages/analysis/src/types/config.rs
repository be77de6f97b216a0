//! Configuration for the analysis pipeline.

use std::time::Duration;

/// Tunables for one pipeline instance.
///
/// Defaults match production behavior; tests zero the delays to keep
/// the suite fast.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Result count requested from the search provider per attempt.
    ///
    /// Default: 8.
    pub max_search_results: usize,

    /// How many aggregated search results feed the synthesis context.
    ///
    /// Default: 6.
    pub top_results: usize,

    /// How many of those results are actually fetched.
    ///
    /// Default: 5.
    pub max_pages: usize,

    /// Cap on a scraped page's stored content, in characters.
    ///
    /// Default: 3000.
    pub max_content_len: usize,

    /// Cap on a search snippet inside the synthesis context.
    ///
    /// Default: 300.
    pub snippet_cap: usize,

    /// Cap on a page's content inside the synthesis context.
    ///
    /// Default: 2500.
    pub context_page_cap: usize,

    /// Timeout for a single search call.
    ///
    /// Default: 10 s.
    pub search_timeout: Duration,

    /// Courtesy delay before each fallback search attempt.
    ///
    /// Not a backoff; a single fixed wait. Default: 1 s.
    pub fallback_delay: Duration,

    /// Timeout for a single page fetch.
    ///
    /// Default: 10 s.
    pub fetch_timeout: Duration,

    /// Delay between consecutive page fetches.
    ///
    /// Throttles outbound load on third-party servers. Default: 500 ms.
    pub fetch_delay: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_search_results: 8,
            top_results: 6,
            max_pages: 5,
            max_content_len: 3000,
            snippet_cap: 300,
            context_page_cap: 2500,
            search_timeout: Duration::from_secs(10),
            fallback_delay: Duration::from_millis(1000),
            fetch_timeout: Duration::from_secs(10),
            fetch_delay: Duration::from_millis(500),
        }
    }
}

impl PipelineConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-attempt search result count.
    pub fn with_max_search_results(mut self, count: usize) -> Self {
        self.max_search_results = count;
        self
    }

    /// Set how many results feed the context.
    pub fn with_top_results(mut self, count: usize) -> Self {
        self.top_results = count;
        self
    }

    /// Set how many pages get fetched.
    pub fn with_max_pages(mut self, count: usize) -> Self {
        self.max_pages = count;
        self
    }

    /// Set the stored-content cap.
    pub fn with_max_content_len(mut self, len: usize) -> Self {
        self.max_content_len = len;
        self
    }

    /// Set the search call timeout.
    pub fn with_search_timeout(mut self, timeout: Duration) -> Self {
        self.search_timeout = timeout;
        self
    }

    /// Set the fallback courtesy delay.
    pub fn with_fallback_delay(mut self, delay: Duration) -> Self {
        self.fallback_delay = delay;
        self
    }

    /// Set the page fetch timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Set the inter-fetch delay.
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }

    /// Zero every delay. Intended for tests.
    pub fn without_delays(mut self) -> Self {
        self.fallback_delay = Duration::ZERO;
        self.fetch_delay = Duration::ZERO;
        self
    }
}
