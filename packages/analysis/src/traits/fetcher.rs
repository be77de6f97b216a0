//! Content fetcher trait — bounded, best-effort page retrieval.

use async_trait::async_trait;

use crate::types::{page::ScrapedPage, search::SearchResult};

/// Page content retrieval over a small set of search results.
///
/// Deliberately infallible as a whole: individual pages that error,
/// time out, return a non-success status, or yield no text are simply
/// omitted. Callers must tolerate receiving fewer pages than requested,
/// including none.
///
/// # Implementations
///
/// - `HttpContentFetcher` - sequential HTTP fetching with sanitization
/// - `MockContentFetcher` - for testing
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Fetch up to `max_pages` pages, taking results in input order.
    async fn fetch_pages(&self, results: &[SearchResult], max_pages: usize) -> Vec<ScrapedPage>;
}
