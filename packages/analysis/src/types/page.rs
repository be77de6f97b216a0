//! Scraped page content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sanitized text content fetched from a single URL.
///
/// Produced only for pages that were successfully fetched and yielded
/// non-empty text; fetch failures are dropped, not retried. `content`
/// is already stripped of markup and bounded by the fetcher's cap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedPage {
    /// Page title (from `<title>`, or the search result that led here)
    pub title: String,

    /// URL the content came from
    pub url: String,

    /// Plain-text content, length-bounded
    pub content: String,

    /// When the page was fetched
    pub fetched_at: DateTime<Utc>,
}

impl ScrapedPage {
    /// Create a new scraped page stamped with the current time.
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            content: content.into(),
            fetched_at: Utc::now(),
        }
    }

    /// Set the fetched timestamp.
    pub fn with_fetched_at(mut self, fetched_at: DateTime<Utc>) -> Self {
        self.fetched_at = fetched_at;
        self
    }

    /// Content length in characters.
    pub fn content_length(&self) -> usize {
        self.content.chars().count()
    }
}
