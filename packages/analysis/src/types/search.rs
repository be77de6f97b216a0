//! Search result types.

use serde::{Deserialize, Serialize};

/// A single web search hit.
///
/// Mirrors the provider's organic-result shape. Provider ordering is
/// preserved everywhere this type flows; the list a search returns may
/// be empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result title
    pub title: String,

    /// Result URL
    pub link: String,

    /// Snippet/description from the search results page
    pub snippet: String,
}

impl SearchResult {
    /// Create a new search result.
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            snippet: snippet.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let result = SearchResult::new("Acme Bar", "https://example.com", "Nutrition facts");
        let json = serde_json::to_string(&result).unwrap();
        let back: SearchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.link, "https://example.com");
    }
}
