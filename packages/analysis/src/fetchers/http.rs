//! HTTP-based content fetcher.
//!
//! Fetches a bounded set of search-result URLs sequentially, sanitizes
//! the HTML down to plain text, and drops anything that fails.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::traits::fetcher::ContentFetcher;
use crate::types::{config::PipelineConfig, page::ScrapedPage, search::SearchResult};

/// Fetches pages over plain HTTP.
///
/// Requests are strictly sequential with a fixed inter-request delay,
/// which bounds load on the target servers. Each page gets one attempt;
/// failures of any kind skip the page and move on.
///
/// # Example
///
/// ```rust,ignore
/// use analysis::fetchers::HttpContentFetcher;
///
/// let fetcher = HttpContentFetcher::new();
/// let pages = fetcher.fetch_pages(&results, 5).await;
/// ```
pub struct HttpContentFetcher {
    client: reqwest::Client,
    user_agent: String,
    delay: std::time::Duration,
    max_content_len: usize,
}

impl Default for HttpContentFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpContentFetcher {
    /// Create a new fetcher with default settings.
    pub fn new() -> Self {
        let config = PipelineConfig::default();
        Self {
            client: reqwest::Client::builder()
                .timeout(config.fetch_timeout)
                .build()
                .expect("Failed to create HTTP client"),
            user_agent: "LabelAnalysisBot/1.0".to_string(),
            delay: config.fetch_delay,
            max_content_len: config.max_content_len,
        }
    }

    /// Create a fetcher whose timeout, delay, and content cap come from a config.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(config.fetch_timeout)
                .build()
                .expect("Failed to create HTTP client"),
            user_agent: "LabelAnalysisBot/1.0".to_string(),
            delay: config.fetch_delay,
            max_content_len: config.max_content_len,
        }
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the inter-request delay.
    pub fn with_delay(mut self, delay: std::time::Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the stored-content cap in characters.
    pub fn with_max_content_len(mut self, len: usize) -> Self {
        self.max_content_len = len;
        self
    }

    /// Fetch a single result's page, or explain why it was skipped.
    async fn fetch_one(
        &self,
        result: &SearchResult,
    ) -> Result<ScrapedPage, Box<dyn std::error::Error + Send + Sync>> {
        // Only plain web URLs are worth fetching
        let parsed = url::Url::parse(&result.link)?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(format!("unsupported URL scheme: {}", parsed.scheme()).into());
        }

        debug!(url = %result.link, "page fetch starting");

        let response = self
            .client
            .get(&result.link)
            .header("User-Agent", &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {}", status).into());
        }

        let html = response.text().await?;

        let title = extract_title(&html).unwrap_or_else(|| result.title.clone());
        let text = html_to_text(&html);

        if text.is_empty() {
            return Err("no text content after sanitization".into());
        }

        Ok(ScrapedPage::new(
            title,
            result.link.clone(),
            truncate_chars(&text, self.max_content_len),
        ))
    }
}

#[async_trait]
impl ContentFetcher for HttpContentFetcher {
    async fn fetch_pages(&self, results: &[SearchResult], max_pages: usize) -> Vec<ScrapedPage> {
        let mut pages = Vec::new();

        for result in results.iter().take(max_pages) {
            match self.fetch_one(result).await {
                Ok(page) => {
                    debug!(
                        url = %page.url,
                        content_length = page.content.len(),
                        "page fetched"
                    );
                    pages.push(page);
                }
                Err(e) => {
                    warn!(url = %result.link, error = %e, "skipping page");
                }
            }

            // Throttle outbound load on third-party servers
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        debug!(
            requested = max_pages.min(results.len()),
            fetched = pages.len(),
            "page fetching complete"
        );

        pages
    }
}

/// Strip HTML down to readable plain text.
///
/// Removes script/style blocks and remaining tags, decodes the five
/// common entities, and collapses whitespace.
pub fn html_to_text(html: &str) -> String {
    let script_pattern = regex::Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap();
    let style_pattern = regex::Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap();
    let tag_pattern = regex::Regex::new(r"<[^>]+>").unwrap();
    let whitespace_pattern = regex::Regex::new(r"\s+").unwrap();

    let text = script_pattern.replace_all(html, "");
    let text = style_pattern.replace_all(&text, "");
    let text = tag_pattern.replace_all(&text, " ");

    let text = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    whitespace_pattern.replace_all(&text, " ").trim().to_string()
}

/// Extract the `<title>` text from HTML.
pub fn extract_title(html: &str) -> Option<String> {
    let title_pattern = regex::Regex::new(r"(?is)<title[^>]*>(.*?)</title>").ok()?;
    title_pattern
        .captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Truncate to at most `max` characters without splitting a char.
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_to_text_strips_scripts_and_tags() {
        let html = r#"
            <html><head><script>var x = 1;</script><style>body { color: red; }</style></head>
            <body><h1>Acme Protein Bar</h1><p>Ingredients: oats, honey.</p></body></html>
        "#;

        let text = html_to_text(html);
        assert_eq!(text, "Acme Protein Bar Ingredients: oats, honey.");
        assert!(!text.contains("var x"));
        assert!(!text.contains("color: red"));
    }

    #[test]
    fn test_html_to_text_decodes_entities() {
        let html = "Fish&nbsp;&amp;&nbsp;Chips &lt;fresh&gt; &quot;daily&quot; &#39;special&#39;";
        let text = html_to_text(html);
        assert_eq!(text, r#"Fish & Chips <fresh> "daily" 'special'"#);
    }

    #[test]
    fn test_html_to_text_collapses_whitespace() {
        let text = html_to_text("a\n\n\n   b\t\tc");
        assert_eq!(text, "a b c");
    }

    #[test]
    fn test_extract_title() {
        let html = "<html><head><title> Acme Bar | Nutrition </title></head></html>";
        assert_eq!(extract_title(html), Some("Acme Bar | Nutrition".to_string()));

        assert_eq!(extract_title("<html><body>no title</body></html>"), None);
        assert_eq!(extract_title("<title></title>"), None);
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        // Multi-byte chars must not be split
        assert_eq!(truncate_chars("héllo", 2), "hé");
    }
}
