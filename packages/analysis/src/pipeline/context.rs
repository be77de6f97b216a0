//! Formatting gathered material into the synthesis prompt context.

use crate::types::{config::PipelineConfig, page::ScrapedPage, search::SearchResult};

/// Assemble search snippets and scraped page content into one bounded
/// text block for the synthesis prompt.
///
/// Layout is deterministic: numbered search results first (snippets
/// capped), then per-page content blocks (independently capped). An
/// empty input produces an explicit placeholder so the prompt never
/// contains a silent hole.
pub fn format_context(
    results: &[SearchResult],
    pages: &[ScrapedPage],
    config: &PipelineConfig,
) -> String {
    if results.is_empty() && pages.is_empty() {
        return "No web context was found for this product.".to_string();
    }

    let mut sections = Vec::new();

    if !results.is_empty() {
        let mut block = String::from("=== Web search results ===\n");
        for (i, result) in results.iter().enumerate() {
            block.push_str(&format!(
                "[{}] {}\nURL: {}\n{}\n\n",
                i + 1,
                result.title,
                result.link,
                cap(&result.snippet, config.snippet_cap),
            ));
        }
        sections.push(block.trim_end().to_string());
    }

    if !pages.is_empty() {
        let mut block = String::from("=== Page content ===\n");
        for page in pages {
            block.push_str(&format!(
                "--- {} ({}) ---\n{}\n\n",
                page.title,
                page.url,
                cap(&page.content, config.context_page_cap),
            ));
        }
        sections.push(block.trim_end().to_string());
    }

    sections.join("\n\n")
}

/// Cap text at `max` characters without splitting a char.
fn cap(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
