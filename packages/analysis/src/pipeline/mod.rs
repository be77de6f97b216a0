//! The analysis pipeline - main entry point for the library.
//!
//! One pipeline instance serves many requests; each
//! [`AnalysisPipeline::analyze_comprehensive`] call runs a fresh,
//! self-contained chain of image → attributes → query → search →
//! scrape → synthesis with no state shared across runs. All external
//! calls within a run are sequential; the only suspension points are
//! those calls and the courtesy delays between them.

pub mod context;
pub mod parse;
pub mod prompts;
pub mod query;
pub mod search;

use tracing::{info, warn};

use crate::error::Result;
use crate::traits::{
    fetcher::ContentFetcher, search::SearchProvider, synthesis::SynthesisService,
    vision::VisionService,
};
use crate::types::{
    config::PipelineConfig,
    product::ProductAttributes,
    report::{AnalysisDebug, AnalysisOutcome},
};

pub use context::format_context;
pub use parse::{extract_json, parse_product_attributes, validate_report};
pub use query::{build_query, QUERY_PREFIX};
pub use search::search_with_fallbacks;

/// The full analysis chain behind one narrow operation.
///
/// Constructed with its four external collaborators (explicit dependency
/// injection), so tests substitute the mocks in [`crate::testing`].
///
/// # Example
///
/// ```rust,ignore
/// use analysis::{AnalysisPipeline, OpenAi, SerperSearchProvider, HttpContentFetcher};
///
/// let ai = OpenAi::from_env()?;
/// let pipeline = AnalysisPipeline::new(
///     ai.clone(),
///     SerperSearchProvider::new(serper_key),
///     HttpContentFetcher::new(),
///     ai,
/// );
///
/// let outcome = pipeline.analyze_comprehensive("https://example.com/label.jpg").await?;
/// ```
pub struct AnalysisPipeline<V, S, F, Y>
where
    V: VisionService,
    S: SearchProvider,
    F: ContentFetcher,
    Y: SynthesisService,
{
    vision: V,
    search: S,
    fetcher: F,
    synthesis: Y,
    config: PipelineConfig,
}

impl<V, S, F, Y> AnalysisPipeline<V, S, F, Y>
where
    V: VisionService,
    S: SearchProvider,
    F: ContentFetcher,
    Y: SynthesisService,
{
    /// Create a new pipeline with default configuration.
    pub fn new(vision: V, search: S, fetcher: F, synthesis: Y) -> Self {
        Self {
            vision,
            search,
            fetcher,
            synthesis,
            config: PipelineConfig::default(),
        }
    }

    /// Create with custom configuration.
    pub fn with_config(vision: V, search: S, fetcher: F, synthesis: Y, config: PipelineConfig) -> Self {
        Self {
            vision,
            search,
            fetcher,
            synthesis,
            config,
        }
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full analysis chain for one product photo.
    ///
    /// Returns `Ok(AnalysisOutcome::Complete)` with a shape-validated
    /// report, or `Ok(AnalysisOutcome::Partial)` carrying the
    /// intermediate state when the synthesis reply could not be parsed.
    /// The only hard failures are a vision or synthesis transport error.
    pub async fn analyze_comprehensive(&self, image_url: &str) -> Result<AnalysisOutcome> {
        info!(image_url = %image_url, "analysis starting");

        // Stage 1: read the label. A transport error aborts the run; a
        // malformed reply degrades to empty attributes.
        let raw_vision = self
            .vision
            .analyze_image(image_url, prompts::VISION_PROMPT)
            .await?;

        let attributes = match parse_product_attributes(&raw_vision) {
            Ok(attrs) => attrs,
            Err(e) => {
                warn!(error = %e, "vision reply unusable, continuing with empty attributes");
                ProductAttributes::default()
            }
        };

        // Stage 2: derive the search query.
        let query = build_query(&attributes);
        info!(query = %query, confidence = ?attributes.confidence, "query built");

        // Stage 3: search with fallbacks. Worst case: empty list.
        let search_results =
            search_with_fallbacks(&self.search, &self.config, &query, &attributes).await;

        // Stage 4: scrape the top results, best effort.
        let top = &search_results[..search_results.len().min(self.config.top_results)];
        let pages = self.fetcher.fetch_pages(top, self.config.max_pages).await;

        info!(
            search_results = search_results.len(),
            scraped_pages = pages.len(),
            "context gathered"
        );

        // Stage 5: synthesize. A transport error aborts; an unusable
        // reply degrades to the partial envelope.
        let context = format_context(top, &pages, &self.config);
        let attributes_json =
            serde_json::to_string(&attributes).unwrap_or_else(|_| "{}".to_string());
        let user_prompt = prompts::format_synthesis_prompt(&attributes_json, &context);

        let reply = self
            .synthesis
            .complete(prompts::SYNTHESIS_SYSTEM_PROMPT, &user_prompt)
            .await?;

        let debug_info = AnalysisDebug::new(search_results.len(), pages.len());

        match extract_json(&reply).and_then(validate_report) {
            Ok(report) => {
                info!(analysis_id = %debug_info.analysis_id, "analysis complete");
                Ok(AnalysisOutcome::Complete {
                    report,
                    attributes,
                    debug: debug_info,
                })
            }
            Err(e) => {
                warn!(
                    analysis_id = %debug_info.analysis_id,
                    error = %e,
                    "synthesis reply rejected, returning partial envelope"
                );
                Ok(AnalysisOutcome::Partial {
                    attributes,
                    query,
                    search_results,
                    reason: e.to_string(),
                    debug: debug_info,
                })
            }
        }
    }
}
