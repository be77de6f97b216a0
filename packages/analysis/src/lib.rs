//! Image-Driven Food Label Analysis Library
//!
//! Takes a photo of a packaged food product and produces a structured
//! nutrition/ingredient/hormone-impact report by chaining four external
//! capabilities: vision label reading, web search, page scraping, and
//! LLM synthesis.
//!
//! # Design Philosophy
//!
//! - Every stage degrades instead of aborting: a bad vision reply means
//!   empty attributes, a failed search means the next fallback, a dead
//!   page means one fewer source, an unusable synthesis reply means a
//!   partial envelope the caller can inspect.
//! - External services sit behind narrow traits and are injected, so
//!   tests run the whole pipeline against mocks.
//! - Model replies are treated as untrusted text; the library recovers
//!   JSON from them with a deliberately permissive span heuristic and
//!   validates shape only at the boundary.
//!
//! # Usage
//!
//! ```rust,ignore
//! use analysis::{AnalysisPipeline, HttpContentFetcher, OpenAi, SerperSearchProvider};
//!
//! let ai = OpenAi::from_env()?;
//! let pipeline = AnalysisPipeline::new(
//!     ai.clone(),
//!     SerperSearchProvider::new(serper_key),
//!     HttpContentFetcher::new(),
//!     ai,
//! );
//!
//! match pipeline.analyze_comprehensive(&image_url).await? {
//!     AnalysisOutcome::Complete { report, .. } => println!("{report}"),
//!     AnalysisOutcome::Partial { reason, .. } => eprintln!("degraded: {reason}"),
//! }
//! ```
//!
//! # Modules
//!
//! - [`traits`] - External seams (vision, search, fetcher, synthesis)
//! - [`types`] - Domain types and pipeline configuration
//! - [`pipeline`] - The analysis pipeline and its stages
//! - [`ai`] - OpenAI-backed vision/synthesis implementation
//! - [`fetchers`] - HTTP content fetcher
//! - [`security`] - Credential handling
//! - [`testing`] - Mock implementations for testing

pub mod ai;
pub mod error;
pub mod fetchers;
pub mod pipeline;
pub mod security;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{AnalysisError, Result};
pub use traits::{
    fetcher::ContentFetcher,
    search::{SearchProvider, SerperSearchProvider},
    synthesis::SynthesisService,
    vision::VisionService,
};
pub use types::{
    config::PipelineConfig,
    page::ScrapedPage,
    product::{Confidence, ProductAttributes},
    report::{AnalysisDebug, AnalysisOutcome, REQUIRED_REPORT_FIELDS},
    search::SearchResult,
};

// Re-export the pipeline and its stage functions
pub use pipeline::{
    build_query, extract_json, format_context, parse_product_attributes, search_with_fallbacks,
    validate_report, AnalysisPipeline, QUERY_PREFIX,
};

// Re-export implementations
pub use ai::OpenAi;
pub use fetchers::HttpContentFetcher;

// Re-export testing utilities
pub use testing::{
    MockContentFetcher, MockSearchProvider, MockSynthesisService, MockVisionService,
};
