//! Analysis outcome types.
//!
//! A pipeline run either produces a validated report or a partial-failure
//! envelope carrying enough intermediate state to retry or debug. The two
//! are distinguishable both in Rust (enum variants) and on the wire
//! (serde `status` tag).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::product::ProductAttributes;
use crate::types::search::SearchResult;

/// Top-level fields every synthesized report must carry.
///
/// Everything below these keys is treated as opaque validated JSON.
pub const REQUIRED_REPORT_FIELDS: &[&str] =
    &["product", "nutrition_facts", "ingredients", "hormone_impact"];

/// Result of one full pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    /// Synthesis produced a report matching the expected top-level shape.
    Complete {
        /// The structured report, validated at the top level only
        report: serde_json::Value,

        /// Attributes the report was built from
        attributes: ProductAttributes,

        /// Run diagnostics
        debug: AnalysisDebug,
    },

    /// Synthesis output could not be turned into a valid report.
    ///
    /// Carries the intermediate pipeline state so the caller can retry
    /// or inspect what the search stage actually saw.
    Partial {
        /// Attributes recovered from the vision stage
        attributes: ProductAttributes,

        /// The search query that was used
        query: String,

        /// Raw aggregated search results
        search_results: Vec<SearchResult>,

        /// Why synthesis output was rejected
        reason: String,

        /// Run diagnostics
        debug: AnalysisDebug,
    },
}

impl AnalysisOutcome {
    /// True for a full structured report.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete { .. })
    }

    /// Run diagnostics, regardless of variant.
    pub fn debug(&self) -> &AnalysisDebug {
        match self {
            Self::Complete { debug, .. } => debug,
            Self::Partial { debug, .. } => debug,
        }
    }
}

/// Diagnostics attached to every outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisDebug {
    /// Per-run id for log correlation
    pub analysis_id: Uuid,

    /// Total results aggregated across all search attempts
    pub search_results_count: usize,

    /// Pages that were actually fetched and kept
    pub scraped_pages_count: usize,
}

impl AnalysisDebug {
    /// Create a debug block with a fresh run id.
    pub fn new(search_results_count: usize, scraped_pages_count: usize) -> Self {
        Self {
            analysis_id: Uuid::new_v4(),
            search_results_count,
            scraped_pages_count,
        }
    }
}
