//! Typed errors for the analysis library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur during analysis operations.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No JSON object span found in a model reply
    #[error("no JSON object found in response text")]
    NoJsonFound,

    /// A JSON span was found but failed to parse
    #[error("malformed JSON in response: {0}")]
    MalformedJson(#[source] serde_json::Error),

    /// Vision service unavailable or failed
    #[error("vision service error: {0}")]
    Vision(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Search provider unavailable or failed
    #[error("search provider error: {0}")]
    Search(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Page fetch failed
    #[error("fetch error: {0}")]
    Fetch(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Synthesis service unavailable or failed
    #[error("synthesis service error: {0}")]
    Synthesis(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Synthesized report is missing a required top-level field
    #[error("report missing required field: {field}")]
    ReportShape { field: String },

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
