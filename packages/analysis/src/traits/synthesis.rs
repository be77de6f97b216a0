//! Synthesis service trait — merges gathered context into the final report.

use async_trait::async_trait;

use crate::error::Result;

/// External LLM completion capability.
///
/// Implementations run a system + user prompt pair and return the raw
/// reply text. The pipeline extracts and validates the embedded report
/// JSON itself; a prose-only reply is not this trait's problem.
///
/// # Implementations
///
/// - `OpenAi` - chat completions
/// - `MockSynthesisService` - for testing
#[async_trait]
pub trait SynthesisService: Send + Sync {
    /// Run a completion and return the raw reply text.
    ///
    /// Errors on transport/API failure.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}
