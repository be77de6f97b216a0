//! Vision service trait — reads a product label off an image.

use async_trait::async_trait;

use crate::error::Result;

/// External vision capability.
///
/// Implementations inspect the image at `image_url` following the given
/// instructions and return the model's raw free-text reply, which is
/// expected (but not guaranteed) to contain a JSON object. Parsing and
/// degradation on bad output belong to the pipeline, not here.
///
/// # Implementations
///
/// - `OpenAi` - chat completions with an image content part
/// - `MockVisionService` - for testing
#[async_trait]
pub trait VisionService: Send + Sync {
    /// Analyze the image and return the raw model reply.
    ///
    /// A transport or API failure is an error; the pipeline treats it as
    /// the one hard failure of a run.
    async fn analyze_image(&self, image_url: &str, instructions: &str) -> Result<String>;
}
