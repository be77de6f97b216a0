//! OpenAI implementation of the vision and synthesis traits.
//!
//! One client serves both seams: `analyze_image` sends a chat completion
//! with an `image_url` content part, `complete` a plain system/user pair.
//!
//! # Example
//!
//! ```rust,ignore
//! use analysis::ai::OpenAi;
//!
//! let ai = OpenAi::new("sk-...").with_model("gpt-4o");
//! let pipeline = AnalysisPipeline::new(ai.clone(), search, fetcher, ai);
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::security::SecretString;
use crate::traits::{synthesis::SynthesisService, vision::VisionService};

/// OpenAI-backed client.
///
/// Uses `gpt-4o` for both label reading and report synthesis by default.
#[derive(Clone)]
pub struct OpenAi {
    client: Client,
    api_key: SecretString,
    model: String,
    vision_model: String,
    base_url: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: MessageContent,
}

/// Message content: plain text, or text + image parts for vision calls.
#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum ContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

impl OpenAi {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: SecretString::new(api_key),
            model: "gpt-4o".to_string(),
            vision_model: "gpt-4o".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Create from environment variable `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| AnalysisError::Config("OPENAI_API_KEY not set".to_string()))?;
        Ok(Self::new(api_key))
    }

    /// Set the synthesis model (default: gpt-4o).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the vision model (default: gpt-4o).
    pub fn with_vision_model(mut self, model: impl Into<String>) -> Self {
        self.vision_model = model.into();
        self
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the current synthesis model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run a chat completion request.
    ///
    /// Returns the first choice's content; the caller maps the boxed
    /// error into its own `AnalysisError` variant.
    async fn chat(
        &self,
        request: ChatRequest,
    ) -> std::result::Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(Box::new(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("OpenAI API error {}: {}", status, error_text),
            )));
        }

        let chat_response: ChatResponse = response.json().await?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| {
                Box::new(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "no choices in OpenAI response",
                )) as Box<dyn std::error::Error + Send + Sync>
            })
    }
}

#[async_trait]
impl VisionService for OpenAi {
    async fn analyze_image(&self, image_url: &str, instructions: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.vision_model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: MessageContent::Parts(vec![
                    ContentPart::Text {
                        text: instructions.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: image_url.to_string(),
                        },
                    },
                ]),
            }],
            temperature: Some(0.0),
            max_tokens: Some(1024),
        };

        self.chat(request).await.map_err(AnalysisError::Vision)
    }
}

#[async_trait]
impl SynthesisService for OpenAi {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: MessageContent::Text(system.to_string()),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: MessageContent::Text(user.to_string()),
                },
            ],
            temperature: Some(0.0),
            max_tokens: Some(4096),
        };

        self.chat(request).await.map_err(AnalysisError::Synthesis)
    }
}
