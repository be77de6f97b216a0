use anyhow::{Context, Result};
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub openai_api_key: String,
    pub serper_api_key: String,
    pub openai_base_url: Option<String>,
    pub openai_model: Option<String>,
    pub openai_vision_model: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            openai_api_key: env::var("OPENAI_API_KEY")
                .context("OPENAI_API_KEY must be set")?,
            serper_api_key: env::var("SERPER_API_KEY")
                .context("SERPER_API_KEY must be set")?,
            openai_base_url: env::var("OPENAI_BASE_URL").ok(),
            openai_model: env::var("OPENAI_MODEL").ok(),
            openai_vision_model: env::var("OPENAI_VISION_MODEL").ok(),
        })
    }
}
