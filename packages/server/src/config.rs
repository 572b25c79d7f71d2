use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub huggingface_api_key: String,
    pub sentiment_model: String,
    pub zero_shot_model: String,
    pub content_model: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            huggingface_api_key: env::var("HUGGINGFACE_API_KEY")
                .context("HUGGINGFACE_API_KEY must be set")?,
            sentiment_model: env::var("SENTIMENT_MODEL")
                .unwrap_or_else(|_| "cardiffnlp/twitter-roberta-base-sentiment".to_string()),
            zero_shot_model: env::var("ZERO_SHOT_MODEL")
                .unwrap_or_else(|_| "facebook/bart-large-mnli".to_string()),
            content_model: env::var("CONTENT_MODEL")
                .unwrap_or_else(|_| "meta-llama/Llama-3.1-8B-Instruct".to_string()),
        })
    }
}
