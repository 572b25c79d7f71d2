//! Pure Hugging Face Inference API client
//!
//! A clean, minimal client for the Hugging Face Inference API with no
//! domain-specific logic. Supports text classification (sentiment), zero-shot
//! classification, chat completions via the OpenAI-compatible router, and a
//! readiness poll for cold models.
//!
//! # Example
//!
//! ```rust,ignore
//! use hf_client::HfClient;
//!
//! let client = HfClient::from_env()?;
//!
//! // Cold models answer with a "loading" error body until warm
//! client.wait_until_ready("cardiffnlp/twitter-roberta-base-sentiment").await?;
//!
//! // Sentiment scores, best label first
//! let scores = client
//!     .sentiment("cardiffnlp/twitter-roberta-base-sentiment", "I love this!")
//!     .await?;
//!
//! // Zero-shot classification against arbitrary labels
//! let result = client
//!     .zero_shot("facebook/bart-large-mnli", "New trail bike day!", &labels)
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{HfError, Result};
pub use types::*;

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Probes sent before giving up on a cold model.
pub const READINESS_MAX_ATTEMPTS: u32 = 10;

/// Pause between readiness probes.
pub const READINESS_DELAY: Duration = Duration::from_secs(10);

/// Input used for readiness probes.
const READINESS_PROBE_INPUT: &str = "Test";

/// Pure Hugging Face API client.
#[derive(Clone)]
pub struct HfClient {
    http_client: Client,
    api_key: String,
    inference_base_url: String,
    router_base_url: String,
}

impl HfClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            inference_base_url: "https://api-inference.huggingface.co".to_string(),
            router_base_url: "https://router.huggingface.co/v1".to_string(),
        }
    }

    /// Create from environment variable `HUGGINGFACE_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("HUGGINGFACE_API_KEY")
            .map_err(|_| HfError::Config("HUGGINGFACE_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom inference base URL (for proxies, test servers).
    pub fn with_inference_base_url(mut self, url: impl Into<String>) -> Self {
        self.inference_base_url = url.into();
        self
    }

    /// Set a custom router base URL (OpenAI-compatible endpoint).
    pub fn with_router_base_url(mut self, url: impl Into<String>) -> Self {
        self.router_base_url = url.into();
        self
    }

    /// Get the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the inference base URL.
    pub fn inference_base_url(&self) -> &str {
        &self.inference_base_url
    }

    /// Sentiment analysis (text classification).
    ///
    /// Returns the candidate labels with scores for the input, best first.
    pub async fn sentiment(&self, model: &str, text: &str) -> Result<Vec<LabelScore>> {
        let start = std::time::Instant::now();

        let request = types::InferenceRequest {
            inputs: text.to_string(),
        };
        let response = self.post_model(model, &request).await?;

        // The API nests results per input; a single input yields one inner list
        let mut parsed: Vec<Vec<LabelScore>> = response
            .json()
            .await
            .map_err(|e| HfError::Parse(e.to_string()))?;

        let scores = if parsed.is_empty() {
            return Err(HfError::Api("No classification results returned".into()));
        } else {
            parsed.swap_remove(0)
        };

        debug!(
            model = %model,
            duration_ms = start.elapsed().as_millis(),
            labels = scores.len(),
            "Hugging Face sentiment inference"
        );

        Ok(scores)
    }

    /// Zero-shot classification against the given candidate labels.
    pub async fn zero_shot(
        &self,
        model: &str,
        text: &str,
        candidate_labels: &[String],
    ) -> Result<ZeroShotResponse> {
        let request = types::ZeroShotRequest {
            inputs: text.to_string(),
            parameters: types::ZeroShotParameters {
                candidate_labels: candidate_labels.to_vec(),
            },
        };

        let response = self.post_model(model, &request).await?;

        response
            .json()
            .await
            .map_err(|e| HfError::Parse(e.to_string()))
    }

    /// Chat completion via the OpenAI-compatible router endpoint.
    pub async fn chat_completion(&self, request: ChatRequest) -> Result<ChatResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.router_base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Hugging Face chat request failed");
                HfError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Hugging Face chat API error");
            return Err(HfError::Api(format!("chat completion error: {}", error_text)));
        }

        let chat_response: types::ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| HfError::Parse(e.to_string()))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| HfError::Api("No response from chat completion".into()))?;

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            "Hugging Face chat completion"
        );

        Ok(ChatResponse {
            content,
            usage: chat_response.usage,
        })
    }

    /// Block until the model reports ready.
    ///
    /// Cold models answer every request with a `"... is currently loading"`
    /// error body until their weights are in memory. Probes the model with a
    /// trivial input up to [`READINESS_MAX_ATTEMPTS`] times,
    /// [`READINESS_DELAY`] apart. Transport and parse failures count as a
    /// failed probe, not a hard error.
    pub async fn wait_until_ready(&self, model: &str) -> Result<()> {
        for attempt in 1..=READINESS_MAX_ATTEMPTS {
            info!(
                model = %model,
                attempt,
                max_attempts = READINESS_MAX_ATTEMPTS,
                "Checking model readiness"
            );

            match self.probe_ready(model).await {
                Ok(true) => {
                    info!(model = %model, "Model is ready");
                    return Ok(());
                }
                Ok(false) => {
                    info!(model = %model, "Model is still loading, retrying");
                }
                Err(e) => {
                    warn!(model = %model, error = %e, "Error checking model readiness");
                }
            }

            if attempt < READINESS_MAX_ATTEMPTS {
                tokio::time::sleep(READINESS_DELAY).await;
            }
        }

        Err(HfError::ModelLoading {
            model: model.to_string(),
            attempts: READINESS_MAX_ATTEMPTS,
        })
    }

    /// Single readiness probe: `Ok(true)` when the model answers with anything
    /// other than a "loading" error body.
    async fn probe_ready(&self, model: &str) -> Result<bool> {
        let request = types::InferenceRequest {
            inputs: READINESS_PROBE_INPUT.to_string(),
        };

        // Loading models respond 503 with a JSON error body, so the status
        // code is not checked here; only the body decides.
        let response = self
            .http_client
            .post(format!("{}/models/{}", self.inference_base_url, model))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| HfError::Network(e.to_string()))?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| HfError::Parse(e.to_string()))?;

        if let Ok(error_body) = serde_json::from_value::<ApiErrorBody>(body.clone()) {
            if error_body.is_loading() {
                if let Some(eta) = error_body.estimated_time {
                    debug!(model = %model, estimated_time = eta, "Model warmup in progress");
                }
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// POST a request to a hosted model, surfacing non-2xx bodies as errors.
    async fn post_model<B: serde::Serialize>(
        &self,
        model: &str,
        body: &B,
    ) -> Result<reqwest::Response> {
        let response = self
            .http_client
            .post(format!("{}/models/{}", self.inference_base_url, model))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(model = %model, error = %e, "Hugging Face request failed");
                HfError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(model = %model, status = %status, error = %error_text, "Hugging Face API error");
            return Err(HfError::Api(format!(
                "inference error for {}: {}",
                model, error_text
            )));
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = HfClient::new("hf_test")
            .with_inference_base_url("http://localhost:9000")
            .with_router_base_url("http://localhost:9001/v1");

        assert_eq!(client.api_key, "hf_test");
        assert_eq!(client.inference_base_url, "http://localhost:9000");
        assert_eq!(client.router_base_url, "http://localhost:9001/v1");
    }
}
