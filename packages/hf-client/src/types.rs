//! Hugging Face API request and response types.

use serde::{Deserialize, Serialize};

// =============================================================================
// Text Classification (sentiment)
// =============================================================================

/// A single candidate label with its confidence score.
///
/// Text-classification models return one of these per label, sorted by
/// descending score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    /// Model label (e.g., "LABEL_0", "LABEL_2")
    pub label: String,

    /// Confidence in [0.0, 1.0]
    pub score: f64,
}

/// Plain inference request: `{"inputs": "..."}`.
#[derive(Debug, Serialize)]
pub(crate) struct InferenceRequest {
    pub inputs: String,
}

// =============================================================================
// Zero-Shot Classification
// =============================================================================

/// Zero-shot classification request with candidate labels.
#[derive(Debug, Serialize)]
pub(crate) struct ZeroShotRequest {
    pub inputs: String,
    pub parameters: ZeroShotParameters,
}

#[derive(Debug, Serialize)]
pub(crate) struct ZeroShotParameters {
    pub candidate_labels: Vec<String>,
}

/// Zero-shot classification response.
///
/// `labels` and `scores` are parallel arrays sorted by descending score.
#[derive(Debug, Clone, Deserialize)]
pub struct ZeroShotResponse {
    /// The classified input text, echoed back
    pub sequence: String,

    /// Candidate labels, best match first
    pub labels: Vec<String>,

    /// Scores aligned with `labels`
    pub scores: Vec<f64>,
}

impl ZeroShotResponse {
    /// Iterate over `(label, score)` pairs, best match first.
    pub fn scored_labels(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.scores.iter().copied())
    }
}

// =============================================================================
// Chat Completion (OpenAI-compatible router endpoint)
// =============================================================================

/// Chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model to use (e.g., "meta-llama/Llama-3.1-8B-Instruct")
    pub model: String,

    /// Conversation messages
    pub messages: Vec<Message>,

    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens in completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    /// Create a new chat request with the given model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Add a message to the conversation.
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Set temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set max tokens.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role: "system", "user", "assistant"
    pub role: String,

    /// Message content
    pub content: String,
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Chat completion response.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// Response content
    pub content: String,

    /// Token usage statistics
    pub usage: Option<Usage>,
}

/// Raw chat response from the API (for internal parsing).
#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponseRaw {
    pub choices: Vec<ChatChoice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatMessageResponse {
    pub content: String,
}

/// Token usage statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt
    pub prompt_tokens: u32,

    /// Tokens in the completion
    pub completion_tokens: u32,

    /// Total tokens used
    pub total_tokens: u32,
}

// =============================================================================
// Error bodies
// =============================================================================

/// Error body returned by the inference API.
///
/// A model that is still warming up responds with
/// `{"error": "Model ... is currently loading", "estimated_time": 20.0}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable error message, if any
    pub error: Option<String>,

    /// Seconds until the model is expected to be warm
    pub estimated_time: Option<f64>,
}

impl ApiErrorBody {
    /// Whether this body reports a model still loading.
    pub fn is_loading(&self) -> bool {
        self.error
            .as_deref()
            .is_some_and(|e| e.contains("loading"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let sys = Message::system("You are helpful");
        assert_eq!(sys.role, "system");

        let user = Message::user("Hello");
        assert_eq!(user.role, "user");

        let assistant = Message::assistant("Hi there");
        assert_eq!(assistant.role, "assistant");
    }

    #[test]
    fn test_chat_request_builder() {
        let req = ChatRequest::new("meta-llama/Llama-3.1-8B-Instruct")
            .message(Message::user("Hello"))
            .temperature(0.7)
            .max_tokens(100);

        assert_eq!(req.model, "meta-llama/Llama-3.1-8B-Instruct");
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.temperature, Some(0.7));
        assert_eq!(req.max_tokens, Some(100));
    }

    #[test]
    fn test_parse_sentiment_response() {
        // Text-classification responses nest the scores per input
        let json = r#"[[
            {"label": "LABEL_2", "score": 0.91},
            {"label": "LABEL_1", "score": 0.07},
            {"label": "LABEL_0", "score": 0.02}
        ]]"#;

        let parsed: Vec<Vec<LabelScore>> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0][0].label, "LABEL_2");
        assert!(parsed[0][0].score > 0.9);
    }

    #[test]
    fn test_parse_zero_shot_response() {
        let json = r#"{
            "sequence": "Loving this new trail bike",
            "labels": ["Sports & Outdoor Activities", "Travel & Adventure"],
            "scores": [0.83, 0.12]
        }"#;

        let parsed: ZeroShotResponse = serde_json::from_str(json).unwrap();
        let pairs: Vec<(&str, f64)> = parsed.scored_labels().collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0, "Sports & Outdoor Activities");
        assert!(pairs[0].1 > pairs[1].1);
    }

    #[test]
    fn test_loading_error_body() {
        let json = r#"{"error": "Model facebook/bart-large-mnli is currently loading", "estimated_time": 20.0}"#;
        let body: ApiErrorBody = serde_json::from_str(json).unwrap();
        assert!(body.is_loading());

        let json = r#"{"error": "Authorization header is invalid"}"#;
        let body: ApiErrorBody = serde_json::from_str(json).unwrap();
        assert!(!body.is_loading());

        let body: ApiErrorBody = serde_json::from_str("{}").unwrap();
        assert!(!body.is_loading());
    }
}
