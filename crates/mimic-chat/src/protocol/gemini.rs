//! Gemini generateContent wire format
//!
//! Field casing follows the emulated endpoint contract (snake_case
//! `finish_reason` / `prompt_feedback`), not the public Google SDK casing.

use serde::{Deserialize, Serialize};

/// Finish reason of a completed candidate
pub const FINISH_REASON_STOP: &str = "STOP";

/// `prompt_feedback.block_reason` for unblocked prompts
pub const BLOCK_REASON_UNSPECIFIED: &str = "BLOCK_REASON_UNSPECIFIED";

/// generateContent request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    /// Conversation turns
    #[serde(default)]
    pub contents: Vec<Content>,
    /// Safety settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_settings: Option<Vec<SafetySetting>>,
    /// Generation configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Enforce the schema constraints the real API declares
    ///
    /// Short-circuits on the first offending field, reporting its position.
    pub fn validate(&self) -> Result<(), String> {
        if self.contents.is_empty() {
            return Err("contents are required".to_owned());
        }
        for (i, content) in self.contents.iter().enumerate() {
            if content.parts.is_empty() {
                return Err(format!("content {i}: parts are required"));
            }
            for (j, part) in content.parts.iter().enumerate() {
                if part.text.is_empty() {
                    return Err(format!("content {i}, part {j}: text is required"));
                }
            }
        }
        Ok(())
    }
}

/// A conversation turn
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    /// Content parts
    #[serde(default)]
    pub parts: Vec<Part>,
    /// Turn role
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub role: String,
}

/// A content part
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    /// Text of the part
    #[serde(default)]
    pub text: String,
}

/// Safety setting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetySetting {
    /// Harm category
    #[serde(default)]
    pub category: String,
    /// Blocking threshold
    #[serde(default)]
    pub threshold: String,
}

/// Generation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Nucleus sampling threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Top-k sampling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

/// generateContent response, also used as the streaming chunk envelope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    /// Generated candidates
    pub candidates: Vec<Candidate>,
    /// Prompt feedback (non-streaming responses only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<PromptFeedback>,
}

/// A generated candidate
///
/// `finish_reason` is serialized even when empty: streaming chunks carry an
/// empty reason on every frame but the last.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Candidate {
    /// Candidate content
    pub content: Content,
    /// Why generation stopped (`"STOP"` or empty mid-stream)
    #[serde(default)]
    pub finish_reason: String,
}

/// Prompt feedback block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptFeedback {
    /// Block reason
    #[serde(default)]
    pub block_reason: String,
}

/// Build a single-candidate response or chunk
pub fn candidate_response(text: &str, finish_reason: &str) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: vec![Candidate {
            content: Content {
                parts: vec![Part { text: text.to_owned() }],
                role: String::new(),
            },
            finish_reason: finish_reason.to_owned(),
        }],
        prompt_feedback: None,
    }
}
