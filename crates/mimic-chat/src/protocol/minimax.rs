//! Minimax chat completion Pro wire format
//!
//! The Pro API differs from the OpenAI shape: errors travel inside a
//! `base_resp` block on an HTTP 200, and choices nest a `messages` list.

use serde::{Deserialize, Serialize};

use super::{COMPLETION_MOCK_CREATED, COMPLETION_MOCK_ID, STOP_REASON, Usage};

/// Chat completion Pro request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionProRequest {
    /// Model identifier
    #[serde(default)]
    pub model: String,
    /// Whether to stream the response
    #[serde(default)]
    pub stream: bool,
    /// Generation budget
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_to_generate: Option<u64>,
    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Nucleus sampling threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Whether to mask sensitive information
    #[serde(default)]
    pub mask_sensitive_info: bool,
    /// Conversation messages
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Bot settings (note the singular wire name)
    #[serde(rename = "bot_setting", default)]
    pub bot_settings: Vec<BotSetting>,
    /// Requirements for the model reply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_constraints: Option<ReplyConstraints>,
}

impl ChatCompletionProRequest {
    /// Enforce the schema constraints the real API declares
    pub fn validate(&self) -> Result<(), String> {
        if self.model.is_empty() {
            return Err("field 'model' is required".to_owned());
        }
        if self.messages.is_empty() {
            return Err("field 'messages' must contain at least 1 item".to_owned());
        }
        if self.bot_settings.is_empty() {
            return Err("field 'bot_setting' must contain at least 1 item".to_owned());
        }
        if self.reply_constraints.is_none() {
            return Err("field 'reply_constraints' is required".to_owned());
        }
        Ok(())
    }
}

/// A message in the conversation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    /// Sender type (e.g. "USER", "BOT")
    #[serde(default)]
    pub sender_type: String,
    /// Sender name
    #[serde(default)]
    pub sender_name: String,
    /// Message text
    #[serde(default)]
    pub text: String,
}

/// Bot persona settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotSetting {
    /// Bot name
    #[serde(default)]
    pub bot_name: String,
    /// Persona prompt
    #[serde(default)]
    pub content: String,
}

/// Requirements for model replies
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplyConstraints {
    /// Sender type of the reply
    #[serde(default)]
    pub sender_type: String,
    /// Sender name of the reply
    #[serde(default)]
    pub sender_name: String,
}

/// Chat completion Pro response, also used as the streaming frame envelope
///
/// Streaming frames reuse this struct with only `created`, `model` and
/// `choices` populated, so they carry empty `reply`, `id` and `base_resp`
/// fields just like the real endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatCompletionProResponse {
    /// Creation timestamp
    pub created: u64,
    /// Model echoed from the request
    pub model: String,
    /// Full reply text
    #[serde(default)]
    pub reply: String,
    /// Whether the input tripped the sensitivity filter
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub input_sensitive: bool,
    /// Whether the output tripped the sensitivity filter
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub output_sensitive: bool,
    /// Result options
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    /// Token usage (final responses only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    /// Response identifier
    #[serde(default)]
    pub id: String,
    /// Status code and details
    #[serde(default)]
    pub base_resp: BaseResp,
}

/// A result option
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Choice {
    /// Messages of this option
    pub messages: Vec<Message>,
    /// Option index
    #[serde(default)]
    pub index: u64,
    /// Why generation stopped (empty while streaming)
    #[serde(default)]
    pub finish_reason: String,
}

/// Error status block carried on every Pro response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaseResp {
    /// Numeric status code (0 = success)
    pub status_code: i64,
    /// Status message
    pub status_msg: String,
}

/// Build the canned full Pro response
pub fn pro_response(model: &str, sender_type: &str, sender_name: &str, reply: &str) -> ChatCompletionProResponse {
    ChatCompletionProResponse {
        created: COMPLETION_MOCK_CREATED,
        model: model.to_owned(),
        reply: reply.to_owned(),
        input_sensitive: false,
        output_sensitive: false,
        choices: vec![Choice {
            messages: vec![Message {
                sender_type: sender_type.to_owned(),
                sender_name: sender_name.to_owned(),
                text: reply.to_owned(),
            }],
            index: 0,
            finish_reason: STOP_REASON.to_owned(),
        }],
        usage: Some(super::mock_usage()),
        id: COMPLETION_MOCK_ID.to_owned(),
        base_resp: BaseResp::default(),
    }
}
