//! Qwen (DashScope) text generation wire format

use serde::{Deserialize, Serialize};

use super::openai::{MessageContent, Tool, ToolCall};
use super::{COMPLETION_MOCK_ID, ROLE_ASSISTANT, STOP_REASON};

/// `result_format` value selecting the message-style output shape
pub const RESULT_FORMAT_MESSAGE: &str = "message";

/// Text generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextGenRequest {
    /// Model identifier
    #[serde(default)]
    pub model: String,
    /// Input block
    #[serde(default)]
    pub input: TextGenInput,
    /// Generation parameters
    #[serde(default)]
    pub parameters: TextGenParameters,
}

/// Input block of a text generation request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextGenInput {
    /// Conversation messages
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Generation parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextGenParameters {
    /// Output shape selector ("message" or legacy text)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_format: Option<String>,
    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Repetition penalty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repetition_penalty: Option<f64>,
    /// Number of choices to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    /// Random seed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Nucleus sampling threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Whether to emit incremental output
    #[serde(default)]
    pub incremental_output: bool,
    /// Whether web search is enabled
    #[serde(default)]
    pub enable_search: bool,
    /// Tool definitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
}

/// Message in a Qwen conversation
///
/// Reuses the shared polymorphic content codec; Qwen accepts the same
/// string-or-parts `content` field as the OpenAI shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    /// Participant name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Message role
    #[serde(default)]
    pub role: String,
    /// Polymorphic content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<MessageContent>,
    /// Tool calls made by the assistant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl Message {
    /// Flatten the content to plain text (empty when absent)
    pub fn flattened_content(&self) -> String {
        self.content.as_ref().map(MessageContent::flattened).unwrap_or_default()
    }
}

/// Structured error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Request identifier
    pub request_id: String,
}

/// Text generation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextGenResponse {
    /// Request identifier
    pub request_id: String,
    /// Generated output
    pub output: TextGenOutput,
    /// Token usage
    pub usage: QwenUsage,
}

/// Output block; exactly one of the text or choices shapes is populated
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextGenOutput {
    /// Why generation stopped (text-style output)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub finish_reason: String,
    /// Generated text (text-style output)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Generated choices (message-style output)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<TextGenChoice>,
}

/// Choice in message-style output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextGenChoice {
    /// Why generation stopped
    pub finish_reason: String,
    /// Generated message
    pub message: Message,
}

/// Qwen-shaped token usage
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QwenUsage {
    /// Tokens consumed by the prompt
    pub input_tokens: u32,
    /// Tokens generated in the reply
    pub output_tokens: u32,
    /// Sum of input and output tokens
    pub total_tokens: u32,
}

/// Build the canned text generation response
///
/// `result_format: "message"` selects the choices shape; anything else uses
/// the legacy flat text shape.
pub fn text_gen_response(request: &TextGenRequest, reply: &str) -> TextGenResponse {
    let output = if request.parameters.result_format.as_deref() == Some(RESULT_FORMAT_MESSAGE) {
        TextGenOutput {
            choices: vec![TextGenChoice {
                finish_reason: STOP_REASON.to_owned(),
                message: Message {
                    role: ROLE_ASSISTANT.to_owned(),
                    content: Some(MessageContent::Text(reply.to_owned())),
                    ..Message::default()
                },
            }],
            ..TextGenOutput::default()
        }
    } else {
        TextGenOutput {
            finish_reason: STOP_REASON.to_owned(),
            text: reply.to_owned(),
            ..TextGenOutput::default()
        }
    };
    TextGenResponse {
        request_id: COMPLETION_MOCK_ID.to_owned(),
        output,
        usage: QwenUsage {
            input_tokens: 9,
            output_tokens: 1,
            total_tokens: 10,
        },
    }
}
