//! Generic OpenAI-compatible chat completion wire format
//!
//! Also holds the content model codec (`MessageContent`, `ToolChoice`) shared
//! with the Qwen adapter, whose messages reuse the same polymorphic `content`
//! field.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{ROLE_ASSISTANT, STOP_REASON, Usage};

/// Object type of a non-streaming completion
pub const OBJECT_CHAT_COMPLETION: &str = "chat.completion";

/// Object type of a streaming chunk
pub const OBJECT_CHAT_COMPLETION_CHUNK: &str = "chat.completion.chunk";

// -- Request types --

/// Chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Model identifier
    #[serde(default)]
    pub model: String,
    /// Conversation messages
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Frequency penalty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    /// Number of choices to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    /// Presence penalty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
    /// Random seed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Whether to stream the response
    #[serde(default)]
    pub stream: bool,
    /// Stream options (e.g. `include_usage`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_options: Option<StreamOptions>,
    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Nucleus sampling threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Tool definitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
    /// Tool choice configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,
    /// End user identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Stop sequences
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    /// Response format configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_format: Option<serde_json::Value>,
}

impl ChatCompletionRequest {
    /// Enforce the schema constraints the real API declares
    ///
    /// Short-circuits on the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        if self.model.is_empty() {
            return Err("field 'model' is required".to_owned());
        }
        if self.messages.is_empty() {
            return Err("field 'messages' must contain at least 1 item".to_owned());
        }
        Ok(())
    }
}

/// Stream options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamOptions {
    /// Include usage statistics in the stream
    #[serde(default)]
    pub include_usage: bool,
}

/// Message within a request or response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Participant name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Message role
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub role: String,
    /// Content (plain string or list of typed parts)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<MessageContent>,
    /// Tool calls made by the assistant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl ChatMessage {
    /// Assistant message carrying plain text
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: ROLE_ASSISTANT.to_owned(),
            content: Some(MessageContent::Text(text.into())),
            ..Self::default()
        }
    }

    /// Flatten the content to plain text
    ///
    /// String content is returned as-is; a parts list degrades to its text
    /// parts, each followed by a newline. Missing content yields the empty
    /// string.
    pub fn flattened_content(&self) -> String {
        self.content.as_ref().map(MessageContent::flattened).unwrap_or_default()
    }
}

/// Message content: a plain string or an array of typed parts
///
/// Decoding tries the string form first; any shape that is neither a string
/// nor a parts list is a decode error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text content
    Text(String),
    /// Array of content parts
    Parts(Vec<ContentPart>),
}

impl MessageContent {
    /// Flatten to plain text, joining text parts with trailing newlines
    pub fn flattened(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Parts(parts) => {
                let mut flat = String::new();
                for part in parts {
                    if let ContentPart::Text { text } = part {
                        flat.push_str(text);
                        flat.push('\n');
                    }
                }
                flat
            }
        }
    }
}

/// Individual content part in a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Text content
    Text {
        /// The text string
        text: String,
    },
    /// Image content via URL
    ImageUrl {
        /// Image URL specification
        image_url: ImageUrl,
    },
}

/// Image URL specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    /// Image URL or base64 data URI
    pub url: String,
    /// Detail level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

// -- Tool types --

/// Tool definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// Tool type (always "function")
    #[serde(rename = "type")]
    pub tool_type: String,
    /// Function specification
    pub function: ToolFunction,
}

/// Function specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolFunction {
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Function name
    pub name: String,
    /// JSON Schema for parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

/// Tool call within a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Index within the `tool_calls` array
    #[serde(default)]
    pub index: u32,
    /// Unique tool call identifier
    #[serde(default)]
    pub id: String,
    /// Tool type (always "function")
    #[serde(rename = "type", default)]
    pub call_type: String,
    /// Function call details
    pub function: FunctionCall,
}

/// Function call details within a tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Call identifier
    #[serde(default)]
    pub id: String,
    /// Function name
    #[serde(default)]
    pub name: String,
    /// JSON-encoded arguments
    #[serde(default)]
    pub arguments: String,
}

// -- Tool choice (discriminated union) --

/// `tool_choice` field: a mode literal or one of three tagged object shapes
///
/// Decode priority: string first (only `"auto"`, `"none"`, `"required"` are
/// accepted; anything else is an error, never a fallback), then the `type`
/// discriminator within objects. An unknown or missing discriminator decodes
/// the payload as a bare function choice for backward compatibility. Encoding
/// emits exactly the decoded variant.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolChoice {
    /// Mode literal: `"auto"`, `"none"` or `"required"`
    Mode(String),
    /// `allowed_tools` configuration constraining the available tools
    AllowedTools(AllowedToolsChoice),
    /// A specific function to call
    Function(FunctionChoice),
    /// A custom tool
    Custom(CustomChoice),
}

/// The `allowed_tools` object shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowedToolsChoice {
    /// Discriminator, always "allowed_tools"
    #[serde(rename = "type")]
    pub choice_type: String,
    /// Tools the model may use
    pub allowed_tools: Vec<AllowedTool>,
}

/// A tool in the allowed tools list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowedTool {
    /// Tool mode
    pub mode: String,
    /// Function definition
    pub function: ToolFunction,
}

/// The `function` object shape
///
/// The discriminator is optional so the legacy bare form round-trips without
/// acquiring a `type` field it never had.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionChoice {
    /// Discriminator, "function" when present
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub choice_type: Option<String>,
    /// The specific function to call
    pub function: ToolFunction,
}

/// The `custom` object shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomChoice {
    /// Discriminator, always "custom"
    #[serde(rename = "type")]
    pub choice_type: String,
    /// The custom tool configuration
    pub custom: CustomTool,
}

/// Custom tool configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomTool {
    /// Custom tool name
    pub name: String,
}

impl<'de> Deserialize<'de> for ToolChoice {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::String(mode) => match mode.as_str() {
                "auto" | "none" | "required" => Ok(Self::Mode(mode)),
                other => Err(D::Error::custom(format!(
                    "invalid tool_choice string value: {other:?}, must be one of: \"auto\", \"none\", \"required\""
                ))),
            },
            serde_json::Value::Object(ref object) => {
                let tag = object.get("type").and_then(serde_json::Value::as_str).unwrap_or_default();
                match tag {
                    "allowed_tools" => AllowedToolsChoice::deserialize(value)
                        .map(Self::AllowedTools)
                        .map_err(D::Error::custom),
                    "custom" => CustomChoice::deserialize(value).map(Self::Custom).map_err(D::Error::custom),
                    // "function", plus unknown/missing discriminators for
                    // backward compatibility with the bare function shape
                    _ => FunctionChoice::deserialize(value).map(Self::Function).map_err(D::Error::custom),
                }
            }
            _ => Err(D::Error::custom("tool_choice must be a string or an object")),
        }
    }
}

impl Serialize for ToolChoice {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Mode(mode) => serializer.serialize_str(mode),
            Self::AllowedTools(choice) => choice.serialize(serializer),
            Self::Function(choice) => choice.serialize(serializer),
            Self::Custom(choice) => choice.serialize(serializer),
        }
    }
}

// -- Response types --

/// Chat completion response, also used as the streaming chunk envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    /// Response identifier
    pub id: String,
    /// Object type
    pub object: String,
    /// Creation timestamp
    pub created: u64,
    /// Model echoed from the request
    pub model: String,
    /// Generated choices
    pub choices: Vec<ChatCompletionChoice>,
    /// Token usage (absent on streaming chunks)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// Choice within a completion response or chunk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatCompletionChoice {
    /// Choice index
    pub index: u32,
    /// Full message (non-streaming)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<ChatMessage>,
    /// Incremental delta (streaming)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<ChatMessage>,
    /// Why generation stopped (final frame only while streaming)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Build the canned non-streaming completion
pub fn completion_response(model: &str, reply: &str) -> ChatCompletionResponse {
    ChatCompletionResponse {
        id: super::COMPLETION_MOCK_ID.to_owned(),
        object: OBJECT_CHAT_COMPLETION.to_owned(),
        created: super::COMPLETION_MOCK_CREATED,
        model: model.to_owned(),
        choices: vec![ChatCompletionChoice {
            index: 0,
            message: Some(ChatMessage::assistant(reply)),
            delta: None,
            finish_reason: Some(STOP_REASON.to_owned()),
        }],
        usage: Some(super::mock_usage()),
    }
}
