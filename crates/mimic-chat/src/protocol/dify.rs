//! Dify chat-messages / completion-messages wire format

use serde::{Deserialize, Serialize};

use super::{COMPLETION_MOCK_CREATED, COMPLETION_MOCK_ID, Usage};

/// Stream event name for per-unit content frames
pub const EVENT_AGENT_THOUGHT: &str = "agent_thought";

/// Stream event name for the terminal frame
pub const EVENT_MESSAGE_END: &str = "message_end";

/// Chat or completion request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    /// App input variables; completion mode reads the prompt from `query`
    #[serde(default)]
    pub inputs: serde_json::Map<String, serde_json::Value>,
    /// User query (chat mode prompt)
    #[serde(default)]
    pub query: String,
    /// `"streaming"` or `"blocking"`
    #[serde(default)]
    pub response_mode: String,
    /// End user identifier
    #[serde(default)]
    pub user: String,
    /// Whether to auto-generate a conversation name
    #[serde(default)]
    pub auto_generate_name: bool,
    /// Conversation to continue
    #[serde(default)]
    pub conversation_id: String,
}

/// Workflow data block (always empty in the mock)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Data {
    /// Workflow identifier
    #[serde(default)]
    pub workflow_id: String,
    /// Run identifier
    #[serde(default)]
    pub id: String,
    /// Workflow outputs
    #[serde(default)]
    pub outputs: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Usage wrapper under the `metadata` key
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetaData {
    /// Token usage
    pub usage: Usage,
}

/// Blocking-mode response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Conversation identifier (echoed from the request)
    pub conversation_id: String,
    /// Message identifier
    pub message_id: String,
    /// Full reply text
    pub answer: String,
    /// Creation timestamp
    pub created_at: u64,
    /// Workflow data
    #[serde(default)]
    pub data: Data,
    /// Usage metadata
    pub metadata: MetaData,
}

/// Streaming frame, shared by content and terminal events
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkChatResponse {
    /// Event tag (`agent_thought` or `message_end`)
    pub event: String,
    /// Conversation identifier
    pub conversation_id: String,
    /// Message identifier
    pub message_id: String,
    /// Content fragment (full reply on the terminal frame)
    pub answer: String,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: u64,
    /// Workflow data
    #[serde(default)]
    pub data: Data,
    /// Usage metadata (populated on the terminal frame)
    #[serde(default)]
    pub metadata: MetaData,
}

/// Build the blocking-mode response
pub fn chat_response(conversation_id: &str, reply: &str) -> ChatResponse {
    ChatResponse {
        conversation_id: conversation_id.to_owned(),
        message_id: COMPLETION_MOCK_ID.to_owned(),
        answer: reply.to_owned(),
        created_at: COMPLETION_MOCK_CREATED,
        data: Data::default(),
        metadata: MetaData {
            usage: super::mock_usage(),
        },
    }
}

/// Build a per-unit content frame
pub fn content_frame(fragment: &str) -> ChunkChatResponse {
    ChunkChatResponse {
        event: EVENT_AGENT_THOUGHT.to_owned(),
        conversation_id: COMPLETION_MOCK_ID.to_owned(),
        message_id: COMPLETION_MOCK_ID.to_owned(),
        answer: fragment.to_owned(),
        created_at: COMPLETION_MOCK_CREATED,
        ..ChunkChatResponse::default()
    }
}

/// Build the terminal `message_end` frame carrying aggregated usage
pub fn message_end_frame(reply: &str) -> ChunkChatResponse {
    ChunkChatResponse {
        event: EVENT_MESSAGE_END.to_owned(),
        conversation_id: COMPLETION_MOCK_ID.to_owned(),
        message_id: COMPLETION_MOCK_ID.to_owned(),
        answer: reply.to_owned(),
        metadata: MetaData {
            usage: super::mock_usage(),
        },
        ..ChunkChatResponse::default()
    }
}
