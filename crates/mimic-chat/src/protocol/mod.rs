//! Vendor wire format types
//!
//! Field names and casing are the compatibility contract with clients built
//! against the real vendor APIs; renaming any of them is a breaking change.

pub mod dify;
pub mod gemini;
pub mod minimax;
pub mod openai;
pub mod qwen;

use serde::{Deserialize, Serialize};

/// Completion id stamped on every mock response
pub const COMPLETION_MOCK_ID: &str = "chatcmpl-llm-mock";

/// Fixed `created` timestamp of every mock response
pub const COMPLETION_MOCK_CREATED: u64 = 10;

/// Role of every generated message
pub const ROLE_ASSISTANT: &str = "assistant";

/// Finish reason for completed generations
pub const STOP_REASON: &str = "stop";

/// Token usage block shared across vendor response shapes
///
/// Zero-valued fields are omitted, so a default `Usage` serializes as `{}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens consumed by the prompt
    #[serde(default, skip_serializing_if = "is_zero")]
    pub prompt_tokens: u32,
    /// Tokens generated in the reply
    #[serde(default, skip_serializing_if = "is_zero")]
    pub completion_tokens: u32,
    /// Sum of prompt and completion tokens
    #[serde(default, skip_serializing_if = "is_zero")]
    pub total_tokens: u32,
}

/// Fixed usage numbers reported by every adapter
pub const fn mock_usage() -> Usage {
    Usage {
        prompt_tokens: 9,
        completion_tokens: 1,
        total_tokens: 10,
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(n: &u32) -> bool {
    *n == 0
}
