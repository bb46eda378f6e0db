//! Dify adapter
//!
//! Serves both the chat-messages and completion-messages paths. Completion
//! mode takes its prompt from the `inputs.query` variable, which must be
//! present and a string.

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::{HeaderMap, StatusCode, header};
use mimic_core::RequestContext;

use crate::protocol::dify::{ChatRequest, chat_response, content_frame, message_end_frame};
use crate::reply::prompt_to_reply;
use crate::stream::{CHAR_FRAME_DELAY, char_units, sse_response};

/// Host the Dify adapter claims
pub const DIFY_DOMAIN: &str = "api.dify.ai";

/// Chat-mode path
pub const DIFY_CHAT_PATH: &str = "/v1/chat-messages";

/// Completion-mode path
pub const DIFY_COMPLETION_PATH: &str = "/v1/completion-messages";

/// `response_mode` value selecting SSE delivery
const RESPONSE_MODE_STREAMING: &str = "streaming";

/// The Dify adapter
#[derive(Debug, Clone, Copy, Default)]
pub struct DifyProvider;

impl DifyProvider {
    #[allow(clippy::unused_self)]
    pub fn claims(&self, ctx: &RequestContext) -> bool {
        ctx.host == DIFY_DOMAIN && (ctx.path == DIFY_CHAT_PATH || ctx.path == DIFY_COMPLETION_PATH)
    }

    pub fn handle(&self, ctx: &RequestContext, headers: &HeaderMap, body: &[u8]) -> Response {
        if headers.get(header::AUTHORIZATION).is_none() {
            return error_response(StatusCode::UNAUTHORIZED, "Unauthorized: Please provide an API key");
        }

        let request: ChatRequest = match serde_json::from_slice(body) {
            Ok(request) => request,
            Err(err) => return error_response(StatusCode::BAD_REQUEST, &format!("Invalid request: {err}")),
        };

        let reply = if ctx.path == DIFY_COMPLETION_PATH {
            // completion bots read the prompt from the `query` input variable
            match request.inputs.get("query") {
                Some(serde_json::Value::String(query)) => prompt_to_reply(query),
                Some(_) => {
                    return error_response(
                        StatusCode::BAD_REQUEST,
                        "Invalid request: query must be a string for bot type completion",
                    );
                }
                None => {
                    return error_response(
                        StatusCode::BAD_REQUEST,
                        "Invalid request: query is required for bot type completion",
                    );
                }
            }
        } else {
            prompt_to_reply(&request.query)
        };

        if request.response_mode == RESPONSE_MODE_STREAMING {
            stream_response(&reply)
        } else {
            Json(chat_response(&request.conversation_id, &reply)).into_response()
        }
    }
}

/// Per-character `agent_thought` frames closed by a `message_end` event that
/// carries the full answer and aggregated usage.
fn stream_response(reply: &str) -> Response {
    let terminal = serde_json::to_string(&message_end_frame(reply)).unwrap_or_default();
    sse_response(
        char_units(reply),
        CHAR_FRAME_DELAY,
        |_, unit, _| serde_json::to_string(&content_frame(unit)).unwrap_or_default(),
        terminal,
    )
}

fn error_response(status: StatusCode, message: &str) -> Response {
    let body = serde_json::json!({
        "error": {
            "message": message,
            "type": "invalid_request_error",
            "code": "invalid_request",
        }
    });
    (status, Json(body)).into_response()
}
