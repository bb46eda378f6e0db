//! Generic OpenAI-compatible adapter
//!
//! Registered last as the unconditional fallback: it claims every request no
//! other adapter recognizes, which is what makes the shared route table serve
//! the many OpenAI-shaped vendor paths.

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::{HeaderMap, StatusCode};
use mimic_core::RequestContext;

use crate::protocol::openai::{
    ChatCompletionChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, MessageContent,
    OBJECT_CHAT_COMPLETION_CHUNK, completion_response,
};
use crate::protocol::{COMPLETION_MOCK_CREATED, COMPLETION_MOCK_ID, STOP_REASON};
use crate::reply::prompt_to_reply;
use crate::stream::{CHAR_FRAME_DELAY, char_units, sse_response};

/// Sentinel payload closing an OpenAI-shaped stream
pub const DONE_SENTINEL: &str = "[DONE]";

/// The generic OpenAI-compatible adapter
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiProvider;

impl OpenAiProvider {
    /// Always claims; must be registered after every narrow adapter
    #[allow(clippy::unused_self)]
    pub fn claims(&self, _ctx: &RequestContext) -> bool {
        true
    }

    pub fn handle(&self, _ctx: &RequestContext, _headers: &HeaderMap, body: &[u8]) -> Response {
        let request: ChatCompletionRequest = match serde_json::from_slice(body) {
            Ok(request) => request,
            Err(err) => return error_response(&err.to_string()),
        };
        if let Err(message) = request.validate() {
            return error_response(&message);
        }

        let prompt = request.messages.last().map(ChatMessage::flattened_content).unwrap_or_default();
        let reply = prompt_to_reply(&prompt);

        if request.stream {
            stream_response(&request, &reply)
        } else {
            Json(completion_response(&request.model, &reply)).into_response()
        }
    }
}

/// Per-character chunks; the last content frame carries the finish reason,
/// then the `[DONE]` sentinel closes the stream.
fn stream_response(request: &ChatCompletionRequest, reply: &str) -> Response {
    let model = request.model.clone();
    sse_response(
        char_units(reply),
        CHAR_FRAME_DELAY,
        move |_, unit, is_last| {
            let chunk = ChatCompletionResponse {
                id: COMPLETION_MOCK_ID.to_owned(),
                object: OBJECT_CHAT_COMPLETION_CHUNK.to_owned(),
                created: COMPLETION_MOCK_CREATED,
                model: model.clone(),
                choices: vec![ChatCompletionChoice {
                    index: 0,
                    delta: Some(ChatMessage {
                        content: Some(MessageContent::Text(unit.to_owned())),
                        ..ChatMessage::default()
                    }),
                    finish_reason: is_last.then(|| STOP_REASON.to_owned()),
                    ..ChatCompletionChoice::default()
                }],
                usage: None,
            };
            serde_json::to_string(&chunk).unwrap_or_default()
        },
        DONE_SENTINEL.to_owned(),
    )
}

fn error_response(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(serde_json::json!({"error": message}))).into_response()
}
