//! Qwen (DashScope) text generation adapter
//!
//! The streaming path is a deliberate no-op carried over from the emulated
//! service: stream-detected requests are accepted and answered 200 with no
//! body. Clients exercising Qwen streaming against this mock observe exactly
//! that gap.

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::{HeaderMap, StatusCode, header};
use mimic_core::RequestContext;

use crate::protocol::COMPLETION_MOCK_ID;
use crate::protocol::qwen::{ErrorResponse, Message, TextGenRequest, text_gen_response};
use crate::provider::header_str;
use crate::reply::prompt_to_reply;

/// Host the Qwen adapter claims
pub const QWEN_DOMAIN: &str = "dashscope.aliyuncs.com";

/// Native text generation path
pub const QWEN_TEXT_GENERATION_PATH: &str = "/api/v1/services/aigc/text-generation/generation";

/// DashScope header enabling SSE delivery
pub const DASHSCOPE_SSE_HEADER: &str = "X-DashScope-SSE";

/// The Qwen adapter
#[derive(Debug, Clone, Copy, Default)]
pub struct QwenProvider;

impl QwenProvider {
    #[allow(clippy::unused_self)]
    pub fn claims(&self, ctx: &RequestContext) -> bool {
        ctx.host == QWEN_DOMAIN && ctx.path == QWEN_TEXT_GENERATION_PATH
    }

    pub fn handle(&self, _ctx: &RequestContext, headers: &HeaderMap, body: &[u8]) -> Response {
        if headers.get(header::AUTHORIZATION).is_none() {
            return error_response(StatusCode::UNAUTHORIZED, "InvalidApiKey", "No API-key provided.");
        }

        let request: TextGenRequest = match serde_json::from_slice(body) {
            Ok(request) => request,
            Err(err) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "InvalidParameter",
                    &format!("invalid params: {err}"),
                );
            }
        };

        let prompt = request
            .input
            .messages
            .last()
            .map(Message::flattened_content)
            .unwrap_or_default();
        let reply = prompt_to_reply(&prompt);

        if is_stream_request(headers) {
            // streaming is unimplemented upstream; the accepted request
            // produces no streamed body
            StatusCode::OK.into_response()
        } else {
            Json(text_gen_response(&request, &reply)).into_response()
        }
    }
}

/// Stream detection: `Accept: text/event-stream` or `X-DashScope-SSE: enable`
fn is_stream_request(headers: &HeaderMap) -> bool {
    header_str(headers, header::ACCEPT.as_str()) == "text/event-stream"
        || header_str(headers, DASHSCOPE_SSE_HEADER) == "enable"
}

fn error_response(status: StatusCode, code: &str, message: &str) -> Response {
    let body = ErrorResponse {
        code: code.to_owned(),
        message: message.to_owned(),
        request_id: COMPLETION_MOCK_ID.to_owned(),
    };
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_detection_honors_both_headers() {
        let mut headers = HeaderMap::new();
        assert!(!is_stream_request(&headers));

        headers.insert(header::ACCEPT, "text/event-stream".parse().unwrap());
        assert!(is_stream_request(&headers));

        let mut headers = HeaderMap::new();
        headers.insert("x-dashscope-sse", "enable".parse().unwrap());
        assert!(is_stream_request(&headers));

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, "application/json".parse().unwrap());
        assert!(!is_stream_request(&headers));
    }
}
