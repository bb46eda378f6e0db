//! Minimax chat completion Pro adapter
//!
//! Errors ride an HTTP 200 with a numeric `base_resp.status_code`, matching
//! the real Pro endpoint.

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::{HeaderMap, StatusCode, header};
use mimic_core::RequestContext;

use crate::protocol::COMPLETION_MOCK_CREATED;
use crate::protocol::minimax::{
    ChatCompletionProRequest, ChatCompletionProResponse, Choice, Message, pro_response,
};
use crate::reply::prompt_to_reply;
use crate::stream::{CHAR_FRAME_DELAY, char_units, sse_response};

/// Host the Minimax adapter claims
pub const MINIMAX_DOMAIN: &str = "api.minimax.chat";

/// Pro API path, whose response format differs from the OpenAI shape
pub const CHAT_COMPLETION_PRO_PATH: &str = "/v1/text/chatcompletion_pro";

/// Status code for a missing API key
const STATUS_LOGIN_FAIL: i64 = 1004;

/// Status code for invalid request parameters
const STATUS_INVALID_PARAMS: i64 = 2013;

/// The Minimax adapter
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimaxProvider;

impl MinimaxProvider {
    #[allow(clippy::unused_self)]
    pub fn claims(&self, ctx: &RequestContext) -> bool {
        ctx.host == MINIMAX_DOMAIN && ctx.path == CHAT_COMPLETION_PRO_PATH
    }

    pub fn handle(&self, _ctx: &RequestContext, headers: &HeaderMap, body: &[u8]) -> Response {
        if headers.get(header::AUTHORIZATION).is_none() {
            return error_response(
                STATUS_LOGIN_FAIL,
                "login fail: Please carry the API secret key in the 'Authorization' field of the request header",
            );
        }

        let request: ChatCompletionProRequest = match serde_json::from_slice(body) {
            Ok(request) => request,
            Err(err) => return error_response(STATUS_INVALID_PARAMS, &format!("invalid params: {err}")),
        };
        if let Err(message) = request.validate() {
            return error_response(STATUS_INVALID_PARAMS, &format!("invalid params: {message}"));
        }

        let constraints = request.reply_constraints.clone().unwrap_or_default();
        let prompt = request.messages.last().map(|message| message.text.clone()).unwrap_or_default();
        let reply = prompt_to_reply(&prompt);

        if request.stream {
            stream_response(&request, &constraints.sender_type, &constraints.sender_name, &reply)
        } else {
            Json(pro_response(
                &request.model,
                &constraints.sender_type,
                &constraints.sender_name,
                &reply,
            ))
            .into_response()
        }
    }
}

/// Per-character frames carrying `choices[0].messages[0].text`; the terminal
/// frame is the full Pro response rather than a `[DONE]` sentinel.
fn stream_response(request: &ChatCompletionProRequest, sender_type: &str, sender_name: &str, reply: &str) -> Response {
    let model = request.model.clone();
    let sender_type = sender_type.to_owned();
    let sender_name = sender_name.to_owned();
    let terminal = serde_json::to_string(&pro_response(&model, &sender_type, &sender_name, reply)).unwrap_or_default();

    sse_response(
        char_units(reply),
        CHAR_FRAME_DELAY,
        move |_, unit, _| {
            let frame = ChatCompletionProResponse {
                created: COMPLETION_MOCK_CREATED,
                model: model.clone(),
                choices: vec![Choice {
                    messages: vec![Message {
                        sender_type: sender_type.clone(),
                        sender_name: sender_name.clone(),
                        text: unit.to_owned(),
                    }],
                    ..Choice::default()
                }],
                ..ChatCompletionProResponse::default()
            };
            serde_json::to_string(&frame).unwrap_or_default()
        },
        terminal,
    )
}

fn error_response(code: i64, message: &str) -> Response {
    let body = serde_json::json!({
        "base_resp": {
            "status_code": code,
            "status_msg": message,
        }
    });
    (StatusCode::OK, Json(body)).into_response()
}
