//! Gemini generateContent adapter
//!
//! The path parameter carries both model and action (`{model}:{action}`);
//! streaming is selected by the `:streamGenerateContent` action and chunks
//! whole words rather than single characters.

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::{HeaderMap, StatusCode};
use mimic_core::RequestContext;

use crate::protocol::gemini::{
    BLOCK_REASON_UNSPECIFIED, FINISH_REASON_STOP, GenerateContentRequest, PromptFeedback, candidate_response,
};
use crate::provider::openai::DONE_SENTINEL;
use crate::stream::{WORD_FRAME_DELAY, sse_response, word_units};

/// Host the Gemini adapter claims
pub const GEMINI_DOMAIN: &str = "generativelanguage.googleapis.com";

/// Path prefix of the models API
pub const GEMINI_MODELS_PATH: &str = "/v1beta/models/";

/// Credential header checked instead of `Authorization`
pub const GOOG_API_KEY_HEADER: &str = "x-goog-api-key";

const ACTION_STREAM_GENERATE: &str = "streamGenerateContent";
const GENERATE_SUFFIX: &str = ":generateContent";
const STREAM_GENERATE_SUFFIX: &str = ":streamGenerateContent";

/// Longest prompt excerpt echoed into the reply
const ECHO_LIMIT: usize = 50;

/// The Gemini adapter
#[derive(Debug, Clone, Copy, Default)]
pub struct GeminiProvider;

impl GeminiProvider {
    #[allow(clippy::unused_self)]
    pub fn claims(&self, ctx: &RequestContext) -> bool {
        ctx.host == GEMINI_DOMAIN
            && ctx.path.starts_with(GEMINI_MODELS_PATH)
            && (ctx.path.ends_with(GENERATE_SUFFIX) || ctx.path.ends_with(STREAM_GENERATE_SUFFIX))
    }

    pub fn handle(&self, ctx: &RequestContext, headers: &HeaderMap, body: &[u8]) -> Response {
        if headers.get(GOOG_API_KEY_HEADER).is_none() {
            return error_response(StatusCode::UNAUTHORIZED, "Unauthorized: Please provide an API key");
        }

        let Some((model, action)) = ctx
            .path
            .strip_prefix(GEMINI_MODELS_PATH)
            .and_then(|param| param.split_once(':'))
        else {
            return error_response(StatusCode::BAD_REQUEST, "Invalid model and action");
        };
        tracing::info!(model, action, "gemini request");

        let request: GenerateContentRequest = match serde_json::from_slice(body) {
            Ok(request) => request,
            Err(err) => return error_response(StatusCode::BAD_REQUEST, &format!("Invalid request: {err}")),
        };
        if let Err(message) = request.validate() {
            return error_response(StatusCode::BAD_REQUEST, &format!("Validation error: {message}"));
        }

        let reply = generate_reply(&request);

        if action == ACTION_STREAM_GENERATE {
            stream_response(&reply)
        } else {
            let mut response = candidate_response(&reply, FINISH_REASON_STOP);
            response.prompt_feedback = Some(PromptFeedback {
                block_reason: BLOCK_REASON_UNSPECIFIED.to_owned(),
            });
            Json(response).into_response()
        }
    }
}

/// Gemini keeps its own reply text, echoing at most the first 50 characters
/// of the first part of the first content.
fn generate_reply(request: &GenerateContentRequest) -> String {
    let mut reply = "This is a mock response from Gemini provider. ".to_owned();
    if let Some(text) = request
        .contents
        .first()
        .and_then(|content| content.parts.first())
        .map(|part| part.text.as_str())
    {
        reply.push_str("You said: ");
        if text.chars().count() > ECHO_LIMIT {
            reply.extend(text.chars().take(ECHO_LIMIT));
            reply.push_str("...");
        } else {
            reply.push_str(text);
        }
    }
    reply
}

/// Whole-word chunks; `finish_reason` stays empty until the final frame,
/// which carries `"STOP"`, then the `[DONE]` sentinel closes the stream.
fn stream_response(reply: &str) -> Response {
    sse_response(
        word_units(reply),
        WORD_FRAME_DELAY,
        |_, unit, is_last| {
            let finish_reason = if is_last { FINISH_REASON_STOP } else { "" };
            serde_json::to_string(&candidate_response(unit, finish_reason)).unwrap_or_default()
        },
        DONE_SENTINEL.to_owned(),
    )
}

fn error_response(status: StatusCode, message: &str) -> Response {
    let body = serde_json::json!({
        "error": {
            "code": status.as_u16(),
            "message": message,
        }
    });
    (status, Json(body)).into_response()
}
