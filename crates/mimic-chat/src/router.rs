//! Route tables and dispatch handlers
//!
//! Every chat route funnels into one handler that buffers the body, builds the
//! [`RequestContext`], and asks the registry for the claiming adapter. The
//! keyed single-vendor mode binds one adapter directly to its literal routes
//! instead, with the generic adapter covering the OpenAI-shaped paths.

use axum::Router;
use axum::extract::{Request, State};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use http::HeaderMap;
use mimic_core::{ContextError, RequestContext};

use crate::error::ChatError;
use crate::registry::{ChatProvider, ProviderRegistry};

/// Requests larger than this are rejected while buffering
const BODY_READ_LIMIT: usize = 2 * 1024 * 1024;

/// OpenAI-shaped chat completion paths exposed by assorted vendors
pub const OPENAI_COMPATIBLE_ROUTES: &[&str] = &[
    // baidu
    "/v2/chat/completions",
    // doubao
    "/api/v3/chat/completions",
    // github
    "/chat/completions",
    // groq
    "/openai/v1/chat/completions",
    // minimax
    "/v1/text/chatcompletion_v2",
    // openai
    "/v1/chat/completions",
    // qwen
    "/compatible-mode/v1/chat/completions",
    // zhipu
    "/api/paas/v4/chat/completions",
];

/// Vendor-specific paths with their own wire formats
pub const VENDOR_SPECIFIC_ROUTES: &[&str] = &[
    crate::provider::minimax::CHAT_COMPLETION_PRO_PATH,
    crate::provider::qwen::QWEN_TEXT_GENERATION_PATH,
    crate::provider::dify::DIFY_CHAT_PATH,
    crate::provider::dify::DIFY_COMPLETION_PATH,
];

/// Gemini path-parameter route, `{model_and_action}` holding `model:action`
const GEMINI_MODEL_ROUTE: &str = "/v1beta/models/{model_and_action}";

/// Buffer the body and establish the request context
///
/// The body is read exactly once here; adapters only ever see the buffered
/// bytes.
async fn read_context(
    request: Request,
) -> Result<(RequestContext, HeaderMap, axum::body::Bytes), ChatError> {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, BODY_READ_LIMIT)
        .await
        .map_err(|_| ContextError::BodyRead)?;
    let ctx = RequestContext::from_parts(&parts, &bytes)?;
    Ok((ctx, parts.headers, bytes))
}

/// `POST` handler for every route in multi-vendor mode
async fn registry_handler(State(registry): State<ProviderRegistry>, request: Request) -> Response {
    match read_context(request).await {
        Ok((ctx, headers, body)) => registry.dispatch(&ctx, &headers, &body),
        Err(err) => err.into_response(),
    }
}

/// `POST` handler bound to one adapter, claim checks skipped
async fn provider_handler(State(provider): State<ChatProvider>, request: Request) -> Response {
    match read_context(request).await {
        Ok((ctx, headers, body)) => provider.handle(&ctx, &headers, &body),
        Err(err) => err.into_response(),
    }
}

/// Router covering the full route table, dispatching on host and path claims
pub fn chat_router() -> Router {
    let mut app = Router::new();
    for route in OPENAI_COMPATIBLE_ROUTES.iter().chain(VENDOR_SPECIFIC_ROUTES) {
        app = app.route(route, post(registry_handler));
    }
    app = app.route(GEMINI_MODEL_ROUTE, post(registry_handler));
    app.with_state(ProviderRegistry::all())
}

/// Router for the keyed single-vendor mode
///
/// Binds the named vendor's literal routes straight to its adapter and keeps
/// the generic adapter on the OpenAI-shaped paths. Returns `None` for an
/// unknown vendor name so startup can fail loudly.
pub fn single_vendor_router(vendor: &str) -> Option<Router> {
    let provider = ChatProvider::by_name(vendor)?;

    let mut app = Router::new();
    for route in vendor_routes(&provider) {
        app = app.route(route, post(provider_handler));
    }
    if matches!(provider, ChatProvider::Gemini(_)) {
        app = app.route(GEMINI_MODEL_ROUTE, post(provider_handler));
    }
    let mut app = app.with_state(provider);

    if !matches!(provider, ChatProvider::OpenAi(_)) {
        let mut fallback = Router::new();
        for route in OPENAI_COMPATIBLE_ROUTES {
            fallback = fallback.route(route, post(provider_handler));
        }
        app = app.merge(fallback.with_state(ChatProvider::by_name("openai")?));
    }

    Some(app)
}

/// Literal routes owned by an adapter
const fn vendor_routes(provider: &ChatProvider) -> &'static [&'static str] {
    match provider {
        ChatProvider::OpenAi(_) => OPENAI_COMPATIBLE_ROUTES,
        ChatProvider::Minimax(_) => &[crate::provider::minimax::CHAT_COMPLETION_PRO_PATH],
        ChatProvider::Qwen(_) => &[crate::provider::qwen::QWEN_TEXT_GENERATION_PATH],
        ChatProvider::Dify(_) => {
            &[crate::provider::dify::DIFY_CHAT_PATH, crate::provider::dify::DIFY_COMPLETION_PATH]
        }
        // bound through the path-parameter route instead
        ChatProvider::Gemini(_) => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower::ServiceExt;

    fn post_json(uri: &str, host: &str, body: &str) -> Request {
        http::Request::builder()
            .method(http::Method::POST)
            .uri(uri)
            .header(http::header::HOST, host)
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from(body.to_owned()))
            .expect("valid request")
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn malformed_json_is_rejected_before_dispatch() {
        let app = chat_router();
        let response = app
            .oneshot(post_json("/v1/chat/completions", "api.openai.com", "not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), http::StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "Error unmarshalling JSON"})
        );
    }

    #[tokio::test]
    async fn every_literal_route_is_registered() {
        for route in OPENAI_COMPATIBLE_ROUTES.iter().chain(VENDOR_SPECIFIC_ROUTES) {
            let app = chat_router();
            let body = r#"{"model":"m","messages":[{"role":"user","content":"hi"}]}"#;
            let response = app.oneshot(post_json(route, "anything.example.com", body)).await.unwrap();
            assert_ne!(
                response.status(),
                http::StatusCode::METHOD_NOT_ALLOWED,
                "route {route} missing"
            );
        }
    }

    #[tokio::test]
    async fn gemini_param_route_reaches_the_adapter() {
        let app = chat_router();
        let body = r#"{"contents":[{"role":"user","parts":[{"text":"hi"}]}]}"#;
        let response = app
            .oneshot(
                http::Request::builder()
                    .method(http::Method::POST)
                    .uri("/v1beta/models/gemini-pro:generateContent")
                    .header(http::header::HOST, "generativelanguage.googleapis.com")
                    .header(crate::provider::gemini::GOOG_API_KEY_HEADER, "k")
                    .body(axum::body::Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), http::StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["candidates"][0]["finish_reason"], "STOP");
    }

    #[tokio::test]
    async fn single_vendor_mode_skips_host_claims() {
        // dify bound directly: the host no longer matters
        let app = single_vendor_router("dify").unwrap();
        let body = r#"{"query":"hello","response_mode":"blocking"}"#;
        let response = app.oneshot(post_json("/v1/chat-messages", "localhost", body)).await.unwrap();
        // no Authorization header, so the adapter itself answers 401
        assert_eq!(response.status(), http::StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn single_vendor_mode_keeps_generic_routes() {
        let app = single_vendor_router("minimax").unwrap();
        let body = r#"{"model":"m","messages":[{"role":"user","content":"hi"}]}"#;
        let response = app.oneshot(post_json("/v1/chat/completions", "localhost", body)).await.unwrap();
        assert_eq!(response.status(), http::StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["object"], "chat.completion");
    }

    #[test]
    fn unknown_vendor_yields_no_router() {
        assert!(single_vendor_router("anthropic").is_none());
    }
}
