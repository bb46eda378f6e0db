//! Non-streaming chat completion behavior over the OpenAI-shaped routes

mod harness;

use harness::server::TestServer;

fn chat_body(model: &str, content: &str) -> serde_json::Value {
    serde_json::json!({
        "model": model,
        "messages": [{"role": "user", "content": content}]
    })
}

#[tokio::test]
async fn completion_body_is_byte_stable() {
    let server = TestServer::start().await.unwrap();

    let resp = server
        .client()
        .post(server.url("/v1/chat/completions"))
        .json(&chat_body("gpt-4", "hi"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "id": "chatcmpl-llm-mock",
            "object": "chat.completion",
            "created": 10,
            "model": "gpt-4",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "This is a mock response to: hi"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 9, "completion_tokens": 1, "total_tokens": 10}
        })
    );
}

#[tokio::test]
async fn identical_requests_get_identical_answers() {
    let server = TestServer::start().await.unwrap();

    let mut bodies = Vec::new();
    for _ in 0..2 {
        let resp = server
            .client()
            .post(server.url("/chat/completions"))
            .json(&chat_body("m", "same prompt"))
            .send()
            .await
            .unwrap();
        bodies.push(resp.text().await.unwrap());
    }
    assert_eq!(bodies[0], bodies[1]);
}

#[tokio::test]
async fn prompt_comes_from_the_last_message() {
    let server = TestServer::start().await.unwrap();

    let body = serde_json::json!({
        "model": "m",
        "messages": [
            {"role": "system", "content": "you are helpful"},
            {"role": "user", "content": "first"},
            {"role": "user", "content": "second"}
        ]
    });
    let resp = server
        .client()
        .post(server.url("/v1/chat/completions"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(
        json["choices"][0]["message"]["content"],
        "This is a mock response to: second"
    );
}

#[tokio::test]
async fn multimodal_content_parts_are_flattened() {
    let server = TestServer::start().await.unwrap();

    let body = serde_json::json!({
        "model": "m",
        "messages": [{
            "role": "user",
            "content": [
                {"type": "text", "text": "describe"},
                {"type": "image_url", "image_url": {"url": "https://example.com/a.png"}},
                {"type": "text", "text": "this"}
            ]
        }]
    });
    let resp = server
        .client()
        .post(server.url("/v1/chat/completions"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let json: serde_json::Value = resp.json().await.unwrap();
    // image parts contribute nothing; text parts keep their order
    assert_eq!(
        json["choices"][0]["message"]["content"],
        "This is a mock response to: describe\nthis"
    );
}

#[tokio::test]
async fn missing_model_is_rejected_with_a_flat_error() {
    let server = TestServer::start().await.unwrap();

    let body = serde_json::json!({"messages": [{"role": "user", "content": "hi"}]});
    let resp = server
        .client()
        .post(server.url("/v1/chat/completions"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json, serde_json::json!({"error": "field 'model' is required"}));
}

#[tokio::test]
async fn empty_messages_are_rejected() {
    let server = TestServer::start().await.unwrap();

    let body = serde_json::json!({"model": "m", "messages": []});
    let resp = server
        .client()
        .post(server.url("/v1/chat/completions"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(
        json,
        serde_json::json!({"error": "field 'messages' must contain at least 1 item"})
    );
}

#[tokio::test]
async fn malformed_json_never_reaches_an_adapter() {
    let server = TestServer::start().await.unwrap();

    let resp = server
        .client()
        .post(server.url("/v1/chat/completions"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json, serde_json::json!({"error": "Error unmarshalling JSON"}));
}

#[tokio::test]
async fn all_openai_shaped_routes_serve_the_same_answer() {
    let server = TestServer::start().await.unwrap();

    for path in [
        "/v2/chat/completions",
        "/api/v3/chat/completions",
        "/chat/completions",
        "/openai/v1/chat/completions",
        "/v1/text/chatcompletion_v2",
        "/v1/chat/completions",
        "/compatible-mode/v1/chat/completions",
        "/api/paas/v4/chat/completions",
    ] {
        let resp = server
            .client()
            .post(server.url(path))
            .json(&chat_body("m", "hi"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200, "route {path}");
        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["object"], "chat.completion", "route {path}");
    }
}

#[tokio::test]
async fn embeddings_stub_answers_not_found() {
    let server = TestServer::start().await.unwrap();

    let resp = server
        .client()
        .post(server.url("/v1/embeddings"))
        .json(&serde_json::json!({"model": "m", "input": "x"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json, serde_json::json!({"error": "Not found"}));
}
