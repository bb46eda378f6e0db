use axum::Json;
use axum::response::IntoResponse;
use http::StatusCode;

/// Embeddings stub
///
/// The route is registered for wire compatibility but no embeddings adapter
/// exists yet, so every request falls through to the generic not-found body.
pub async fn embeddings_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(serde_json::json!({"error": "Not found"})))
}
