//! Provider adapters, one per emulated vendor
//!
//! Every adapter follows the same pipeline: a pure claim predicate over the
//! request context, a vendor-specific credential check, schema decode and
//! validation against the vendor's declared constraints, deterministic reply
//! derivation, and rendering as either a single JSON document or a paced SSE
//! stream. The first failing step short-circuits with an error in the
//! vendor's own wire shape.

pub mod dify;
pub mod gemini;
pub mod minimax;
pub mod openai;
pub mod qwen;

pub use dify::DifyProvider;
pub use gemini::GeminiProvider;
pub use minimax::MinimaxProvider;
pub use openai::OpenAiProvider;
pub use qwen::QwenProvider;

/// Read a header as a string, empty when absent or non-UTF-8
pub(crate) fn header_str<'a>(headers: &'a http::HeaderMap, name: &str) -> &'a str {
    headers.get(name).and_then(|value| value.to_str().ok()).unwrap_or_default()
}
