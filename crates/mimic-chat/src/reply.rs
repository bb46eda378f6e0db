//! Deterministic mock reply derivation
//!
//! The reply has no semantic relationship to the prompt beyond simple
//! derivation; the same input always yields the same output, and streaming
//! frames concatenate back to exactly the non-streaming body.

/// Derive the mock reply for a prompt
pub fn prompt_to_reply(prompt: &str) -> String {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return "This is a mock response.".to_owned();
    }
    format!("This is a mock response to: {prompt}")
}
