//! Shared helpers for integration tests

#![allow(dead_code)]

pub mod server;

/// Parse SSE event lines from raw response text
pub fn parse_sse_data(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| line.starts_with("data: "))
        .map(|line| line.trim_start_matches("data: ").to_owned())
        .collect()
}
