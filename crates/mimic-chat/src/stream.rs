//! Streaming emitter
//!
//! Turns a reply string into an ordered sequence of vendor-shaped SSE frames.
//! A single producer task builds one frame per unit and hands it through a
//! bounded channel of capacity 1, so each send awaits the writer flushing the
//! previous frame; the fixed inter-frame delay simulates token-by-token
//! generation. The terminal frame travels through the same channel after the
//! last content frame, which guarantees it is emitted last. When the client
//! disconnects the response stream is dropped, the next send fails, and the
//! producer stops instead of pacing through the rest of the reply.

use std::convert::Infallible;
use std::time::Duration;

use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use futures_util::stream;
use tokio::sync::mpsc;

/// Inter-frame delay for character-level streams
pub const CHAR_FRAME_DELAY: Duration = Duration::from_millis(200);

/// Inter-frame delay for word-level streams
pub const WORD_FRAME_DELAY: Duration = Duration::from_millis(50);

/// Split a reply into single-character units
pub fn char_units(text: &str) -> Vec<String> {
    text.chars().map(String::from).collect()
}

/// Split a reply into whole-word units
///
/// Every unit but the last keeps a trailing space so concatenating the units
/// reproduces the reply exactly.
pub fn word_units(text: &str) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let last = words.len().saturating_sub(1);
    words
        .iter()
        .enumerate()
        .map(|(i, word)| if i == last { (*word).to_owned() } else { format!("{word} ") })
        .collect()
}

/// Emit a paced SSE response
///
/// `frame` builds the JSON payload for one unit (index, unit, is-last);
/// payloads are serialized before the `data: ` prefix is applied, so embedded
/// newlines never split a frame. Exactly one `terminal` payload follows the
/// content frames.
pub fn sse_response<F>(units: Vec<String>, delay: Duration, frame: F, terminal: String) -> Response
where
    F: Fn(usize, &str, bool) -> String + Send + 'static,
{
    let (tx, rx) = mpsc::channel::<String>(1);

    tokio::spawn(async move {
        let last = units.len().saturating_sub(1);
        for (i, unit) in units.iter().enumerate() {
            let payload = frame(i, unit, i == last);
            if tx.send(payload).await.is_err() {
                // consumer is gone; stop producing
                return;
            }
            tokio::time::sleep(delay).await;
        }
        let _ = tx.send(terminal).await;
    });

    let events = stream::unfold(rx, |mut rx| async move {
        rx.recv()
            .await
            .map(|payload| (Ok::<_, Infallible>(Event::default().data(payload)), rx))
    });

    ([(http::header::CACHE_CONTROL, "no-cache")], Sse::new(events)).into_response()
}
