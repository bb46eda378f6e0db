//! Chat completion emulation core for Mimic
//!
//! Impersonates the wire protocols of several LLM vendors (generic
//! OpenAI-compatible, Minimax, Qwen, Dify, Gemini) behind a shared set of
//! HTTP routes. Each inbound request is matched to the first adapter whose
//! claim predicate accepts its host and path, decoded against that vendor's
//! schema, answered with a deterministic mock reply, and rendered either as a
//! single JSON document or as a paced SSE stream with the vendor's closing
//! convention.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod error;
pub mod protocol;
pub mod provider;
pub mod registry;
pub mod reply;
pub mod router;
pub mod stream;

pub use error::ChatError;
pub use registry::{ChatProvider, ProviderRegistry};
pub use reply::prompt_to_reply;
pub use router::{chat_router, single_vendor_router};
