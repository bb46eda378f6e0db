//! Shared request context and error conversion traits for Mimic
//!
//! Kept free of axum so every crate in the workspace can describe request
//! identity and HTTP-mappable errors without pulling in the server stack.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod context;
mod error;

pub use context::{ContextError, RequestContext};
pub use error::HttpError;
