use http::StatusCode;
use thiserror::Error;

use crate::HttpError;

/// Identity of an inbound request, extracted once before dispatch
///
/// Built from the request head and the fully buffered body, then passed by
/// reference into every adapter claim check and handler. Adapters must never
/// re-derive these fields from transport state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Value of the `Host` header (authority when absent)
    pub host: String,
    /// Request path, without query string
    pub path: String,
    /// Top-level `model` field of the JSON body; empty when absent or mistyped
    pub model: String,
}

impl RequestContext {
    /// Build the context from buffered request parts
    ///
    /// The body must already be read in full; the same bytes are handed to
    /// downstream adapters so the body is only consumed once per request.
    pub fn from_parts(parts: &http::request::Parts, body: &[u8]) -> Result<Self, ContextError> {
        let host = parts
            .headers
            .get(http::header::HOST)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .or_else(|| parts.uri.host().map(str::to_owned))
            .unwrap_or_default();

        let data: serde_json::Map<String, serde_json::Value> =
            serde_json::from_slice(body).map_err(|_| ContextError::MalformedJson)?;
        let model = data
            .get("model")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_owned();

        Ok(Self {
            host,
            path: parts.uri.path().to_owned(),
            model,
        })
    }
}

/// Failures while establishing the request context
///
/// Both variants are terminal: the request is answered with a generic error
/// body and no adapter is consulted.
#[derive(Debug, Error)]
pub enum ContextError {
    /// The transport failed while reading the request body
    #[error("error reading request body")]
    BodyRead,

    /// The body is not a JSON object
    #[error("error unmarshalling JSON")]
    MalformedJson,
}

impl HttpError for ContextError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BodyRead => StatusCode::INTERNAL_SERVER_ERROR,
            Self::MalformedJson => StatusCode::BAD_REQUEST,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::BodyRead => "transport_error",
            Self::MalformedJson => "invalid_request_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::BodyRead => "Error reading request body".to_owned(),
            Self::MalformedJson => "Error unmarshalling JSON".to_owned(),
        }
    }
}
