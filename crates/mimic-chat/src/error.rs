use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use mimic_core::{ContextError, HttpError};
use thiserror::Error;

/// Errors surfaced by the dispatcher itself
///
/// Vendor-shaped schema and auth errors never reach this type; each adapter
/// renders those in its own wire format. This enum covers the cases where no
/// adapter is ever consulted.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Request context could not be established
    #[error(transparent)]
    Context(#[from] ContextError),

    /// No adapter claimed the request
    #[error("no provider claims this request")]
    NoProvider,
}

impl HttpError for ChatError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Context(err) => err.status_code(),
            Self::NoProvider => StatusCode::NOT_FOUND,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::Context(err) => err.error_type(),
            Self::NoProvider => "not_found_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Context(err) => err.client_message(),
            Self::NoProvider => "Not found".to_owned(),
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::warn!(error_type = self.error_type(), %status, "{self}");
        let body = serde_json::json!({"error": self.client_message()});
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_provider_maps_to_generic_404() {
        let err = ChatError::NoProvider;
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.client_message(), "Not found");
    }

    #[test]
    fn context_errors_pass_through() {
        let err = ChatError::from(ContextError::MalformedJson);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.client_message(), "Error unmarshalling JSON");
    }
}
