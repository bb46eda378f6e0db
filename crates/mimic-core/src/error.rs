use http::StatusCode;

/// Trait for errors the dispatch layer renders as HTTP responses
///
/// Implemented by the context and dispatcher error types. Adapter-level
/// failures never come through here; each vendor adapter renders its own
/// wire-shaped error body, including the ones that ride an HTTP 200.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `invalid_request_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose in the generic `{"error": "..."}` body
    fn client_message(&self) -> String;
}
