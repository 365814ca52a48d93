//! Error surface for the Comprehend client.

use thiserror::Error;

/// Failure raised by a remote Comprehend call.
///
/// Operations return this instead of terminating the process, so callers
/// decide whether a failure aborts a run. The CLI treats every variant as
/// fatal at its outermost entry point.
#[derive(Debug, Error)]
pub enum ComprehendError {
    /// The request body could not be encoded.
    #[error("encoding {operation} request: {source}")]
    Encode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// The request never produced a usable HTTP response.
    #[error("transport failure calling {operation}: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
    /// Comprehend answered with an error body. Throttling, malformed input,
    /// permission denial, and size-limit violations all land here.
    #[error("{operation} failed: {code}: {message}")]
    Service {
        operation: &'static str,
        code: String,
        message: String,
    },
    /// A 200 response whose body did not match the expected shape.
    #[error("unexpected {operation} response: {source}")]
    UnexpectedResponse {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
