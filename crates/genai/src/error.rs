//! Typed error enum for the generator crate.

use thiserror::Error;

/// Errors from generative-model calls.
#[derive(Debug, Error)]
pub enum GenAiError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("empty response: no candidates returned")]
    EmptyResponse,
    /// The model refused the prompt (content-safety block).
    #[error("prompt blocked: {0}")]
    Blocked(String),
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}
