//! Typed error enum for the store layer.

use thiserror::Error;

/// Errors from tabular-store operations.
#[derive(Debug, Error)]
pub enum StoreError {
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
    /// The insert API accepted the request but rejected individual rows.
    #[error("insert rejected: {0}")]
    InsertRejected(String),
    /// A returned row did not have the expected cell layout.
    #[error("malformed row in {0}")]
    MalformedRow(&'static str),
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}
