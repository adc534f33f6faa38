//! Typed error enum for the service layer.
//!
//! Unifies store and generator failures into a single error type so the
//! HTTP layer converts once instead of downcasting opaque boxes.

use docsum_genai::GenAiError;
use docsum_store::StoreError;
use thiserror::Error;

/// Service-layer error unifying store and generator failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Store round trip failed (query, insert, row-level rejection).
    #[error("store: {0}")]
    Store(#[from] StoreError),

    /// Generative-model call failed (network, quota, safety block).
    #[error("generation: {0}")]
    Generation(#[from] GenAiError),
}
