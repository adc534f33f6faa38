//! Serving-path storage trait.
//!
//! The seam between the request flow and the concrete store backend. Each
//! operation is one independent round trip; no transaction spans the two
//! tables.

use async_trait::async_trait;
use docsum_core::Document;

use crate::StoreError;

/// Point lookups and appends used on the serving path.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the document and ground-truth summary at `index`.
    /// Exact-key lookup; `None` when no row matches.
    async fn fetch_document(&self, index: i64) -> Result<Option<Document>, StoreError>;

    /// Fetch a previously generated summary at `index`, if any.
    async fn fetch_generated_summary(&self, index: i64) -> Result<Option<String>, StoreError>;

    /// Append one generated-summary row `{index, id: index, generated_summary}`.
    /// Row-level rejections from the store surface as an error.
    async fn store_generated_summary(&self, index: i64, summary: &str)
        -> Result<(), StoreError>;
}
