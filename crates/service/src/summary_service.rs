//! Read-through summary cache over the document store and the generator.

use std::collections::HashMap;
use std::sync::Arc;

use docsum_core::{Document, SummarySource};
use docsum_genai::Summarizer;
use docsum_store::DocumentStore;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::ServiceError;

/// Result of one summarization request.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub document: String,
    pub generated_summary: String,
    pub ground_truth_summary: Option<String>,
    pub summary_source: SummarySource,
}

/// Orchestrates one request: document lookup, cache check, generation,
/// persistence.
///
/// Clients are injected once at startup and shared for the life of the
/// process; the service itself holds no per-request state beyond the
/// per-index generation locks.
pub struct SummaryService {
    store: Arc<dyn DocumentStore>,
    generator: Arc<dyn Summarizer>,
    // One lock per index so concurrent first-requests serialize instead of
    // each generating and inserting a duplicate row. In-process only; a
    // second instance of the service behind the same tables can still race.
    generation_locks: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

impl SummaryService {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, generator: Arc<dyn Summarizer>) -> Self {
        Self { store, generator, generation_locks: Mutex::new(HashMap::new()) }
    }

    async fn lock_for(&self, index: i64) -> Arc<Mutex<()>> {
        let mut locks = self.generation_locks.lock().await;
        Arc::clone(locks.entry(index).or_default())
    }

    /// Summarizes the document at `index`.
    ///
    /// Returns `Ok(None)` when no document row matches. A cached summary is
    /// served as-is; on a miss the generator runs and the result is
    /// persisted before responding. Generation or persistence failure aborts
    /// the request with no partial write.
    pub async fn summarize(&self, index: i64) -> Result<Option<DocumentSummary>, ServiceError> {
        let Some(Document { text: document, summary: ground_truth }) =
            self.store.fetch_document(index).await?
        else {
            return Ok(None);
        };

        let lock = self.lock_for(index).await;
        let _guard = lock.lock().await;

        let (generated_summary, summary_source) =
            match self.store.fetch_generated_summary(index).await? {
                Some(cached) => (cached, SummarySource::Cache),
                None => {
                    let generated = self.generator.generate(&document).await?;
                    self.store.store_generated_summary(index, &generated).await?;
                    tracing::info!(index, "generated and persisted summary");
                    (generated, SummarySource::Generated)
                },
            };

        Ok(Some(DocumentSummary {
            document,
            generated_summary,
            ground_truth_summary: Some(ground_truth),
            summary_source,
        }))
    }
}
