//! In-process store backend for tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;
use docsum_core::{Document, GroundTruthRow};
use tokio::sync::RwLock;

use crate::{DocumentStore, StoreError};

/// Hash-map backend with the same append semantics as the real store:
/// generated summaries are append-only and the first row wins on lookup.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<i64, Document>>,
    summaries: RwLock<Vec<(i64, String)>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Full-overwrite load, mirroring the bulk-load path of the real store.
    pub async fn load_ground_truth(&self, rows: &[GroundTruthRow]) {
        let mut documents = self.documents.write().await;
        documents.clear();
        for row in rows {
            documents.insert(
                row.index,
                Document { text: row.document.clone(), summary: row.summary.clone() },
            );
        }
    }

    /// Number of generated-summary rows, duplicates included.
    pub async fn generated_row_count(&self) -> usize {
        self.summaries.read().await.len()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn fetch_document(&self, index: i64) -> Result<Option<Document>, StoreError> {
        Ok(self.documents.read().await.get(&index).cloned())
    }

    async fn fetch_generated_summary(&self, index: i64) -> Result<Option<String>, StoreError> {
        Ok(self
            .summaries
            .read()
            .await
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, s)| s.clone()))
    }

    async fn store_generated_summary(
        &self,
        index: i64,
        summary: &str,
    ) -> Result<(), StoreError> {
        self.summaries.write().await.push((index, summary.to_owned()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_round_trip() {
        let store = MemoryStore::new();
        store
            .load_ground_truth(&[GroundTruthRow::new(3, "D".to_owned(), "S".to_owned())])
            .await;
        let doc = store.fetch_document(3).await.unwrap().unwrap();
        assert_eq!(doc.text, "D");
        assert_eq!(doc.summary, "S");
        assert!(store.fetch_document(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reload_overwrites() {
        let store = MemoryStore::new();
        store
            .load_ground_truth(&[GroundTruthRow::new(0, "old".to_owned(), "s".to_owned())])
            .await;
        store
            .load_ground_truth(&[GroundTruthRow::new(1, "new".to_owned(), "s".to_owned())])
            .await;
        assert!(store.fetch_document(0).await.unwrap().is_none());
        assert!(store.fetch_document(1).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_first_summary_row_wins() {
        let store = MemoryStore::new();
        store.store_generated_summary(0, "first").await.unwrap();
        store.store_generated_summary(0, "second").await.unwrap();
        assert_eq!(store.fetch_generated_summary(0).await.unwrap().as_deref(), Some("first"));
        assert_eq!(store.generated_row_count().await, 2);
    }
}
