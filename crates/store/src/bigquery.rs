//! REST-backed store client.
//!
//! Point lookups go through the synchronous query endpoint; appends go
//! through `insertAll`, whose row-level `insertErrors` are checked and
//! surfaced. Provisioning (dataset/table creation, bulk load) lives here too
//! but is only reached from the CLI, never from the serving path.

use async_trait::async_trait;
use docsum_core::{truncate, Credentials, Document, GroundTruthRow};
use serde::de::DeserializeOwned;

use crate::wire::{
    generated_summaries_schema, ground_truth_schema, DatasetReference, DatasetSpec,
    InsertAllRequest, InsertAllResponse, InsertRow, QueryRequest, QueryResponse, TableReference,
    TableSchema, TableSpec,
};
use crate::{DocumentStore, StoreError, GENERATED_SUMMARIES_TABLE, GROUND_TRUTH_TABLE};

/// Rows per `insertAll` request during bulk load.
const BULK_LOAD_CHUNK: usize = 500;

/// Client for the tabular-store REST API.
pub struct BigQueryStore {
    client: reqwest::Client,
    base_url: String,
    credentials: Credentials,
    project_id: String,
    dataset_id: String,
    location: String,
}

impl std::fmt::Debug for BigQueryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BigQueryStore")
            .field("base_url", &self.base_url)
            .field("project_id", &self.project_id)
            .field("dataset_id", &self.dataset_id)
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

impl BigQueryStore {
    /// Creates a store client for one project/dataset.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(
        base_url: String,
        credentials: Credentials,
        project_id: String,
        dataset_id: String,
        location: String,
    ) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| StoreError::ClientInit(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            credentials,
            project_id,
            dataset_id,
            location,
        })
    }

    fn table_ref(&self, table: &str) -> String {
        format!("{}.{}.{}", self.project_id, self.dataset_id, table)
    }

    /// POSTs `body` to `{base}/bigquery/v2/{path}` and decodes the response.
    async fn post_json<B: serde::Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, StoreError> {
        let response = self
            .client
            .post(format!("{}/bigquery/v2/{path}", self.base_url))
            .header(
                "Authorization",
                format!("Bearer {}", self.credentials.bearer_token()),
            )
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(StoreError::HttpStatus { code: status.as_u16(), body: text });
        }
        serde_json::from_str(&text).map_err(|e| StoreError::JsonParse {
            context: format!("{path} response (body: {})", truncate(&text, 200)),
            source: e,
        })
    }

    /// Runs one standard-SQL query and returns its rows.
    async fn query(&self, sql: String) -> Result<QueryResponse, StoreError> {
        tracing::debug!(query = %sql, "running store query");
        let request = QueryRequest { query: sql, use_legacy_sql: false };
        self.post_json(&format!("projects/{}/queries", self.project_id), &request)
            .await
    }

    async fn insert_all(
        &self,
        table: &str,
        rows: Vec<serde_json::Value>,
    ) -> Result<(), StoreError> {
        let request = InsertAllRequest {
            rows: rows.into_iter().map(|json| InsertRow { json }).collect(),
        };
        let path = format!(
            "projects/{}/datasets/{}/tables/{table}/insertAll",
            self.project_id, self.dataset_id
        );
        let response: InsertAllResponse = self.post_json(&path, &request).await?;
        if response.insert_errors.is_empty() {
            return Ok(());
        }
        let detail = response
            .insert_errors
            .iter()
            .map(|row_err| {
                let reasons = row_err
                    .errors
                    .iter()
                    .map(|e| format!("{}: {}", e.reason, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("row {}: [{reasons}]", row_err.index)
            })
            .collect::<Vec<_>>()
            .join("; ");
        Err(StoreError::InsertRejected(detail))
    }

    /// Creates the dataset if it does not exist (HTTP 409 is treated as
    /// already-present).
    pub async fn create_dataset(&self) -> Result<(), StoreError> {
        let spec = DatasetSpec {
            dataset_reference: DatasetReference {
                project_id: self.project_id.clone(),
                dataset_id: self.dataset_id.clone(),
            },
            location: self.location.clone(),
        };
        let path = format!("projects/{}/datasets", self.project_id);
        match self.post_json::<_, serde_json::Value>(&path, &spec).await {
            Ok(_) => {
                tracing::info!(dataset = %self.dataset_id, "created dataset");
                Ok(())
            },
            Err(StoreError::HttpStatus { code: 409, .. }) => {
                tracing::info!(dataset = %self.dataset_id, "dataset already exists");
                Ok(())
            },
            Err(e) => Err(e),
        }
    }

    async fn create_table(&self, table: &'static str, schema: TableSchema) -> Result<(), StoreError> {
        let spec = TableSpec {
            table_reference: TableReference {
                project_id: self.project_id.clone(),
                dataset_id: self.dataset_id.clone(),
                table_id: table.to_owned(),
            },
            schema,
        };
        let path = format!("projects/{}/datasets/{}/tables", self.project_id, self.dataset_id);
        match self.post_json::<_, serde_json::Value>(&path, &spec).await {
            Ok(_) => {
                tracing::info!(table, "created table");
                Ok(())
            },
            Err(StoreError::HttpStatus { code: 409, .. }) => {
                tracing::info!(table, "table already exists");
                Ok(())
            },
            Err(e) => Err(e),
        }
    }

    /// Creates the ground-truth table if missing.
    pub async fn create_ground_truth_table(&self) -> Result<(), StoreError> {
        self.create_table(GROUND_TRUTH_TABLE, ground_truth_schema()).await
    }

    /// Creates the generated-summaries table if missing.
    pub async fn create_generated_summaries_table(&self) -> Result<(), StoreError> {
        self.create_table(GENERATED_SUMMARIES_TABLE, generated_summaries_schema()).await
    }

    /// Full-overwrite bulk load of the ground-truth table: truncates the
    /// table, then appends every row. Setup-only, not used while serving.
    pub async fn load_ground_truth(&self, rows: &[GroundTruthRow]) -> Result<(), StoreError> {
        self.query(format!("TRUNCATE TABLE `{}`", self.table_ref(GROUND_TRUTH_TABLE)))
            .await?;
        for chunk in rows.chunks(BULK_LOAD_CHUNK) {
            let json_rows = chunk
                .iter()
                .map(|row| {
                    serde_json::json!({
                        "index": row.index,
                        "id": row.id,
                        "document": row.document,
                        "summary": row.summary,
                    })
                })
                .collect();
            self.insert_all(GROUND_TRUTH_TABLE, json_rows).await?;
        }
        tracing::info!(rows = rows.len(), "loaded ground truth table");
        Ok(())
    }

    /// Returns up to `limit` rows of `table` as positional string cells.
    /// Ad-hoc inspection path for the CLI.
    pub async fn sample_rows(
        &self,
        table: &str,
        limit: usize,
    ) -> Result<Vec<Vec<Option<String>>>, StoreError> {
        let response = self
            .query(format!("SELECT * FROM `{}` LIMIT {limit}", self.table_ref(table)))
            .await?;
        Ok(response
            .rows
            .into_iter()
            .map(|row| row.f.into_iter().map(|cell| cell.v).collect())
            .collect())
    }
}

#[async_trait]
impl DocumentStore for BigQueryStore {
    async fn fetch_document(&self, index: i64) -> Result<Option<Document>, StoreError> {
        let sql = format!(
            "SELECT document, summary FROM `{}` WHERE index = {index} LIMIT 1",
            self.table_ref(GROUND_TRUTH_TABLE)
        );
        let response = self.query(sql).await?;
        let Some(row) = response.rows.into_iter().next() else {
            return Ok(None);
        };
        let mut cells = row.f.into_iter();
        let text = cells
            .next()
            .and_then(|c| c.v)
            .ok_or(StoreError::MalformedRow(GROUND_TRUTH_TABLE))?;
        let summary = cells
            .next()
            .and_then(|c| c.v)
            .ok_or(StoreError::MalformedRow(GROUND_TRUTH_TABLE))?;
        Ok(Some(Document { text, summary }))
    }

    async fn fetch_generated_summary(&self, index: i64) -> Result<Option<String>, StoreError> {
        let sql = format!(
            "SELECT generated_summary FROM `{}` WHERE index = {index} LIMIT 1",
            self.table_ref(GENERATED_SUMMARIES_TABLE)
        );
        let response = self.query(sql).await?;
        let Some(row) = response.rows.into_iter().next() else {
            return Ok(None);
        };
        row.f
            .into_iter()
            .next()
            .and_then(|c| c.v)
            .ok_or(StoreError::MalformedRow(GENERATED_SUMMARIES_TABLE))
            .map(Some)
    }

    async fn store_generated_summary(
        &self,
        index: i64,
        summary: &str,
    ) -> Result<(), StoreError> {
        let row = serde_json::json!({
            "index": index,
            "id": index,
            "generated_summary": summary,
        });
        self.insert_all(GENERATED_SUMMARIES_TABLE, vec![row]).await
    }
}

#[cfg(test)]
mod tests;
