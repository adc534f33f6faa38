//! Wire types for the tabular-store REST API (BigQuery v2 surface).

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QueryRequest {
    pub query: String,
    pub use_legacy_sql: bool,
}

/// Query results come back as rows of positional cells, each cell a string
/// value (or null) under `v`.
#[derive(Debug, Deserialize)]
pub(crate) struct QueryResponse {
    #[serde(default)]
    pub rows: Vec<WireRow>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireRow {
    #[serde(default)]
    pub f: Vec<WireCell>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireCell {
    pub v: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct InsertAllRequest {
    pub rows: Vec<InsertRow>,
}

#[derive(Debug, Serialize)]
pub(crate) struct InsertRow {
    pub json: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InsertAllResponse {
    #[serde(default)]
    pub insert_errors: Vec<InsertError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InsertError {
    pub index: u32,
    #[serde(default)]
    pub errors: Vec<ErrorProto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorProto {
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DatasetSpec {
    pub dataset_reference: DatasetReference,
    pub location: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DatasetReference {
    pub project_id: String,
    pub dataset_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TableSpec {
    pub table_reference: TableReference,
    pub schema: TableSchema,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TableReference {
    pub project_id: String,
    pub dataset_id: String,
    pub table_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct TableSchema {
    pub fields: Vec<SchemaField>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SchemaField {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub field_type: &'static str,
    pub mode: &'static str,
}

impl SchemaField {
    pub(crate) const fn required(name: &'static str, field_type: &'static str) -> Self {
        Self { name, field_type, mode: "REQUIRED" }
    }
}

/// Schema of the `ground_truth` table.
pub(crate) fn ground_truth_schema() -> TableSchema {
    TableSchema {
        fields: vec![
            SchemaField::required("index", "INTEGER"),
            SchemaField::required("id", "INTEGER"),
            SchemaField::required("document", "STRING"),
            SchemaField::required("summary", "STRING"),
        ],
    }
}

/// Schema of the `generated_summaries` table.
pub(crate) fn generated_summaries_schema() -> TableSchema {
    TableSchema {
        fields: vec![
            SchemaField::required("index", "INTEGER"),
            SchemaField::required("id", "INTEGER"),
            SchemaField::required("generated_summary", "STRING"),
        ],
    }
}
