use std::path::Path;

use anyhow::{Context, Result};
use docsum_core::{GroundTruthRow, Settings};
use serde::Deserialize;

use crate::connect_store;

/// One record of the dataset file. `index` is assigned by position; `id`
/// falls back to the index when the file carries none.
#[derive(Debug, Deserialize)]
struct DatasetRecord {
    id: Option<i64>,
    document: String,
    summary: String,
}

pub(crate) async fn run(settings: &Settings, file: &Path) -> Result<()> {
    let raw = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("reading dataset file {}", file.display()))?;
    let records: Vec<DatasetRecord> =
        serde_json::from_str(&raw).context("parsing dataset file")?;

    let rows: Vec<GroundTruthRow> = records
        .into_iter()
        .enumerate()
        .map(|(i, rec)| {
            let index = i as i64;
            GroundTruthRow {
                index,
                id: rec.id.unwrap_or(index),
                document: rec.document,
                summary: rec.summary,
            }
        })
        .collect();

    let (store, _credentials) = connect_store(settings).await?;
    store.load_ground_truth(&rows).await?;
    println!("Loaded {} rows into `{}`", rows.len(), settings.table_ref("ground_truth"));
    Ok(())
}
