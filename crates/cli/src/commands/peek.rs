use anyhow::Result;
use docsum_core::Settings;
use docsum_store::{GENERATED_SUMMARIES_TABLE, GROUND_TRUTH_TABLE};

use crate::connect_store;

pub(crate) async fn run(settings: &Settings, limit: usize) -> Result<()> {
    let (store, _credentials) = connect_store(settings).await?;
    for table in [GROUND_TRUTH_TABLE, GENERATED_SUMMARIES_TABLE] {
        println!("=== {table} ===");
        match store.sample_rows(table, limit).await {
            Ok(rows) if rows.is_empty() => println!("(no rows)"),
            Ok(rows) => {
                for row in rows {
                    println!("{}", serde_json::to_string(&row)?);
                }
            },
            Err(e) => println!("error querying {table}: {e}"),
        }
    }
    Ok(())
}
