use anyhow::Result;
use docsum_core::Settings;

use crate::connect_store;

pub(crate) async fn run(settings: &Settings) -> Result<()> {
    let (store, _credentials) = connect_store(settings).await?;
    store.create_dataset().await?;
    store.create_ground_truth_table().await?;
    store.create_generated_summaries_table().await?;
    println!("Provisioned dataset `{}` with both tables", settings.dataset_id);
    Ok(())
}
