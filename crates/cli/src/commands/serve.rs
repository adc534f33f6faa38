use std::sync::Arc;

use anyhow::Result;
use docsum_core::Settings;
use docsum_genai::GenAiClient;
use docsum_http::{create_router, AppState};
use docsum_service::SummaryService;

use crate::connect_store;

pub(crate) async fn run(settings: &Settings, port: u16, host: String) -> Result<()> {
    let (store, credentials) = connect_store(settings).await?;
    let generator = GenAiClient::new(
        settings.genai_api_url.clone(),
        credentials,
        settings.model_id.clone(),
    )?;

    let service = SummaryService::new(Arc::new(store), Arc::new(generator));
    let state = Arc::new(AppState { service });

    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
