use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use docsum_core::{
    default_chain, env_parse_with_default, resolve_credentials, Credentials, Settings,
};
use docsum_store::BigQueryStore;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "docsum")]
#[command(about = "Document summarization service and provisioning tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server.
    Serve {
        /// Port to bind; falls back to the `PORT` env var, then 8000.
        #[arg(short, long)]
        port: Option<u16>,
        #[arg(short = 'H', long, default_value = "0.0.0.0")]
        host: String,
    },
    /// Create the dataset and both tables (idempotent).
    Provision,
    /// Bulk-load the ground-truth table from a JSON dataset file.
    Load {
        /// JSON array of `{id?, document, summary}` records.
        file: PathBuf,
    },
    /// Print sample rows from both tables.
    Peek {
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },
}

/// Resolves credentials through the standard fallback chain and builds the
/// store client against the project they belong to.
async fn connect_store(settings: &Settings) -> Result<(BigQueryStore, Credentials)> {
    let chain = default_chain(settings);
    let credentials = resolve_credentials(&chain).await?;
    let project_id =
        credentials.project_id.clone().unwrap_or_else(|| settings.project_id.clone());
    let store = BigQueryStore::new(
        settings.bigquery_api_url.clone(),
        credentials.clone(),
        project_id,
        settings.dataset_id.clone(),
        settings.location.clone(),
    )?;
    Ok((store, credentials))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env();

    match cli.command {
        Commands::Serve { port, host } => {
            let port = port.unwrap_or_else(|| env_parse_with_default("PORT", 8000));
            commands::serve::run(&settings, port, host).await
        },
        Commands::Provision => commands::provision::run(&settings).await,
        Commands::Load { file } => commands::load::run(&settings, &file).await,
        Commands::Peek { limit } => commands::peek::run(&settings, limit).await,
    }
}
