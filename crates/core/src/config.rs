//! Environment-driven settings, read once at startup.

use std::env;

/// Runtime configuration resolved from the environment.
///
/// Every field has a fixed default so the service starts with no
/// configuration at all (pointing at the production endpoints).
#[derive(Debug, Clone)]
pub struct Settings {
    /// Cloud project that owns the dataset.
    pub project_id: String,
    /// Dataset holding the `ground_truth` and `generated_summaries` tables.
    pub dataset_id: String,
    /// Dataset location, used when provisioning.
    pub location: String,
    /// Generative model identifier.
    pub model_id: String,
    /// Base URL of the tabular-store REST API.
    pub bigquery_api_url: String,
    /// Base URL of the generative-text REST API.
    pub genai_api_url: String,
    /// Path of the local key file used as the last credential fallback.
    pub credentials_file: String,
}

impl Settings {
    /// Reads settings from the environment, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            project_id: env_or("PROJECT_ID", "dag-task"),
            dataset_id: env_or("DATASET_ID", "text_summarization"),
            location: env_or("LOCATION", "us-central1"),
            model_id: env_or("MODEL_ID", "gemini-pro"),
            bigquery_api_url: env_or("BIGQUERY_API_URL", "https://bigquery.googleapis.com"),
            genai_api_url: env_or("GENAI_API_URL", "https://generativelanguage.googleapis.com"),
            credentials_file: env_or("CREDENTIALS_FILE", "./secrets/vertex-ai.json"),
        }
    }

    /// Fully-qualified table reference `project.dataset.table`.
    #[must_use]
    pub fn table_ref(&self, table: &str) -> String {
        format!("{}.{}.{}", self.project_id, self.dataset_id, table)
    }
}

fn env_or(var: &str, default: &str) -> String {
    match env::var(var) {
        Ok(v) if !v.is_empty() => v,
        _ => default.to_owned(),
    }
}
