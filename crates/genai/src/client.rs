use async_trait::async_trait;
use docsum_core::{truncate, Credentials};

use crate::error::GenAiError;
use crate::prompt::summary_prompt;
use crate::wire::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};

/// Output token budget.
pub const MAX_OUTPUT_TOKENS: u32 = 8192;
/// Sampling temperature.
pub const TEMPERATURE: f64 = 1.0;
/// Nucleus-sampling threshold.
pub const TOP_P: f64 = 0.95;

/// Seam between the request flow and the concrete model client.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Produce a one-line summary of `document`. One attempt, no retry.
    async fn generate(&self, document: &str) -> Result<String, GenAiError>;
}

/// Client for the generative-text REST API.
pub struct GenAiClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Credentials,
    model: String,
}

impl std::fmt::Debug for GenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl GenAiClient {
    /// Creates a client for one model endpoint.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(
        base_url: String,
        credentials: Credentials,
        model: String,
    ) -> Result<Self, GenAiError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| GenAiError::ClientInit(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            credentials,
            model,
        })
    }

    /// Model name this client targets.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Summarizer for GenAiClient {
    async fn generate(&self, document: &str) -> Result<String, GenAiError> {
        let request = GenerateContentRequest {
            contents: vec![Content { parts: vec![Part { text: summary_prompt(document) }] }],
            generation_config: GenerationConfig {
                max_output_tokens: MAX_OUTPUT_TOKENS,
                temperature: TEMPERATURE,
                top_p: TOP_P,
            },
        };

        let response = self
            .client
            .post(format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model))
            .header(
                "Authorization",
                format!("Bearer {}", self.credentials.bearer_token()),
            )
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GenAiError::HttpStatus { code: status.as_u16(), body });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| GenAiError::JsonParse {
                context: format!("generateContent response (body: {})", truncate(&body, 200)),
                source: e,
            })?;

        if let Some(reason) = parsed.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(GenAiError::Blocked(reason));
        }

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| content.parts.into_iter().map(|p| p.text).collect())
            .ok_or(GenAiError::EmptyResponse)?;
        if text.is_empty() {
            return Err(GenAiError::EmptyResponse);
        }
        tracing::debug!(model = %self.model, chars = text.len(), "generated summary");
        Ok(text)
    }
}
