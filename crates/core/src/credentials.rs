//! Credential resolution as an ordered chain of sources.
//!
//! Resolution order, first success wins:
//! 1. JSON key blob in the `GCP_SERVICE_ACCOUNT_CREDENTIALS` env var.
//! 2. Platform metadata server (valid inside a trusted cloud runtime).
//! 3. Local key file (development fallback).
//!
//! A failure in one source logs a warning and moves to the next; exhausting
//! the chain is fatal and propagates to the caller.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::Settings;

/// Errors from credential resolution.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("env var {var} not set")]
    EnvVarMissing { var: &'static str },
    #[error("invalid key JSON: {0}")]
    InvalidKeyJson(#[source] serde_json::Error),
    #[error("metadata server request failed: {0}")]
    Metadata(#[from] reqwest::Error),
    #[error("metadata server returned status {0}")]
    MetadataStatus(u16),
    #[error("key file {path}: {source}")]
    KeyFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("all credential sources exhausted, last error: {0}")]
    Exhausted(Box<CredentialError>),
}

/// Resolved access credentials: a bearer token plus the project it belongs
/// to, when the source knows it.
#[derive(Clone)]
pub struct Credentials {
    pub project_id: Option<String>,
    token: String,
}

impl Credentials {
    #[must_use]
    pub fn new(project_id: Option<String>, token: String) -> Self {
        Self { project_id, token }
    }

    /// Token for `Authorization: Bearer` headers.
    #[must_use]
    pub fn bearer_token(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("project_id", &self.project_id)
            .field("token", &"***")
            .finish()
    }
}

/// Parsed service-account key material.
///
/// Signed-JWT token exchange is out of scope here; the key carries a bearer
/// token directly.
#[derive(Debug, Deserialize)]
pub struct ServiceAccountKey {
    pub project_id: Option<String>,
    pub token: String,
}

impl From<ServiceAccountKey> for Credentials {
    fn from(key: ServiceAccountKey) -> Self {
        Self { project_id: key.project_id, token: key.token }
    }
}

/// One strategy in the credential fallback chain.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Human-readable source name for logging.
    fn name(&self) -> &'static str;

    async fn resolve(&self) -> Result<Credentials, CredentialError>;
}

/// Source 1: JSON key blob in an environment variable.
pub struct EnvJsonSource {
    var: &'static str,
}

impl EnvJsonSource {
    #[must_use]
    pub const fn new() -> Self {
        Self { var: "GCP_SERVICE_ACCOUNT_CREDENTIALS" }
    }
}

impl Default for EnvJsonSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialSource for EnvJsonSource {
    fn name(&self) -> &'static str {
        "env"
    }

    async fn resolve(&self) -> Result<Credentials, CredentialError> {
        let blob = std::env::var(self.var)
            .map_err(|_| CredentialError::EnvVarMissing { var: self.var })?;
        let key: ServiceAccountKey =
            serde_json::from_str(&blob).map_err(CredentialError::InvalidKeyJson)?;
        Ok(key.into())
    }
}

#[derive(Debug, Deserialize)]
struct MetadataTokenResponse {
    access_token: String,
}

/// Source 2: platform metadata server, available inside a trusted cloud
/// execution environment (no key material on disk).
pub struct MetadataServerSource {
    base_url: String,
    client: reqwest::Client,
}

/// Default metadata endpoint inside the cloud runtime.
const METADATA_SERVER_URL: &str = "http://metadata.google.internal";

impl MetadataServerSource {
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(METADATA_SERVER_URL.to_owned())
    }

    #[must_use]
    pub fn with_base_url(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(5))
            .build()
            .unwrap_or_default();
        Self { base_url: base_url.trim_end_matches('/').to_owned(), client }
    }
}

impl Default for MetadataServerSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialSource for MetadataServerSource {
    fn name(&self) -> &'static str {
        "metadata-server"
    }

    async fn resolve(&self) -> Result<Credentials, CredentialError> {
        let url = format!(
            "{}/computeMetadata/v1/instance/service-accounts/default/token",
            self.base_url
        );
        let response =
            self.client.get(&url).header("Metadata-Flavor", "Google").send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CredentialError::MetadataStatus(status.as_u16()));
        }
        let token: MetadataTokenResponse = response.json().await?;
        Ok(Credentials { project_id: None, token: token.access_token })
    }
}

/// Source 3: local key file (development only).
pub struct KeyFileSource {
    path: PathBuf,
}

impl KeyFileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CredentialSource for KeyFileSource {
    fn name(&self) -> &'static str {
        "key-file"
    }

    async fn resolve(&self) -> Result<Credentials, CredentialError> {
        let blob = tokio::fs::read_to_string(&self.path).await.map_err(|source| {
            CredentialError::KeyFile { path: self.path.display().to_string(), source }
        })?;
        let key: ServiceAccountKey =
            serde_json::from_str(&blob).map_err(CredentialError::InvalidKeyJson)?;
        Ok(key.into())
    }
}

/// The standard three-source fallback chain.
#[must_use]
pub fn default_chain(settings: &Settings) -> Vec<Box<dyn CredentialSource>> {
    vec![
        Box::new(EnvJsonSource::new()),
        Box::new(MetadataServerSource::new()),
        Box::new(KeyFileSource::new(settings.credentials_file.clone())),
    ]
}

/// Tries each source in order, returning the first success.
///
/// # Errors
/// Returns `CredentialError::Exhausted` wrapping the last source's error if
/// every source fails.
pub async fn resolve_credentials(
    sources: &[Box<dyn CredentialSource>],
) -> Result<Credentials, CredentialError> {
    let mut last_error: Option<CredentialError> = None;
    for source in sources {
        match source.resolve().await {
            Ok(credentials) => {
                tracing::info!(source = source.name(), "resolved credentials");
                return Ok(credentials);
            },
            Err(e) => {
                tracing::warn!(source = source.name(), error = %e, "credential source failed");
                last_error = Some(e);
            },
        }
    }
    Err(CredentialError::Exhausted(Box::new(
        last_error.unwrap_or(CredentialError::EnvVarMissing {
            var: "GCP_SERVICE_ACCOUNT_CREDENTIALS",
        }),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct FixedSource {
        result: Option<Credentials>,
    }

    #[async_trait]
    impl CredentialSource for FixedSource {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn resolve(&self) -> Result<Credentials, CredentialError> {
            self.result
                .clone()
                .ok_or(CredentialError::EnvVarMissing { var: "FIXED" })
        }
    }

    #[tokio::test]
    async fn test_chain_returns_first_success() {
        let sources: Vec<Box<dyn CredentialSource>> = vec![
            Box::new(FixedSource { result: None }),
            Box::new(FixedSource {
                result: Some(Credentials::new(Some("p1".to_owned()), "t1".to_owned())),
            }),
            Box::new(FixedSource {
                result: Some(Credentials::new(Some("p2".to_owned()), "t2".to_owned())),
            }),
        ];
        let creds = resolve_credentials(&sources).await.unwrap();
        assert_eq!(creds.bearer_token(), "t1");
        assert_eq!(creds.project_id.as_deref(), Some("p1"));
    }

    #[tokio::test]
    async fn test_chain_exhausted_is_fatal() {
        let sources: Vec<Box<dyn CredentialSource>> = vec![
            Box::new(FixedSource { result: None }),
            Box::new(FixedSource { result: None }),
        ];
        let err = resolve_credentials(&sources).await.unwrap_err();
        assert!(matches!(err, CredentialError::Exhausted(_)));
    }

    #[tokio::test]
    async fn test_env_source_parses_blob() {
        let var = "GCP_SERVICE_ACCOUNT_CREDENTIALS";
        unsafe { std::env::set_var(var, r#"{"project_id": "blob-project", "token": "blob-token"}"#) };
        let creds = EnvJsonSource::new().resolve().await.unwrap();
        assert_eq!(creds.bearer_token(), "blob-token");
        assert_eq!(creds.project_id.as_deref(), Some("blob-project"));
        unsafe { std::env::remove_var(var) };
    }

    #[tokio::test]
    async fn test_key_file_source_missing_file() {
        let source = KeyFileSource::new("/nonexistent/docsum-test-key.json");
        let err = source.resolve().await.unwrap_err();
        assert!(matches!(err, CredentialError::KeyFile { .. }));
    }

    #[tokio::test]
    async fn test_key_file_source_reads_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.json");
        std::fs::write(&path, r#"{"project_id": "file-project", "token": "file-token"}"#)
            .unwrap();
        let creds = KeyFileSource::new(&path).resolve().await.unwrap();
        assert_eq!(creds.bearer_token(), "file-token");
    }

    #[tokio::test]
    async fn test_metadata_source_fetches_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/computeMetadata/v1/instance/service-accounts/default/token"))
            .and(header("Metadata-Flavor", "Google"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "ambient-token",
                "expires_in": 3599,
                "token_type": "Bearer"
            })))
            .mount(&server)
            .await;

        let source = MetadataServerSource::with_base_url(server.uri());
        let creds = source.resolve().await.unwrap();
        assert_eq!(creds.bearer_token(), "ambient-token");
        assert!(creds.project_id.is_none());
    }

    #[tokio::test]
    async fn test_metadata_source_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let source = MetadataServerSource::with_base_url(server.uri());
        let err = source.resolve().await.unwrap_err();
        assert!(matches!(err, CredentialError::MetadataStatus(404)));
    }

    #[test]
    fn test_credentials_debug_redacts_token() {
        let creds = Credentials::new(None, "secret".to_owned());
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("***"));
    }
}
