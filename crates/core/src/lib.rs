//! Core configuration, credentials, and domain types for docsum.
//!
//! This crate contains everything shared across the store, generator,
//! service, and HTTP layers.

mod config;
mod credentials;
mod env_config;
mod text;
mod types;

pub use config::Settings;
pub use credentials::{
    default_chain, resolve_credentials, CredentialError, CredentialSource, Credentials,
    EnvJsonSource, KeyFileSource, MetadataServerSource, ServiceAccountKey,
};
pub use env_config::env_parse_with_default;
pub use text::truncate;
pub use types::{Document, GroundTruthRow, SummarySource};
