//! Document-store client for docsum.
//!
//! Two tables live in an external managed tabular datastore:
//! `ground_truth` (immutable document/summary pairs, loaded once) and
//! `generated_summaries` (append-only rows written on first request for an
//! index). Serving-path access goes through the [`DocumentStore`] trait;
//! [`BigQueryStore`] is the REST-backed implementation and [`MemoryStore`]
//! is an in-process backend for tests and local development.

mod bigquery;
mod error;
mod memory;
mod traits;
mod wire;

pub use bigquery::BigQueryStore;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use traits::DocumentStore;

/// Ground-truth table name.
pub const GROUND_TRUTH_TABLE: &str = "ground_truth";
/// Generated-summaries table name.
pub const GENERATED_SUMMARIES_TABLE: &str = "generated_summaries";
