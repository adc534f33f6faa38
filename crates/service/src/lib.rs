//! Business logic: the lookup → cache-check → generate → persist flow.

mod error;
mod summary_service;

pub use error::ServiceError;
pub use summary_service::{DocumentSummary, SummaryService};
