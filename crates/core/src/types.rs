//! Domain types shared across crates.

use serde::{Deserialize, Serialize};

/// A ground-truth document fetched from the store: the text to summarize
/// plus the reference summary loaded with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Full document text.
    pub text: String,
    /// Reference summary from the dataset.
    pub summary: String,
}

/// One row of the ground-truth table, as loaded during provisioning.
///
/// `id` mirrors `index`; both are kept because the table schema carries both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundTruthRow {
    pub index: i64,
    pub id: i64,
    pub document: String,
    pub summary: String,
}

impl GroundTruthRow {
    /// Builds a row assigning `index` (and the mirrored `id`) to a
    /// document/summary pair.
    #[must_use]
    pub fn new(index: i64, document: String, summary: String) -> Self {
        Self { index, id: index, document, summary }
    }
}

/// Provenance of a returned summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummarySource {
    /// Served from a previously persisted row.
    Cache,
    /// Freshly produced by the generative model during this request.
    Generated,
}

impl SummarySource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Generated => "generated",
        }
    }
}
