//! Response types (Serialize)

use docsum_core::SummarySource;
use docsum_service::DocumentSummary;
use serde::{Deserialize, Serialize};

/// Body of a successful `/summarize/{index}` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub document: String,
    pub generated_summary: String,
    pub ground_truth_summary: Option<String>,
    pub summary_source: SummarySource,
}

impl From<DocumentSummary> for SummaryResponse {
    fn from(summary: DocumentSummary) -> Self {
        Self {
            document: summary.document,
            generated_summary: summary.generated_summary,
            ground_truth_summary: summary.ground_truth_summary,
            summary_source: summary.summary_source,
        }
    }
}
