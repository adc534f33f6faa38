use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::api_error::ApiError;
use crate::{AppState, SummaryResponse};

/// `GET /summarize/{index}` — fetch the document, serve the cached summary
/// or generate and persist a new one.
pub async fn summarize(
    State(state): State<Arc<AppState>>,
    Path(index): Path<i64>,
) -> Result<Json<SummaryResponse>, ApiError> {
    match state.service.summarize(index).await? {
        Some(summary) => Ok(Json(summary.into())),
        None => Err(ApiError::NotFound("Document not found")),
    }
}
