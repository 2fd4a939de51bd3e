//! Word generation endpoint

use axum::{extract::State, Json};

use crate::error::{ApiError, Result};
use crate::models::{GenerateWordRequest, GenerateWordResponse};
use crate::AppState;

/// POST /api/generate-word
pub async fn generate(
    State(state): State<AppState>,
    Json(payload): Json<GenerateWordRequest>,
) -> Result<Json<GenerateWordResponse>> {
    let word = payload.word.trim();
    if word.is_empty() {
        // Rejected before any upstream call; no state is touched.
        return Err(ApiError::BadRequest("Word is required".to_string()));
    }

    let record = state.generator.generate(word).await?;
    tracing::info!(word = %record.word, category = %record.category, "word generated");

    Ok(Json(GenerateWordResponse {
        success: true,
        word: record,
    }))
}
