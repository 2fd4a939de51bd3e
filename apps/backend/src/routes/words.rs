//! Word collection endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/words
pub async fn list(State(state): State<AppState>) -> Result<Json<WordListResponse>> {
    let words = state.words.load().await?;
    Ok(Json(WordListResponse { words }))
}

/// GET /api/words/search?q=
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>> {
    let words = state.words.load().await?;
    let results = vocab_core::search(&words, &query.q);
    Ok(Json(SearchResponse { results }))
}

/// POST /api/save-word
pub async fn save(
    State(state): State<AppState>,
    Json(payload): Json<SaveWordRequest>,
) -> Result<Json<SaveWordResponse>> {
    if payload.word.word.trim().is_empty() {
        return Err(ApiError::BadRequest("word is required".to_string()));
    }

    state.words.append(payload.word).await?;
    Ok(Json(SaveWordResponse {
        success: true,
        message: "Word added successfully".to_string(),
    }))
}
