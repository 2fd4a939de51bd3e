//! API request and response types

use serde::{Deserialize, Serialize};
use vocab_core::WordRecord;

/// POST /api/generate-word request
#[derive(Debug, Deserialize)]
pub struct GenerateWordRequest {
    pub word: String,
}

/// POST /api/generate-word response
#[derive(Debug, Serialize)]
pub struct GenerateWordResponse {
    pub success: bool,
    pub word: WordRecord,
}

/// POST /api/save-word request
#[derive(Debug, Deserialize)]
pub struct SaveWordRequest {
    pub word: WordRecord,
}

/// POST /api/save-word response
#[derive(Debug, Serialize)]
pub struct SaveWordResponse {
    pub success: bool,
    pub message: String,
}

/// GET /api/words response
#[derive(Debug, Serialize)]
pub struct WordListResponse {
    pub words: Vec<WordRecord>,
}

/// GET /api/words/search query parameters
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// GET /api/words/search response
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<WordRecord>,
}
