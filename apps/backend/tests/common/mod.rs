//! Common test utilities for backend integration tests.
//!
//! Tests run against a throwaway word file in a temp directory; no
//! external services are needed. Generation tests that talk to the real
//! upstream API are marked `#[ignore]`.

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use tempfile::TempDir;

use wortschatz_backend::services::generator::GeneratorService;
use wortschatz_backend::services::word_file::WordFileService;
use wortschatz_backend::AppState;

/// Test context owning a temp word file and the app state over it.
pub struct TestContext {
    state: AppState,
    _dir: TempDir,
}

impl TestContext {
    /// Create a context seeded with the sample word collection. The
    /// generator has no credential, so generation fails cleanly unless a
    /// test injects one.
    pub fn new() -> Self {
        Self::with_words(fixtures::sample_words_json())
    }

    /// Create a context with a specific word file content.
    pub fn with_words(words_json: String) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("words.json");
        std::fs::write(&path, words_json).expect("failed to seed word file");

        let state = AppState {
            words: Arc::new(WordFileService::new(path)),
            generator: Arc::new(GeneratorService::new(
                "http://localhost:1/unused".to_string(),
                "test-model".to_string(),
                None,
            )),
        };

        Self { state, _dir: dir }
    }

    /// Swap in a generator configured from the environment, for live
    /// upstream tests.
    pub fn with_live_generator(mut self) -> Self {
        self.state.generator = Arc::new(GeneratorService::from_env());
        self
    }

    pub fn router(&self) -> Router {
        wortschatz_backend::router(self.state.clone())
    }
}
