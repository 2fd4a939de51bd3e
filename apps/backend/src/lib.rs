pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::services::generator::GeneratorService;
use crate::services::word_file::WordFileService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub words: Arc<WordFileService>,
    pub generator: Arc<GeneratorService>,
}

/// Build the API router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/words", get(routes::words::list))
        .route("/api/words/search", get(routes::words::search))
        .route("/api/generate-word", post(routes::generate::generate))
        .route("/api/save-word", post(routes::words::save))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let words_file =
        std::env::var("WORDS_FILE").unwrap_or_else(|_| "data/words.json".to_string());

    tracing::info!(file = %words_file, "Loading word collection...");
    let words = WordFileService::new(words_file.into());
    let count = words.load().await?.len();
    tracing::info!(count, "Word collection loaded");

    let generator = GeneratorService::from_env();

    let state = AppState {
        words: Arc::new(words),
        generator: Arc::new(generator),
    };

    let app = router(state);

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
