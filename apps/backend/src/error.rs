//! Error handling for the backend API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::generator::GeneratorError;
use crate::services::word_file::WordFileError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Generation already in progress")]
    Busy,

    #[error("Generator API key not configured")]
    MissingCredential,

    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Upstream returned an unparseable word payload")]
    UpstreamFormat { raw: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    /// Raw upstream payload, retained for diagnostics on format errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    raw: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            ApiError::Busy => (StatusCode::TOO_MANY_REQUESTS, "busy"),
            ApiError::MissingCredential => {
                (StatusCode::INTERNAL_SERVER_ERROR, "missing_credential")
            }
            ApiError::Upstream { status, .. } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                "upstream_error",
            ),
            ApiError::UpstreamFormat { .. } => (StatusCode::BAD_GATEWAY, "upstream_format"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "io_error"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let raw = match &self {
            ApiError::UpstreamFormat { raw } => Some(raw.clone()),
            _ => None,
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            raw,
        });

        (status, body).into_response()
    }
}

impl From<GeneratorError> for ApiError {
    fn from(err: GeneratorError) -> Self {
        match err {
            GeneratorError::Busy => Self::Busy,
            GeneratorError::MissingCredential => Self::MissingCredential,
            GeneratorError::Upstream { status, message } => Self::Upstream { status, message },
            GeneratorError::MalformedPayload { raw } => Self::UpstreamFormat { raw },
            GeneratorError::EmptyResponse => Self::Upstream {
                status: 502,
                message: "empty completion from generator".to_string(),
            },
            GeneratorError::Network(err) => Self::Upstream {
                status: 502,
                message: err.to_string(),
            },
        }
    }
}

impl From<WordFileError> for ApiError {
    fn from(err: WordFileError) -> Self {
        match err {
            WordFileError::Conflict { word, category } => {
                Self::Conflict(format!("\"{word}\" already exists in \"{category}\""))
            }
            WordFileError::Io(err) => Self::Io(err),
            WordFileError::Parse(err) => Self::Internal(format!("word file corrupt: {err}")),
        }
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
