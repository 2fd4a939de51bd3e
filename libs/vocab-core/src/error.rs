//! Error types for vocab-core.

use thiserror::Error;

/// Errors from a persisted state store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store lock poisoned")]
    Poisoned,

    /// Catch-all for external [`StateStore`](crate::store::StateStore)
    /// implementations whose failures are neither I/O nor lock errors
    /// (e.g. a browser-storage or database bridge).
    #[error("backend error: {0}")]
    Backend(String),
}
