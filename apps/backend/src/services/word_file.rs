//! File-backed durable storage for the word collection.
//!
//! The collection is a single JSON array of word records. Appends go
//! through a read-modify-write cycle under a mutex so concurrent saves
//! cannot interleave; duplicate detection uses the composite key with a
//! case-insensitive word comparison, matching how saves were always
//! deduplicated.

use std::path::PathBuf;

use thiserror::Error;
use tokio::sync::Mutex;
use vocab_core::WordRecord;

#[derive(Debug, Error)]
pub enum WordFileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("word file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("word \"{word}\" already exists in category \"{category}\"")]
    Conflict { word: String, category: String },
}

/// Durable word collection backed by a JSON file.
pub struct WordFileService {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl WordFileService {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    /// Load the full collection. A missing file is an empty collection.
    pub async fn load(&self) -> Result<Vec<WordRecord>, WordFileError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&raw)?)
    }

    /// Append a word, rejecting composite-key duplicates.
    pub async fn append(&self, word: WordRecord) -> Result<(), WordFileError> {
        let _guard = self.write_lock.lock().await;

        let mut words = self.load().await?;
        let duplicate = words.iter().any(|w| {
            w.word.to_lowercase() == word.word.to_lowercase() && w.category == word.category
        });
        if duplicate {
            return Err(WordFileError::Conflict {
                word: word.word,
                category: word.category,
            });
        }

        words.push(word);
        let raw = serde_json::to_string_pretty(&words)?;
        tokio::fs::write(&self.path, raw).await?;

        tracing::debug!(count = words.len(), "word collection updated");
        Ok(())
    }
}
