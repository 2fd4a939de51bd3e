//! Persisted state store abstraction.
//!
//! Durable client-side state (unknown words, custom categories, filter
//! selections, ...) lives behind the [`StateStore`] trait, injected into
//! the session rather than reached for as ambient global storage. Values
//! are JSON strings keyed by [`StateKey`]; a value that fails to parse is
//! discarded in favor of the default for that key only, never propagated
//! as a fatal error.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// Logical keys of the persisted session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    UnknownWords,
    GeneratedWords,
    CustomCategories,
    SelectedCategories,
    SelectedTypes,
    CurrentIndex,
    RevisionMode,
    ShowFilter,
}

impl StateKey {
    /// Storage name for this key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnknownWords => "unknownWords",
            Self::GeneratedWords => "generatedWords",
            Self::CustomCategories => "customCategories",
            Self::SelectedCategories => "selectedCategories",
            Self::SelectedTypes => "selectedTypes",
            Self::CurrentIndex => "currentIndex",
            Self::RevisionMode => "revisionMode",
            Self::ShowFilter => "showFilter",
        }
    }
}

/// Key-value persistence for durable session state.
pub trait StateStore {
    /// Read the raw value for a key, if present.
    fn get(&self, key: StateKey) -> Result<Option<String>, StoreError>;

    /// Write the raw value for a key.
    fn set(&self, key: StateKey, value: String) -> Result<(), StoreError>;
}

/// In-memory store. Used by tests and by the session-only policy.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<StateKey, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: StateKey) -> Result<Option<String>, StoreError> {
        let values = self.values.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(values.get(&key).cloned())
    }

    fn set(&self, key: StateKey, value: String) -> Result<(), StoreError> {
        let mut values = self.values.lock().map_err(|_| StoreError::Poisoned)?;
        values.insert(key, value);
        Ok(())
    }
}

/// Load a key, falling back to the default on absence, corruption, or a
/// store read failure.
pub fn load_or_default<T>(store: &dyn StateStore, key: StateKey) -> T
where
    T: DeserializeOwned + Default,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(err) => {
            tracing::warn!(key = key.as_str(), %err, "state store read failed");
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(key = key.as_str(), %err, "discarding corrupt state");
            T::default()
        }
    }
}

/// Write-through persistence of one key.
pub fn persist<T: Serialize>(store: &dyn StateStore, key: StateKey, value: &T) {
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!(key = key.as_str(), %err, "failed to serialize state");
            return;
        }
    };
    if let Err(err) = store.set(key, raw) {
        tracing::warn!(key = key.as_str(), %err, "state store write failed");
    }
}
