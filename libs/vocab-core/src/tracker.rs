//! Unknown-word tracker ("still learning" list).
//!
//! Insertion order is preserved because revision mode displays the list
//! as-is. All operations are total and keyed by the composite
//! `(word, category)` identity.

use serde::{Deserialize, Serialize};

use crate::types::WordRecord;

/// The set of words the learner has marked as still unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnknownSet {
    words: Vec<WordRecord>,
}

impl UnknownSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a word unknown. Idempotent: a second insert is a no-op.
    pub fn mark_unknown(&mut self, word: &WordRecord) -> bool {
        if self.is_unknown(word) {
            return false;
        }
        self.words.push(word.clone());
        true
    }

    /// Mark a word known, removing it. No-op on a non-member.
    pub fn mark_known(&mut self, word: &WordRecord) -> bool {
        let before = self.words.len();
        self.words.retain(|w| !w.same_entry(word));
        self.words.len() != before
    }

    /// Membership test by composite key.
    pub fn is_unknown(&self, word: &WordRecord) -> bool {
        self.words.iter().any(|w| w.same_entry(word))
    }

    /// Empty the set.
    pub fn clear(&mut self) {
        self.words.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Snapshot in insertion order.
    pub fn words(&self) -> &[WordRecord] {
        &self.words
    }
}
