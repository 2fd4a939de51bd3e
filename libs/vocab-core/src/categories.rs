//! User-defined custom categories.
//!
//! A custom category is a named list of word references, independent of
//! the base taxonomy. Deleting one removes the grouping, never the
//! underlying words.

use serde::{Deserialize, Serialize};

use crate::types::WordRecord;

/// One user-created category and its member words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomCategory {
    pub name: String,
    pub members: Vec<WordRecord>,
}

/// Ordered collection of custom categories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomCategories {
    categories: Vec<CustomCategory>,
}

impl CustomCategories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty category. No-op on a blank or duplicate name;
    /// returns whether a category was created.
    pub fn create(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.categories.push(CustomCategory {
            name: name.to_string(),
            members: Vec::new(),
        });
        true
    }

    /// Add a word to a category, creating the category if needed. No-op
    /// if the word is already a member by composite key.
    pub fn add_word(&mut self, name: &str, word: &WordRecord) -> bool {
        let name = name.trim();
        let index = match self.categories.iter().position(|c| c.name == name) {
            Some(index) => index,
            None => {
                if !self.create(name) {
                    return false;
                }
                self.categories.len() - 1
            }
        };
        let category = &mut self.categories[index];
        if category.members.iter().any(|w| w.same_entry(word)) {
            return false;
        }
        category.members.push(word.clone());
        true
    }

    /// Remove a word from a category. No-op on a non-member.
    pub fn remove_word(&mut self, name: &str, word: &WordRecord) -> bool {
        let Some(category) = self.categories.iter_mut().find(|c| c.name == name) else {
            return false;
        };
        let before = category.members.len();
        category.members.retain(|w| !w.same_entry(word));
        category.members.len() != before
    }

    /// Delete a category entirely. Member words are unaffected.
    pub fn delete(&mut self, name: &str) -> bool {
        let before = self.categories.len();
        self.categories.retain(|c| c.name != name);
        self.categories.len() != before
    }

    /// Whether a category with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }

    /// Member list of a category, if it exists.
    pub fn members(&self, name: &str) -> Option<&[WordRecord]> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.members.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CustomCategory> {
        self.categories.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
