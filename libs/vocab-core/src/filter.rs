//! Filter and search engine.
//!
//! Derives the active subset of the merged collection from the current
//! category/type selection, revision mode, and shuffle flag, and answers
//! free-text searches with German-orthography-aware normalization so a
//! query typed without umlauts still matches.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::categories::CustomCategories;
use crate::tracker::UnknownSet;
use crate::types::{WordRecord, WordType};

/// Maximum number of search results returned.
pub const SEARCH_LIMIT: usize = 10;

/// The learner's current view selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSelection {
    /// Selected category names, in selection order. Empty means an empty
    /// active subset, not "all words".
    pub categories: Vec<String>,
    /// Optional grammatical-type restriction.
    pub types: Option<Vec<WordType>>,
    pub revision_mode: bool,
    pub shuffled: bool,
}

/// Compute the active subset for the current selection.
///
/// Revision mode shows exactly the unknown set in insertion order,
/// ignoring category and type selection. Otherwise each selected category
/// contributes its words (custom category member list, or a base-category
/// scan), deduplicated by composite key so a word reachable through two
/// selected categories appears once. Shuffling operates on a copy.
pub fn active_subset(
    all_words: &[WordRecord],
    selection: &FilterSelection,
    custom: &CustomCategories,
    unknown: &UnknownSet,
    rng: &mut impl Rng,
) -> Vec<WordRecord> {
    let mut subset = if selection.revision_mode {
        // Revision mode shows the unknown set as-is; category and type
        // selection do not apply to it.
        unknown.words().to_vec()
    } else {
        let mut seen = HashSet::new();
        let mut subset = Vec::new();
        for name in &selection.categories {
            if let Some(members) = custom.members(name) {
                for word in members {
                    if seen.insert(word.key()) {
                        subset.push(word.clone());
                    }
                }
            } else {
                for word in all_words.iter().filter(|w| &w.category == name) {
                    if seen.insert(word.key()) {
                        subset.push(word.clone());
                    }
                }
            }
        }
        if let Some(types) = &selection.types {
            subset.retain(|w| types.contains(&w.kind.word_type()));
        }
        subset
    };

    if selection.shuffled {
        shuffle(&mut subset, rng);
    }

    subset
}

/// Fisher-Yates shuffle, uniform over permutations.
pub fn shuffle(words: &mut [WordRecord], rng: &mut impl Rng) {
    for i in (1..words.len()).rev() {
        let j = rng.gen_range(0..=i);
        words.swap(i, j);
    }
}

/// Lowercase and fold German orthography: ä→a, ö→o, ü→u, ß→ss.
pub fn normalize_german(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars().flat_map(char::to_lowercase) {
        match c {
            'ä' => out.push('a'),
            'ö' => out.push('o'),
            'ü' => out.push('u'),
            'ß' => out.push_str("ss"),
            other => out.push(other),
        }
    }
    out
}

/// Search the collection, capped at [`SEARCH_LIMIT`] results.
///
/// Matches case-insensitively on the word, the English gloss, and the
/// "article word" form, trying both the raw and umlaut-normalized
/// spellings. Results keep the collection's natural order; there is no
/// relevance ranking.
pub fn search(all_words: &[WordRecord], query: &str) -> Vec<WordRecord> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    let normalized_query = normalize_german(&query);

    all_words
        .iter()
        .filter(|w| matches(w, &query, &normalized_query))
        .take(SEARCH_LIMIT)
        .cloned()
        .collect()
}

fn matches(word: &WordRecord, query: &str, normalized_query: &str) -> bool {
    let surface = word.word.to_lowercase();
    if surface.contains(query) || normalize_german(&word.word).contains(normalized_query) {
        return true;
    }

    if let Some(english) = &word.english {
        if english.to_lowercase().contains(query) {
            return true;
        }
    }

    if let Some(article) = word.article() {
        let full = format!("{article} {surface}");
        if full.contains(query) || normalize_german(&full).contains(normalized_query) {
            return true;
        }
    }

    false
}
