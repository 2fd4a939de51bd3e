//! Collection merging and category bookkeeping.
//!
//! The addressable superset is the static base collection followed by any
//! words generated at runtime. Merging never deduplicates: a generated
//! word sharing a key with a base word is a legitimate duplicate entry,
//! not an error. Counts are recomputed in full from current inputs so
//! there is no cache to invalidate.

use std::collections::BTreeMap;

use crate::categories::CustomCategories;
use crate::types::WordRecord;

/// Combine the base collection with generated words, base first.
pub fn merge(base: &[WordRecord], generated: &[WordRecord]) -> Vec<WordRecord> {
    let mut all = Vec::with_capacity(base.len() + generated.len());
    all.extend_from_slice(base);
    all.extend_from_slice(generated);
    all
}

/// Sorted unique category labels occurring in a collection.
pub fn categories(words: &[WordRecord]) -> Vec<String> {
    let mut labels: Vec<String> = words.iter().map(|w| w.category.clone()).collect();
    labels.sort();
    labels.dedup();
    labels
}

/// Per-category word counts over the merged collection plus each custom
/// category's member list. Pure function of its inputs.
pub fn category_counts(
    words: &[WordRecord],
    custom: &CustomCategories,
) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for word in words {
        *counts.entry(word.category.clone()).or_insert(0) += 1;
    }
    for category in custom.iter() {
        *counts.entry(category.name.clone()).or_insert(0) += category.members.len();
    }
    counts
}
