//! Study session facade.
//!
//! Owns the merged collection, the filter selection, the unknown-word
//! tracker, the custom categories, and the current card index, and keeps
//! them consistent across mutations. Every state change is written
//! through to the injected [`StateStore`]; on construction each piece is
//! rehydrated from it (corrupt values degrade to defaults per key).
//!
//! Index repair distinguishes explicit filter actions, which reset the
//! index to the start, from content changes (marking a word, generating a
//! word, editing category membership), which merely clamp an
//! out-of-bounds index. Marking a word known must not jump the learner
//! back to the first card.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::categories::CustomCategories;
use crate::collection;
use crate::filter::{self, FilterSelection};
use crate::store::{load_or_default, persist, StateKey, StateStore};
use crate::tracker::UnknownSet;
use crate::types::{WordRecord, WordType};

/// Durability policy for generated words.
///
/// Observed lineages disagree on whether generated words survive a
/// reload, so the caller chooses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratedPolicy {
    /// Generated words live only for this session.
    SessionOnly,
    /// Generated words are written through to the state store.
    Persisted,
}

/// How the current index is repaired after the subset changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndexRepair {
    /// Explicit filter action: back to the start.
    Reset,
    /// Content change: keep the position unless it fell off the end.
    Clamp,
}

/// A learner's study session over a base collection.
pub struct StudySession {
    base: Vec<WordRecord>,
    generated: Vec<WordRecord>,
    selection: FilterSelection,
    unknown: UnknownSet,
    custom: CustomCategories,
    current_index: usize,
    show_filter: bool,
    policy: GeneratedPolicy,
    store: Box<dyn StateStore>,
    rng: StdRng,
    subset: Vec<WordRecord>,
}

impl StudySession {
    /// Create a session, rehydrating persisted state from the store.
    pub fn new(base: Vec<WordRecord>, store: Box<dyn StateStore>, policy: GeneratedPolicy) -> Self {
        Self::with_rng(base, store, policy, StdRng::from_entropy())
    }

    /// Create a session with a caller-supplied RNG (deterministic tests).
    pub fn with_rng(
        base: Vec<WordRecord>,
        store: Box<dyn StateStore>,
        policy: GeneratedPolicy,
        rng: StdRng,
    ) -> Self {
        let unknown: UnknownSet = load_or_default(store.as_ref(), StateKey::UnknownWords);
        let custom: CustomCategories = load_or_default(store.as_ref(), StateKey::CustomCategories);
        let generated: Vec<WordRecord> = match policy {
            GeneratedPolicy::Persisted => load_or_default(store.as_ref(), StateKey::GeneratedWords),
            GeneratedPolicy::SessionOnly => Vec::new(),
        };

        // No stored selection means "everything selected", matching the
        // first-visit default.
        let categories: Option<Vec<String>> =
            load_or_default(store.as_ref(), StateKey::SelectedCategories);
        let categories = categories.unwrap_or_else(|| collection::categories(&base));
        let types: Option<Vec<WordType>> =
            load_or_default(store.as_ref(), StateKey::SelectedTypes);
        let revision_mode: bool = load_or_default(store.as_ref(), StateKey::RevisionMode);
        let current_index: usize = load_or_default(store.as_ref(), StateKey::CurrentIndex);
        let show_filter: Option<bool> = load_or_default(store.as_ref(), StateKey::ShowFilter);

        let mut session = Self {
            base,
            generated,
            selection: FilterSelection {
                categories,
                types,
                revision_mode,
                shuffled: false,
            },
            unknown,
            custom,
            current_index,
            show_filter: show_filter.unwrap_or(true),
            policy,
            store,
            rng,
            subset: Vec::new(),
        };
        session.refresh(IndexRepair::Clamp);
        session
    }

    // === Views ===

    /// The merged collection: base words followed by generated words.
    pub fn all_words(&self) -> Vec<WordRecord> {
        collection::merge(&self.base, &self.generated)
    }

    /// The currently displayed, filtered/ordered subset.
    pub fn active_subset(&self) -> &[WordRecord] {
        &self.subset
    }

    /// The word under the cursor, if any.
    pub fn current_word(&self) -> Option<&WordRecord> {
        self.subset.get(self.current_index)
    }

    /// 1-based position and total for progress display; `(0, 0)` when the
    /// subset is empty.
    pub fn progress(&self) -> (usize, usize) {
        if self.subset.is_empty() {
            (0, 0)
        } else {
            (self.current_index + 1, self.subset.len())
        }
    }

    /// Search the merged collection.
    pub fn search(&self, query: &str) -> Vec<WordRecord> {
        filter::search(&self.all_words(), query)
    }

    /// Per-category counts over merged words and custom categories.
    pub fn category_counts(&self) -> std::collections::BTreeMap<String, usize> {
        collection::category_counts(&self.all_words(), &self.custom)
    }

    /// Sorted unique base category labels.
    pub fn base_categories(&self) -> Vec<String> {
        collection::categories(&self.all_words())
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn unknown(&self) -> &UnknownSet {
        &self.unknown
    }

    pub fn custom_categories(&self) -> &CustomCategories {
        &self.custom
    }

    pub fn is_unknown(&self, word: &WordRecord) -> bool {
        self.unknown.is_unknown(word)
    }

    pub fn show_filter(&self) -> bool {
        self.show_filter
    }

    // === Navigation ===

    /// Advance to the next card with wraparound. No-op on an empty subset.
    pub fn next(&mut self) {
        if self.subset.is_empty() {
            return;
        }
        self.current_index = (self.current_index + 1) % self.subset.len();
        self.save_index();
    }

    /// Go back one card with wraparound. No-op on an empty subset.
    pub fn prev(&mut self) {
        if self.subset.is_empty() {
            return;
        }
        self.current_index = (self.current_index + self.subset.len() - 1) % self.subset.len();
        self.save_index();
    }

    /// Flip the shuffle flag. Re-shuffling produces a new permutation and
    /// restarts from the first card.
    pub fn toggle_shuffle(&mut self) {
        self.selection.shuffled = !self.selection.shuffled;
        self.refresh(IndexRepair::Reset);
    }

    // === Filter actions ===

    /// Replace the selected categories.
    pub fn set_categories(&mut self, categories: Vec<String>) {
        self.selection.categories = categories;
        persist(
            self.store.as_ref(),
            StateKey::SelectedCategories,
            &Some(&self.selection.categories),
        );
        self.refresh(IndexRepair::Reset);
    }

    /// Toggle one category in or out of the selection.
    pub fn toggle_category(&mut self, name: &str) {
        let mut categories = self.selection.categories.clone();
        if let Some(pos) = categories.iter().position(|c| c == name) {
            categories.remove(pos);
        } else {
            categories.push(name.to_string());
        }
        self.set_categories(categories);
    }

    /// Replace the grammatical-type restriction.
    pub fn set_types(&mut self, types: Option<Vec<WordType>>) {
        self.selection.types = types;
        persist(
            self.store.as_ref(),
            StateKey::SelectedTypes,
            &self.selection.types,
        );
        self.refresh(IndexRepair::Reset);
    }

    /// Enter or leave revision mode.
    pub fn set_revision_mode(&mut self, enabled: bool) {
        if self.selection.revision_mode == enabled {
            return;
        }
        self.selection.revision_mode = enabled;
        persist(self.store.as_ref(), StateKey::RevisionMode, &enabled);
        self.refresh(IndexRepair::Reset);
    }

    /// Toggle the filter panel visibility flag.
    pub fn set_show_filter(&mut self, visible: bool) {
        self.show_filter = visible;
        persist(self.store.as_ref(), StateKey::ShowFilter, &visible);
    }

    // === Unknown-word tracking ===

    /// Mark a word as still unknown. Idempotent.
    pub fn mark_unknown(&mut self, word: &WordRecord) {
        if self.unknown.mark_unknown(word) {
            self.save_unknown();
            self.content_changed();
        }
    }

    /// Mark a word as known. No-op on a non-member.
    pub fn mark_known(&mut self, word: &WordRecord) {
        if self.unknown.mark_known(word) {
            self.save_unknown();
            self.content_changed();
        }
    }

    /// Empty the unknown set. Exits revision mode if it was active, so the
    /// learner is not left staring at an empty revision view.
    pub fn clear_unknown(&mut self) {
        self.unknown.clear();
        self.save_unknown();
        if self.selection.revision_mode {
            self.set_revision_mode(false);
        } else {
            self.content_changed();
        }
    }

    // === Custom categories ===

    /// Create a custom category and auto-select it. No-op on a blank or
    /// duplicate name.
    pub fn create_category(&mut self, name: &str) {
        if !self.custom.create(name) {
            return;
        }
        self.save_custom();
        let mut categories = self.selection.categories.clone();
        categories.push(name.trim().to_string());
        self.set_categories(categories);
    }

    /// Add a word to a custom category, creating it implicitly.
    pub fn add_word_to_category(&mut self, name: &str, word: &WordRecord) {
        if self.custom.add_word(name, word) {
            self.save_custom();
            self.content_changed();
        }
    }

    /// Remove a word from a custom category.
    pub fn remove_word_from_category(&mut self, name: &str, word: &WordRecord) {
        if self.custom.remove_word(name, word) {
            self.save_custom();
            self.content_changed();
        }
    }

    /// Delete a custom category and deselect it. Confirmation is the
    /// caller's concern; member words stay in the base collection.
    pub fn delete_category(&mut self, name: &str) {
        if !self.custom.delete(name) {
            return;
        }
        self.save_custom();
        let categories: Vec<String> = self
            .selection
            .categories
            .iter()
            .filter(|c| c.as_str() != name)
            .cloned()
            .collect();
        self.set_categories(categories);
    }

    // === Generated words ===

    /// Add a runtime-generated word to the collection.
    pub fn add_generated(&mut self, word: WordRecord) {
        self.generated.push(word);
        if self.policy == GeneratedPolicy::Persisted {
            persist(self.store.as_ref(), StateKey::GeneratedWords, &self.generated);
        }
        self.content_changed();
    }

    // === Internals ===

    fn refresh(&mut self, repair: IndexRepair) {
        let all = self.all_words();
        self.subset = filter::active_subset(
            &all,
            &self.selection,
            &self.custom,
            &self.unknown,
            &mut self.rng,
        );
        match repair {
            IndexRepair::Reset => self.current_index = 0,
            IndexRepair::Clamp => {
                if self.current_index >= self.subset.len() {
                    self.current_index = 0;
                }
            }
        }
        self.save_index();
    }

    /// Rebuild the subset after a content change without disturbing the
    /// order of surviving entries. A full refresh would deal a fresh
    /// permutation under shuffle and teleport the current card.
    fn content_changed(&mut self) {
        if !self.selection.shuffled {
            self.refresh(IndexRepair::Clamp);
            return;
        }

        let all = self.all_words();
        let unshuffled = FilterSelection {
            shuffled: false,
            ..self.selection.clone()
        };
        let fresh = filter::active_subset(
            &all,
            &unshuffled,
            &self.custom,
            &self.unknown,
            &mut self.rng,
        );

        let fresh_keys: HashSet<_> = fresh.iter().map(|w| w.key()).collect();
        self.subset.retain(|w| fresh_keys.contains(&w.key()));
        let have: HashSet<_> = self.subset.iter().map(|w| w.key()).collect();
        for word in fresh {
            if !have.contains(&word.key()) {
                self.subset.push(word);
            }
        }

        if self.current_index >= self.subset.len() {
            self.current_index = 0;
        }
        self.save_index();
    }

    fn save_index(&self) {
        persist(self.store.as_ref(), StateKey::CurrentIndex, &self.current_index);
    }

    fn save_unknown(&self) {
        persist(self.store.as_ref(), StateKey::UnknownWords, &self.unknown);
    }

    fn save_custom(&self) {
        persist(self.store.as_ref(), StateKey::CustomCategories, &self.custom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::test_support::noun;
    use pretty_assertions::assert_eq;

    fn base() -> Vec<WordRecord> {
        vec![
            noun("Hund", "Tiere"),
            noun("Katze", "Tiere"),
            noun("Tisch", "Haus & Wohnen"),
            noun("Lampe", "Haus & Wohnen"),
        ]
    }

    fn session() -> StudySession {
        StudySession::with_rng(
            base(),
            Box::new(MemoryStore::new()),
            GeneratedPolicy::SessionOnly,
            StdRng::seed_from_u64(1),
        )
    }

    fn subset_words(session: &StudySession) -> Vec<&str> {
        session
            .active_subset()
            .iter()
            .map(|w| w.word.as_str())
            .collect()
    }

    #[test]
    fn test_fresh_session_selects_all_categories() {
        let session = session();
        assert_eq!(session.active_subset().len(), 4);
        assert_eq!(session.progress(), (1, 4));
    }

    #[test]
    fn test_mark_and_revise_tiere() {
        let mut session = session();
        session.set_categories(vec!["Tiere".to_string()]);
        assert_eq!(subset_words(&session), vec!["Hund", "Katze"]);

        let hund = noun("Hund", "Tiere");
        let katze = noun("Katze", "Tiere");
        session.mark_unknown(&hund);
        assert!(session.is_unknown(&hund));
        assert!(!session.is_unknown(&katze));

        session.set_revision_mode(true);
        assert_eq!(subset_words(&session), vec!["Hund"]);
    }

    #[test]
    fn test_navigation_wraparound() {
        let mut session = session();
        session.set_categories(vec!["Tiere".to_string()]);

        let n = session.active_subset().len();
        for _ in 0..n {
            session.next();
        }
        assert_eq!(session.progress().0, 1);

        session.prev();
        assert_eq!(session.progress().0, n);
    }

    #[test]
    fn test_navigation_noop_on_empty_subset() {
        let mut session = session();
        session.set_categories(vec![]);
        assert_eq!(session.progress(), (0, 0));
        session.next();
        session.prev();
        assert_eq!(session.progress(), (0, 0));
        assert!(session.current_word().is_none());
    }

    #[test]
    fn test_zero_categories_is_empty_not_all() {
        let mut session = session();
        session.set_categories(vec![]);
        assert!(session.active_subset().is_empty());
    }

    #[test]
    fn test_filter_change_resets_index() {
        let mut session = session();
        session.next();
        session.next();
        session.set_categories(vec!["Tiere".to_string()]);
        assert_eq!(session.progress().0, 1);
    }

    #[test]
    fn test_content_change_keeps_position() {
        let mut session = session();
        session.set_categories(vec!["Tiere".to_string(), "Haus & Wohnen".to_string()]);
        session.next();
        session.next();
        let before = session.current_word().cloned().unwrap();

        session.mark_unknown(&noun("Hund", "Tiere"));
        assert_eq!(session.current_word(), Some(&before));
        assert_eq!(session.progress().0, 3);
    }

    #[test]
    fn test_marking_known_in_revision_mode_clamps_index() {
        let mut session = session();
        session.mark_unknown(&noun("Hund", "Tiere"));
        session.mark_unknown(&noun("Katze", "Tiere"));
        session.set_revision_mode(true);
        session.next();

        // Cursor sits on the last entry; removing it clamps back to 0.
        session.mark_known(&noun("Katze", "Tiere"));
        assert_eq!(subset_words(&session), vec!["Hund"]);
        assert_eq!(session.progress(), (1, 1));
    }

    #[test]
    fn test_toggle_shuffle_resets_and_permutes() {
        let mut session = session();
        session.next();
        session.toggle_shuffle();
        assert!(session.selection().shuffled);
        assert_eq!(session.progress().0, 1);

        let mut shuffled = subset_words(&session);
        shuffled.sort();
        let mut all = vec!["Hund", "Katze", "Lampe", "Tisch"];
        all.sort();
        assert_eq!(shuffled, all);

        // Default selection order is the sorted base category list.
        session.toggle_shuffle();
        assert!(!session.selection().shuffled);
        assert_eq!(subset_words(&session), vec!["Tisch", "Lampe", "Hund", "Katze"]);
    }

    #[test]
    fn test_content_change_under_shuffle_preserves_order() {
        let mut session = session();
        session.toggle_shuffle();
        let before = subset_words(&session)
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>();

        session.mark_unknown(&noun("Hund", "Tiere"));
        let after = subset_words(&session);
        assert_eq!(after, before.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn test_clear_unknown_exits_revision_mode() {
        let mut session = session();
        session.mark_unknown(&noun("Hund", "Tiere"));
        session.set_revision_mode(true);
        session.clear_unknown();

        assert!(!session.selection().revision_mode);
        assert!(session.unknown().is_empty());
        // Back to the category view.
        assert_eq!(session.active_subset().len(), 4);
    }

    #[test]
    fn test_create_category_auto_selects() {
        let mut session = session();
        session.set_categories(vec!["Tiere".to_string()]);
        session.create_category("Lieblinge");

        assert!(session
            .selection()
            .categories
            .contains(&"Lieblinge".to_string()));
        session.add_word_to_category("Lieblinge", &noun("Tisch", "Haus & Wohnen"));
        assert_eq!(subset_words(&session), vec!["Hund", "Katze", "Tisch"]);
    }

    #[test]
    fn test_delete_category_deselects_it() {
        let mut session = session();
        session.set_categories(vec!["Tiere".to_string()]);
        session.create_category("Lieblinge");
        session.delete_category("Lieblinge");

        assert!(!session
            .selection()
            .categories
            .contains(&"Lieblinge".to_string()));
        assert!(!session.custom_categories().contains("Lieblinge"));
    }

    #[test]
    fn test_custom_category_overlap_dedups() {
        let mut session = session();
        session.set_categories(vec!["Tiere".to_string()]);
        session.add_word_to_category("Lieblinge", &noun("Hund", "Tiere"));
        session.toggle_category("Lieblinge");

        assert_eq!(subset_words(&session), vec!["Hund", "Katze"]);
    }

    #[test]
    fn test_generated_word_joins_selected_category() {
        let mut session = session();
        session.set_categories(vec!["Tiere".to_string()]);
        session.next();
        session.add_generated(noun("Vogel", "Tiere"));

        assert_eq!(subset_words(&session), vec!["Hund", "Katze", "Vogel"]);
        // Content change: position kept.
        assert_eq!(session.progress().0, 2);
    }

    /// Store handle that can outlive a session, for rehydration tests.
    struct Shared(std::sync::Arc<MemoryStore>);

    impl StateStore for Shared {
        fn get(&self, key: StateKey) -> Result<Option<String>, crate::error::StoreError> {
            self.0.get(key)
        }
        fn set(&self, key: StateKey, value: String) -> Result<(), crate::error::StoreError> {
            self.0.set(key, value)
        }
    }

    #[test]
    fn test_state_rehydration_round_trip() {
        let store = std::sync::Arc::new(MemoryStore::new());

        let mut session = StudySession::with_rng(
            base(),
            Box::new(Shared(store.clone())),
            GeneratedPolicy::Persisted,
            StdRng::seed_from_u64(2),
        );
        session.set_categories(vec!["Tiere".to_string()]);
        session.mark_unknown(&noun("Hund", "Tiere"));
        session.add_word_to_category("Schwer", &noun("Katze", "Tiere"));
        session.add_generated(noun("Vogel", "Tiere"));
        session.next();

        let restored = StudySession::with_rng(
            base(),
            Box::new(Shared(store)),
            GeneratedPolicy::Persisted,
            StdRng::seed_from_u64(3),
        );
        assert_eq!(
            restored.selection().categories,
            vec!["Tiere".to_string()]
        );
        assert!(restored.is_unknown(&noun("Hund", "Tiere")));
        assert!(restored.custom_categories().contains("Schwer"));
        assert_eq!(subset_words(&restored), vec!["Hund", "Katze", "Vogel"]);
        assert_eq!(restored.progress().0, 2);
    }

    #[test]
    fn test_session_only_policy_leaves_store_untouched() {
        let store = std::sync::Arc::new(MemoryStore::new());
        {
            let mut session = StudySession::with_rng(
                base(),
                Box::new(Shared(store.clone())),
                GeneratedPolicy::SessionOnly,
                StdRng::seed_from_u64(4),
            );
            session.add_generated(noun("Vogel", "Tiere"));
            assert_eq!(session.all_words().len(), 5);
        }
        assert_eq!(store.get(StateKey::GeneratedWords).unwrap(), None);
    }

    #[test]
    fn test_corrupt_index_recovers_to_start() {
        let store = MemoryStore::new();
        store
            .set(StateKey::CurrentIndex, "\"way out\"".to_string())
            .unwrap();
        store
            .set(StateKey::UnknownWords, "{{{{".to_string())
            .unwrap();

        let session = StudySession::with_rng(
            base(),
            Box::new(store),
            GeneratedPolicy::SessionOnly,
            StdRng::seed_from_u64(5),
        );
        assert_eq!(session.progress(), (1, 4));
        assert!(session.unknown().is_empty());
    }

    #[test]
    fn test_stored_index_is_clamped_on_load() {
        let store = MemoryStore::new();
        store.set(StateKey::CurrentIndex, "99".to_string()).unwrap();

        let session = StudySession::with_rng(
            base(),
            Box::new(store),
            GeneratedPolicy::SessionOnly,
            StdRng::seed_from_u64(6),
        );
        assert_eq!(session.progress().0, 1);
    }
}
