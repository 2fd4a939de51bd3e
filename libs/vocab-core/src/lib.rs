//! Core vocabulary study engine shared by the backend and any front end.
//!
//! Provides:
//! - The word record model (tagged by grammatical type)
//! - A persisted state store abstraction with corruption-tolerant loading
//! - Collection merging and category counts
//! - Category/type/revision filtering, shuffle, and umlaut-aware search
//! - The study session facade (navigation, unknown tracking, custom
//!   categories, write-through persistence)

pub mod categories;
pub mod collection;
pub mod error;
pub mod filter;
pub mod session;
pub mod store;
pub mod tracker;
pub mod types;

pub use categories::{CustomCategories, CustomCategory};
pub use error::StoreError;
pub use filter::{active_subset, normalize_german, search, FilterSelection, SEARCH_LIMIT};
pub use session::{GeneratedPolicy, StudySession};
pub use store::{MemoryStore, StateKey, StateStore};
pub use tracker::UnknownSet;
pub use types::{
    Article, Conjugations, Contraction, KasusDeklination, Sentence, WordKey, WordKind,
    WordRecord, WordType,
};
