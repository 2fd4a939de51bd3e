//! Core types for the vocabulary study engine.
//!
//! A [`WordRecord`] is one vocabulary entry. Its grammatical payload is a
//! tagged union ([`WordKind`]) discriminated by the `type` field on the
//! wire, so invalid field combinations (a verb carrying an article) are
//! unrepresentable. Wire names are camelCase to stay compatible with the
//! word-collection JSON format.

use serde::{Deserialize, Serialize};

/// German definite article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Article {
    Der,
    Die,
    Das,
    /// Entries without an article serialize as the empty string.
    #[serde(rename = "")]
    None,
}

impl Default for Article {
    fn default() -> Self {
        Self::None
    }
}

impl Article {
    /// Get the article as a string (empty for [`Article::None`]).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Der => "der",
            Self::Die => "die",
            Self::Das => "das",
            Self::None => "",
        }
    }
}

/// Verb conjugations for the six canonical pronoun slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conjugations {
    pub ich: String,
    pub du: String,
    #[serde(rename = "er/sie/es")]
    pub er_sie_es: String,
    pub wir: String,
    pub ihr: String,
    #[serde(rename = "sie/Sie")]
    pub sie_formal: String,
}

/// Noun case declension slots (singular and plural).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KasusDeklination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nominativ: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub akkusativ: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dativ: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nominativ_plural: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub akkusativ_plural: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dativ_plural: Option<String>,
}

/// A preposition contraction (e.g. "im" = "in + dem").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contraction {
    pub form: String,
    pub from: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// Example sentence pair attachable to any word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub de: String,
    pub en: String,
}

/// Grammatical-type-specific payload of a word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WordKind {
    #[serde(rename_all = "camelCase")]
    Noun {
        #[serde(default)]
        article: Article,
        #[serde(skip_serializing_if = "Option::is_none")]
        plural: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        plural_article: Option<Article>,
        /// Feminine counterpart for person/profession nouns.
        #[serde(skip_serializing_if = "Option::is_none")]
        feminine: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        feminine_plural: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        kasus: Option<KasusDeklination>,
    },
    Verb {
        conjugations: Conjugations,
        #[serde(skip_serializing_if = "Option::is_none")]
        partizip: Option<String>,
    },
    Adjective {
        #[serde(skip_serializing_if = "Option::is_none")]
        komparativ: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        superlativ: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Particle {
        partikel_type: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        contractions: Option<Vec<Contraction>>,
    },
    QuestionWord,
    Pronoun {
        #[serde(skip_serializing_if = "Option::is_none")]
        possessive: Option<String>,
    },
    Country {
        #[serde(skip_serializing_if = "Option::is_none")]
        languages: Option<Vec<String>>,
    },
    ArticleDeclension {
        kasus: String,
        geschlecht: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        indefinit: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        negation: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        possessiv: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        demonstrativ: Option<String>,
    },
}

/// Fieldless discriminant of [`WordKind`], used by the type filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordType {
    Noun,
    Verb,
    Adjective,
    Particle,
    QuestionWord,
    Pronoun,
    Country,
    ArticleDeclension,
}

impl WordKind {
    /// Get the discriminant of this payload.
    pub fn word_type(&self) -> WordType {
        match self {
            Self::Noun { .. } => WordType::Noun,
            Self::Verb { .. } => WordType::Verb,
            Self::Adjective { .. } => WordType::Adjective,
            Self::Particle { .. } => WordType::Particle,
            Self::QuestionWord => WordType::QuestionWord,
            Self::Pronoun { .. } => WordType::Pronoun,
            Self::Country { .. } => WordType::Country,
            Self::ArticleDeclension { .. } => WordType::ArticleDeclension,
        }
    }
}

/// One vocabulary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    pub word: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub english: Option<String>,
    #[serde(flatten)]
    pub kind: WordKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentence: Option<Sentence>,
}

impl WordRecord {
    /// Composite identity key. Case-sensitive on both components.
    pub fn key(&self) -> WordKey {
        WordKey {
            word: self.word.clone(),
            category: self.category.clone(),
        }
    }

    /// Whether two records denote the same entry.
    pub fn same_entry(&self, other: &WordRecord) -> bool {
        self.word == other.word && self.category == other.category
    }

    /// The noun article, if this word carries a non-empty one.
    pub fn article(&self) -> Option<&'static str> {
        match &self.kind {
            WordKind::Noun { article, .. } if *article != Article::None => {
                Some(article.as_str())
            }
            _ => None,
        }
    }
}

/// Composite `(word, category)` key used for identity everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordKey {
    pub word: String,
    pub category: String,
}
