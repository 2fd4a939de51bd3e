//! Test fixtures.

use serde_json::json;

/// A small word collection covering several grammatical types and
/// umlaut/eszett content.
pub fn sample_words_json() -> String {
    json!([
        {
            "word": "Hund",
            "category": "Tiere",
            "english": "dog",
            "type": "noun",
            "article": "der",
            "plural": "Hunde",
            "pluralArticle": "die"
        },
        {
            "word": "Katze",
            "category": "Tiere",
            "english": "cat",
            "type": "noun",
            "article": "die"
        },
        {
            "word": "müde",
            "category": "Adjektive",
            "english": "tired",
            "type": "adjective",
            "komparativ": "müder",
            "superlativ": "am müdesten"
        },
        {
            "word": "Straße",
            "category": "Orte & Verkehr",
            "english": "street",
            "type": "noun",
            "article": "die",
            "plural": "Straßen",
            "pluralArticle": "die"
        }
    ])
    .to_string()
}

/// A noun payload for save requests.
pub fn save_request(word: &str, category: &str) -> serde_json::Value {
    json!({
        "word": {
            "word": word,
            "category": category,
            "english": "example",
            "type": "noun",
            "article": "das"
        }
    })
}
