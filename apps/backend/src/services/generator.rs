//! LLM-backed word generation.
//!
//! Talks to an OpenAI-style chat-completions API and parses the model's
//! reply into a structured word record. A semaphore holds the generation
//! control to one in-flight request; a second request while one is
//! outstanding is rejected rather than queued.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tokio::sync::Semaphore;
use vocab_core::WordRecord;

const SYSTEM_PROMPT: &str = "\
You are a German language expert that generates flashcard data for German \
vocabulary learning. Given a German word, return ONLY a valid JSON object, \
no markdown or explanations, describing it:\n\
- common fields: \"word\" (surface form, no article), \"category\" (an \
existing taxonomy label such as Tiere, Verben, Adjektive, Partikel, ...), \
\"type\", \"english\", and a \"sentence\" object {\"de\", \"en\"} with a \
natural A1-B1 example.\n\
- type \"noun\": \"article\" (der/die/das), \"plural\", \"pluralArticle\", \
and for person nouns \"feminine\"/\"femininePlural\".\n\
- type \"verb\": \"conjugations\" with the six slots ich, du, er/sie/es, \
wir, ihr, sie/Sie, plus \"partizip\" (Partizip II).\n\
- type \"adjective\": \"komparativ\" and \"superlativ\" (am ...sten).\n\
- type \"particle\": \"partikelType\" (e.g. Pr\u{e4}position), and for \
prepositions a \"contractions\" list of {\"form\", \"from\", \"example\"}.\n\
All German text must use proper characters (\u{e4}, \u{f6}, \u{fc}, \
\u{df}) and grammar must be accurate.";

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("a generation request is already in flight")]
    Busy,

    #[error("generator API key not configured")]
    MissingCredential,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("generator API returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("generator returned no completion")]
    EmptyResponse,

    #[error("completion is not a valid word record")]
    MalformedPayload { raw: String },
}

/// Chat-completions client for word generation.
pub struct GeneratorService {
    client: Client,
    api_url: String,
    model: String,
    api_key: Option<String>,
    busy: Semaphore,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl GeneratorService {
    pub fn new(api_url: String, model: String, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_url,
            model,
            api_key,
            busy: Semaphore::new(1),
        }
    }

    /// Configure from environment variables.
    ///
    /// - XAI_API_KEY: upstream credential (optional; requests fail
    ///   cleanly without it)
    /// - GENERATOR_API_URL: chat-completions endpoint
    /// - GENERATOR_MODEL: model name
    pub fn from_env() -> Self {
        let api_url = std::env::var("GENERATOR_API_URL")
            .unwrap_or_else(|_| "https://api.x.ai/v1/chat/completions".to_string());
        let model = std::env::var("GENERATOR_MODEL")
            .unwrap_or_else(|_| "grok-4-1-fast-non-reasoning".to_string());
        let api_key = std::env::var("XAI_API_KEY").ok();
        Self::new(api_url, model, api_key)
    }

    /// Generate a structured word record for a German word.
    pub async fn generate(&self, word: &str) -> Result<WordRecord, GeneratorError> {
        let _permit = self.busy.try_acquire().map_err(|_| GeneratorError::Busy)?;
        let api_key = self.api_key.as_ref().ok_or(GeneratorError::MissingCredential)?;

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                {
                    "role": "user",
                    "content": format!("Generate flashcard data for the German word: \"{word}\""),
                },
            ],
            "temperature": 0.3,
        });

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "generator API error");
            return Err(GeneratorError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let data: ChatResponse = response.json().await?;
        let content = data
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(GeneratorError::EmptyResponse)?;

        let cleaned = strip_code_fences(&content);
        serde_json::from_str(cleaned).map_err(|err| {
            tracing::warn!(%err, "generator reply failed to parse");
            GeneratorError::MalformedPayload { raw: content }
        })
    }
}

/// Strip a surrounding markdown code fence, if the model added one.
fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}
