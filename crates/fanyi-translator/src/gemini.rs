use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use crate::{GenerativeTranslator, TranslateError};

const BASE_URL: &str = "https://generativelanguage.googleapis.com";
const MAX_OUTPUT_TOKENS: u32 = 1024;
const TEMPERATURE: f64 = 0.1;

/// Adapter for the generative-language endpoint. Short, near-deterministic
/// completions: this is a translation, not open-ended generation.
pub struct GeminiTranslator {
    client: reqwest::Client,
}

impl GeminiTranslator {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl GenerativeTranslator for GeminiTranslator {
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
        api_key: &str,
        model: &str,
    ) -> Result<String, TranslateError> {
        let url = format!(
            "{BASE_URL}/{}/models/{model}:generateContent",
            api_version(model)
        );
        tracing::debug!(model, "requesting gemini translation");

        let body = json!({
            "contents": [{ "parts": [{ "text": build_prompt(text, target_language) }] }],
            "generationConfig": {
                "maxOutputTokens": MAX_OUTPUT_TOKENS,
                "temperature": TEMPERATURE
            }
        });

        // The key travels in a header, never in the URL, so it can't leak
        // through logs or referrers.
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        if let Some(err) = status_error(response.status()) {
            return Err(err);
        }

        let payload: GenerateResponse = response.json().await?;
        extract_text(payload).ok_or(TranslateError::Empty)
    }
}

/// Only the long-stable base model is still served from v1; every newer
/// model id lives under v1beta.
fn api_version(model: &str) -> &'static str {
    if model == "gemini-pro" { "v1" } else { "v1beta" }
}

/// HTTP 400 is the backend's signal for a malformed or revoked key; keep it
/// apart from ordinary failures so the fallback policy can react to it.
fn status_error(status: StatusCode) -> Option<TranslateError> {
    if status == StatusCode::BAD_REQUEST {
        Some(TranslateError::InvalidCredential)
    } else if !status.is_success() {
        Some(TranslateError::Http(status.as_u16()))
    } else {
        None
    }
}

fn build_prompt(text: &str, target_language: &str) -> String {
    format!(
        "Translate the following text into {target_language}. \
         Reply with the translation only: no explanations, no preamble, no markdown. \
         If the text is a single word with several common senses, list those senses separated by commas. \
         If it is a phrase or sentence, reply with one fluent translation.\n\nText: \"{text}\""
    )
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

/// First candidate's first text part, trimmed. Anything missing along the
/// way means the response carried no translation.
fn extract_text(payload: GenerateResponse) -> Option<String> {
    let part = payload
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .next()?;

    let text = part.text?.trim().to_string();
    if text.is_empty() { None } else { Some(text) }
}
