use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Translation backend identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Google,
    Gemini,
}

impl Engine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Google => "google",
            Engine::Gemini => "gemini",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the engine for a request is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineMode {
    /// Lightness heuristic decides per request.
    Auto,
    ForceGoogle,
    /// Forced generative engine with an explicit model id.
    ForceGemini(String),
}

/// Outcome of engine selection. Produced once per request, never revised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineDecision {
    pub engine: Engine,
    /// Set only when the generative engine was chosen.
    pub model: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("empty selection")]
    EmptyText,
}

/// A single translation request entering the pipeline.
///
/// The text is trimmed at construction; an empty selection is rejected here
/// so no later stage ever sees one.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    text: String,
    pub target_language: String,
    pub engine_override: Option<EngineMode>,
}

impl TranslationRequest {
    pub fn new(
        text: &str,
        target_language: impl Into<String>,
    ) -> Result<Self, RequestError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RequestError::EmptyText);
        }

        Ok(Self {
            text: text.to_string(),
            target_language: target_language.into(),
            engine_override: None,
        })
    }

    pub fn with_engine(mut self, mode: EngineMode) -> Self {
        self.engine_override = Some(mode);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Plain-text result handed back to the presentation layer.
///
/// `text` is never empty on a successful return; absence of content is a
/// failure, not an empty success.
#[derive(Debug, Clone)]
pub struct NormalizedTranslation {
    pub text: String,
    pub engine: Engine,
    pub model: Option<String>,
}

/// One persisted translation event. Written once, never mutated, only
/// evicted or deleted whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub original: String,
    pub translated: String,
    pub engine: String,
    pub target_language: String,
    /// Best-effort estimate, "unknown" when no rule matched.
    pub source_language: String,
    pub model: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Events flowing between the app loops.
#[derive(Debug, Clone)]
pub enum AppEvent {
    TextInput(String),
    HistoryRequested,
    ClearRequested,
    DeleteRequested(usize),
    ShowTranslation {
        text: String,
        engine: Engine,
    },
    ShowHistory(Vec<HistoryRecord>),
    ShowError {
        engine: Option<Engine>,
        message: String,
    },
    HistoryCleared,
}
