pub mod gemini;
pub mod google;

pub use gemini::GeminiTranslator;
pub use google::GoogleTranslator;

/// Dictionary-style backend: no credential, target language given by its
/// human-readable name.
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, TranslateError>;
}

/// Generative backend: prompt-driven, credential and model chosen per call.
#[async_trait::async_trait]
pub trait GenerativeTranslator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
        api_key: &str,
        model: &str,
    ) -> Result<String, TranslateError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// Transport failed before a status line was read.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("backend returned HTTP {0}")]
    Http(u16),

    /// 2xx response with no extractable translation.
    #[error("no translation in response")]
    Empty,

    /// The generative backend rejected the credential. Recoverable: the
    /// orchestrator falls back to the other engine once.
    #[error("API key rejected")]
    InvalidCredential,
}
