use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use fanyi_lang::{LanguageDetector, estimate_source_language};
use fanyi_store::{HistoryStore, SettingsStore, StoreError};
use fanyi_translator::{GenerativeTranslator, TranslateError, Translator};
use fanyi_types::{
    Engine, EngineDecision, HistoryRecord, NormalizedTranslation, TranslationRequest,
};

use crate::select;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Final backend failure after any fallback was exhausted; carries the
    /// engine that failed last so the presentation layer can key its
    /// message on it.
    #[error("{engine} translation failed: {source}")]
    Translate {
        engine: Engine,
        #[source]
        source: TranslateError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Sequences one translation: engine decision, backend round trip,
/// credential fallback, history append, result delivery.
pub struct TranslationService {
    google: Arc<dyn Translator>,
    gemini: Arc<dyn GenerativeTranslator>,
    detector: Arc<dyn LanguageDetector>,
    settings: Arc<SettingsStore>,
    history: Arc<HistoryStore>,
}

impl TranslationService {
    pub fn new(
        google: Arc<dyn Translator>,
        gemini: Arc<dyn GenerativeTranslator>,
        detector: Arc<dyn LanguageDetector>,
        settings: Arc<SettingsStore>,
        history: Arc<HistoryStore>,
    ) -> Self {
        Self {
            google,
            gemini,
            detector,
            settings,
            history,
        }
    }

    pub async fn run(
        &self,
        request: &TranslationRequest,
    ) -> Result<NormalizedTranslation, ServiceError> {
        let request_id = Uuid::new_v4();
        let settings = self.settings.get().await?;

        let mode = request
            .engine_override
            .clone()
            .unwrap_or_else(|| settings.engine_mode());
        let mut decision = select::decide(request.text(), &mode, &settings.model);

        // Designed degradation, not a failure: a generative pick without a
        // configured key quietly becomes a google request.
        if decision.engine == Engine::Gemini && settings.api_key.is_none() {
            tracing::debug!(%request_id, "no API key configured, using google");
            decision = EngineDecision {
                engine: Engine::Google,
                model: None,
            };
        }

        tracing::debug!(%request_id, engine = %decision.engine, "engine selected");

        let outcome = match decision.engine {
            Engine::Google => {
                let text = self.google_translate(request).await?;
                NormalizedTranslation {
                    text,
                    engine: Engine::Google,
                    model: None,
                }
            }
            Engine::Gemini => {
                let model = decision.model.as_deref().unwrap_or(&settings.model);
                let api_key = settings.api_key.as_deref().unwrap_or_default();

                match self
                    .gemini
                    .translate(request.text(), &request.target_language, api_key, model)
                    .await
                {
                    Ok(text) => {
                        // Optimistic confirmation for the settings surface.
                        self.settings.mark_key_valid(true).await?;
                        NormalizedTranslation {
                            text,
                            engine: Engine::Gemini,
                            model: Some(model.to_string()),
                        }
                    }
                    Err(TranslateError::InvalidCredential) => {
                        // One forced retry against google, never more. The
                        // google adapter cannot raise InvalidCredential, so
                        // this path terminates.
                        tracing::warn!(%request_id, "API key rejected, retrying with google");
                        self.settings.mark_key_valid(false).await?;

                        let text = self.google_translate(request).await?;
                        NormalizedTranslation {
                            text,
                            engine: Engine::Google,
                            model: None,
                        }
                    }
                    Err(source) => {
                        return Err(ServiceError::Translate {
                            engine: Engine::Gemini,
                            source,
                        });
                    }
                }
            }
        };

        self.record(request, &outcome).await;

        tracing::debug!(%request_id, engine = %outcome.engine, "translation finished");
        Ok(outcome)
    }

    async fn google_translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<String, ServiceError> {
        self.google
            .translate(request.text(), &request.target_language)
            .await
            .map_err(|source| ServiceError::Translate {
                engine: Engine::Google,
                source,
            })
    }

    /// Best-effort history append: a storage hiccup must not fail a
    /// translation that already succeeded.
    async fn record(&self, request: &TranslationRequest, outcome: &NormalizedTranslation) {
        let hint = self.detector.detect(request.text());
        let source_language = estimate_source_language(request.text(), hint.as_ref());

        let record = HistoryRecord {
            original: request.text().to_string(),
            translated: outcome.text.clone(),
            engine: outcome.engine.as_str().to_string(),
            target_language: request.target_language.clone(),
            source_language,
            model: outcome.model.clone(),
            timestamp: Utc::now(),
        };

        if let Err(err) = self.history.append(record).await {
            tracing::warn!("failed to save history entry: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use fanyi_lang::NoDetector;
    use fanyi_store::{KvStore, MemoryStore, Settings};
    use fanyi_types::EngineMode;

    use super::*;

    struct FakeGoogle {
        calls: AtomicUsize,
        fail_with: Option<fn() -> TranslateError>,
    }

    impl FakeGoogle {
        fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_with: None,
            }
        }

        fn failing(fail_with: fn() -> TranslateError) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_with: Some(fail_with),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl Translator for FakeGoogle {
        async fn translate(
            &self,
            text: &str,
            _target_language: &str,
        ) -> Result<String, TranslateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.fail_with {
                Some(fail) => Err(fail()),
                None => Ok(format!("google:{text}")),
            }
        }
    }

    struct FakeGemini {
        calls: AtomicUsize,
        fail_with: Option<fn() -> TranslateError>,
    }

    impl FakeGemini {
        fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_with: None,
            }
        }

        fn failing(fail_with: fn() -> TranslateError) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_with: Some(fail_with),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl GenerativeTranslator for FakeGemini {
        async fn translate(
            &self,
            text: &str,
            _target_language: &str,
            _api_key: &str,
            model: &str,
        ) -> Result<String, TranslateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.fail_with {
                Some(fail) => Err(fail()),
                None => Ok(format!("gemini[{model}]:{text}")),
            }
        }
    }

    struct Harness {
        google: Arc<FakeGoogle>,
        gemini: Arc<FakeGemini>,
        settings: Arc<SettingsStore>,
        history: Arc<HistoryStore>,
        service: TranslationService,
    }

    fn harness(google: FakeGoogle, gemini: FakeGemini, api_key: Option<&str>) -> Harness {
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        let settings = Arc::new(SettingsStore::new(
            store.clone(),
            Settings {
                api_key: api_key.map(str::to_string),
                target_language: "繁體中文".to_string(),
                engine: "auto".to_string(),
                model: "gemini-1.5-flash-latest".to_string(),
                history_max_size: 20,
                key_valid: false,
            },
        ));
        let history = Arc::new(HistoryStore::new(store, settings.clone()));

        let google = Arc::new(google);
        let gemini = Arc::new(gemini);
        let service = TranslationService::new(
            google.clone(),
            gemini.clone(),
            Arc::new(NoDetector),
            settings.clone(),
            history.clone(),
        );

        Harness {
            google,
            gemini,
            settings,
            history,
            service,
        }
    }

    fn request(text: &str) -> TranslationRequest {
        TranslationRequest::new(text, "繁體中文").unwrap()
    }

    #[tokio::test]
    async fn test_short_text_uses_google_and_records_history() {
        let h = harness(FakeGoogle::ok(), FakeGemini::ok(), Some("key"));

        let outcome = h.service.run(&request("hello")).await.unwrap();
        assert_eq!(outcome.engine, Engine::Google);
        assert_eq!(outcome.text, "google:hello");
        assert_eq!(h.gemini.calls(), 0);

        let log = h.history.list().await.unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].original, "hello");
        assert_eq!(log[0].engine, "google");
        assert_eq!(log[0].source_language, "en");
        assert!(log[0].model.is_none());
    }

    #[tokio::test]
    async fn test_phrase_uses_gemini_and_confirms_key() {
        let h = harness(FakeGoogle::ok(), FakeGemini::ok(), Some("key"));

        let outcome = h
            .service
            .run(&request("a sentence long enough for the generative engine"))
            .await
            .unwrap();
        assert_eq!(outcome.engine, Engine::Gemini);
        assert_eq!(outcome.model.as_deref(), Some("gemini-1.5-flash-latest"));
        assert_eq!(h.google.calls(), 0);

        assert!(h.settings.get().await.unwrap().key_valid);

        let log = h.history.list().await.unwrap();
        assert_eq!(log[0].engine, "gemini");
        assert_eq!(log[0].model.as_deref(), Some("gemini-1.5-flash-latest"));
    }

    #[tokio::test]
    async fn test_missing_key_silently_degrades_to_google() {
        let h = harness(FakeGoogle::ok(), FakeGemini::ok(), None);

        let outcome = h
            .service
            .run(&request("a sentence long enough for the generative engine"))
            .await
            .unwrap();

        assert_eq!(outcome.engine, Engine::Google);
        assert_eq!(h.gemini.calls(), 0);
        // The recovery path never ran: the key state is untouched.
        assert!(!h.settings.get().await.unwrap().key_valid);
    }

    #[tokio::test]
    async fn test_rejected_key_retries_google_exactly_once() {
        let h = harness(
            FakeGoogle::ok(),
            FakeGemini::failing(|| TranslateError::InvalidCredential),
            Some("revoked"),
        );

        let outcome = h
            .service
            .run(&request("a sentence long enough for the generative engine"))
            .await
            .unwrap();

        assert_eq!(outcome.engine, Engine::Google);
        assert_eq!(h.gemini.calls(), 1);
        assert_eq!(h.google.calls(), 1);
        assert!(!h.settings.get().await.unwrap().key_valid);

        let log = h.history.list().await.unwrap();
        assert_eq!(log[0].engine, "google");
    }

    #[tokio::test]
    async fn test_retry_failure_propagates_google_error() {
        let h = harness(
            FakeGoogle::failing(|| TranslateError::Http(503)),
            FakeGemini::failing(|| TranslateError::InvalidCredential),
            Some("revoked"),
        );

        let err = h
            .service
            .run(&request("a sentence long enough for the generative engine"))
            .await
            .unwrap_err();

        // The final error is google's; the credential error is not
        // re-surfaced, and no second retry happens.
        assert!(matches!(
            err,
            ServiceError::Translate {
                engine: Engine::Google,
                source: TranslateError::Http(503),
            }
        ));
        assert_eq!(h.google.calls(), 1);
        assert!(h.history.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_gemini_network_error_is_not_retried() {
        let h = harness(
            FakeGoogle::ok(),
            FakeGemini::failing(|| TranslateError::Http(500)),
            Some("key"),
        );

        let err = h
            .service
            .run(&request("a sentence long enough for the generative engine"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Translate {
                engine: Engine::Gemini,
                source: TranslateError::Http(500),
            }
        ));
        assert_eq!(h.google.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_result_propagates_unchanged() {
        let h = harness(
            FakeGoogle::failing(|| TranslateError::Empty),
            FakeGemini::ok(),
            None,
        );

        let err = h.service.run(&request("hello")).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Translate {
                engine: Engine::Google,
                source: TranslateError::Empty,
            }
        ));
    }

    #[tokio::test]
    async fn test_engine_override_beats_settings_mode() {
        let h = harness(FakeGoogle::ok(), FakeGemini::ok(), Some("key"));

        let req = request("hello").with_engine(EngineMode::ForceGemini(
            "gemini-pro".to_string(),
        ));
        let outcome = h.service.run(&req).await.unwrap();

        assert_eq!(outcome.engine, Engine::Gemini);
        assert_eq!(outcome.model.as_deref(), Some("gemini-pro"));
    }
}
