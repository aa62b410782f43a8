use std::sync::Arc;
use std::time::Duration;

use fanyi_config::Config;
use fanyi_core::TranslationService;
use fanyi_lang::{LanguageDetector, NoDetector, WhatlangDetector};
use fanyi_store::{HistoryStore, KvStore, MemoryStore, Settings, SettingsStore};
use fanyi_translator::{GeminiTranslator, GoogleTranslator};

pub struct AppState {
    pub settings: Arc<SettingsStore>,
    pub history: Arc<HistoryStore>,
    pub service: Arc<TranslationService>,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // One storage area shared by settings and history, as the original
        // surface shares its local storage.
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());

        let settings = Arc::new(SettingsStore::new(
            store.clone(),
            Settings {
                api_key: Some(config.translator.api_key.clone())
                    .filter(|k| !k.is_empty()),
                target_language: config.translator.target_language.clone(),
                engine: config.translator.engine.clone(),
                model: config.translator.model.clone(),
                history_max_size: config.history.max_size,
                key_valid: false,
            },
        ));
        let history = Arc::new(HistoryStore::new(store, settings.clone()));

        // Caller-side timeout; the core imposes none of its own.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        let detector: Arc<dyn LanguageDetector> = if config.detector.enabled {
            Arc::new(WhatlangDetector::new(config.detector.min_confidence))
        } else {
            Arc::new(NoDetector)
        };

        let service = Arc::new(TranslationService::new(
            Arc::new(GoogleTranslator::new(client.clone())),
            Arc::new(GeminiTranslator::new(client)),
            detector,
            settings.clone(),
            history.clone(),
        ));

        Ok(Self {
            settings,
            history,
            service,
        })
    }
}
