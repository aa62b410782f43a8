use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use fanyi_types::EngineMode;

use crate::error::StoreError;
use crate::kv::KvStore;

const SETTINGS_KEY: &str = "settings";

/// User configuration as the core consumes it.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Generative-backend credential; None when not configured.
    pub api_key: Option<String>,
    pub target_language: String,
    /// "auto", "google" or "gemini".
    pub engine: String,
    pub model: String,
    pub history_max_size: usize,
    /// Last known credential state, maintained by the orchestrator so the
    /// presentation layer can warn about a rejected key.
    pub key_valid: bool,
}

impl Settings {
    pub fn engine_mode(&self) -> EngineMode {
        match self.engine.as_str() {
            "google" => EngineMode::ForceGoogle,
            "gemini" => EngineMode::ForceGemini(self.model.clone()),
            _ => EngineMode::Auto,
        }
    }
}

/// Partial update; None leaves the stored value untouched.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SettingsPatch {
    pub api_key: Option<String>,
    pub target_language: Option<String>,
    pub engine: Option<String>,
    pub model: Option<String>,
    pub history_max_size: Option<usize>,
    pub key_valid: Option<bool>,
}

/// Settings over the shared key-value area: reads merge stored values over
/// the injected defaults, writes are partial patches.
pub struct SettingsStore {
    store: Arc<dyn KvStore>,
    defaults: Settings,
    write_lock: Mutex<()>,
}

impl SettingsStore {
    pub fn new(store: Arc<dyn KvStore>, defaults: Settings) -> Self {
        Self {
            store,
            defaults,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn get(&self) -> Result<Settings, StoreError> {
        let stored = self.load().await?;
        let defaults = &self.defaults;

        Ok(Settings {
            api_key: stored
                .api_key
                .or_else(|| defaults.api_key.clone())
                .filter(|k| !k.is_empty()),
            target_language: stored
                .target_language
                .unwrap_or_else(|| defaults.target_language.clone()),
            engine: stored.engine.unwrap_or_else(|| defaults.engine.clone()),
            model: stored.model.unwrap_or_else(|| defaults.model.clone()),
            history_max_size: stored
                .history_max_size
                .unwrap_or(defaults.history_max_size),
            key_valid: stored.key_valid.unwrap_or(defaults.key_valid),
        })
    }

    /// Merge a partial update into the stored object. The read-modify-write
    /// runs under a lock so concurrent patches don't drop each other.
    pub async fn set(&self, patch: SettingsPatch) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut stored = self.load().await?;
        if patch.api_key.is_some() {
            stored.api_key = patch.api_key;
        }
        if patch.target_language.is_some() {
            stored.target_language = patch.target_language;
        }
        if patch.engine.is_some() {
            stored.engine = patch.engine;
        }
        if patch.model.is_some() {
            stored.model = patch.model;
        }
        if patch.history_max_size.is_some() {
            stored.history_max_size = patch.history_max_size;
        }
        if patch.key_valid.is_some() {
            stored.key_valid = patch.key_valid;
        }

        self.store
            .set(SETTINGS_KEY, serde_json::to_value(&stored)?)
            .await
    }

    /// Orchestrator hook for the credential state.
    pub async fn mark_key_valid(&self, valid: bool) -> Result<(), StoreError> {
        self.set(SettingsPatch {
            key_valid: Some(valid),
            ..Default::default()
        })
        .await
    }

    async fn load(&self) -> Result<SettingsPatch, StoreError> {
        match self.store.get(SETTINGS_KEY).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(SettingsPatch::default()),
        }
    }
}
