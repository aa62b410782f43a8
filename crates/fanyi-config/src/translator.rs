use std::env;

use serde::{Deserialize, Serialize};

fn default_target_language() -> String {
    "繁體中文".to_string()
}

fn default_model() -> String {
    "gemini-1.5-flash-latest".to_string()
}

fn default_engine() -> String {
    "auto".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Generative-backend credential. Empty means not configured.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_target_language")]
    pub target_language: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// "auto", "google" or "gemini".
    #[serde(default = "default_engine")]
    pub engine: String,
}

impl TranslatorConfig {
    pub fn new() -> Self {
        let api_key = env::var("GEMINI_API_KEY").unwrap_or_default();
        let target_language =
            env::var("FANYI_TARGET_LANG").unwrap_or_else(|_| default_target_language());
        let model = env::var("FANYI_MODEL").unwrap_or_else(|_| default_model());
        let engine = env::var("FANYI_ENGINE").unwrap_or_else(|_| default_engine());

        Self {
            api_key,
            target_language,
            model,
            engine,
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            target_language: default_target_language(),
            model: default_model(),
            engine: default_engine(),
        }
    }
}
