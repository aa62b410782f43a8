use std::env;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_min_confidence() -> f64 {
    0.5
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DetectorConfig {
    /// Probabilistic source-language hint. When disabled the Unicode-range
    /// ladder decides alone.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Detections below this confidence are treated as unknown.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
}

impl DetectorConfig {
    pub fn new() -> Self {
        let enabled = env::var("FANYI_DETECTOR")
            .map(|v| v != "0" && v != "off")
            .unwrap_or_else(|_| default_enabled());

        let min_confidence = env::var("FANYI_DETECTOR_MIN_CONFIDENCE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_min_confidence);

        Self {
            enabled,
            min_confidence,
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            min_confidence: default_min_confidence(),
        }
    }
}
