use std::env;

use serde::{Deserialize, Serialize};

use self::detector::DetectorConfig;
use self::history::HistoryConfig;
use self::translator::TranslatorConfig;

pub mod detector;
pub mod history;
pub mod translator;

#[derive(Serialize, Deserialize)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub history: HistoryConfig,
    pub detector: DetectorConfig,

    /// Outbound HTTP timeout in seconds, applied when the binary builds the
    /// shared client. The core itself imposes no timeout.
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn new() -> Self {
        let http_timeout_secs = env::var("FANYI_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Config {
            translator: TranslatorConfig::new(),
            history: HistoryConfig::new(),
            detector: DetectorConfig::new(),
            http_timeout_secs,
        }
    }
}
