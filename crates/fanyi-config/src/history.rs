use std::env;

use serde::{Deserialize, Serialize};

fn default_max_size() -> usize {
    20
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct HistoryConfig {
    /// Upper bound on stored records; oldest entries are evicted first.
    #[serde(default = "default_max_size")]
    pub max_size: usize,
}

impl HistoryConfig {
    pub fn new() -> Self {
        let max_size = env::var("FANYI_HISTORY_MAX")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_max_size);

        Self { max_size }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_size(),
        }
    }
}
