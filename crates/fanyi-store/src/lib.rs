pub mod error;
pub mod history;
pub mod kv;
pub mod settings;

pub use error::StoreError;
pub use history::HistoryStore;
pub use kv::{KvStore, MemoryStore};
pub use settings::{Settings, SettingsPatch, SettingsStore};
