use std::sync::Arc;

use tokio::sync::Mutex;

use fanyi_types::HistoryRecord;

use crate::error::StoreError;
use crate::kv::KvStore;
use crate::settings::SettingsStore;

const HISTORY_KEY: &str = "translation_history";

/// Append-only, size-capped, newest-first log of translation records.
///
/// The read-prepend-truncate-write in `append` is a critical section:
/// concurrent translations land interleaved but none of them is lost.
pub struct HistoryStore {
    store: Arc<dyn KvStore>,
    settings: Arc<SettingsStore>,
    write_lock: Mutex<()>,
}

impl HistoryStore {
    pub fn new(store: Arc<dyn KvStore>, settings: Arc<SettingsStore>) -> Self {
        Self {
            store,
            settings,
            write_lock: Mutex::new(()),
        }
    }

    /// Prepend a record and evict past the configured bound.
    pub async fn append(&self, record: HistoryRecord) -> Result<(), StoreError> {
        // Blank entries carry no information worth keeping.
        if record.original.is_empty() || record.translated.is_empty() {
            return Ok(());
        }

        let _guard = self.write_lock.lock().await;

        let mut log = self.load().await?;
        let max_size = self.settings.get().await?.history_max_size;

        log.insert(0, record);
        if log.len() > max_size {
            tracing::debug!(evicted = log.len() - max_size, "history cap reached");
            log.truncate(max_size);
        }

        self.write(&log).await
    }

    /// All records, newest first.
    pub async fn list(&self) -> Result<Vec<HistoryRecord>, StoreError> {
        self.load().await
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.store.remove(HISTORY_KEY).await
    }

    /// Drop every record the predicate selects.
    pub async fn delete_where<F>(&self, predicate: F) -> Result<(), StoreError>
    where
        F: Fn(&HistoryRecord) -> bool + Send,
    {
        let _guard = self.write_lock.lock().await;

        let mut log = self.load().await?;
        log.retain(|record| !predicate(record));

        self.write(&log).await
    }

    async fn load(&self) -> Result<Vec<HistoryRecord>, StoreError> {
        match self.store.get(HISTORY_KEY).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    async fn write(&self, log: &[HistoryRecord]) -> Result<(), StoreError> {
        self.store
            .set(HISTORY_KEY, serde_json::to_value(log)?)
            .await
    }
}
