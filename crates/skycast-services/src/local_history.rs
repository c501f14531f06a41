//! History kept in a local key-value slot as a JSON array.

use chrono::Utc;

use crate::history::{
    next_id, push_entry, remove_entry, HistoryEntry, HistoryError, HistoryResult, HistoryStore,
};
use crate::storage::KeyValueStore;

/// History persisted as one JSON blob under `key` in a `KeyValueStore`.
///
/// Every operation is a read-modify-write of the whole list; concurrent
/// writers race and the last write wins.
pub struct LocalHistoryStore {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl LocalHistoryStore {
    pub fn new(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Read the persisted list. An unreadable blob is logged and treated as
    /// empty so a corrupt slot can't wedge the history.
    fn load(&self) -> HistoryResult<Vec<HistoryEntry>> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::warn!("Discarding unreadable search history in '{}': {}", self.key, e);
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, entries: &[HistoryEntry]) -> HistoryResult<()> {
        let raw = serde_json::to_string(entries)?;
        self.store.set(&self.key, &raw)?;
        Ok(())
    }
}

impl HistoryStore for LocalHistoryStore {
    fn list(&self) -> HistoryResult<Vec<HistoryEntry>> {
        self.load()
    }

    fn add(&self, name: &str) -> HistoryResult<Vec<HistoryEntry>> {
        if name.trim().is_empty() {
            return Err(HistoryError::validation("City name cannot be empty"));
        }

        let mut entries = self.load()?;
        let id = next_id(&entries, Utc::now().timestamp_millis());
        push_entry(&mut entries, HistoryEntry::new(id, name));
        self.save(&entries)?;

        tracing::debug!("Recorded search '{}' ({} in history)", name, entries.len());
        Ok(entries)
    }

    fn remove(&self, id: &str) -> HistoryResult<Vec<HistoryEntry>> {
        let mut entries = self.load()?;
        if remove_entry(&mut entries, id) {
            self.save(&entries)?;
            tracing::debug!("Removed history entry {}", id);
        } else {
            tracing::debug!("History entry {} not found; nothing removed", id);
        }
        Ok(entries)
    }
}
