//! Search history: entry type, list rules and the `HistoryStore` trait.
//!
//! The list is ordered most-recent-first, holds at most
//! `MAX_HISTORY_ENTRIES` entries, and never holds two entries with the same
//! name (exact, case-sensitive).

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use skycast_core::StorageError;

/// Maximum number of remembered searches.
pub const MAX_HISTORY_ENTRIES: usize = 10;

/// A remembered past search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique per insertion. Backend ids may arrive as numbers or strings.
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub name: String,
}

impl HistoryEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// Errors that can occur during history operations.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Rejected input (e.g., empty city name).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Key-value store failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Persisted history could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend answered with a failure.
    #[error("{message}")]
    Backend { status: Option<u16>, message: String },

    /// Request to the backend never completed.
    #[error("History request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic error wrapper.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HistoryError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn backend(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Backend {
            status,
            message: message.into(),
        }
    }
}

/// Result type for history operations.
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Trait for history stores that own their list.
///
/// Implementations don't need to be Sync - `HistoryClient` wraps them in a
/// Mutex and runs them on the blocking pool.
pub trait HistoryStore: Send {
    /// Current history, most-recent-first.
    fn list(&self) -> HistoryResult<Vec<HistoryEntry>>;

    /// Record a search and return the updated list.
    ///
    /// # Errors
    /// Returns `HistoryError::Validation` if `name` is empty.
    fn add(&self, name: &str) -> HistoryResult<Vec<HistoryEntry>>;

    /// Forget an entry and return the updated list. Unknown ids are a no-op.
    fn remove(&self, id: &str) -> HistoryResult<Vec<HistoryEntry>>;
}

/// Put `entry` at the front, dropping any older entry with the same name and
/// anything past `MAX_HISTORY_ENTRIES`.
pub fn push_entry(entries: &mut Vec<HistoryEntry>, entry: HistoryEntry) {
    entries.retain(|e| e.name != entry.name);
    entries.insert(0, entry);
    entries.truncate(MAX_HISTORY_ENTRIES);
}

/// Drop the entry with `id`. Returns whether anything was removed.
pub fn remove_entry(entries: &mut Vec<HistoryEntry>, id: &str) -> bool {
    let before = entries.len();
    entries.retain(|e| e.id != id);
    entries.len() != before
}

/// Fresh id for a new entry: `now_ms`, or one past the largest numeric id
/// already present if the clock hasn't moved on.
pub fn next_id(entries: &[HistoryEntry], now_ms: i64) -> String {
    let newest = entries
        .iter()
        .filter_map(|e| e.id.parse::<i64>().ok())
        .max();

    match newest {
        Some(max) if max >= now_ms => max.saturating_add(1).to_string(),
        _ => now_ms.to_string(),
    }
}
