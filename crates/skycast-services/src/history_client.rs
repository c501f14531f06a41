//! Unified history client supporting local and backend storage.
//!
//! This module provides `HistoryClient`, an enum that wraps both the local
//! key-value history and the backend history endpoints with a consistent
//! async interface.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::backend::BackendClient;
use crate::history::{HistoryEntry, HistoryError, HistoryResult, HistoryStore};
use crate::local_history::LocalHistoryStore;

/// Unified history client.
///
/// Every method returns the full updated list, most-recent-first.
#[derive(Clone)]
pub enum HistoryClient {
    /// History in a local key-value slot.
    Local(Arc<Mutex<LocalHistoryStore>>),

    /// History owned by the weather backend.
    Backend(Arc<BackendClient>),
}

impl HistoryClient {
    /// Create a locally persisted history client.
    pub fn local(store: LocalHistoryStore) -> Self {
        Self::Local(Arc::new(Mutex::new(store)))
    }

    /// Create a backend-owned history client.
    pub fn backend(client: Arc<BackendClient>) -> Self {
        Self::Backend(client)
    }

    async fn run_local<F>(store: &Arc<Mutex<LocalHistoryStore>>, op: F) -> HistoryResult<Vec<HistoryEntry>>
    where
        F: FnOnce(&LocalHistoryStore) -> HistoryResult<Vec<HistoryEntry>> + Send + 'static,
    {
        let store = store.clone();
        tokio::task::spawn_blocking(move || op(&*store.lock()))
            .await
            .map_err(|e| HistoryError::Other(anyhow::anyhow!("History task failed: {}", e)))?
    }

    /// Current history.
    pub async fn list(&self) -> HistoryResult<Vec<HistoryEntry>> {
        match self {
            Self::Local(store) => Self::run_local(store, |s| s.list()).await,
            Self::Backend(client) => client.list_history().await,
        }
    }

    /// Record a successful search.
    ///
    /// The backend records searches itself when it serves weather, so for the
    /// backend this only refreshes the list.
    pub async fn add(&self, name: &str) -> HistoryResult<Vec<HistoryEntry>> {
        match self {
            Self::Local(store) => {
                let name = name.to_string();
                Self::run_local(store, move |s| s.add(&name)).await
            }
            Self::Backend(client) => Ok(Self::reread(client).await),
        }
    }

    /// Delete an entry by id. Unknown ids leave the list unchanged.
    ///
    /// Only the delete itself can fail for the backend; the list read after
    /// it degrades to empty.
    pub async fn remove(&self, id: &str) -> HistoryResult<Vec<HistoryEntry>> {
        match self {
            Self::Local(store) => {
                let id = id.to_string();
                Self::run_local(store, move |s| s.remove(&id)).await
            }
            Self::Backend(client) => {
                client.delete_history(id).await?;
                Ok(Self::reread(client).await)
            }
        }
    }

    /// Backend history after a write. A failed read is logged and yields an
    /// empty list.
    async fn reread(client: &BackendClient) -> Vec<HistoryEntry> {
        match client.list_history().await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!("History fetch error: {}", e);
                Vec::new()
            }
        }
    }
}

impl std::fmt::Debug for HistoryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local(_) => f.debug_tuple("HistoryClient::Local").finish(),
            Self::Backend(_) => f.debug_tuple("HistoryClient::Backend").finish(),
        }
    }
}
