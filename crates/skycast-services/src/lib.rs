pub mod backend;
pub mod history;
pub mod history_client;
pub mod local_history;
pub mod sqlite_store;
pub mod storage;
pub mod weather_source;

pub use backend::BackendClient;
pub use history::{
    HistoryEntry, HistoryError, HistoryResult, HistoryStore, MAX_HISTORY_ENTRIES,
};
pub use history_client::HistoryClient;
pub use local_history::LocalHistoryStore;
pub use sqlite_store::SqliteKeyValueStore;
pub use storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, StorageResult};
pub use weather_source::WeatherSource;
