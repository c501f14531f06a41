//! Builds the weather and history clients for the configured variant.
//!
//! Provider mode calls the forecast provider directly and keeps history in a
//! local key-value store. Backend mode hands both to the weather backend
//! through one shared HTTP client.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use skycast_core::{Config, HistoryStorage, WeatherMode};
use skycast_services::{
    BackendClient, FileKeyValueStore, HistoryClient, KeyValueStore, LocalHistoryStore,
    MemoryKeyValueStore, SqliteKeyValueStore, WeatherSource,
};
use skycast_weather::WeatherProvider;

/// The clients an `AppController` needs.
#[derive(Debug, Clone)]
pub struct AppServices {
    pub weather: WeatherSource,
    pub history: HistoryClient,
}

impl AppServices {
    /// Build clients from configuration.
    ///
    /// # Errors
    /// Fails if a URL is invalid, provider mode has no API key, or the local
    /// history store can't be opened.
    pub fn from_config(config: &Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.weather.request_timeout_secs);

        match config.weather.mode {
            WeatherMode::Backend => {
                let backend = Arc::new(BackendClient::new(&config.backend.base_url, timeout)?);
                tracing::info!("Using weather backend at {}", config.backend.base_url);
                Ok(Self {
                    weather: WeatherSource::Backend(backend.clone()),
                    history: HistoryClient::backend(backend),
                })
            }
            WeatherMode::Provider => {
                let api_key = config
                    .weather
                    .effective_api_key()
                    .context("No weather API key configured")?;
                let provider = WeatherProvider::new(&config.weather.provider_url, api_key, timeout)?;

                let store = open_store(config)?;
                let history = LocalHistoryStore::new(store, config.history.key.clone());
                tracing::info!(
                    "Using forecast provider at {} with {:?} history",
                    config.weather.provider_url,
                    config.history.storage
                );

                Ok(Self {
                    weather: WeatherSource::Provider(Arc::new(provider)),
                    history: HistoryClient::local(history),
                })
            }
        }
    }
}

fn open_store(config: &Config) -> Result<Box<dyn KeyValueStore>> {
    let path = config.history_path();
    let store: Box<dyn KeyValueStore> = match config.history.storage {
        HistoryStorage::Sqlite => Box::new(
            SqliteKeyValueStore::new(&path)
                .with_context(|| format!("Failed to open history database {}", path.display()))?,
        ),
        HistoryStorage::File => Box::new(
            FileKeyValueStore::new(&path)
                .with_context(|| format!("Failed to open history directory {}", path.display()))?,
        ),
        HistoryStorage::Memory => Box::new(MemoryKeyValueStore::new()),
    };
    Ok(store)
}
