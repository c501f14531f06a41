pub mod config;
pub mod error;

pub use config::{
    BackendConfig, Config, HistoryConfig, HistoryStorage, ValidationResult, WeatherConfig,
    WeatherMode,
};
pub use error::{
    AppError, ConfigError, NetworkError, ReqwestErrorExt, RusqliteErrorExt, StorageError,
    WeatherError,
};

use anyhow::Result;

/// Initialize the core application
pub fn init() -> Result<()> {
    // Logs go to stderr so they never interleave with the rendered view on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("SkyCast core initialized");
    Ok(())
}
