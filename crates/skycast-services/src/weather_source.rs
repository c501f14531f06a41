//! Where weather comes from: the forecast provider directly, or the backend.

use std::sync::Arc;

use skycast_weather::{WeatherError, WeatherProvider, WeatherSummary};

use crate::backend::BackendClient;

#[derive(Debug, Clone)]
pub enum WeatherSource {
    /// Call the forecast provider and normalize locally.
    Provider(Arc<WeatherProvider>),

    /// Let the backend fetch and normalize.
    Backend(Arc<BackendClient>),
}

impl WeatherSource {
    /// Weather for a city, ordered `[today, day+1, ...]`.
    ///
    /// # Errors
    /// Returns `WeatherError::EmptyCity` for blank input, before any request,
    /// and `WeatherError::Lookup` when the lookup fails.
    pub async fn fetch_weather(&self, city: &str) -> Result<Vec<WeatherSummary>, WeatherError> {
        match self {
            Self::Provider(provider) => provider.fetch_weather(city).await,
            Self::Backend(client) => client.fetch_weather(city).await,
        }
    }
}
