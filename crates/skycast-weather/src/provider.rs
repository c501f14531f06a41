//! Direct client for the OpenWeather 5-day / 3-hour forecast API.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::normalize::normalize_forecast;
use crate::types::{validate_city, ForecastResponse, WeatherError, WeatherSummary};

/// Forecast provider client. Units are always imperial.
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    forecast_url: Url,
    api_key: String,
}

impl WeatherProvider {
    /// Create a provider client.
    ///
    /// A zero `timeout` leaves requests without a deadline.
    ///
    /// # Errors
    /// Returns an error if `base_url` is not a valid URL or the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str, api_key: impl Into<String>, timeout: Duration) -> Result<Self, WeatherError> {
        let forecast_url = Url::parse(&format!("{}/forecast", base_url.trim_end_matches('/')))
            .map_err(|e| WeatherError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let mut builder = Client::builder();
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client: Arc::new(client),
            forecast_url,
            api_key: api_key.into(),
        })
    }

    /// Fetch the raw forecast for a city.
    ///
    /// # Errors
    /// Returns `WeatherError::EmptyCity` for blank input and
    /// `WeatherError::Lookup` for any network, status or parse failure.
    pub async fn fetch_forecast(&self, city: &str) -> Result<ForecastResponse, WeatherError> {
        let city = validate_city(city)?;
        tracing::debug!("Fetching forecast for {}", city);

        let response = self
            .client
            .get(self.forecast_url.clone())
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "imperial"),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::transport(city, &e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Forecast lookup for {} returned {}", city, status);
            return Err(WeatherError::not_found(city, status.as_u16()));
        }

        response
            .json::<ForecastResponse>()
            .await
            .map_err(|e| WeatherError::unreadable(city, e))
    }

    /// Fetch and normalize weather for a city: `[today, day+1, ...]`.
    ///
    /// # Errors
    /// See [`WeatherProvider::fetch_forecast`]; an empty forecast is also a
    /// lookup failure.
    pub async fn fetch_weather(&self, city: &str) -> Result<Vec<WeatherSummary>, WeatherError> {
        let forecast = self.fetch_forecast(city).await?;
        let days = normalize_forecast(&forecast)?;
        tracing::info!("Fetched {} days of weather for {}", days.len(), forecast.city.name);
        Ok(days)
    }
}
