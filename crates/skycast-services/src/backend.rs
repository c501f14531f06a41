//! Client for the weather backend, which owns both weather lookups and
//! search history.
//!
//! Endpoints, relative to the configured base URL:
//! - `POST /` with `{ "cityName": ... }` → `[today, day+1, ...]`
//! - `GET /history` → history, oldest first
//! - `DELETE /history/{id}`

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use url::Url;

use skycast_core::StorageError;
use skycast_weather::{validate_city, WeatherError, WeatherSummary};

use crate::history::{HistoryEntry, HistoryError, HistoryResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WeatherRequest<'a> {
    city_name: &'a str,
}

/// Weather backend API client
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: Url,
    client: Arc<Client>,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// A zero `timeout` leaves requests without a deadline.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).context("Invalid backend URL")?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Backend URL cannot have paths appended: {}", base_url);
        }

        let mut builder = Client::builder();
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            base_url,
            client: Arc::new(client),
        })
    }

    /// Base URL with `segments` appended as path segments.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // checked in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Fetch `[today, day+1, ...]` for a city. The backend records the search
    /// in its history as a side effect.
    ///
    /// # Errors
    /// Returns `WeatherError::EmptyCity` for blank input and
    /// `WeatherError::Lookup` for any network, status or parse failure.
    pub async fn fetch_weather(&self, city: &str) -> Result<Vec<WeatherSummary>, WeatherError> {
        let city = validate_city(city)?;
        tracing::debug!("Requesting weather for {} from backend", city);

        let response = self
            .client
            .post(self.endpoint(&[""]))
            .json(&WeatherRequest { city_name: city })
            .send()
            .await
            .map_err(|e| WeatherError::transport(city, &e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Backend weather lookup for {} returned {}", city, status);
            return Err(WeatherError::not_found(city, status.as_u16()));
        }

        let days: Vec<WeatherSummary> = response
            .json()
            .await
            .map_err(|e| WeatherError::unreadable(city, e))?;

        if days.is_empty() {
            return Err(WeatherError::unreadable(city, "backend returned no days"));
        }

        tracing::info!("Fetched {} days of weather for {}", days.len(), city);
        Ok(days)
    }

    /// Fetch history, most-recent-first.
    ///
    /// # Errors
    /// Returns `HistoryError::Backend` on a non-success status and
    /// `HistoryError::Http` if the request fails.
    pub async fn list_history(&self) -> HistoryResult<Vec<HistoryEntry>> {
        tracing::debug!("Fetching search history from backend");

        let response = self.client.get(self.endpoint(&["history"])).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HistoryError::backend(
                Some(status.as_u16()),
                format!("Failed to fetch search history ({})", status),
            ));
        }

        let mut entries: Vec<HistoryEntry> = response.json().await?;
        // backend keeps insertion order
        entries.reverse();
        Ok(entries)
    }

    /// Delete a history entry. A 404 means it's already gone and is not an
    /// error.
    ///
    /// # Errors
    /// Returns `StorageError::DeleteFailed` on any other non-success status and
    /// `HistoryError::Http` if the request fails.
    pub async fn delete_history(&self, id: &str) -> HistoryResult<()> {
        tracing::debug!("Deleting history entry {} on backend", id);

        let response = self
            .client
            .delete(self.endpoint(&["history", id]))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!("History entry {} already gone", id);
            return Ok(());
        }
        if !status.is_success() {
            return Err(HistoryError::Storage(StorageError::DeleteFailed(format!(
                "Failed to delete city from history ({})",
                status
            ))));
        }

        tracing::info!("Deleted history entry {}", id);
        Ok(())
    }
}
