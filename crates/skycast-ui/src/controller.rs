//! Wires user events to weather lookups, search history and the view.

use skycast_core::AppError;
use skycast_services::{HistoryClient, HistoryEntry, WeatherSource};
use skycast_weather::{validate_city, WeatherError, WeatherSummary};

use crate::error_mapping::IntoAppError;
use crate::events::{attached_entry, history_rows, ClickEvent, Element, ElementRole, HistoryRow, Propagation};
use crate::view::View;

const DELETE_FAILED: &str = "Failed to delete city from history";

/// Application controller.
///
/// Handles the three user events (search submit, history entry click, delete
/// click). Every failure is shown on the view before it is returned, and a
/// failed lookup leaves whatever was rendered before in place.
pub struct AppController<V: View> {
    weather: WeatherSource,
    history: HistoryClient,
    view: V,
    /// History as last rendered, most-recent-first
    rendered_history: Vec<HistoryEntry>,
}

impl<V: View> AppController<V> {
    pub fn new(weather: WeatherSource, history: HistoryClient, view: V) -> Self {
        Self {
            weather,
            history,
            view,
            rendered_history: Vec::new(),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// History as currently shown.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.rendered_history
    }

    /// Rows for the history currently shown, in display order.
    pub fn history_rows(&self) -> Vec<HistoryRow> {
        history_rows(&self.rendered_history)
    }

    /// Load and render the persisted history.
    pub async fn initialize(&mut self) {
        self.refresh_history().await;
    }

    /// Re-read history and render it. Read failures render an empty history.
    pub async fn refresh_history(&mut self) {
        let entries = match self.history.list().await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!("History fetch error: {}", e);
                Vec::new()
            }
        };
        self.show_history(entries);
    }

    /// Search form submitted.
    ///
    /// # Errors
    /// Returns `AppError::Validation` for blank input (no request is made) and
    /// the mapped lookup error if the weather fetch fails.
    pub async fn submit_search(&mut self, input: &str) -> Result<(), AppError> {
        let city = match validate_city(input) {
            Ok(city) => city.to_string(),
            Err(e) => return Err(self.fail(e.to_string(), e.into_app_error())),
        };

        self.load_weather(&city).await?;
        self.record_search(&city).await;
        self.view.clear_input();
        Ok(())
    }

    /// A history entry was clicked: show its weather again.
    ///
    /// A successful lookup also moves the entry to the front of the history.
    ///
    /// # Errors
    /// Returns the mapped lookup error if the weather fetch fails.
    pub async fn open_history_entry(&mut self, name: &str) -> Result<(), AppError> {
        self.load_weather(name).await?;
        self.record_search(name).await;
        Ok(())
    }

    /// A delete control was clicked.
    ///
    /// # Errors
    /// Returns an error if the control carries no readable entry or the store
    /// fails to remove it.
    pub async fn delete_history_entry(&mut self, control: &Element) -> Result<(), AppError> {
        let Some(entry) = attached_entry(control) else {
            return Err(self.fail(
                DELETE_FAILED.to_string(),
                AppError::Validation("Delete control has no entry attached".to_string()),
            ));
        };

        match self.history.remove(&entry.id).await {
            Ok(entries) => {
                tracing::info!("Removed {} from history", entry.name);
                self.show_history(entries);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Delete error: {}", e);
                Err(self.fail(DELETE_FAILED.to_string(), e.into_app_error()))
            }
        }
    }

    /// Route a click to the handler for the innermost element that has one.
    ///
    /// The delete handler stops propagation, so a delete never also counts as
    /// a click on the entry around it.
    pub async fn dispatch(&mut self, event: &ClickEvent) -> Propagation {
        for element in &event.path {
            let propagation = match element.role {
                ElementRole::DeleteControl => {
                    // failure already shown on the view
                    let _ = self.delete_history_entry(element).await;
                    Propagation::Stop
                }
                ElementRole::HistoryEntry => {
                    let _ = self.open_history_entry(&element.text).await;
                    Propagation::Continue
                }
                ElementRole::Container | ElementRole::Other => Propagation::Continue,
            };

            if propagation == Propagation::Stop {
                return Propagation::Stop;
            }
        }
        Propagation::Continue
    }

    /// Fetch and render weather, raising the loading indicator meanwhile.
    async fn load_weather(&mut self, city: &str) -> Result<(), AppError> {
        self.view.set_loading(true);
        let result = self.weather.fetch_weather(city).await;
        self.view.set_loading(false);

        match result {
            Ok(days) => self.show_weather(city, &days),
            Err(e) => {
                tracing::warn!("Weather lookup failed: {}", e);
                Err(self.fail(e.to_string(), e.into_app_error()))
            }
        }
    }

    fn show_weather(&mut self, city: &str, days: &[WeatherSummary]) -> Result<(), AppError> {
        let Some((today, forecast)) = days.split_first() else {
            let err = WeatherError::unreadable(city, "no weather returned");
            return Err(self.fail(err.to_string(), err.into_app_error()));
        };
        self.view.render_today(today);
        self.view.render_forecast(forecast);
        Ok(())
    }

    /// Record a successful search. A failure here doesn't undo the weather
    /// already shown.
    async fn record_search(&mut self, city: &str) {
        match self.history.add(city).await {
            Ok(entries) => self.show_history(entries),
            Err(e) => {
                tracing::error!("Failed to record search for {}: {}", city, e);
                let err = e.into_app_error();
                self.view.show_error(err.user_message());
            }
        }
    }

    fn show_history(&mut self, entries: Vec<HistoryEntry>) {
        self.view.render_history(&entries);
        self.rendered_history = entries;
    }

    fn fail(&mut self, message: String, err: AppError) -> AppError {
        self.view.show_error(&message);
        err
    }
}
