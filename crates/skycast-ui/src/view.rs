//! Rendering collaborators.
//!
//! The controller never touches output directly; it hands results to a `View`.
//! `TerminalView` renders the today panel, forecast cards and history list as
//! text to any writer.

use std::io::Write;

use skycast_services::HistoryEntry;
use skycast_weather::WeatherSummary;

/// Everything the controller can ask the screen to do.
pub trait View {
    /// Replace the today panel.
    fn render_today(&mut self, today: &WeatherSummary);

    /// Replace the forecast panel with one card per day.
    fn render_forecast(&mut self, days: &[WeatherSummary]);

    /// Replace the history panel. `entries` is most-recent-first.
    fn render_history(&mut self, entries: &[HistoryEntry]);

    /// Surface an error to the user.
    fn show_error(&mut self, message: &str);

    /// Raise or clear the loading indicator on the today panel.
    fn set_loading(&mut self, loading: bool);

    /// Empty the search input after a successful search.
    fn clear_input(&mut self);
}

/// Plain-text view over a writer (stdout in the binary, a buffer in tests).
pub struct TerminalView<W: Write> {
    out: W,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// The underlying writer.
    pub fn writer(&self) -> &W {
        &self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            tracing::warn!("Failed to write to view: {}", e);
        }
    }
}

fn conditions(day: &WeatherSummary, degree_sep: &str) -> String {
    format!(
        "Temp: {}{}°F\nWind: {} MPH\nHumidity: {} %\n",
        day.temp_f, degree_sep, day.wind_speed, day.humidity
    )
}

impl<W: Write> View for TerminalView<W> {
    fn render_today(&mut self, today: &WeatherSummary) {
        let city = today.city.as_deref().unwrap_or_default();
        let text = format!(
            "\n{} ({}) [{}]\n{}Icon: {}\n",
            city,
            today.date,
            today.icon_description,
            conditions(today, ""),
            today.icon_url()
        );
        self.emit(&text);
    }

    fn render_forecast(&mut self, days: &[WeatherSummary]) {
        let mut text = String::from("\n5-Day Forecast:\n");
        for day in days {
            text.push_str(&format!("\n  {} [{}]\n", day.date, day.icon_description));
            for line in conditions(day, " ").lines() {
                text.push_str("  ");
                text.push_str(line);
                text.push('\n');
            }
        }
        self.emit(&text);
    }

    fn render_history(&mut self, entries: &[HistoryEntry]) {
        let mut text = String::from("\nSearch History:\n");
        if entries.is_empty() {
            text.push_str("  No Previous Search History\n");
        }
        for (i, entry) in entries.iter().enumerate() {
            text.push_str(&format!("  {}. {}\n", i + 1, entry.name));
        }
        self.emit(&text);
    }

    fn show_error(&mut self, message: &str) {
        self.emit(&format!("\n! {}\n", message));
    }

    fn set_loading(&mut self, loading: bool) {
        if loading {
            self.emit("Loading...\n");
        }
    }

    fn clear_input(&mut self) {}
}
