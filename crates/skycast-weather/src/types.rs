use serde::{Deserialize, Serialize};

const ICON_BASE_URL: &str = "https://openweathermap.org/img/w";

/// One day's weather, normalized for display.
///
/// The first element of a fetch result is "today" and is the only one that
/// carries a `city`. Field names on the wire are camelCase, matching what the
/// weather backend returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Calendar date, `M/D/YYYY`
    pub date: String,
    /// Provider icon code, e.g. `10d`
    pub icon: String,
    pub icon_description: String,
    pub temp_f: i64,
    /// Miles per hour
    pub wind_speed: i64,
    /// Percent
    pub humidity: i64,
}

impl WeatherSummary {
    /// URL of the provider's icon image for this summary.
    pub fn icon_url(&self) -> String {
        icon_url(&self.icon)
    }
}

/// URL of the provider's icon image for an icon code.
pub fn icon_url(icon: &str) -> String {
    format!("{}/{}.png", ICON_BASE_URL, icon)
}

/// Provider 5-day / 3-hour forecast response (only the consumed fields).
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub city: ForecastCity,
    #[serde(default)]
    pub list: Vec<ForecastSample>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastCity {
    pub name: String,
    /// Shift from UTC in seconds
    #[serde(default)]
    pub timezone: i64,
}

/// One 3-hour interval sample
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastSample {
    /// Unix seconds
    pub dt: i64,
    pub main: SampleMain,
    #[serde(default)]
    pub weather: Vec<SampleCondition>,
    pub wind: SampleWind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SampleMain {
    pub temp: f64,
    pub humidity: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SampleCondition {
    pub icon: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SampleWind {
    pub speed: f64,
}

/// Weather lookup errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// Rejected before any request was made.
    #[error("Please enter a city name")]
    EmptyCity,

    /// Any failure fetching or reading weather for a city.
    #[error("Failed to fetch weather: {reason}")]
    Lookup {
        city: String,
        /// HTTP status when the server answered
        status: Option<u16>,
        reason: String,
    },

    #[error("Invalid weather service URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl WeatherError {
    pub(crate) fn lookup(city: &str, status: Option<u16>, reason: impl Into<String>) -> Self {
        Self::Lookup {
            city: city.to_string(),
            status,
            reason: reason.into(),
        }
    }

    /// Failure for a request that the server answered with a non-success status.
    pub fn not_found(city: &str, status: u16) -> Self {
        Self::lookup(
            city,
            Some(status),
            format!("Weather data not found for {} ({})", city, status),
        )
    }

    /// Failure for a request that never got a usable answer.
    pub fn transport(city: &str, err: &reqwest::Error) -> Self {
        Self::lookup(
            city,
            err.status().map(|s| s.as_u16()),
            format!("Request for {} failed: {}", city, err),
        )
    }

    /// Failure reading the body of a successful response.
    pub fn unreadable(city: &str, detail: impl std::fmt::Display) -> Self {
        Self::lookup(
            city,
            None,
            format!("Unreadable weather data for {}: {}", city, detail),
        )
    }
}

/// Trim a search term, rejecting empty input.
///
/// # Errors
/// Returns `WeatherError::EmptyCity` if nothing but whitespace was entered.
pub fn validate_city(input: &str) -> Result<&str, WeatherError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(WeatherError::EmptyCity);
    }
    Ok(trimmed)
}
