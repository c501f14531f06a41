//! Weather lookups for SkyCast
//!
//! Fetches the OpenWeather 5-day / 3-hour forecast for a city and reduces it
//! to one summary per day.

pub mod normalize;
pub mod provider;
pub mod types;

pub use normalize::{normalize_forecast, FORECAST_DAYS, SAMPLES_PER_DAY};
pub use provider::WeatherProvider;
pub use types::*;
