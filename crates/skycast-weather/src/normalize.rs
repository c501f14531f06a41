//! Reduce a 3-hour-interval provider forecast to one summary per day.
//!
//! Sample 0 is today. After that every `SAMPLES_PER_DAY`-th sample stands in
//! for the following day. This is fixed-stride sampling tied to the provider's
//! 3-hour interval, not a calendar-aware aggregate.

use chrono::DateTime;

use crate::types::{ForecastResponse, ForecastSample, WeatherError, WeatherSummary};

/// Provider samples per day (3-hour interval)
pub const SAMPLES_PER_DAY: usize = 8;

/// Forecast days produced after today
pub const FORECAST_DAYS: usize = 4;

/// Indices of the samples chosen as forecast days: 7, 15, 23, 31.
pub fn forecast_indices(sample_count: usize) -> impl Iterator<Item = usize> {
    (SAMPLES_PER_DAY - 1..sample_count)
        .step_by(SAMPLES_PER_DAY)
        .take(FORECAST_DAYS)
}

/// Build `[today, day+1, ...]` from a provider response.
///
/// # Errors
/// Returns `WeatherError::Lookup` if the response holds no samples or a
/// sample timestamp is out of range.
pub fn normalize_forecast(response: &ForecastResponse) -> Result<Vec<WeatherSummary>, WeatherError> {
    let city = response.city.name.as_str();
    let offset = response.city.timezone;

    let first = response
        .list
        .first()
        .ok_or_else(|| WeatherError::unreadable(city, "forecast has no samples"))?;

    let mut today = summarize(first, offset, city)?;
    today.city = Some(city.to_string());

    let mut days = Vec::with_capacity(FORECAST_DAYS + 1);
    days.push(today);
    for index in forecast_indices(response.list.len()) {
        days.push(summarize(&response.list[index], offset, city)?);
    }

    tracing::debug!(
        "Normalized {} samples for {} into {} days",
        response.list.len(),
        city,
        days.len()
    );
    Ok(days)
}

fn summarize(sample: &ForecastSample, offset: i64, city: &str) -> Result<WeatherSummary, WeatherError> {
    let (icon, icon_description) = sample
        .weather
        .first()
        .map(|w| (w.icon.clone(), w.description.clone()))
        .unwrap_or_default();

    Ok(WeatherSummary {
        city: None,
        date: format_date(sample.dt, offset)
            .ok_or_else(|| WeatherError::unreadable(city, format!("bad timestamp {}", sample.dt)))?,
        icon,
        icon_description,
        temp_f: sample.main.temp.round() as i64,
        wind_speed: sample.wind.speed.round() as i64,
        humidity: sample.main.humidity,
    })
}

/// Local calendar date (`M/D/YYYY`) of a unix timestamp shifted by `offset` seconds.
pub fn format_date(unix_secs: i64, offset: i64) -> Option<String> {
    let local = DateTime::from_timestamp(unix_secs.checked_add(offset)?, 0)?;
    Some(local.format("%-m/%-d/%Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ForecastCity, SampleCondition, SampleMain, SampleWind};

    // 2024-06-01T00:00:00Z
    const START: i64 = 1_717_200_000;

    fn sample(index: usize) -> ForecastSample {
        ForecastSample {
            dt: START + (index as i64) * 3 * 3600,
            main: SampleMain {
                temp: 70.0 + index as f64,
                humidity: index as i64,
            },
            weather: vec![SampleCondition {
                icon: format!("{:02}d", index % 50),
                description: format!("sample {}", index),
            }],
            wind: SampleWind { speed: 3.0 },
        }
    }

    fn response(count: usize) -> ForecastResponse {
        ForecastResponse {
            city: ForecastCity {
                name: "Paris".to_string(),
                timezone: 0,
            },
            list: (0..count).map(sample).collect(),
        }
    }

    #[test]
    fn test_forecast_indices_full_response() {
        let picked: Vec<usize> = forecast_indices(40).collect();
        assert_eq!(picked, vec![7, 15, 23, 31]);
    }

    #[test]
    fn test_forecast_indices_short_response() {
        assert_eq!(forecast_indices(7).count(), 0);
        assert_eq!(forecast_indices(8).collect::<Vec<_>>(), vec![7]);
        assert_eq!(forecast_indices(20).collect::<Vec<_>>(), vec![7, 15]);
    }

    #[test]
    fn test_normalize_picks_stride_samples() {
        let days = normalize_forecast(&response(40)).unwrap();
        assert_eq!(days.len(), 1 + FORECAST_DAYS);

        // humidity was seeded with the sample index
        let humidities: Vec<i64> = days[1..].iter().map(|d| d.humidity).collect();
        assert_eq!(humidities, vec![7, 15, 23, 31]);
    }

    #[test]
    fn test_only_today_carries_city() {
        let days = normalize_forecast(&response(40)).unwrap();
        assert_eq!(days[0].city.as_deref(), Some("Paris"));
        assert!(days[1..].iter().all(|d| d.city.is_none()));
        assert_eq!(days[0].humidity, 0);
    }

    #[test]
    fn test_rounding_of_temp_and_wind() {
        let mut resp = response(1);
        resp.list[0].main.temp = 72.5;
        resp.list[0].wind.speed = 4.49;
        let days = normalize_forecast(&resp).unwrap();
        assert_eq!(days[0].temp_f, 73);
        assert_eq!(days[0].wind_speed, 4);
    }

    #[test]
    fn test_empty_list_is_lookup_error() {
        let err = normalize_forecast(&response(0)).unwrap_err();
        assert!(matches!(err, WeatherError::Lookup { ref city, .. } if city == "Paris"));
    }

    #[test]
    fn test_dates_advance_one_day_per_stride() {
        let days = normalize_forecast(&response(40)).unwrap();
        assert_eq!(days[0].date, "6/1/2024");
        // index 7 is 21:00 on day one
        assert_eq!(days[1].date, "6/1/2024");
        assert_eq!(days[2].date, "6/2/2024");
        assert_eq!(days[4].date, "6/4/2024");
    }

    #[test]
    fn test_format_date_applies_offset() {
        // 2024-06-01T00:00:00Z is still May 31 five hours west of UTC
        assert_eq!(format_date(START, -5 * 3600).as_deref(), Some("5/31/2024"));
        assert_eq!(format_date(START, 0).as_deref(), Some("6/1/2024"));
    }

    #[test]
    fn test_missing_condition_leaves_icon_blank() {
        let mut resp = response(1);
        resp.list[0].weather.clear();
        let days = normalize_forecast(&resp).unwrap();
        assert!(days[0].icon.is_empty());
        assert!(days[0].icon_description.is_empty());
    }
}
