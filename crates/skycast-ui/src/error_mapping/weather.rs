use skycast_core::{AppError, ConfigError, NetworkError, ReqwestErrorExt, WeatherError as CoreWeatherError};
use skycast_weather::WeatherError;

use super::IntoAppError;

impl IntoAppError for WeatherError {
    fn into_app_error(self) -> AppError {
        match self {
            WeatherError::EmptyCity => AppError::Validation(WeatherError::EmptyCity.to_string()),
            WeatherError::Lookup {
                city,
                status: Some(404),
                ..
            } => AppError::Weather(CoreWeatherError::CityNotFound(city)),
            WeatherError::Lookup {
                status: Some(401), ..
            } => AppError::Weather(CoreWeatherError::InvalidApiKey),
            WeatherError::Lookup {
                status: Some(503), ..
            } => AppError::Weather(CoreWeatherError::ServiceUnavailable),
            WeatherError::Lookup {
                status: Some(status),
                reason,
                ..
            } if status >= 500 => AppError::Network(NetworkError::ServerError {
                status,
                message: reason,
            }),
            WeatherError::Lookup { reason, .. } => {
                AppError::Weather(CoreWeatherError::ApiError(reason))
            }
            WeatherError::InvalidUrl(s) => AppError::Config(ConfigError::Invalid(s)),
            WeatherError::Client(e) => AppError::Network(e.into_network_error()),
        }
    }
}
