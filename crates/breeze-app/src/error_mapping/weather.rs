use breeze_core::error::ReqwestErrorExt;
use breeze_core::{AppError, ConfigError, NetworkError, WeatherError};
use breeze_weather::WeatherError as FetchError;

impl From<FetchError> for AppError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Network(err) => AppError::Network(err.into_network_error()),
            FetchError::Status { status: 401, .. } => AppError::Weather(WeatherError::InvalidApiKey),
            FetchError::Status { status: 404, message } => {
                AppError::Weather(WeatherError::LocationNotFound(message))
            }
            FetchError::Status { status, .. } if status >= 500 => {
                AppError::Weather(WeatherError::ServiceUnavailable)
            }
            FetchError::Status { status, message } => {
                AppError::Network(NetworkError::ServerError { status, message })
            }
            FetchError::Parse(s) => AppError::Network(NetworkError::InvalidResponse(s)),
            FetchError::InvalidUrl(err) => AppError::Config(ConfigError::Invalid(format!(
                "weather endpoint: {}",
                err
            ))),
        }
    }
}
