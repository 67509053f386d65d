//! Application services container.
//!
//! Holds the runtime handle, the backends behind their traits, the result
//! channels the async work reports on, and the shutdown token that every
//! per-screen token derives from.

use std::sync::Arc;
use std::time::Duration;

use breeze_auth::{AuthService, HttpAuthService};
use breeze_core::{AppError, Config};
use breeze_weather::{
    Coordinates, LocationProvider, ManualLocation, OpenWeatherProvider, WeatherService,
};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;

pub use crate::services::{AuthServiceMessage, WeatherServiceMessage};

pub struct AppServices {
    /// Runtime that async work is spawned on
    runtime: Handle,

    auth: Arc<dyn AuthService>,
    weather: Arc<dyn WeatherService>,
    location: Arc<dyn LocationProvider>,

    /// Used when the location provider has no position
    fallback: Coordinates,

    auth_tx: UnboundedSender<AuthServiceMessage>,
    auth_rx: UnboundedReceiver<AuthServiceMessage>,
    weather_tx: UnboundedSender<WeatherServiceMessage>,
    weather_rx: UnboundedReceiver<WeatherServiceMessage>,

    /// Parent of every request's cancellation token
    shutdown: CancellationToken,
}

impl AppServices {
    pub fn new(
        runtime: Handle,
        auth: Arc<dyn AuthService>,
        weather: Arc<dyn WeatherService>,
        location: Arc<dyn LocationProvider>,
        fallback: Coordinates,
    ) -> Self {
        let (auth_tx, auth_rx) = unbounded_channel();
        let (weather_tx, weather_rx) = unbounded_channel();

        Self {
            runtime,
            auth,
            weather,
            location,
            fallback,
            auth_tx,
            auth_rx,
            weather_tx,
            weather_rx,
            shutdown: CancellationToken::new(),
        }
    }

    /// Build the HTTP backends described by `config`. The location starts
    /// unset, so fetches use the configured fallback until one is provided.
    pub fn from_config(config: &Config, runtime: Handle) -> Result<Self, AppError> {
        let auth = HttpAuthService::new(
            &config.auth.base_url,
            &config.auth.login_path,
            &config.auth.register_path,
            Duration::from_secs(config.auth.timeout_secs),
        )?;

        let api_key = config.weather.resolved_api_key().unwrap_or_else(|| {
            tracing::warn!("No weather API key configured; weather requests will be rejected");
            String::new()
        });
        let weather = OpenWeatherProvider::new(
            &config.weather.base_url,
            api_key,
            weather_units(config.weather.units),
            Duration::from_secs(config.weather.timeout_secs),
        )?;

        tracing::info!(
            "Services initialized (auth: {}, weather: {})",
            config.auth.base_url,
            config.weather.base_url
        );

        Ok(Self::new(
            runtime,
            Arc::new(auth),
            Arc::new(weather),
            Arc::new(ManualLocation::new()),
            Coordinates::new(
                config.weather.fallback_latitude,
                config.weather.fallback_longitude,
            ),
        ))
    }

    /// Get the tokio runtime handle.
    pub fn runtime(&self) -> &Handle {
        &self.runtime
    }

    pub fn auth(&self) -> Arc<dyn AuthService> {
        Arc::clone(&self.auth)
    }

    pub fn weather(&self) -> Arc<dyn WeatherService> {
        Arc::clone(&self.weather)
    }

    pub fn location(&self) -> Arc<dyn LocationProvider> {
        Arc::clone(&self.location)
    }

    pub fn set_location(&mut self, location: Arc<dyn LocationProvider>) {
        self.location = location;
    }

    pub fn fallback(&self) -> Coordinates {
        self.fallback
    }

    pub fn auth_sender(&self) -> &UnboundedSender<AuthServiceMessage> {
        &self.auth_tx
    }

    pub fn weather_sender(&self) -> &UnboundedSender<WeatherServiceMessage> {
        &self.weather_tx
    }

    /// Next pending auth result, without blocking.
    pub fn try_recv_auth(&mut self) -> Option<AuthServiceMessage> {
        self.auth_rx.try_recv().ok()
    }

    /// Next pending weather result, without blocking.
    pub fn try_recv_weather(&mut self) -> Option<WeatherServiceMessage> {
        self.weather_rx.try_recv().ok()
    }

    /// Fresh token that is also cancelled by [`AppServices::shutdown`].
    pub fn request_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }

    /// Cancel all in-flight work.
    pub fn shutdown(&self) {
        tracing::info!("AppServices shutdown initiated");
        self.shutdown.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}

impl Drop for AppServices {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Map the configured unit preference onto the weather API's.
pub fn weather_units(units: breeze_core::Units) -> breeze_weather::Units {
    match units {
        breeze_core::Units::Metric => breeze_weather::Units::Metric,
        breeze_core::Units::Imperial => breeze_weather::Units::Imperial,
        breeze_core::Units::Standard => breeze_weather::Units::Standard,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn config() -> Config {
        Config::default()
    }

    #[tokio::test]
    async fn test_from_config_uses_fallback() {
        let services = AppServices::from_config(&config(), Handle::current()).unwrap();
        assert_eq!(services.fallback(), Coordinates::new(32.6311553, 51.64102));
        assert!(!services.is_shut_down());
    }

    #[tokio::test]
    async fn test_bad_auth_url_is_config_error() {
        let mut config = config();
        config.auth.base_url = "not a url".into();
        let err = AppServices::from_config(&config, Handle::current())
            .err()
            .unwrap();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[tokio::test]
    async fn test_shutdown_cancels_request_tokens() {
        let services = AppServices::from_config(&config(), Handle::current()).unwrap();
        let token = services.request_token();
        services.shutdown();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_units_mapping() {
        assert_eq!(
            weather_units(breeze_core::Units::Imperial),
            breeze_weather::Units::Imperial
        );
        assert_eq!(weather_units(Default::default()), breeze_weather::Units::Metric);
    }
}
