use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use crate::types::{api, Coordinates, ForecastEntry, Units, WeatherError, WeatherSnapshot};

const CURRENT_ENDPOINT: &str = "weather";
const FORECAST_ENDPOINT: &str = "forecast";

/// Source of current conditions and the 3-hourly forecast.
#[async_trait]
pub trait WeatherService: Send + Sync {
    async fn current_weather(&self, at: Coordinates) -> Result<WeatherSnapshot, WeatherError>;

    /// Forecast slots in the order the API returns them.
    async fn forecast(&self, at: Coordinates) -> Result<Vec<ForecastEntry>, WeatherError>;
}

/// [`WeatherService`] backed by the OpenWeatherMap 2.5 API.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    client: Arc<Client>,
    base_url: Url,
    api_key: String,
    units: Units,
}

impl OpenWeatherProvider {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        units: Units,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: Url::parse(base_url)?,
            api_key: api_key.into(),
            units,
        })
    }

    pub fn units(&self) -> Units {
        self.units
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        at: Coordinates,
    ) -> Result<T, WeatherError> {
        let url = self.base_url.join(endpoint)?;
        tracing::debug!("GET {} ({}, {})", url, at.latitude, at.longitude);

        let response = self
            .client
            .get(url)
            .query(&[
                ("lat", at.latitude.to_string()),
                ("lon", at.longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", self.units.as_query().to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<api::ErrorReply>(&text)
                .ok()
                .and_then(|reply| reply.message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
            return Err(WeatherError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| WeatherError::Parse(e.to_string()))
    }
}

#[async_trait]
impl WeatherService for OpenWeatherProvider {
    #[instrument(skip(self), level = "info")]
    async fn current_weather(&self, at: Coordinates) -> Result<WeatherSnapshot, WeatherError> {
        let response: api::CurrentWeatherResponse = self.get_json(CURRENT_ENDPOINT, at).await?;
        Ok(WeatherSnapshot::from(response))
    }

    #[instrument(skip(self), level = "info")]
    async fn forecast(&self, at: Coordinates) -> Result<Vec<ForecastEntry>, WeatherError> {
        let response: api::ForecastResponse = self.get_json(FORECAST_ENDPOINT, at).await?;
        response
            .list
            .into_iter()
            .map(ForecastEntry::try_from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_rejects_invalid_base_url() {
        let result = OpenWeatherProvider::new("::", "key", Units::Metric, Duration::from_secs(1));
        assert!(matches!(result, Err(WeatherError::InvalidUrl(_))));
    }

    #[test]
    fn test_endpoints_join_onto_base() {
        let provider = OpenWeatherProvider::new(
            "https://api.openweathermap.org/data/2.5/",
            "key",
            Units::Imperial,
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(
            provider.base_url.join(FORECAST_ENDPOINT).unwrap().as_str(),
            "https://api.openweathermap.org/data/2.5/forecast"
        );
        assert_eq!(provider.units(), Units::Imperial);
    }
}
