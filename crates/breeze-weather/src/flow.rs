//! The weather fetch flow and the panel state it feeds.

use chrono::NaiveDate;

use crate::forecast::{daily_rows, hourly_cells, CurrentRow, DailyRow, HourlyCell};
use crate::location::{resolve_coordinates, LocationProvider};
use crate::provider::WeatherService;
use crate::types::{Coordinates, ForecastEntry, Units, WeatherError, WeatherSnapshot};

/// Outcome of one fetch. The two requests succeed or fail independently.
#[derive(Debug)]
pub struct WeatherFetchResult {
    pub coordinates: Coordinates,
    pub current: Result<WeatherSnapshot, WeatherError>,
    pub forecast: Result<Vec<ForecastEntry>, WeatherError>,
}

/// Resolve the location, then request current conditions and the forecast
/// concurrently. Never retries.
pub async fn fetch_weather(
    service: &dyn WeatherService,
    location: &dyn LocationProvider,
    fallback: Coordinates,
) -> WeatherFetchResult {
    let coordinates = resolve_coordinates(location, fallback).await;
    tracing::info!(
        "Fetching weather for ({}, {})",
        coordinates.latitude,
        coordinates.longitude
    );

    let (current, forecast) = tokio::join!(
        service.current_weather(coordinates),
        service.forecast(coordinates)
    );

    WeatherFetchResult {
        coordinates,
        current,
        forecast,
    }
}

/// Latest weather data for the weather screen.
///
/// Each fetch replaces what it successfully retrieved; a failed request
/// leaves the previous value in place.
#[derive(Debug, Clone, Default)]
pub struct WeatherPanel {
    current: Option<WeatherSnapshot>,
    forecast: Vec<ForecastEntry>,
    units: Units,
}

impl WeatherPanel {
    pub fn new(units: Units) -> Self {
        Self {
            units,
            ..Self::default()
        }
    }

    pub fn apply(&mut self, result: WeatherFetchResult) {
        match result.current {
            Ok(snapshot) => {
                tracing::info!("Current weather for {}: {}", snapshot.city, snapshot.temperature);
                self.current = Some(snapshot);
            }
            Err(e) => tracing::warn!("Current weather fetch failed: {}", e),
        }

        match result.forecast {
            Ok(entries) => {
                tracing::info!("Forecast updated with {} entries", entries.len());
                self.forecast = entries;
            }
            Err(e) => tracing::warn!("Forecast fetch failed: {}", e),
        }
    }

    pub fn current(&self) -> Option<&WeatherSnapshot> {
        self.current.as_ref()
    }

    pub fn forecast(&self) -> &[ForecastEntry] {
        &self.forecast
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn current_row(&self) -> CurrentRow {
        CurrentRow::from_snapshot(self.current.as_ref(), self.units)
    }

    pub fn hourly(&self) -> Vec<HourlyCell> {
        hourly_cells(&self.forecast, self.units)
    }

    pub fn daily(&self, today: NaiveDate) -> Vec<DailyRow> {
        daily_rows(&self.forecast, today, self.units)
    }
}
