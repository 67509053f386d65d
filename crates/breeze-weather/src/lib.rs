//! Weather service for Breeze
//!
//! Current conditions and the 3-hourly forecast from OpenWeatherMap, with a
//! best-effort device location that falls back to a fixed coordinate.

pub mod flow;
pub mod forecast;
pub mod location;
pub mod provider;
pub mod types;

pub use flow::{fetch_weather, WeatherFetchResult, WeatherPanel};
pub use forecast::{CurrentRow, DailyRow, HourlyCell};
pub use location::{resolve_coordinates, LocationProvider, ManualLocation};
pub use provider::{OpenWeatherProvider, WeatherService};
pub use types::*;
