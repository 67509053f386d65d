use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Format of the forecast `dt_txt` field.
pub const FORECAST_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Unit system requested from the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
    Standard,
}

impl Units {
    /// Value of the `units` query parameter
    pub fn as_query(&self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
            Self::Standard => "standard",
        }
    }

    /// Suffix for temperature labels
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
            Self::Standard => "K",
        }
    }
}

/// Weather condition categories mapped from OpenWeatherMap icon codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    #[default]
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
}

impl WeatherCondition {
    /// Convert an icon code such as `"10d"` to a condition.
    /// See: https://openweathermap.org/weather-conditions
    pub fn from_icon(icon: &str) -> Self {
        match icon.get(..2).unwrap_or_default() {
            "01" => Self::Clear,
            "02" => Self::PartlyCloudy,
            "03" | "04" => Self::Cloudy,
            "09" => Self::Drizzle,
            "10" => Self::Rain,
            "11" => Self::Thunderstorm,
            "13" => Self::Snow,
            "50" => Self::Fog,
            _ => Self::Clear, // Unknown codes default to clear
        }
    }

    /// Name of the artwork the view layer draws for this condition
    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Clear => "sun",
            Self::PartlyCloudy => "cloud_sun",
            Self::Cloudy => "cloud",
            Self::Fog => "cloud_fog",
            Self::Drizzle | Self::Rain => "cloud_rain",
            Self::Snow => "cloud_snow",
            Self::Thunderstorm => "cloud_lightning",
        }
    }
}

/// Geographic coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Used whenever no device location is available.
pub const FALLBACK_COORDINATES: Coordinates = Coordinates::new(32.6311553, 51.64102);

/// Current conditions shown at the top of the weather screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature: f64,
    pub city: String,
    pub condition_icon: String,
    pub description: String,
}

impl WeatherSnapshot {
    pub fn condition(&self) -> WeatherCondition {
        WeatherCondition::from_icon(&self.condition_icon)
    }
}

/// One 3-hourly forecast slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: NaiveDateTime,
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub description: String,
    pub icon: String,
}

impl ForecastEntry {
    pub fn condition(&self) -> WeatherCondition {
        WeatherCondition::from_icon(&self.icon)
    }
}

/// Wire format of the `weather` and `forecast` endpoints
pub mod api {
    use super::*;

    #[derive(Debug, Clone, Deserialize)]
    pub struct MainReadings {
        pub temp: f64,
        #[serde(default)]
        pub temp_min: Option<f64>,
        #[serde(default)]
        pub temp_max: Option<f64>,
    }

    #[derive(Debug, Clone, Default, Deserialize)]
    pub struct ConditionSummary {
        #[serde(default)]
        pub icon: String,
        #[serde(default)]
        pub description: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CurrentWeatherResponse {
        pub main: MainReadings,
        #[serde(default)]
        pub name: String,
        #[serde(default)]
        pub weather: Vec<ConditionSummary>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ForecastItem {
        pub dt_txt: String,
        pub main: MainReadings,
        #[serde(default)]
        pub weather: Vec<ConditionSummary>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ForecastResponse {
        #[serde(default)]
        pub list: Vec<ForecastItem>,
    }

    /// Body of an error reply, e.g. `{"cod":401,"message":"Invalid API key"}`
    #[derive(Debug, Clone, Default, Deserialize)]
    pub struct ErrorReply {
        #[serde(default)]
        pub message: Option<String>,
    }
}

impl From<api::CurrentWeatherResponse> for WeatherSnapshot {
    fn from(response: api::CurrentWeatherResponse) -> Self {
        let summary = response.weather.into_iter().next().unwrap_or_default();
        Self {
            temperature: response.main.temp,
            city: response.name,
            condition_icon: summary.icon,
            description: summary.description,
        }
    }
}

impl TryFrom<api::ForecastItem> for ForecastEntry {
    type Error = WeatherError;

    fn try_from(item: api::ForecastItem) -> Result<Self, Self::Error> {
        let timestamp = NaiveDateTime::parse_from_str(&item.dt_txt, FORECAST_TIME_FORMAT)
            .map_err(|e| WeatherError::Parse(format!("bad dt_txt {:?}: {}", item.dt_txt, e)))?;
        let summary = item.weather.into_iter().next().unwrap_or_default();
        let temp = item.main.temp;

        Ok(Self {
            timestamp,
            temp,
            temp_min: item.main.temp_min.unwrap_or(temp),
            temp_max: item.main.temp_max.unwrap_or(temp),
            description: summary.description,
            icon: summary.icon,
        })
    }
}

/// Location service errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location request timed out")]
    Timeout,
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Weather API returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
