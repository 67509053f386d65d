use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Environment variable consulted when no weather API key is configured.
pub const WEATHER_API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Account backend settings
    #[serde(default)]
    pub auth: AuthConfig,

    /// Weather settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Base URL of the user-management REST API (trailing slash matters for joins)
    pub base_url: String,

    /// Path of the login endpoint, relative to `base_url`
    pub login_path: String,

    /// Path of the registration endpoint, relative to `base_url`
    pub register_path: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            base_url: "https://forwardreason-us.backendless.app/api/".to_string(),
            login_path: "users/login".to_string(),
            register_path: "users/register".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Unit system requested from the weather API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
    Standard,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL of the weather API
    pub base_url: String,

    /// API key; empty means "read from the environment"
    #[serde(default)]
    pub api_key: String,

    /// Unit system preference
    #[serde(default)]
    pub units: Units,

    /// Coordinate used when the device location is unavailable
    pub fallback_latitude: f64,
    pub fallback_longitude: f64,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl WeatherConfig {
    /// The configured API key, or the one from `OPENWEATHER_API_KEY`.
    pub fn resolved_api_key(&self) -> Option<String> {
        if !self.api_key.is_empty() {
            return Some(self.api_key.clone());
        }
        std::env::var(WEATHER_API_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openweathermap.org/data/2.5/".to_string(),
            api_key: String::new(),
            units: Units::Metric,
            fallback_latitude: 32.6311553,
            fallback_longitude: 51.64102,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// How long the welcome banner stays up after sign-in
    pub welcome_banner_secs: u64,

    /// Width of the slide-out menu drawer
    pub drawer_width: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            welcome_banner_secs: 5,
            drawer_width: 240.0,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("breeze");

        Self {
            config_dir,
            auth: AuthConfig::default(),
            weather: WeatherConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, writing defaults there if
    /// the file doesn't exist yet.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let mut config = Self::default();
            if let Some(parent) = config_path.parent() {
                config.config_dir = parent.to_path_buf();
            }
            config.save_to(config_path)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(config_path)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents)
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.auth.base_url, "auth.base_url", &mut result);
        self.validate_url(&self.weather.base_url, "weather.base_url", &mut result);

        if self.auth.login_path.trim().is_empty() {
            result.add_error("auth.login_path", "Login path must not be empty");
        }
        if self.auth.register_path.trim().is_empty() {
            result.add_error("auth.register_path", "Register path must not be empty");
        }

        if self.auth.timeout_secs == 0 {
            result.add_error("auth.timeout_secs", "Timeout must be greater than 0");
        }
        if self.weather.timeout_secs == 0 {
            result.add_error("weather.timeout_secs", "Timeout must be greater than 0");
        }

        if !(-90.0..=90.0).contains(&self.weather.fallback_latitude) {
            result.add_error(
                "weather.fallback_latitude",
                "Latitude must be between -90 and 90",
            );
        }
        if !(-180.0..=180.0).contains(&self.weather.fallback_longitude) {
            result.add_error(
                "weather.fallback_longitude",
                "Longitude must be between -180 and 180",
            );
        }

        // Weather still renders placeholders without a key, so only warn
        if self.weather.resolved_api_key().is_none() {
            result.add_warning(
                "weather.api_key",
                format!(
                    "No weather API key configured (set it here or via {})",
                    WEATHER_API_KEY_ENV
                ),
            );
        }

        if self.ui.welcome_banner_secs == 0 {
            result.add_warning(
                "ui.welcome_banner_secs",
                "Welcome banner disabled (0 seconds)",
            );
        }
        if self.ui.drawer_width <= 0.0 {
            result.add_error("ui.drawer_width", "Drawer width must be greater than 0");
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if !url.path().ends_with('/') {
                    result.add_warning(
                        field_name,
                        "URL has no trailing slash; relative paths will replace its last segment",
                    );
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(config_path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("breeze");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    fn config_with_key() -> Config {
        let mut config = Config::default();
        config.weather.api_key = "test-key".to_string();
        config
    }

    #[test]
    fn test_valid_default_config() {
        let result = config_with_key().validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
        assert!(result.warnings.is_empty(), "Unexpected warnings: {:?}", result.warnings);
    }

    #[test]
    fn test_invalid_url() {
        let mut config = config_with_key();
        config.auth.base_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "auth.base_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = config_with_key();
        config.weather.base_url = "ftp://api.openweathermap.org/data/2.5/".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_missing_trailing_slash_is_warning() {
        let mut config = config_with_key();
        config.auth.base_url = "https://example.com/api".to_string();
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "auth.base_url"));
    }

    #[test]
    fn test_zero_timeout_is_error() {
        let mut config = config_with_key();
        config.auth.timeout_secs = 0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "auth.timeout_secs"));
    }

    #[test]
    fn test_fallback_coordinates_out_of_range() {
        let mut config = config_with_key();
        config.weather.fallback_latitude = 123.0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "weather.fallback_latitude"));
    }

    #[test]
    fn test_configured_key_wins_over_environment() {
        let config = config_with_key();
        assert_eq!(config.weather.resolved_api_key().as_deref(), Some("test-key"));
    }

    #[test]
    fn test_default_fallback_coordinates() {
        let weather = WeatherConfig::default();
        assert_eq!(weather.fallback_latitude, 32.6311553);
        assert_eq!(weather.fallback_longitude, 51.64102);
        assert_eq!(weather.units, Units::Metric);
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.config_dir, dir.path());
        assert_eq!(config.ui.welcome_banner_secs, 5);
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.weather.units = Units::Imperial;
        config.auth.login_path = "auth/login".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.weather.units, Units::Imperial);
        assert_eq!(loaded.auth.login_path, "auth/login");
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "config_dir = \"/tmp/breeze\"\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.auth.register_path, "users/register");
        assert_eq!(loaded.ui.drawer_width, 240.0);
    }
}
