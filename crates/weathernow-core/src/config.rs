use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Placeholder written into a fresh config file until the user supplies a key.
pub const API_KEY_PLACEHOLDER: &str = "REPLACE_WITH_YOUR_WEATHERAPI_KEY";

/// Environment variable that overrides `weather.api_key`.
pub const API_KEY_ENV: &str = "WEATHERAPI_KEY";

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
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory (also holds the preference database)
    pub config_dir: PathBuf,

    /// Weather service settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Geolocation settings
    #[serde(default)]
    pub location: LocationConfig,

    /// Map view settings
    #[serde(default)]
    pub map: MapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// WeatherAPI.com key. `WEATHERAPI_KEY` takes precedence when set.
    #[serde(default = "default_api_key")]
    pub api_key: String,

    /// Base URL of the weather service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Days requested from the forecast endpoint (the first one is today)
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u32,

    /// Number of past days requested from the history endpoint
    #[serde(default = "default_history_days")]
    pub history_days: u32,

    /// Age after which a cached snapshot is no longer painted at startup
    #[serde(default = "default_freshness_minutes")]
    pub freshness_minutes: u32,

    /// Query used when geolocation is unavailable
    #[serde(default = "default_location")]
    pub default_location: String,
}

fn default_api_key() -> String {
    API_KEY_PLACEHOLDER.to_string()
}

fn default_base_url() -> String {
    "https://api.weatherapi.com/v1".to_string()
}

fn default_forecast_days() -> u32 {
    3
}

fn default_history_days() -> u32 {
    7
}

fn default_freshness_minutes() -> u32 {
    30
}

fn default_location() -> String {
    "London".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            base_url: default_base_url(),
            forecast_days: default_forecast_days(),
            history_days: default_history_days(),
            freshness_minutes: default_freshness_minutes(),
            default_location: default_location(),
        }
    }
}

impl WeatherConfig {
    /// Check if an API key is configured (not empty, not the placeholder)
    pub fn is_configured(&self) -> bool {
        let key = self.api_key.trim();
        !key.is_empty() && key != API_KEY_PLACEHOLDER
    }
}

/// Geolocation settings.
///
/// There is no system location service on most terminals, so the "use my
/// location" action resolves to these coordinates when both are set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    /// Seconds to wait for a location fix before falling back
    #[serde(default = "default_location_timeout")]
    pub timeout_secs: u64,
}

fn default_location_timeout() -> u64 {
    10
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: None,
            longitude: None,
            timeout_secs: default_location_timeout(),
        }
    }
}

impl LocationConfig {
    /// Fixed coordinates, if both halves are configured
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    pub initial_latitude: f64,
    pub initial_longitude: f64,
    pub zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_latitude: 51.505,
            initial_longitude: -0.09,
            zoom: 10,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("weathernow");

        Self {
            config_dir,
            weather: WeatherConfig::default(),
            location: LocationConfig::default(),
            map: MapConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit file, creating a default one if missing.
    ///
    /// `WEATHERAPI_KEY` overrides the key stored in the file.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut config = if config_path.exists() {
            let contents =
                std::fs::read_to_string(config_path).context("Failed to read config file")?;
            toml::from_str::<Config>(&contents).context("Failed to parse config file")?
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            tracing::info!("Wrote default configuration to {}", config_path.display());
            config
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                tracing::debug!("Using API key from {}", API_KEY_ENV);
                config.weather.api_key = key;
            }
        }

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated(config_path: Option<&Path>) -> Result<(Self, ValidationResult)> {
        let config = match config_path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
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
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.weather.base_url, "weather.base_url", &mut result);

        if !self.weather.is_configured() {
            result.add_warning(
                "weather.api_key",
                format!("No API key configured - set it in the config file or {}", API_KEY_ENV),
            );
        }

        if self.weather.forecast_days == 0 {
            result.add_error("weather.forecast_days", "Forecast must request at least one day");
        } else if self.weather.forecast_days > 14 {
            result.add_warning(
                "weather.forecast_days",
                "The weather service returns at most 14 forecast days",
            );
        }

        if self.weather.history_days == 0 {
            result.add_error("weather.history_days", "History must request at least one day");
        } else if self.weather.history_days > 7 {
            result.add_warning(
                "weather.history_days",
                "History beyond 7 days requires a paid weather plan",
            );
        }

        if self.weather.freshness_minutes == 0 {
            result.add_warning(
                "weather.freshness_minutes",
                "Cached snapshots disabled (0 minutes)",
            );
        }

        if self.weather.default_location.trim().is_empty() {
            result.add_error("weather.default_location", "Default location must not be empty");
        }

        if let Some((lat, lon)) = self.location.coordinates() {
            if !(-90.0..=90.0).contains(&lat) {
                result.add_error("location.latitude", "Latitude must be within -90..=90");
            }
            if !(-180.0..=180.0).contains(&lon) {
                result.add_error("location.longitude", "Longitude must be within -180..=180");
            }
        } else if self.location.latitude.is_some() || self.location.longitude.is_some() {
            result.add_warning(
                "location",
                "Both latitude and longitude are needed - geolocation will fall back",
            );
        }

        if self.map.zoom > 19 {
            result.add_warning("map.zoom", "Zoom level is beyond the usual tile range (>19)");
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

                if let Some(port) = url.port() {
                    if port == 0 {
                        result.add_error(field_name, "Port cannot be 0");
                    }
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Path of the SQLite file backing preferences, favorites and the snapshot cache
    pub fn database_path(&self) -> PathBuf {
        self.config_dir.join("weathernow.db")
    }

    /// Save configuration to an explicit file
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("weathernow");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    fn configured() -> Config {
        let mut config = Config::default();
        config.weather.api_key = "test-key".to_string();
        config
    }

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        // Default config should be valid (only warnings, no errors)
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
    }

    #[test]
    fn test_placeholder_key_is_warning() {
        let config = Config::default();
        assert!(!config.weather.is_configured());
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "weather.api_key"));
    }

    #[test]
    fn test_configured_key() {
        let config = configured();
        assert!(config.weather.is_configured());
        let result = config.validate();
        assert!(!result.warnings.iter().any(|w| w.field == "weather.api_key"));
    }

    #[test]
    fn test_invalid_url() {
        let mut config = configured();
        config.weather.base_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "weather.base_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = configured();
        config.weather.base_url = "ftp://api.weatherapi.com/v1".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_zero_history_days() {
        let mut config = configured();
        config.weather.history_days = 0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "weather.history_days"));
    }

    #[test]
    fn test_half_configured_location_is_warning() {
        let mut config = configured();
        config.location.latitude = Some(48.85);
        let result = config.validate();
        assert!(result.is_valid());
        assert!(config.location.coordinates().is_none());
        assert!(result.warnings.iter().any(|w| w.field == "location"));
    }

    #[test]
    fn test_out_of_range_latitude() {
        let mut config = configured();
        config.location.latitude = Some(123.0);
        config.location.longitude = Some(2.35);
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "location.latitude"));
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.weather.history_days, 7);
        assert_eq!(config.map.zoom, 10);
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = configured();
        config.weather.default_location = "Paris".to_string();
        config.location.latitude = Some(48.85);
        config.location.longitude = Some(2.35);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.weather.default_location, "Paris");
        assert_eq!(loaded.location.coordinates(), Some((48.85, 2.35)));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "config_dir = \"/tmp/weathernow\"\n\n[weather]\napi_key = \"abc\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.weather.base_url, "https://api.weatherapi.com/v1");
        assert_eq!(config.weather.freshness_minutes, 30);
        assert_eq!(config.location.timeout_secs, 10);
        assert_eq!(config.database_path(), PathBuf::from("/tmp/weathernow/weathernow.db"));
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
}
