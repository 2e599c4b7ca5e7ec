//! Configuration management for the forecast dashboard
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::ForecastError;
use crate::models::{Location, Measurement};
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default selection settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL for weather API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
    /// Number of forecast days to request
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u32,
    /// Time zone passed to the provider ("auto" resolves from coordinates)
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Default dashboard selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Name of a preset location
    #[serde(default = "default_location")]
    pub location: String,
    /// Measurement shown in the hourly chart and table
    #[serde(default = "default_measurement")]
    pub measurement: String,
    /// Rows per page in the hourly table
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_weather_timeout() -> u32 {
    30
}

fn default_forecast_days() -> u32 {
    7
}

fn default_timezone() -> String {
    "auto".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_location() -> String {
    Location::default().name
}

fn default_measurement() -> String {
    Measurement::default().key().to_string()
}

fn default_page_size() -> usize {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            timeout_seconds: default_weather_timeout(),
            forecast_days: default_forecast_days(),
            timezone: default_timezone(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
            measurement: default_measurement(),
            page_size: default_page_size(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // FORECAST_WEATHER__TIMEOUT_SECONDS=10 overrides weather.timeout_seconds
        builder = builder.add_source(
            Environment::with_prefix("FORECAST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: DashboardConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("forecast-dashboard").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<(), ForecastError> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// The configured default location, resolved against the presets.
    pub fn default_location(&self) -> Result<Location, ForecastError> {
        Location::find_preset(&self.defaults.location).ok_or_else(|| {
            ForecastError::config(format!(
                "Unknown default location '{}'. Must be one of: {}",
                self.defaults.location,
                Location::presets()
                    .iter()
                    .map(|l| l.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })
    }

    /// The configured default measurement.
    pub fn default_measurement(&self) -> Result<Measurement, ForecastError> {
        self.defaults
            .measurement
            .parse()
            .map_err(|e: ForecastError| ForecastError::config(e.to_string()))
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<(), ForecastError> {
        if self.weather.timeout_seconds == 0 || self.weather.timeout_seconds > 300 {
            return Err(ForecastError::config(
                "Weather API timeout must be between 1 and 300 seconds",
            ));
        }

        if !(7..=16).contains(&self.weather.forecast_days) {
            return Err(ForecastError::config(
                "Forecast days must be between 7 and 16",
            ));
        }

        if self.defaults.page_size == 0 || self.defaults.page_size > 168 {
            return Err(ForecastError::config(
                "Page size must be between 1 and 168",
            ));
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<(), ForecastError> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(ForecastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            )));
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(ForecastError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            )));
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(ForecastError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            ));
        }

        if self.weather.timezone.trim().is_empty() {
            return Err(ForecastError::config("Time zone cannot be empty"));
        }

        self.default_location()?;
        self.default_measurement()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.weather.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.weather.timeout_seconds, 30);
        assert_eq!(config.weather.forecast_days, 7);
        assert_eq!(config.weather.timezone, "auto");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.defaults.page_size, 10);
        assert!(config.validate().is_ok());
        assert_eq!(config.default_location().unwrap(), Location::default());
        assert_eq!(config.default_measurement().unwrap(), Measurement::Temperature);
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = DashboardConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = DashboardConfig::default();
        config.weather.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("timeout must be between"));

        let mut config = DashboardConfig::default();
        config.weather.forecast_days = 3;
        assert!(config.validate().is_err());

        let mut config = DashboardConfig::default();
        config.defaults.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_unknown_defaults() {
        let mut config = DashboardConfig::default();
        config.defaults.location = "Atlantis".to_string();
        assert!(config.validate().unwrap_err().to_string().contains("Atlantis"));

        let mut config = DashboardConfig::default();
        config.defaults.measurement = "humidity".to_string();
        assert!(config.validate().unwrap_err().to_string().contains("humidity"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[weather]\ntimeout_seconds = 12\n\n[defaults]\nlocation = \"Tokyo, Japan\"\nmeasurement = \"wind\"\npage_size = 24"
        )
        .unwrap();

        let config = DashboardConfig::load_from_path(Some(path)).unwrap();
        assert_eq!(config.weather.timeout_seconds, 12);
        assert_eq!(config.weather.forecast_days, 7);
        assert_eq!(config.defaults.page_size, 24);
        assert_eq!(config.default_location().unwrap().name, "Tokyo, Japan");
        assert_eq!(config.default_measurement().unwrap(), Measurement::WindSpeed);
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = DashboardConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("forecast-dashboard"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
