//! Error types and handling for the forecast dashboard

use thiserror::Error;

/// Main error type for forecast retrieval and derivation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Coordinates outside the valid range, rejected before any I/O
    #[error("Invalid location: {message}")]
    InvalidLocation { message: String },

    /// Transport failure, timeout or non-success HTTP status
    #[error("Network failure: {message}")]
    NetworkFailure { message: String },

    /// Missing or mis-shaped fields in the provider response
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    /// Projection requested for a measurement we do not know
    #[error("Unknown measurement: {name}")]
    UnknownMeasurement { name: String },

    /// Page size of zero
    #[error("Invalid page size: {size}")]
    InvalidPageSize { size: usize },

    /// Day index outside the daily sequence
    #[error("Day index {index} out of range (forecast has {days} days)")]
    DayOutOfRange { index: usize, days: usize },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl ForecastError {
    /// Create a new invalid location error
    pub fn invalid_location<S: Into<String>>(message: S) -> Self {
        Self::InvalidLocation {
            message: message.into(),
        }
    }

    /// Create a new network failure
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::NetworkFailure {
            message: message.into(),
        }
    }

    /// Create a new malformed response error
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    pub fn unknown_measurement<S: Into<String>>(name: S) -> Self {
        Self::UnknownMeasurement { name: name.into() }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ForecastError::InvalidLocation { message } => {
                format!("The selected location is not valid: {message}")
            }
            ForecastError::NetworkFailure { message } => format!(
                "Unable to load weather data ({message}). Please check your internet connection and try again."
            ),
            ForecastError::MalformedResponse { .. } => {
                "The weather service returned unexpected data. Please try again later.".to_string()
            }
            ForecastError::UnknownMeasurement { name } => {
                format!("'{name}' is not an available measurement")
            }
            ForecastError::InvalidPageSize { .. } | ForecastError::DayOutOfRange { .. } => {
                "The requested view is not available.".to_string()
            }
            ForecastError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for ForecastError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ForecastError::network(format!("request timed out: {err}"))
        } else if err.is_connect() {
            ForecastError::network(format!("could not connect: {err}"))
        } else if err.is_decode() {
            ForecastError::malformed(err.to_string())
        } else {
            ForecastError::network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::malformed(err.to_string())
    }
}
