//! Weather condition categories derived from WMO weather codes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Weather condition categories mapped from WMO codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Fog,
    Rain,
    Snow,
    Showers,
    Thunderstorm,
}

impl WeatherCondition {
    /// Convert a WMO weather code to its condition category.
    /// See: https://open-meteo.com/en/docs#weathervariables
    #[must_use]
    pub fn from_wmo_code(code: u8) -> Self {
        match code {
            0 => Self::Clear,
            1..=3 => Self::PartlyCloudy,
            4..=48 => Self::Fog,
            49..=67 => Self::Rain,
            68..=77 => Self::Snow,
            78..=82 => Self::Showers,
            _ => Self::Thunderstorm,
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherCondition::Clear => write!(f, "Clear"),
            WeatherCondition::PartlyCloudy => write!(f, "Partly cloudy"),
            WeatherCondition::Fog => write!(f, "Fog"),
            WeatherCondition::Rain => write!(f, "Rain"),
            WeatherCondition::Snow => write!(f, "Snow"),
            WeatherCondition::Showers => write!(f, "Showers"),
            WeatherCondition::Thunderstorm => write!(f, "Thunderstorm"),
        }
    }
}

/// Convert a WMO weather code to a human-readable description
#[must_use]
pub fn weather_code_to_description(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}
