//! Data models for the forecast dashboard
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates and the preset city list
//! - Forecast: The normalized current/daily/hourly snapshot
//! - Weather: WMO weather code categories and descriptions

pub mod forecast;
pub mod location;
pub mod weather;

// Re-export all public types for convenient access
pub use forecast::{CurrentConditions, DailySeries, HourlySeries, Measurement, NormalizedForecast};
pub use location::Location;
pub use weather::{WeatherCondition, weather_code_to_description};
