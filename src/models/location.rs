//! Location model for geographic coordinates and the preset city list

use serde::{Deserialize, Serialize};

use crate::ForecastError;

/// Location coordinates
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Display name (city, country)
    pub name: String,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new<S: Into<String>>(latitude: f64, longitude: f64, name: S) -> Self {
        Self {
            latitude,
            longitude,
            name: name.into(),
        }
    }

    /// Check the coordinate ranges accepted by the provider.
    pub fn validate(&self) -> Result<(), ForecastError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ForecastError::invalid_location(format!(
                "Latitude must be between -90 and 90, got: {}",
                self.latitude
            )));
        }

        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ForecastError::invalid_location(format!(
                "Longitude must be between -180 and 180, got: {}",
                self.longitude
            )));
        }

        Ok(())
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// Locations offered by the selector, default first.
    #[must_use]
    pub fn presets() -> Vec<Location> {
        PRESETS
            .iter()
            .map(|(lat, lon, name)| Location::new(*lat, *lon, *name))
            .collect()
    }

    /// Look up a preset by name, ignoring case.
    #[must_use]
    pub fn find_preset(name: &str) -> Option<Location> {
        Self::presets()
            .into_iter()
            .find(|location| location.name.eq_ignore_ascii_case(name.trim()))
    }
}

impl Default for Location {
    fn default() -> Self {
        let (latitude, longitude, name) = PRESETS[0];
        Location::new(latitude, longitude, name)
    }
}

const PRESETS: [(f64, f64, &str); 8] = [
    (-2.1962, -79.8862, "Guayaquil, Ecuador"),
    (-0.1807, -78.4678, "Quito, Ecuador"),
    (40.7128, -74.0060, "New York, USA"),
    (51.5074, -0.1278, "London, United Kingdom"),
    (35.6762, 139.6503, "Tokyo, Japan"),
    (-34.6118, -58.3960, "Buenos Aires, Argentina"),
    (25.2048, 55.2708, "Dubai, UAE"),
    (-33.8688, 151.2093, "Sydney, Australia"),
];
