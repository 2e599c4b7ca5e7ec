//! (label, value) series for the hourly chart and table

use serde::{Deserialize, Serialize};

use super::day_window::DayWindow;
use crate::ForecastError;
use crate::models::{HourlySeries, Measurement};

/// One chart point: hour-of-day label and the measurement value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// "HH:MM"
    pub label: String,
    pub value: Option<f64>,
}

/// Project a measurement named by key, e.g. "temperature" or "wind_speed_10m".
pub fn project(
    hourly: &HourlySeries,
    measurement: &str,
    window: &DayWindow,
) -> Result<Vec<SeriesPoint>, ForecastError> {
    let measurement: Measurement = measurement.parse()?;
    Ok(project_measurement(hourly, measurement, window))
}

/// One point per window index, in window order.
#[must_use]
pub fn project_measurement(
    hourly: &HourlySeries,
    measurement: Measurement,
    window: &DayWindow,
) -> Vec<SeriesPoint> {
    let values = hourly.values(measurement);
    window
        .iter()
        .map(|i| SeriesPoint {
            label: hourly.time[i].format("%H:%M").to_string(),
            value: values[i],
        })
        .collect()
}
