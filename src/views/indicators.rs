//! Scalar summary values for the indicator cards

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ForecastError;
use crate::models::NormalizedForecast;

/// Daily summary for one forecast day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayIndicators {
    pub date: NaiveDate,
    /// Temperature in Celsius
    pub temp_max: Option<f64>,
    pub temp_min: Option<f64>,
    pub uv_max: Option<f64>,
    /// Rain in mm
    pub rain_sum: Option<f64>,
    pub sunshine_hours: Option<f64>,
    pub day_length_hours: Option<f64>,
}

impl DayIndicators {
    /// Spread between max and min temperature
    #[must_use]
    pub fn thermal_range(&self) -> Option<f64> {
        Some(self.temp_max? - self.temp_min?)
    }
}

/// Readings at retrieval time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentIndicators {
    pub temperature: f64,
    pub rain: f64,
    pub humidity: f64,
    pub wind_speed: f64,
}

/// Daily summary; fails only when `day` is outside the forecast.
pub fn compute(forecast: &NormalizedForecast, day: usize) -> Result<DayIndicators, ForecastError> {
    forecast.check_day(day)?;
    let daily = &forecast.daily;

    Ok(DayIndicators {
        date: daily.time[day],
        temp_max: daily.temperature_max[day],
        temp_min: daily.temperature_min[day],
        uv_max: daily.uv_index_max[day],
        rain_sum: daily.rain_sum[day],
        sunshine_hours: daily.sunshine_duration[day].map(seconds_to_hours),
        day_length_hours: daily.daylight_duration[day].map(seconds_to_hours),
    })
}

#[must_use]
pub fn current(forecast: &NormalizedForecast) -> CurrentIndicators {
    let current = &forecast.current;
    CurrentIndicators {
        temperature: current.temperature,
        rain: current.rain,
        humidity: current.humidity,
        wind_speed: current.wind_speed,
    }
}

fn seconds_to_hours(seconds: f64) -> f64 {
    seconds / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::forecast::fixtures::{date, forecast};

    #[test]
    fn test_compute_day() {
        let forecast = forecast(7, 24);
        let indicators = compute(&forecast, 2).unwrap();

        assert_eq!(indicators.date, date(3));
        assert_eq!(indicators.temp_max, Some(27.0));
        assert_eq!(indicators.temp_min, Some(17.0));
        assert_eq!(indicators.uv_max, Some(7.0));
        assert_eq!(indicators.rain_sum, Some(1.5));
        assert_eq!(indicators.sunshine_hours, Some(8.0));
        assert_eq!(indicators.day_length_hours, Some(12.0));
        assert_eq!(indicators.thermal_range(), Some(10.0));
    }

    #[test]
    fn test_missing_values_stay_missing() {
        let mut forecast = forecast(2, 24);
        forecast.daily.temperature_min[0] = None;
        forecast.daily.sunshine_duration[0] = None;

        let indicators = compute(&forecast, 0).unwrap();
        assert_eq!(indicators.sunshine_hours, None);
        assert_eq!(indicators.thermal_range(), None);
    }

    #[test]
    fn test_day_out_of_range() {
        let forecast = forecast(7, 24);
        assert!(matches!(
            compute(&forecast, 7),
            Err(ForecastError::DayOutOfRange { index: 7, days: 7 })
        ));
    }

    #[test]
    fn test_current() {
        let forecast = forecast(1, 24);
        let current = current(&forecast);
        assert_eq!(current.temperature, 22.5);
        assert_eq!(current.humidity, 70.0);
    }
}
