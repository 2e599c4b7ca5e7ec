//! One row per forecast day for the daily table

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{NormalizedForecast, WeatherCondition, weather_code_to_description};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UvLevel {
    Low,
    Moderate,
    High,
}

impl UvLevel {
    #[must_use]
    pub fn from_index(uv: f64) -> Self {
        if uv > 7.0 {
            Self::High
        } else if uv > 5.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRow {
    pub date: NaiveDate,
    pub condition: Option<WeatherCondition>,
    pub description: Option<String>,
    pub temp_max: Option<f64>,
    pub temp_min: Option<f64>,
    pub apparent_max: Option<f64>,
    pub apparent_min: Option<f64>,
    /// "HH:MM" local time
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub uv_max: Option<f64>,
    pub uv_level: Option<UvLevel>,
}

#[must_use]
pub fn rows(forecast: &NormalizedForecast) -> Vec<DailyRow> {
    let daily = &forecast.daily;
    (0..daily.len())
        .map(|d| {
            let code = daily.weather_code[d];
            DailyRow {
                date: daily.time[d],
                condition: code.map(WeatherCondition::from_wmo_code),
                description: code.map(|c| weather_code_to_description(c).to_string()),
                temp_max: daily.temperature_max[d],
                temp_min: daily.temperature_min[d],
                apparent_max: daily.apparent_temperature_max[d],
                apparent_min: daily.apparent_temperature_min[d],
                sunrise: daily.sunrise[d].map(clock),
                sunset: daily.sunset[d].map(clock),
                uv_max: daily.uv_index_max[d],
                uv_level: daily.uv_index_max[d].map(UvLevel::from_index),
            }
        })
        .collect()
}

fn clock(time: NaiveDateTime) -> String {
    time.format("%H:%M").to_string()
}
