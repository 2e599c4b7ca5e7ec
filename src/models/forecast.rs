//! Normalized forecast snapshot
//!
//! A `NormalizedForecast` is produced once per successful fetch and never
//! mutated afterwards. Construction goes through [`NormalizedForecast::new`],
//! which enforces the cross-family invariants so derivation code can index
//! without re-checking.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ForecastError;

/// Readings at retrieval time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub time: NaiveDateTime,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Rain in mm
    pub rain: f64,
    /// Total precipitation in mm
    pub precipitation: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Wind speed in km/h
    pub wind_speed: f64,
    /// Wind direction in degrees (0-360, where 0/360 is North)
    pub wind_direction: f64,
    /// Wind gust speed in km/h
    pub wind_gusts: f64,
    pub weather_code: u8,
    /// Cloud cover percentage
    pub cloud_cover: f64,
    /// Surface pressure in hPa
    pub pressure: f64,
}

/// One sequence per daily field, all of length D
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    pub time: Vec<NaiveDate>,
    pub weather_code: Vec<Option<u8>>,
    pub temperature_max: Vec<Option<f64>>,
    pub temperature_min: Vec<Option<f64>>,
    pub apparent_temperature_max: Vec<Option<f64>>,
    pub apparent_temperature_min: Vec<Option<f64>>,
    pub sunrise: Vec<Option<NaiveDateTime>>,
    pub sunset: Vec<Option<NaiveDateTime>>,
    /// Seconds of daylight
    pub daylight_duration: Vec<Option<f64>>,
    /// Seconds of sunshine
    pub sunshine_duration: Vec<Option<f64>>,
    pub uv_index_max: Vec<Option<f64>>,
    pub rain_sum: Vec<Option<f64>>,
    pub precipitation_sum: Vec<Option<f64>>,
    pub precipitation_hours: Vec<Option<f64>>,
    pub precipitation_probability_max: Vec<Option<f64>>,
}

impl DailySeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    fn field_lengths(&self) -> [(&'static str, usize); 14] {
        [
            ("weather_code", self.weather_code.len()),
            ("temperature_2m_max", self.temperature_max.len()),
            ("temperature_2m_min", self.temperature_min.len()),
            ("apparent_temperature_max", self.apparent_temperature_max.len()),
            ("apparent_temperature_min", self.apparent_temperature_min.len()),
            ("sunrise", self.sunrise.len()),
            ("sunset", self.sunset.len()),
            ("daylight_duration", self.daylight_duration.len()),
            ("sunshine_duration", self.sunshine_duration.len()),
            ("uv_index_max", self.uv_index_max.len()),
            ("rain_sum", self.rain_sum.len()),
            ("precipitation_sum", self.precipitation_sum.len()),
            ("precipitation_hours", self.precipitation_hours.len()),
            (
                "precipitation_probability_max",
                self.precipitation_probability_max.len(),
            ),
        ]
    }
}

/// One sequence per hourly measurement, all of length H
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<NaiveDateTime>,
    pub temperature: Vec<Option<f64>>,
    pub rain: Vec<Option<f64>>,
    pub precipitation: Vec<Option<f64>>,
    pub visibility: Vec<Option<f64>>,
    pub wind_speed: Vec<Option<f64>>,
    pub soil_temperature: Vec<Option<f64>>,
    pub uv_index: Vec<Option<f64>>,
}

impl HourlySeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Values of one measurement, aligned with `time`.
    #[must_use]
    pub fn values(&self, measurement: Measurement) -> &[Option<f64>] {
        match measurement {
            Measurement::Temperature => &self.temperature,
            Measurement::Rain => &self.rain,
            Measurement::Precipitation => &self.precipitation,
            Measurement::Visibility => &self.visibility,
            Measurement::WindSpeed => &self.wind_speed,
            Measurement::SoilTemperature => &self.soil_temperature,
            Measurement::UvIndex => &self.uv_index,
        }
    }
}

/// A selectable hourly sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Measurement {
    #[default]
    Temperature,
    Rain,
    Precipitation,
    Visibility,
    WindSpeed,
    SoilTemperature,
    UvIndex,
}

impl Measurement {
    pub const ALL: [Measurement; 7] = [
        Measurement::Temperature,
        Measurement::Rain,
        Measurement::Precipitation,
        Measurement::Visibility,
        Measurement::WindSpeed,
        Measurement::SoilTemperature,
        Measurement::UvIndex,
    ];

    /// Short key used by selectors
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Measurement::Temperature => "temperature",
            Measurement::Rain => "rain",
            Measurement::Precipitation => "precipitation",
            Measurement::Visibility => "visibility",
            Measurement::WindSpeed => "wind",
            Measurement::SoilTemperature => "soil",
            Measurement::UvIndex => "uv",
        }
    }

    /// Provider field name
    #[must_use]
    pub fn api_field(self) -> &'static str {
        match self {
            Measurement::Temperature => "temperature_2m",
            Measurement::Rain => "rain",
            Measurement::Precipitation => "precipitation",
            Measurement::Visibility => "visibility",
            Measurement::WindSpeed => "wind_speed_10m",
            Measurement::SoilTemperature => "soil_temperature_0cm",
            Measurement::UvIndex => "uv_index",
        }
    }

    #[must_use]
    pub fn unit(self) -> &'static str {
        match self {
            Measurement::Temperature | Measurement::SoilTemperature => "°C",
            Measurement::Rain | Measurement::Precipitation => "mm",
            Measurement::Visibility => "m",
            Measurement::WindSpeed => "km/h",
            Measurement::UvIndex => "",
        }
    }
}

impl FromStr for Measurement {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Measurement::ALL
            .into_iter()
            .find(|m| m.key() == name || m.api_field() == name)
            .ok_or_else(|| ForecastError::unknown_measurement(name))
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measurement::Temperature => write!(f, "Temperature"),
            Measurement::Rain => write!(f, "Rain"),
            Measurement::Precipitation => write!(f, "Precipitation"),
            Measurement::Visibility => write!(f, "Visibility"),
            Measurement::WindSpeed => write!(f, "Wind speed"),
            Measurement::SoilTemperature => write!(f, "Soil temperature"),
            Measurement::UvIndex => write!(f, "UV index"),
        }
    }
}

/// The single snapshot produced per fetch.
///
/// Fields are only readable outside the crate, so [`NormalizedForecast::new`]
/// is the one way to build a snapshot and every committed snapshot satisfies
/// the alignment invariants that the views index by.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedForecast {
    /// Provider time zone name, e.g. "America/Guayaquil"
    pub(crate) timezone: String,
    pub(crate) utc_offset_seconds: i32,
    pub(crate) current: CurrentConditions,
    pub(crate) daily: DailySeries,
    pub(crate) hourly: HourlySeries,
}

impl NormalizedForecast {
    /// Build a snapshot, rejecting anything that breaks the alignment invariants.
    pub fn new(
        timezone: String,
        utc_offset_seconds: i32,
        current: CurrentConditions,
        daily: DailySeries,
        hourly: HourlySeries,
    ) -> Result<Self, ForecastError> {
        check_daily(&daily)?;
        check_hourly(&hourly)?;
        check_alignment(&daily.time, &hourly.time)?;

        Ok(Self {
            timezone,
            utc_offset_seconds,
            current,
            daily,
            hourly,
        })
    }

    #[must_use]
    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    #[must_use]
    pub fn utc_offset_seconds(&self) -> i32 {
        self.utc_offset_seconds
    }

    #[must_use]
    pub fn current(&self) -> &CurrentConditions {
        &self.current
    }

    #[must_use]
    pub fn daily(&self) -> &DailySeries {
        &self.daily
    }

    #[must_use]
    pub fn hourly(&self) -> &HourlySeries {
        &self.hourly
    }

    /// Number of forecast days (D)
    #[must_use]
    pub fn days(&self) -> usize {
        self.daily.len()
    }

    pub fn check_day(&self, index: usize) -> Result<(), ForecastError> {
        if index < self.days() {
            Ok(())
        } else {
            Err(ForecastError::DayOutOfRange {
                index,
                days: self.days(),
            })
        }
    }
}

fn check_daily(daily: &DailySeries) -> Result<(), ForecastError> {
    let days = daily.len();
    for (field, len) in daily.field_lengths() {
        if len != days {
            return Err(ForecastError::malformed(format!(
                "daily.{field} has {len} entries, expected {days}"
            )));
        }
    }
    if let Some(pos) = daily.time.windows(2).position(|w| w[0] >= w[1]) {
        return Err(ForecastError::malformed(format!(
            "daily.time is not strictly increasing at index {}",
            pos + 1
        )));
    }
    Ok(())
}

fn check_hourly(hourly: &HourlySeries) -> Result<(), ForecastError> {
    let hours = hourly.len();
    for measurement in Measurement::ALL {
        let len = hourly.values(measurement).len();
        if len != hours {
            return Err(ForecastError::malformed(format!(
                "hourly.{} has {len} entries, expected {hours}",
                measurement.api_field()
            )));
        }
    }
    if let Some(pos) = hourly.time.windows(2).position(|w| w[0] >= w[1]) {
        return Err(ForecastError::malformed(format!(
            "hourly.time is not strictly increasing at index {}",
            pos + 1
        )));
    }
    Ok(())
}

// Both axes are sorted, so one merge pass checks every hour has its day.
fn check_alignment(days: &[NaiveDate], hours: &[NaiveDateTime]) -> Result<(), ForecastError> {
    let mut day = 0;
    for (i, hour) in hours.iter().enumerate() {
        let date = hour.date();
        while day < days.len() && days[day] < date {
            day += 1;
        }
        if day == days.len() || days[day] != date {
            return Err(ForecastError::malformed(format!(
                "hourly.time[{i}] ({hour}) falls on a day missing from daily.time"
            )));
        }
    }
    Ok(())
}
