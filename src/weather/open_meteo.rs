//! Open-Meteo forecast client
//!
//! Issues the single forecast GET and validates the response once, at the
//! boundary, into a [`NormalizedForecast`].

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use super::ForecastFetcher;
use crate::ForecastError;
use crate::config::WeatherConfig;
use crate::models::{
    CurrentConditions, DailySeries, HourlySeries, Location, Measurement, NormalizedForecast,
};

const CURRENT_FIELDS: &[&str] = &[
    "temperature_2m",
    "rain",
    "precipitation",
    "relative_humidity_2m",
    "wind_speed_10m",
    "wind_direction_10m",
    "wind_gusts_10m",
    "weather_code",
    "cloud_cover",
    "surface_pressure",
];

const DAILY_FIELDS: &[&str] = &[
    "weather_code",
    "temperature_2m_max",
    "temperature_2m_min",
    "apparent_temperature_max",
    "apparent_temperature_min",
    "sunrise",
    "sunset",
    "daylight_duration",
    "sunshine_duration",
    "uv_index_max",
    "rain_sum",
    "precipitation_sum",
    "precipitation_hours",
    "precipitation_probability_max",
];

/// Open-Meteo forecast client
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
    forecast_days: u32,
    timezone: String,
}

impl OpenMeteoClient {
    /// Create a new client from the weather section of the configuration
    pub fn new(config: &WeatherConfig) -> Result<Self, ForecastError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("forecast-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ForecastError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            forecast_days: config.forecast_days,
            timezone: config.timezone.clone(),
        })
    }

    /// Full request URL for a location
    #[must_use]
    pub fn forecast_url(&self, location: &Location) -> String {
        let hourly: Vec<&str> = Measurement::ALL.iter().map(|m| m.api_field()).collect();
        format!(
            "{}/forecast?latitude={}&longitude={}&timezone={}&forecast_days={}&current={}&daily={}&hourly={}",
            self.base_url,
            location.latitude,
            location.longitude,
            urlencoding::encode(&self.timezone),
            self.forecast_days,
            CURRENT_FIELDS.join(","),
            DAILY_FIELDS.join(","),
            hourly.join(",")
        )
    }
}

#[async_trait]
impl ForecastFetcher for OpenMeteoClient {
    #[instrument(skip(self, location), fields(location = %location.name))]
    async fn fetch(&self, location: &Location) -> Result<NormalizedForecast, ForecastError> {
        location.validate()?;

        info!(
            "Getting {}-day forecast for coordinates: {}",
            self.forecast_days,
            location.format_coordinates()
        );
        let start_time = Instant::now();

        let url = self.forecast_url(location);
        debug!("OpenMeteo API request URL: {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!("Network error: {}", e);
            ForecastError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("HTTP error: {}", status);
            return Err(ForecastError::network(format!(
                "API request failed with status: {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown error")
            )));
        }

        let body = response.text().await.map_err(ForecastError::from)?;

        let parse_start = Instant::now();
        let raw: ForecastResponse = serde_json::from_str(&body).map_err(|e| {
            warn!("Failed to parse forecast response: {}", e);
            ForecastError::from(e)
        })?;
        let forecast = NormalizedForecast::try_from(raw)?;

        let total_duration = start_time.elapsed();
        info!(
            "Retrieved forecast with {} days and {} hours in {:.3}s (parse: {:.3}s)",
            forecast.days(),
            forecast.hourly.len(),
            total_duration.as_secs_f64(),
            parse_start.elapsed().as_secs_f64()
        );

        if total_duration.as_secs() > 5 {
            warn!(
                "Slow forecast API response: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(forecast)
    }
}

/// Forecast response from `OpenMeteo`. Every requested field is required.
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub timezone: String,
    pub utc_offset_seconds: i32,
    pub current: CurrentData,
    pub daily: DailyData,
    pub hourly: HourlyData,
}

#[derive(Debug, Deserialize)]
pub struct CurrentData {
    pub time: String,
    pub temperature_2m: f64,
    pub rain: f64,
    pub precipitation: f64,
    pub relative_humidity_2m: f64,
    pub wind_speed_10m: f64,
    pub wind_direction_10m: f64,
    pub wind_gusts_10m: f64,
    pub weather_code: u8,
    pub cloud_cover: f64,
    pub surface_pressure: f64,
}

#[derive(Debug, Deserialize)]
pub struct DailyData {
    pub time: Vec<String>,
    pub weather_code: Vec<Option<u8>>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
    pub apparent_temperature_max: Vec<Option<f64>>,
    pub apparent_temperature_min: Vec<Option<f64>>,
    pub sunrise: Vec<Option<String>>,
    pub sunset: Vec<Option<String>>,
    pub daylight_duration: Vec<Option<f64>>,
    pub sunshine_duration: Vec<Option<f64>>,
    pub uv_index_max: Vec<Option<f64>>,
    pub rain_sum: Vec<Option<f64>>,
    pub precipitation_sum: Vec<Option<f64>>,
    pub precipitation_hours: Vec<Option<f64>>,
    pub precipitation_probability_max: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
pub struct HourlyData {
    pub time: Vec<String>,
    pub temperature_2m: Vec<Option<f64>>,
    pub rain: Vec<Option<f64>>,
    pub precipitation: Vec<Option<f64>>,
    pub visibility: Vec<Option<f64>>,
    pub wind_speed_10m: Vec<Option<f64>>,
    pub soil_temperature_0cm: Vec<Option<f64>>,
    pub uv_index: Vec<Option<f64>>,
}

impl TryFrom<ForecastResponse> for NormalizedForecast {
    type Error = ForecastError;

    fn try_from(response: ForecastResponse) -> Result<Self, Self::Error> {
        let current = response.current;
        let current = CurrentConditions {
            time: parse_timestamp("current.time", &current.time)?,
            temperature: current.temperature_2m,
            rain: current.rain,
            precipitation: current.precipitation,
            humidity: current.relative_humidity_2m,
            wind_speed: current.wind_speed_10m,
            wind_direction: current.wind_direction_10m,
            wind_gusts: current.wind_gusts_10m,
            weather_code: current.weather_code,
            cloud_cover: current.cloud_cover,
            pressure: current.surface_pressure,
        };

        let daily = response.daily;
        let daily = DailySeries {
            time: daily
                .time
                .iter()
                .map(|s| parse_date("daily.time", s))
                .collect::<Result<_, _>>()?,
            weather_code: daily.weather_code,
            temperature_max: daily.temperature_2m_max,
            temperature_min: daily.temperature_2m_min,
            apparent_temperature_max: daily.apparent_temperature_max,
            apparent_temperature_min: daily.apparent_temperature_min,
            sunrise: parse_optional_timestamps("daily.sunrise", &daily.sunrise)?,
            sunset: parse_optional_timestamps("daily.sunset", &daily.sunset)?,
            daylight_duration: daily.daylight_duration,
            sunshine_duration: daily.sunshine_duration,
            uv_index_max: daily.uv_index_max,
            rain_sum: daily.rain_sum,
            precipitation_sum: daily.precipitation_sum,
            precipitation_hours: daily.precipitation_hours,
            precipitation_probability_max: daily.precipitation_probability_max,
        };

        let hourly = response.hourly;
        let hourly = HourlySeries {
            time: hourly
                .time
                .iter()
                .map(|s| parse_timestamp("hourly.time", s))
                .collect::<Result<_, _>>()?,
            temperature: hourly.temperature_2m,
            rain: hourly.rain,
            precipitation: hourly.precipitation,
            visibility: hourly.visibility,
            wind_speed: hourly.wind_speed_10m,
            soil_temperature: hourly.soil_temperature_0cm,
            uv_index: hourly.uv_index,
        };

        NormalizedForecast::new(
            response.timezone,
            response.utc_offset_seconds,
            current,
            daily,
            hourly,
        )
    }
}

fn parse_timestamp(field: &str, value: &str) -> Result<NaiveDateTime, ForecastError> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| ForecastError::malformed(format!("{field}: invalid timestamp '{value}': {e}")))
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ForecastError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| ForecastError::malformed(format!("{field}: invalid date '{value}': {e}")))
}

fn parse_optional_timestamps(
    field: &str,
    values: &[Option<String>],
) -> Result<Vec<Option<NaiveDateTime>>, ForecastError> {
    values
        .iter()
        .map(|value| {
            value
                .as_deref()
                .map(|s| parse_timestamp(field, s))
                .transpose()
        })
        .collect()
}
