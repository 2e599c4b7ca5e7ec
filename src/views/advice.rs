//! Descriptive wind/UV text and daily tips derived from a snapshot

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::day_window::DayWindow;
use crate::ForecastError;
use crate::models::{HourlySeries, NormalizedForecast};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindDescription {
    Calm,
    LightBreeze,
    ModerateBreeze,
    StrongBreeze,
    StrongWind,
}

impl WindDescription {
    /// Speed in km/h
    #[must_use]
    pub fn from_speed(speed: f64) -> Self {
        match speed {
            s if s < 5.0 => Self::Calm,
            s if s < 15.0 => Self::LightBreeze,
            s if s < 25.0 => Self::ModerateBreeze,
            s if s < 35.0 => Self::StrongBreeze,
            _ => Self::StrongWind,
        }
    }
}

impl fmt::Display for WindDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Calm => "Calm",
            Self::LightBreeze => "Light breeze",
            Self::ModerateBreeze => "Moderate breeze",
            Self::StrongBreeze => "Strong breeze",
            Self::StrongWind => "Strong wind",
        };
        write!(f, "{text}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UvRisk {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl UvRisk {
    #[must_use]
    pub fn from_index(uv: f64) -> Self {
        match uv {
            u if u <= 2.0 => Self::Low,
            u if u <= 5.0 => Self::Moderate,
            u if u <= 7.0 => Self::High,
            u if u <= 10.0 => Self::VeryHigh,
            _ => Self::Extreme,
        }
    }

    #[must_use]
    pub fn recommendation(self) -> &'static str {
        match self {
            Self::Low => "Low - no protection required",
            Self::Moderate => "Moderate - use sunscreen",
            Self::High => "High - protection required",
            Self::VeryHigh => "Very high - extra protection",
            Self::Extreme => "Extreme - avoid direct exposure",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipCategory {
    Hydration,
    Clothing,
    Transport,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tip {
    pub category: TipCategory,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advice {
    /// Wind at the current hour in km/h
    pub wind_speed: f64,
    pub wind_description: WindDescription,
    pub soil_temperature: Option<f64>,
    pub uv_risk: Option<UvRisk>,
    pub tips: Vec<Tip>,
    /// Sum of hourly rain over the selected day, in mm
    pub accumulated_rain: f64,
}

/// Hourly index matching the current reading's time truncated to the hour.
#[must_use]
pub fn current_hour_index(forecast: &NormalizedForecast) -> Option<usize> {
    let hour = truncate_to_hour(forecast.current.time)?;
    forecast.hourly.time.binary_search(&hour).ok()
}

fn truncate_to_hour(time: NaiveDateTime) -> Option<NaiveDateTime> {
    time.with_minute(0)?.with_second(0)?.with_nanosecond(0)
}

/// Gaps count as no rain.
#[must_use]
pub fn accumulated_rain(hourly: &HourlySeries, window: &DayWindow) -> f64 {
    window.iter().filter_map(|i| hourly.rain[i]).sum()
}

#[must_use]
pub fn tips(temperature: f64, rain: f64, wind_speed: f64) -> Vec<Tip> {
    let hydration = if temperature > 25.0 {
        "Drink water regularly due to high temperatures"
    } else {
        "Keep normal hydration"
    };

    let clothing = if temperature > 25.0 {
        "Light, light-coloured clothing recommended"
    } else if temperature < 15.0 {
        "Wear warm clothes in layers"
    } else {
        "Comfortable seasonal clothing"
    };

    let transport = if rain > 0.0 {
        "Drive carefully due to rain"
    } else if wind_speed > 20.0 {
        "Strong winds - take care on the road"
    } else {
        "Normal driving conditions"
    };

    vec![
        Tip {
            category: TipCategory::Hydration,
            text: hydration.to_string(),
        },
        Tip {
            category: TipCategory::Clothing,
            text: clothing.to_string(),
        },
        Tip {
            category: TipCategory::Transport,
            text: transport.to_string(),
        },
    ]
}

/// Advice for `day`. Hourly wind and soil temperature come from the current
/// hour; when that hour is not in the hourly series the current wind reading
/// stands in and soil temperature is unknown.
pub fn advise(
    forecast: &NormalizedForecast,
    window: &DayWindow,
    day: usize,
) -> Result<Advice, ForecastError> {
    forecast.check_day(day)?;
    let hourly = &forecast.hourly;
    let current = &forecast.current;

    let hour = current_hour_index(forecast);
    let wind_speed = hour
        .and_then(|i| hourly.wind_speed[i])
        .unwrap_or(current.wind_speed);
    let soil_temperature = hour.and_then(|i| hourly.soil_temperature[i]);

    Ok(Advice {
        wind_speed,
        wind_description: WindDescription::from_speed(wind_speed),
        soil_temperature,
        uv_risk: forecast.daily.uv_index_max[day].map(UvRisk::from_index),
        tips: tips(current.temperature, current.rain, wind_speed),
        accumulated_rain: accumulated_rain(hourly, window),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::forecast::fixtures::{at, forecast};
    use crate::views::day_window::resolve_day;
    use chrono::Duration;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, WindDescription::Calm)]
    #[case(4.9, WindDescription::Calm)]
    #[case(5.0, WindDescription::LightBreeze)]
    #[case(24.9, WindDescription::ModerateBreeze)]
    #[case(25.0, WindDescription::StrongBreeze)]
    #[case(35.0, WindDescription::StrongWind)]
    fn test_wind_description(#[case] speed: f64, #[case] expected: WindDescription) {
        assert_eq!(WindDescription::from_speed(speed), expected);
    }

    #[rstest]
    #[case(2.0, UvRisk::Low)]
    #[case(2.1, UvRisk::Moderate)]
    #[case(5.0, UvRisk::Moderate)]
    #[case(7.0, UvRisk::High)]
    #[case(10.0, UvRisk::VeryHigh)]
    #[case(11.0, UvRisk::Extreme)]
    fn test_uv_risk(#[case] uv: f64, #[case] expected: UvRisk) {
        assert_eq!(UvRisk::from_index(uv), expected);
    }

    #[test]
    fn test_tips() {
        let hot = tips(30.0, 0.0, 25.0);
        assert!(hot[0].text.starts_with("Drink water"));
        assert!(hot[1].text.starts_with("Light"));
        assert!(hot[2].text.starts_with("Strong winds"));

        let cold_and_wet = tips(10.0, 0.4, 25.0);
        assert_eq!(cold_and_wet[0].text, "Keep normal hydration");
        assert!(cold_and_wet[1].text.contains("layers"));
        assert!(cold_and_wet[2].text.contains("rain"));

        let mild = tips(20.0, 0.0, 10.0);
        assert_eq!(mild[1].text, "Comfortable seasonal clothing");
        assert_eq!(mild[2].text, "Normal driving conditions");
    }

    #[test]
    fn test_current_hour_index_truncates() {
        let mut forecast = forecast(2, 48);
        assert_eq!(current_hour_index(&forecast), Some(10));

        forecast.current.time = at(1, 10) + Duration::minutes(45);
        assert_eq!(current_hour_index(&forecast), Some(10));

        forecast.current.time = at(3, 1);
        assert_eq!(current_hour_index(&forecast), None);
    }

    #[test]
    fn test_accumulated_rain_skips_gaps() {
        let mut forecast = forecast(2, 48);
        forecast.hourly.rain[1] = None;
        let window = resolve_day(&forecast, 0).unwrap();
        // 0.1 * (0 + 2 + 3 + ... + 23)
        let expected = 0.1 * f64::from((0..24).sum::<u32>() - 1);
        assert!((accumulated_rain(&forecast.hourly, &window) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_advise_uses_current_hour() {
        let forecast = forecast(2, 48);
        let window = resolve_day(&forecast, 1).unwrap();
        let advice = advise(&forecast, &window, 1).unwrap();

        assert_eq!(advice.wind_speed, 5.0);
        assert_eq!(advice.wind_description, WindDescription::LightBreeze);
        assert_eq!(advice.soil_temperature, Some(3.0));
        assert_eq!(advice.uv_risk, Some(UvRisk::High));
        assert_eq!(advice.tips.len(), 3);
    }

    #[test]
    fn test_advise_without_current_hour_falls_back() {
        let forecast = forecast(2, 6);
        let window = resolve_day(&forecast, 1).unwrap();
        let advice = advise(&forecast, &window, 1).unwrap();

        assert_eq!(advice.wind_speed, 12.0);
        assert_eq!(advice.soil_temperature, None);
        assert_eq!(advice.accumulated_rain, 0.0);
    }
}
