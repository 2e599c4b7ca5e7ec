//! Threshold-based weather advisories

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::NormalizedForecast;

pub const HEAT_THRESHOLD: f64 = 35.0;
pub const COLD_THRESHOLD: f64 = 5.0;
pub const RAIN_THRESHOLD: f64 = 5.0;
pub const UV_THRESHOLD: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Danger,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Danger => write!(f, "danger"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub severity: Severity,
    pub message: String,
}

impl Alert {
    fn new(severity: Severity, message: &str) -> Self {
        Self {
            severity,
            message: message.to_string(),
        }
    }
}

/// Rules fire in a fixed order: temperature, rain, UV, then the
/// normal-conditions fallback when nothing else fired.
#[must_use]
pub fn evaluate(current_temp: f64, current_rain: f64, uv_max: Option<f64>) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if current_temp > HEAT_THRESHOLD {
        alerts.push(Alert::new(
            Severity::Danger,
            "Very high temperature - stay hydrated",
        ));
    } else if current_temp < COLD_THRESHOLD {
        alerts.push(Alert::new(
            Severity::Warning,
            "Very low temperature - dress warmly",
        ));
    }

    if current_rain > RAIN_THRESHOLD {
        alerts.push(Alert::new(
            Severity::Info,
            "Precipitation recorded - carry an umbrella",
        ));
    }

    if uv_max.is_some_and(|uv| uv > UV_THRESHOLD) {
        alerts.push(Alert::new(Severity::Warning, "High UV index - use sunscreen"));
    }

    if alerts.is_empty() {
        alerts.push(Alert::new(Severity::Info, "Normal weather conditions"));
    }

    alerts
}

/// Alerts for a snapshot: current readings plus today's UV maximum.
///
/// Alerts describe the present, so the selected day never changes them.
pub fn evaluate_forecast(forecast: &NormalizedForecast) -> Vec<Alert> {
    let current = forecast.current();
    let uv_today = forecast.daily().uv_index_max.first().copied().flatten();
    evaluate(current.temperature, current.rain, uv_today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::forecast::fixtures::forecast;
    use rstest::rstest;

    fn severities(alerts: &[Alert]) -> Vec<Severity> {
        alerts.iter().map(|a| a.severity).collect()
    }

    #[test]
    fn test_heat_only() {
        let alerts = evaluate(36.0, 0.0, Some(0.0));
        assert_eq!(severities(&alerts), vec![Severity::Danger]);
    }

    #[test]
    fn test_rain_then_uv() {
        let alerts = evaluate(20.0, 10.0, Some(9.0));
        assert_eq!(severities(&alerts), vec![Severity::Info, Severity::Warning]);
        assert!(alerts[0].message.contains("umbrella"));
        assert!(alerts[1].message.contains("UV"));
    }

    #[test]
    fn test_normal_conditions() {
        let alerts = evaluate(20.0, 0.0, Some(0.0));
        assert_eq!(alerts, vec![Alert::new(Severity::Info, "Normal weather conditions")]);
    }

    #[rstest]
    #[case(35.0, 0.0, Some(8.0), vec![Severity::Info])]
    #[case(5.0, 5.0, None, vec![Severity::Info])]
    #[case(4.9, 0.0, None, vec![Severity::Warning])]
    #[case(40.0, 6.0, Some(11.0), vec![Severity::Danger, Severity::Info, Severity::Warning])]
    #[case(-3.0, 0.0, Some(9.0), vec![Severity::Warning, Severity::Warning])]
    fn test_thresholds_are_strict(
        #[case] temp: f64,
        #[case] rain: f64,
        #[case] uv: Option<f64>,
        #[case] expected: Vec<Severity>,
    ) {
        assert_eq!(severities(&evaluate(temp, rain, uv)), expected);
    }

    #[test]
    fn test_missing_uv_never_fires() {
        let alerts = evaluate(20.0, 0.0, None);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].message, "Normal weather conditions");
    }

    #[test]
    fn test_evaluate_forecast_uses_today_uv() {
        let mut forecast = forecast(3, 24);
        forecast.daily.uv_index_max[2] = Some(10.0);
        assert_eq!(
            evaluate_forecast(&forecast),
            vec![Alert::new(Severity::Info, "Normal weather conditions")]
        );

        forecast.daily.uv_index_max[0] = Some(9.5);
        assert_eq!(severities(&evaluate_forecast(&forecast)), vec![Severity::Warning]);
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Danger).unwrap(), "\"danger\"");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
