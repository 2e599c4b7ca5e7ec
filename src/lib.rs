//! `forecast-dashboard` - multi-day weather forecast orchestration
//!
//! Retrieves one forecast snapshot per selected location, validates it into
//! a [`NormalizedForecast`], and derives the day-windowed series, pages,
//! indicators, alerts and advice a dashboard front end renders. Stale fetch
//! results are suppressed so every view reflects the latest request.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod memo;
pub mod models;
pub mod selection;
pub mod state;
pub mod views;
pub mod weather;

// Re-export core types for public API
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, DashboardView};
pub use error::ForecastError;
pub use models::{Location, Measurement, NormalizedForecast};
pub use selection::{Action, Effect, Selection};
pub use state::{ForecastState, Phase, Settlement, Snapshot, Status};
pub use weather::{ForecastFetcher, OpenMeteoClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
