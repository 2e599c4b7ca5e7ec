//! Forecast retrieval
//!
//! `ForecastFetcher` is the seam between the dashboard and the data provider.
//! The HTTP implementation lives in [`open_meteo`].

use async_trait::async_trait;

use crate::ForecastError;
use crate::models::{Location, NormalizedForecast};

pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

/// Retrieves one normalized forecast snapshot for a location.
///
/// Implementations must reject invalid coordinates before doing any I/O and
/// must never retry on their own.
#[async_trait]
pub trait ForecastFetcher: Send + Sync + 'static {
    async fn fetch(&self, location: &Location) -> Result<NormalizedForecast, ForecastError>;
}
