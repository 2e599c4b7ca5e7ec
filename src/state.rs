//! Forecast lifecycle: which snapshot is committed and whether a fetch is in flight

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::ForecastError;
use crate::models::{Location, NormalizedForecast};

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// No fetch issued yet
    Idle,
    Loading,
    Ready,
    Failed(ForecastError),
}

/// Status as exposed to views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Idle,
    Loading,
    Ready,
    Failed,
}

impl From<&Phase> for Status {
    fn from(phase: &Phase) -> Self {
        match phase {
            Phase::Idle => Status::Idle,
            Phase::Loading => Status::Loading,
            Phase::Ready => Status::Ready,
            Phase::Failed(_) => Status::Failed,
        }
    }
}

/// An immutable, committed forecast.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Sequence number of the fetch that produced it; unique per snapshot
    pub id: u64,
    pub location: Location,
    pub forecast: Arc<NormalizedForecast>,
    pub fetched_at: DateTime<Utc>,
}

/// What `settle` did with a fetch result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Committed,
    Failed,
    /// A newer fetch was issued; the result was dropped
    Discarded,
}

/// Last-issued-wins state machine.
///
/// Every fetch gets a sequence number from [`begin`](Self::begin). A result
/// passed to [`settle`](Self::settle) only takes effect when its number is
/// the highest issued so far; anything older is dropped without touching
/// the state. On failure the previous snapshot stays readable next to the
/// error.
#[derive(Debug)]
pub struct ForecastState {
    phase: Phase,
    snapshot: Option<Snapshot>,
    issued: u64,
}

impl Default for ForecastState {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            snapshot: None,
            issued: 0,
        }
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub fn status(&self) -> Status {
        Status::from(&self.phase)
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&ForecastError> {
        match &self.phase {
            Phase::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Highest sequence number issued so far
    #[must_use]
    pub fn latest(&self) -> u64 {
        self.issued
    }

    /// Snapshot exists but does not reflect the latest completed request.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.snapshot.is_some() && self.phase != Phase::Ready
    }

    /// Enter `Loading` for a new fetch and return its sequence number.
    pub fn begin(&mut self, location: &Location) -> u64 {
        self.issued += 1;
        self.phase = Phase::Loading;
        info!(seq = self.issued, location = %location.name, "Fetching forecast");
        self.issued
    }

    pub fn settle(
        &mut self,
        seq: u64,
        location: Location,
        result: Result<NormalizedForecast, ForecastError>,
    ) -> Settlement {
        if seq != self.issued {
            debug!(
                seq,
                latest = self.issued,
                location = %location.name,
                "Discarding superseded forecast result"
            );
            return Settlement::Discarded;
        }

        match result {
            Ok(forecast) => {
                info!(
                    seq,
                    location = %location.name,
                    days = forecast.days(),
                    hours = forecast.hourly.len(),
                    "Forecast committed"
                );
                self.snapshot = Some(Snapshot {
                    id: seq,
                    location,
                    forecast: Arc::new(forecast),
                    fetched_at: Utc::now(),
                });
                self.phase = Phase::Ready;
                Settlement::Committed
            }
            Err(error) => {
                warn!(
                    seq,
                    location = %location.name,
                    error = %error,
                    retained = self.snapshot.is_some(),
                    "Forecast fetch failed"
                );
                self.phase = Phase::Failed(error);
                Settlement::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::forecast::fixtures::forecast;

    fn quito() -> Location {
        Location::new(-0.2299, -78.5249, "Quito")
    }

    fn london() -> Location {
        Location::new(51.5074, -0.1278, "London")
    }

    #[test]
    fn test_initial_state() {
        let state = ForecastState::new();
        assert_eq!(state.phase(), &Phase::Idle);
        assert!(state.snapshot().is_none());
        assert!(!state.is_stale());
    }

    #[test]
    fn test_success_commits() {
        let mut state = ForecastState::new();
        let seq = state.begin(&quito());
        assert_eq!(state.status(), Status::Loading);

        let outcome = state.settle(seq, quito(), Ok(forecast(7, 24)));
        assert_eq!(outcome, Settlement::Committed);
        assert_eq!(state.status(), Status::Ready);
        let snapshot = state.snapshot().unwrap();
        assert_eq!(snapshot.id, seq);
        assert_eq!(snapshot.location.name, "Quito");
    }

    #[test]
    fn test_last_issued_wins() {
        let mut state = ForecastState::new();
        let a = state.begin(&quito());
        let b = state.begin(&london());

        assert_eq!(state.settle(b, london(), Ok(forecast(7, 24))), Settlement::Committed);
        assert_eq!(state.settle(a, quito(), Ok(forecast(7, 24))), Settlement::Discarded);

        assert_eq!(state.snapshot().unwrap().location.name, "London");
        assert_eq!(state.status(), Status::Ready);
    }

    #[test]
    fn test_stale_result_keeps_loading() {
        let mut state = ForecastState::new();
        let a = state.begin(&quito());
        let _b = state.begin(&london());

        let outcome = state.settle(a, quito(), Err(ForecastError::network("timeout")));
        assert_eq!(outcome, Settlement::Discarded);
        assert_eq!(state.status(), Status::Loading);
        assert!(state.error().is_none());
    }

    #[test]
    fn test_failure_retains_previous_snapshot() {
        let mut state = ForecastState::new();
        let first = state.begin(&quito());
        state.settle(first, quito(), Ok(forecast(7, 24)));

        let second = state.begin(&london());
        assert!(state.is_stale());
        let outcome = state.settle(second, london(), Err(ForecastError::network("boom")));

        assert_eq!(outcome, Settlement::Failed);
        assert_eq!(state.error(), Some(&ForecastError::network("boom")));
        let retained = state.snapshot().unwrap();
        assert_eq!(retained.id, first);
        assert_eq!(retained.location.name, "Quito");
        assert!(state.is_stale());
    }

    #[test]
    fn test_failure_without_snapshot() {
        let mut state = ForecastState::new();
        let seq = state.begin(&quito());
        state.settle(seq, quito(), Err(ForecastError::malformed("missing daily")));
        assert_eq!(state.status(), Status::Failed);
        assert!(state.snapshot().is_none());
    }
}
